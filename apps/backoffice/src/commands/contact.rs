//! # Contact Commands
//!
//! Commands for contact search and CRUD.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use agenda_core::types::{Contact, ContactFormData};
use agenda_core::validation::validate_contact;

use crate::commands::simulate_submit_delay;
use crate::error::ApiError;
use crate::state::ContactsState;

/// Contact DTO (Data Transfer Object) for the frontend.
///
/// ## Why DTO?
/// - Decouples internal domain model from the API contract
/// - Handles serde rename to camelCase for JS consumption
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDto {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub company: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Contact> for ContactDto {
    fn from(contact: Contact) -> Self {
        ContactDto {
            id: contact.id,
            first_name: contact.first_name,
            last_name: contact.last_name,
            email: contact.email,
            phone: contact.phone,
            company: contact.company,
            notes: contact.notes,
            created_at: contact.created_at,
            updated_at: contact.updated_at,
        }
    }
}

/// Searches contacts by name, email, phone, or company.
///
/// An empty query returns the full list (newest first).
pub async fn search_contacts(contacts: &ContactsState, query: &str) -> Vec<ContactDto> {
    debug!(query, "search_contacts command");
    contacts.with(|store| {
        store
            .search(query)
            .into_iter()
            .map(ContactDto::from)
            .collect()
    })
}

/// Gets a single contact by id.
pub async fn get_contact(contacts: &ContactsState, id: &str) -> Result<ContactDto, ApiError> {
    debug!(id, "get_contact command");
    contacts.with(|store| {
        store
            .get(id)
            .cloned()
            .map(ContactDto::from)
            .ok_or_else(|| ApiError::not_found("Contact", id))
    })
}

/// Validates and creates a contact.
///
/// On validation failure nothing is persisted and the error carries the
/// per-field messages.
pub async fn create_contact(
    contacts: &ContactsState,
    form: ContactFormData,
) -> Result<ContactDto, ApiError> {
    debug!("create_contact command");

    let draft = validate_contact(&form)?;
    simulate_submit_delay().await;

    let created = contacts.with_mut(|store| store.create(draft));
    info!(id = %created.id, "contact created");
    Ok(ContactDto::from(created))
}

/// Validates and updates an existing contact.
pub async fn update_contact(
    contacts: &ContactsState,
    id: &str,
    form: ContactFormData,
) -> Result<ContactDto, ApiError> {
    debug!(id, "update_contact command");

    let draft = validate_contact(&form)?;
    simulate_submit_delay().await;

    let updated = contacts
        .with_mut(|store| store.update(id, draft))
        .ok_or_else(|| ApiError::not_found("Contact", id))?;
    info!(id, "contact updated");
    Ok(ContactDto::from(updated))
}

/// Deletes a contact. Returns whether anything was deleted; a stale id is
/// a no-op, not an error.
pub async fn delete_contact(contacts: &ContactsState, id: &str) -> bool {
    debug!(id, "delete_contact command");
    let deleted = contacts.with_mut(|store| store.delete(id));
    if deleted {
        info!(id, "contact deleted");
    }
    deleted
}

// =============================================================================
// Unit Tests
// =============================================================================
