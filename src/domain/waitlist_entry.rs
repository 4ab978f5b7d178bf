use crate::domain::{EntrantEmail, EntrantName, NewEntry, Role};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Where a submission came from. Captured once, at submission time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Provenance {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// One signup on the waitlist. Entries are never mutated once stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitlistEntry {
    pub id: Uuid,
    pub name: EntrantName,
    pub email: EntrantEmail,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub provenance: Provenance,
}

impl WaitlistEntry {
    /// Stamps a validated submission with a fresh id and the current time.
    pub fn register(new_entry: NewEntry, provenance: Provenance) -> Self {
        let NewEntry { name, email, role } = new_entry;
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            role,
            created_at: Utc::now(),
            provenance,
        }
    }
}
