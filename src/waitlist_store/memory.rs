use crate::domain::{EntrantEmail, WaitlistEntry, WaitlistStats};
use crate::duplicate_check::{contains_email, same_email};
use crate::waitlist_store::{EntryStore, StoreError};
use std::sync::Mutex;

/// An `EntryStore` living in memory, for tests that do not need Postgres.
///
/// The mutex serialises check-and-append, playing the role of the unique index.
#[derive(Default)]
pub struct InMemoryEntryStore {
    entries: Mutex<Vec<WaitlistEntry>>,
}

impl InMemoryEntryStore {
    fn with_entries<T>(
        &self,
        f: impl FnOnce(&mut Vec<WaitlistEntry>) -> T,
    ) -> Result<T, StoreError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| anyhow::anyhow!("The in-memory waitlist lock is poisoned."))?;
        Ok(f(&mut entries))
    }
}

impl EntryStore for InMemoryEntryStore {
    async fn load(&self) -> Result<Vec<WaitlistEntry>, StoreError> {
        self.with_entries(|entries| entries.clone())
    }

    async fn email_exists(&self, email: &EntrantEmail) -> Result<bool, StoreError> {
        self.with_entries(|entries| contains_email(entries, email.as_ref()))
    }

    async fn append(&self, entry: &WaitlistEntry) -> Result<WaitlistStats, StoreError> {
        self.with_entries(|entries| {
            if contains_email(entries, entry.email.as_ref()) {
                return Err(StoreError::DuplicateEmail);
            }
            entries.push(entry.clone());
            Ok(WaitlistStats::from_entries(entries))
        })?
    }

    async fn remove(&self, email: &str) -> Result<bool, StoreError> {
        self.with_entries(|entries| {
            let before = entries.len();
            entries.retain(|e| !same_email(e.email.as_ref(), email));
            entries.len() != before
        })
    }

    async fn stats(&self) -> Result<WaitlistStats, StoreError> {
        self.with_entries(|entries| WaitlistStats::from_entries(entries))
    }
}
