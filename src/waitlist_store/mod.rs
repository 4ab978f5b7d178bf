//! Durable keeper of waitlist entries.
//!
//! The rest of the application only sees the `EntryStore` capability set; the Postgres
//! implementation is injected at startup.
#[cfg(test)]
mod memory;
mod postgres;

#[cfg(test)]
pub use memory::InMemoryEntryStore;
pub use postgres::PgEntryStore;

use crate::domain::{EntrantEmail, WaitlistEntry, WaitlistStats};
use crate::utils::error_chain_fmt;

pub trait EntryStore {
    /// All entries, in arrival order.
    async fn load(&self) -> Result<Vec<WaitlistEntry>, StoreError>;

    /// Whether an entry with this email is already stored (case-insensitive).
    async fn email_exists(&self, email: &EntrantEmail) -> Result<bool, StoreError>;

    /// Durably adds `entry` and returns the stats as they are right after the insertion.
    ///
    /// Fails with `StoreError::DuplicateEmail` if the email is already taken, whatever the
    /// outcome of an earlier `email_exists` check.
    async fn append(&self, entry: &WaitlistEntry) -> Result<WaitlistStats, StoreError>;

    /// Deletes every entry matching `email` (case-insensitive). Returns whether anything was
    /// removed.
    async fn remove(&self, email: &str) -> Result<bool, StoreError>;

    async fn stats(&self) -> Result<WaitlistStats, StoreError>;
}

#[derive(thiserror::Error)]
pub enum StoreError {
    #[error("An entry with this email address already exists.")]
    DuplicateEmail,
    #[error("The waitlist store did not answer in time.")]
    Timeout,
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}
