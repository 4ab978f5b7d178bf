//! Is this email already on the waitlist?
//!
//! The check here is an early exit that lets us answer politely before touching the write path.
//! It is not atomic with the insert that follows: the store's unique constraint on email is what
//! actually keeps duplicates out.
use crate::domain::{EntrantEmail, WaitlistEntry};
use crate::waitlist_store::{EntryStore, StoreError};

/// Case-insensitive comparison of two email addresses, ignoring surrounding whitespace.
pub fn same_email(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// Whether any of `entries` was registered with `email`.
pub fn contains_email(entries: &[WaitlistEntry], email: &str) -> bool {
    entries.iter().any(|e| same_email(e.email.as_ref(), email))
}

/// Asks the store whether `email` is already taken. Read-only.
#[tracing::instrument(name = "Checking for a duplicate waitlist entry", skip(store))]
pub async fn is_registered<S: EntryStore>(
    store: &S,
    email: &EntrantEmail,
) -> Result<bool, StoreError> {
    store.email_exists(email).await
}
