use crate::domain::{NewEntry, Provenance, ValidationError, WaitlistEntry, WaitlistStats};
use crate::duplicate_check;
use crate::utils::error_chain_fmt;
use crate::waitlist_store::{EntryStore, StoreError};
use secrecy::{ExposeSecret, Secret};
use serde_json::Value;
use subtle::ConstantTimeEq;
use tracing::field::display;
use uuid::Uuid;

/// Orchestrates submissions (validate, check for duplicates, persist) on top of an injected
/// `EntryStore`, and guards the administrative removal behind a shared secret.
pub struct WaitlistService<S> {
    store: S,
    admin_key: Secret<String>,
}

/// What a successful submission hands back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Submission {
    pub id: Uuid,
    pub stats: SubmissionStats,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SubmissionStats {
    pub total: u64,
    /// 1-based rank by arrival order: the total right after the insertion.
    pub position: u64,
}

#[derive(thiserror::Error)]
pub enum WaitlistError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Email already registered on waitlist")]
    Duplicate,
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Email parameter required")]
    MissingEmail,
    #[error("Email not found")]
    NotFound,
    #[error("Internal server error")]
    SubmissionFailed(#[source] StoreError),
    #[error("Failed to fetch waitlist stats")]
    StatsUnavailable(#[source] StoreError),
    #[error("Failed to remove entry")]
    RemovalFailed(#[source] StoreError),
}

impl std::fmt::Debug for WaitlistError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl WaitlistError {
    /// Maps a store failure onto the error of the operation that hit it. A duplicate caught by
    /// the store is still a duplicate, whatever the operation.
    fn from_store(e: StoreError, failed: fn(StoreError) -> Self) -> Self {
        match e {
            // The unique index caught what the early check missed.
            StoreError::DuplicateEmail => Self::Duplicate,
            e => {
                tracing::error!(
                    error.cause_chain = ?e,
                    error.message = %e,
                    "The waitlist store failed"
                );
                failed(e)
            }
        }
    }
}

impl<S: EntryStore> WaitlistService<S> {
    pub fn new(store: S, admin_key: Secret<String>) -> Self {
        Self { store, admin_key }
    }

    /// Validates `raw_input`, makes sure the email is not taken yet and stores the new entry.
    #[tracing::instrument(
        name = "Adding a new waitlist entry",
        skip(self, raw_input, provenance),
        fields(entry_email = tracing::field::Empty, entry_role = tracing::field::Empty)
    )]
    pub async fn submit(
        &self,
        raw_input: &Value,
        provenance: Provenance,
    ) -> Result<Submission, WaitlistError> {
        let new_entry = NewEntry::parse(raw_input)?;
        tracing::Span::current()
            .record("entry_email", &display(&new_entry.email))
            .record("entry_role", &new_entry.role.kind().as_str());

        if duplicate_check::is_registered(&self.store, &new_entry.email)
            .await
            .map_err(|e| WaitlistError::from_store(e, WaitlistError::SubmissionFailed))?
        {
            return Err(WaitlistError::Duplicate);
        }

        let entry = WaitlistEntry::register(new_entry, provenance);
        let stats = self
            .store
            .append(&entry)
            .await
            .map_err(|e| WaitlistError::from_store(e, WaitlistError::SubmissionFailed))?;

        tracing::info!(
            role = entry.role.kind().as_str(),
            name = %entry.name,
            email = %entry.email,
            created_at = %entry.created_at,
            "New waitlist signup"
        );

        Ok(Submission {
            id: entry.id,
            stats: SubmissionStats {
                total: stats.total,
                position: stats.total,
            },
        })
    }

    /// Aggregate counts only, never individual entries.
    #[tracing::instrument(name = "Fetching waitlist stats", skip(self))]
    pub async fn stats(&self) -> Result<WaitlistStats, WaitlistError> {
        self.store
            .stats()
            .await
            .map_err(|e| WaitlistError::from_store(e, WaitlistError::StatsUnavailable))
    }

    /// Checks `credential` against the configured admin key, in time independent of where the
    /// two keys first differ. An empty admin key authorizes nobody.
    pub fn authorize(&self, credential: &Secret<String>) -> Result<(), WaitlistError> {
        let expected = self.admin_key.expose_secret().as_bytes();
        let matches: bool = credential.expose_secret().as_bytes().ct_eq(expected).into();
        if expected.is_empty() || !matches {
            tracing::warn!("Rejected a waitlist administration request with a wrong admin key");
            return Err(WaitlistError::Unauthorized);
        }
        Ok(())
    }

    #[tracing::instrument(name = "Removing a waitlist entry", skip(self, credential))]
    pub async fn remove_by_email(
        &self,
        email: &str,
        credential: &Secret<String>,
    ) -> Result<(), WaitlistError> {
        self.authorize(credential)?;
        if email.trim().is_empty() {
            return Err(WaitlistError::MissingEmail);
        }

        let removed = self
            .store
            .remove(email)
            .await
            .map_err(|e| WaitlistError::from_store(e, WaitlistError::RemovalFailed))?;
        if removed {
            tracing::info!("Removed waitlist entry");
            Ok(())
        } else {
            Err(WaitlistError::NotFound)
        }
    }
}
