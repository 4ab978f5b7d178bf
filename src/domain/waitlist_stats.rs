use crate::domain::{RoleKind, WaitlistEntry};
use chrono::{DateTime, Utc};

/// Aggregate, non-personal view of the waitlist. Always recomputed, never stored.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitlistStats {
    pub total: u64,
    pub founders: u64,
    pub lawyers: u64,
    pub last_updated: DateTime<Utc>,
}

impl WaitlistStats {
    /// `total` is derived, so it can never disagree with the per-role counts.
    pub fn from_counts(founders: u64, lawyers: u64) -> Self {
        Self {
            total: founders + lawyers,
            founders,
            lawyers,
            last_updated: Utc::now(),
        }
    }

    pub fn from_entries(entries: &[WaitlistEntry]) -> Self {
        let founders = entries
            .iter()
            .filter(|e| e.role.kind() == RoleKind::Founder)
            .count() as u64;
        let lawyers = entries.len() as u64 - founders;
        Self::from_counts(founders, lawyers)
    }
}
