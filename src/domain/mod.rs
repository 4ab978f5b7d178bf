mod affiliation;
mod entrant_email;
mod entrant_name;
mod new_entry;
mod role;
mod text;
mod validation_error;
mod waitlist_entry;
mod waitlist_stats;

pub use affiliation::Affiliation;
pub use entrant_email::EntrantEmail;
pub use entrant_name::EntrantName;
pub use new_entry::NewEntry;
pub use role::{Role, RoleKind};
pub use validation_error::{FieldError, ValidationError};
pub use waitlist_entry::{Provenance, WaitlistEntry};
pub use waitlist_stats::WaitlistStats;
