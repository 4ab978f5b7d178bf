mod health_check;
mod waitlist;

pub use health_check::*;
pub use waitlist::*;
