mod health_check;
mod helpers;
mod waitlist_removal;
mod waitlist_stats;
