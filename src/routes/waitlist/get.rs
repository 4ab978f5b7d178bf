use crate::domain::WaitlistStats;
use crate::waitlist_service::{WaitlistError, WaitlistService};
use crate::waitlist_store::EntryStore;
use actix_web::{web, HttpResponse};

#[derive(serde::Serialize)]
struct StatsResponse {
    stats: WaitlistStats,
}

/// Public counters for the landing page. Never individual entries.
#[tracing::instrument(name = "Reading waitlist stats", skip(service))]
pub async fn waitlist_stats<S: EntryStore + 'static>(
    service: web::Data<WaitlistService<S>>,
) -> Result<HttpResponse, WaitlistError> {
    let stats = service.stats().await?;
    Ok(HttpResponse::Ok().json(StatsResponse { stats }))
}
