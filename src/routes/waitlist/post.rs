use crate::domain::Provenance;
use crate::waitlist_service::{SubmissionStats, WaitlistError, WaitlistService};
use crate::waitlist_store::EntryStore;
use actix_web::http::header::USER_AGENT;
use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::Value;
use uuid::Uuid;

#[derive(serde::Serialize)]
struct JoinResponse {
    success: bool,
    message: &'static str,
    id: Uuid,
    stats: SubmissionStats,
}

/// The body is untyped JSON: the validator picks the founder or the lawyer shape from `role` and
/// reports every offending field.
#[tracing::instrument(name = "Joining the waitlist", skip(body, request, service))]
pub async fn join_waitlist<S: EntryStore + 'static>(
    body: web::Json<Value>,
    request: HttpRequest,
    service: web::Data<WaitlistService<S>>,
) -> Result<HttpResponse, WaitlistError> {
    let submission = service
        .submit(&body.into_inner(), provenance(&request))
        .await?;

    Ok(HttpResponse::Ok().json(JoinResponse {
        success: true,
        message: "Successfully added to waitlist",
        id: submission.id,
        stats: submission.stats,
    }))
}

/// `realip_remote_addr` honours `Forwarded`/`X-Forwarded-For` and falls back to the peer address.
fn provenance(request: &HttpRequest) -> Provenance {
    let ip_address = request
        .connection_info()
        .realip_remote_addr()
        .map(str::to_owned);
    let user_agent = request
        .headers()
        .get(USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    Provenance {
        ip_address,
        user_agent,
    }
}
