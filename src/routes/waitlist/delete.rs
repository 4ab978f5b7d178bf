use crate::waitlist_service::{WaitlistError, WaitlistService};
use crate::waitlist_store::EntryStore;
use actix_web::{web, HttpResponse};
use secrecy::Secret;

/// Both parameters are optional here: a missing one is answered with our own error body.
#[derive(serde::Deserialize)]
pub struct RemovalParameters {
    email: Option<String>,
    #[serde(rename = "adminKey")]
    admin_key: Option<Secret<String>>,
}

#[derive(serde::Serialize)]
struct RemovalResponse {
    success: bool,
    message: &'static str,
}

/// The admin key is checked before the email parameter.
#[tracing::instrument(
    name = "Removing an entry from the waitlist",
    skip(query, service),
    fields(email = ?query.email)
)]
pub async fn remove_from_waitlist<S: EntryStore + 'static>(
    query: web::Query<RemovalParameters>,
    service: web::Data<WaitlistService<S>>,
) -> Result<HttpResponse, WaitlistError> {
    let RemovalParameters { email, admin_key } = query.into_inner();
    let admin_key = admin_key.unwrap_or_else(|| Secret::new(String::new()));

    service.authorize(&admin_key)?;
    let email = email.ok_or(WaitlistError::MissingEmail)?;
    service.remove_by_email(&email, &admin_key).await?;

    Ok(HttpResponse::Ok().json(RemovalResponse {
        success: true,
        message: "Entry removed from waitlist",
    }))
}
