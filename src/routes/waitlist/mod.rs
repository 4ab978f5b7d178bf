mod delete;
mod get;
mod post;

pub use delete::remove_from_waitlist;
pub use get::waitlist_stats;
pub use post::join_waitlist;

use crate::domain::FieldError;
use crate::waitlist_service::WaitlistError;
use actix_web::http::StatusCode;
use actix_web::{error::InternalError, web, HttpResponse, ResponseError};

/// Request bodies for the waitlist are a handful of short strings.
const MAX_BODY_BYTES: usize = 16 * 1024;

/// The JSON shape of every error answered by the waitlist endpoints.
#[derive(serde::Serialize)]
struct ErrorBody<'a> {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a [FieldError]>,
}

impl ResponseError for WaitlistError {
    fn status_code(&self) -> StatusCode {
        match self {
            WaitlistError::Validation(_)
            | WaitlistError::Duplicate
            | WaitlistError::MissingEmail => StatusCode::BAD_REQUEST,
            WaitlistError::Unauthorized => StatusCode::UNAUTHORIZED,
            WaitlistError::NotFound => StatusCode::NOT_FOUND,
            WaitlistError::SubmissionFailed(_)
            | WaitlistError::StatsUnavailable(_)
            | WaitlistError::RemovalFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let details = match self {
            WaitlistError::Validation(e) => Some(e.details()),
            _ => None,
        };
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
            details,
        })
    }
}

/// Bodies that are not JSON at all never reach the validator; they get a plain 400.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(MAX_BODY_BYTES)
        .error_handler(|err, _request| {
            tracing::warn!(error = %err, "Rejected a malformed waitlist request body");
            let response = HttpResponse::BadRequest().json(ErrorBody {
                error: "Invalid request body".into(),
                details: None,
            });
            InternalError::from_response(err, response).into()
        })
}
