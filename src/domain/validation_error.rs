/// A problem with a single input field, addressed by the field's name in the request body.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Every reason a submission was rejected, one entry per offending field.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Validation failed")]
pub struct ValidationError {
    details: Vec<FieldError>,
}

impl ValidationError {
    pub fn new(details: Vec<FieldError>) -> Self {
        Self { details }
    }

    pub fn details(&self) -> &[FieldError] {
        &self.details
    }
}
