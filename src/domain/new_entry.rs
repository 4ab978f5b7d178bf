use crate::domain::{
    Affiliation, EntrantEmail, EntrantName, FieldError, Role, RoleKind, ValidationError,
};
use serde_json::Value;

const ROLE_MESSAGE: &str = r#"Role must be either "founder" or "lawyer""#;

/// A submission that passed validation but has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    pub name: EntrantName,
    pub email: EntrantEmail,
    pub role: Role,
}

impl NewEntry {
    /// Validates an untyped request body against the founder or the lawyer shape.
    ///
    /// `role` is the discriminant and is checked first: if it is not exactly `"founder"` or
    /// `"lawyer"` the body is rejected outright. Otherwise `name`, `email` and the role's
    /// affiliation field are checked and every failing field is reported, in that order.
    /// Fields belonging to the other role are ignored.
    pub fn parse(input: &Value) -> Result<NewEntry, ValidationError> {
        let kind = input
            .get("role")
            .and_then(Value::as_str)
            .and_then(RoleKind::parse)
            .ok_or_else(|| ValidationError::new(vec![FieldError::new("role", ROLE_MESSAGE)]))?;

        let name = required_text(input, "name", "Name").and_then(EntrantName::parse);
        let email = required_text(input, "email", "Email").and_then(EntrantEmail::parse);
        let affiliation_field = kind.affiliation_field();
        let affiliation_label = kind.affiliation_label();
        let affiliation = required_text(input, affiliation_field, affiliation_label)
            .and_then(|s| Affiliation::parse(s, affiliation_label));

        match (name, email, affiliation) {
            (Ok(name), Ok(email), Ok(affiliation)) => Ok(NewEntry {
                name,
                email,
                role: kind.with_affiliation(affiliation),
            }),
            (name, email, affiliation) => {
                let details = [
                    ("name", name.err()),
                    ("email", email.err()),
                    (affiliation_field, affiliation.err()),
                ]
                .into_iter()
                .filter_map(|(field, message)| message.map(|m| FieldError::new(field, m)))
                .collect();
                Err(ValidationError::new(details))
            }
        }
    }
}

fn required_text(input: &Value, field: &str, label: &str) -> Result<String, String> {
    match input.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        _ => Err(format!("{label} is required")),
    }
}
