use validator::validate_email;

/// A syntactically valid email address, lower-cased, whose domain has at least two labels.
///
/// Lower-casing happens once, here, so that comparisons elsewhere can be plain equality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntrantEmail(String);

impl EntrantEmail {
    pub fn parse(s: String) -> Result<EntrantEmail, String> {
        let normalized = s.trim().to_lowercase();
        if validate_email(&normalized) && has_dotted_domain(&normalized) {
            Ok(Self(normalized))
        } else {
            Err("Please enter a valid email address".to_string())
        }
    }
}

/// `validate_email` accepts single-label domains such as `localhost`, which cannot receive mail
/// from the outside world.
fn has_dotted_domain(email: &str) -> bool {
    match email.rsplit_once('@') {
        Some((_, domain)) => domain.split('.').count() > 1 && !domain.split('.').any(str::is_empty),
        None => false,
    }
}

impl AsRef<str> for EntrantEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EntrantEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // We just forward to the Display implementation of the wrapped String.
        self.0.fmt(f)
    }
}
