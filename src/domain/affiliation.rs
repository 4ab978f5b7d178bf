use crate::domain::text::bounded_text;

/// The organisation an entrant belongs to: a company for founders, a firm for lawyers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Affiliation(String);

impl Affiliation {
    /// `label` names the field in error messages ("Company name", "Firm name").
    pub fn parse(s: String, label: &str) -> Result<Affiliation, String> {
        bounded_text(s, label).map(Self)
    }
}

impl AsRef<str> for Affiliation {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
