use crate::domain::text::bounded_text;

/// The name of a person joining the waitlist.
///
/// # Type Driven Development
/// Making an incorrect usage pattern unrepresentable, by construction, is known as *type driven
/// development*. The only way to get hold of an `EntrantName` is through `parse`, so every instance
/// in the program satisfies our constraints. This is the "new-type pattern".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntrantName(String);

impl EntrantName {
    /// Returns an instance of `EntrantName` if the input, once trimmed, is between 2 and 256
    /// graphemes long. The error is the message shown to the person filling in the form.
    pub fn parse(s: String) -> Result<EntrantName, String> {
        bounded_text(s, "Name").map(Self)
    }
}

/// The caller gets a shared reference to the inner string. This gives the caller **read-only**
/// access, they have no way to compromise our invariants!
impl AsRef<str> for EntrantName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EntrantName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
