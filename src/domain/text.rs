use unicode_segmentation::UnicodeSegmentation;

pub(crate) const MIN_GRAPHEMES: usize = 2;
pub(crate) const MAX_GRAPHEMES: usize = 256;

/// Trims `s` and checks that what is left is between `MIN_GRAPHEMES` and `MAX_GRAPHEMES` long.
///
/// A grapheme is defined by the Unicode standard as a "user-perceived" character: `a°` is a single
/// grapheme, but it is composed of two characters (`a` and `°`). We count graphemes, using the
/// extended grapheme definition set, so that accented names are measured the way a person would.
///
/// `label` is the human readable name of the field, used to build the error message.
pub(crate) fn bounded_text(s: String, label: &str) -> Result<String, String> {
    let trimmed = s.trim();
    let length = trimmed.graphemes(true).count();

    if length < MIN_GRAPHEMES {
        Err(format!("{label} must be at least {MIN_GRAPHEMES} characters"))
    } else if length > MAX_GRAPHEMES {
        Err(format!("{label} must be at most {MAX_GRAPHEMES} characters"))
    } else if trimmed.len() == s.len() {
        Ok(s)
    } else {
        Ok(trimmed.to_string())
    }
}
