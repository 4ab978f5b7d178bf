/// Writes an error followed by its whole chain of sources, one per line.
///
/// `Debug` is what ends up in our logs (and in the span `tracing-actix-web` attaches to a failed
/// request): we want the full picture there, not just the outermost message.
pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}
