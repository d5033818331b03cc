//! JSON snapshot output.

use std::io::Write;
use std::path::Path;

use activecalls_core::Incident;

/// Renders incidents as an indented JSON array.
///
/// # Errors
///
/// Returns the `serde_json` error if serialization fails.
pub(crate) fn render_incidents(incidents: &[Incident]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(incidents)
}

/// Prints the snapshot to `out` and persists it to `path`.
///
/// An empty incident list is a no-op apart from a warning. A failed file
/// write is logged and does not fail the run. Returns whether anything was
/// emitted.
///
/// # Errors
///
/// Returns an error if serialization or writing to `out` fails.
pub(crate) fn emit_snapshot<W: Write>(
    incidents: &[Incident],
    out: &mut W,
    path: &Path,
) -> anyhow::Result<bool> {
    if incidents.is_empty() {
        tracing::warn!("no incident data was scraped");
        return Ok(false);
    }

    let json = render_incidents(incidents)?;
    writeln!(out, "{json}")?;
    out.flush()?;

    match std::fs::write(path, &json) {
        Ok(()) => tracing::info!(path = %path.display(), "incident data written"),
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "could not write incident data");
        }
    }
    Ok(true)
}
