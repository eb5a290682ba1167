//! Output formatting: JSON, compact JSON, YAML.
//!
//! Every command prints the decoded `content` (or the typed view of it)
//! through `render`, so scripts see the same shapes the API returns.

use std::io::{self, Write};

use serde::Serialize;

use crate::cli::OutputFormat;
use crate::error::CliError;

/// Render any serializable value in the chosen format.
pub fn render<T: Serialize + ?Sized>(format: OutputFormat, data: &T) -> Result<String, CliError> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(data).map_err(render_err)?,
        OutputFormat::JsonCompact => serde_json::to_string(data).map_err(render_err)?,
        OutputFormat::Yaml => serde_yaml::to_string(data).map_err(render_err)?,
    };
    Ok(rendered.trim_end().to_owned())
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

/// Render and print in one go.
pub fn emit<T: Serialize + ?Sized>(
    format: OutputFormat,
    data: &T,
    quiet: bool,
) -> Result<(), CliError> {
    let out = render(format, data)?;
    print_output(&out, quiet);
    Ok(())
}

#[allow(clippy::needless_pass_by_value)]
fn render_err(e: impl std::fmt::Display) -> CliError {
    CliError::Render {
        message: e.to_string(),
    }
}
