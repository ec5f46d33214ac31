//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod meta;
pub(crate) mod render;

pub(crate) use build::BuildArgs;
pub(crate) use meta::MetaArgs;
pub(crate) use render::RenderArgs;

use std::io::Read;
use std::path::Path;

use crate::error::CliError;

/// Path argument value that selects stdin.
const STDIN_ARG: &str = "-";

/// Read a source document from a file, or from stdin when `input` is `-`.
pub(crate) fn read_input(input: &Path) -> Result<String, CliError> {
    if input == Path::new(STDIN_ARG) {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }
    std::fs::read_to_string(input).map_err(|e| CliError::io_at(input, &e))
}

/// Forward renderer warnings to the log.
pub(crate) fn log_warnings(source: &Path, warnings: &[quill_renderer::Warning]) {
    for warning in warnings {
        tracing::warn!(path = %source.display(), %warning, "Render warning");
    }
}
