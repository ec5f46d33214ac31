//! `quill render` command implementation.

use std::path::PathBuf;

use clap::Args;

use super::{log_warnings, read_input};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Source document, or `-` to read from stdin.
    input: PathBuf,

    /// Write HTML to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be read or the output cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let source = read_input(&self.input)?;
        let result = quill_renderer::render(&source);
        log_warnings(&self.input, &result.warnings);

        match &self.output {
            Some(path) => {
                std::fs::write(path, &result.html).map_err(|e| CliError::io_at(path, &e))?;
                tracing::info!(path = %path.display(), "Wrote HTML");
            }
            None => Output::new().content(&result.html)?,
        }

        Ok(())
    }
}
