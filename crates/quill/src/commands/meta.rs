//! `quill meta` command implementation.

use std::path::PathBuf;

use clap::Args;
use quill_renderer::MetadataResult;

use super::{log_warnings, read_input};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the meta command.
#[derive(Args)]
pub(crate) struct MetaArgs {
    /// Source document, or `-` to read from stdin.
    input: PathBuf,
}

impl MetaArgs {
    /// Execute the meta command.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be read.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let source = read_input(&self.input)?;
        let result = quill_renderer::get_metadata(&source);
        log_warnings(&self.input, &result.warnings);

        Output::new().content(&metadata_json(&result)?)?;
        Ok(())
    }
}

/// Pretty JSON for a front-matter read; warnings go to the log instead.
pub(crate) fn metadata_json(result: &MetadataResult) -> Result<String, CliError> {
    let value = serde_json::json!({
        "found": result.found,
        "metadata": result.metadata,
    });
    Ok(serde_json::to_string_pretty(&value)?)
}
