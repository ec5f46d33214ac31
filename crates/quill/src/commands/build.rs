//! `quill build` command implementation.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use quill_config::{BuildConfig, CliSettings, Config};
use rayon::prelude::*;

use super::log_warnings;
use super::meta::metadata_json;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file (default: auto-discover quill.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Output directory (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Do not write `<name>.meta.json` files.
    #[arg(long)]
    no_metadata: bool,

    /// Enable verbose output (log every rendered page).
    #[arg(short, long)]
    pub verbose: bool,
}

/// Outcome of building one page.
#[derive(Debug)]
struct PageReport {
    warnings: usize,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the source directory is missing,
    /// or any page fails to build.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            output_dir: self.output_dir,
            write_metadata: self.no_metadata.then_some(false),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let build = &config.build_resolved;

        if !build.source_dir.is_dir() {
            return Err(CliError::Validation(format!(
                "Source directory not found: {}",
                build.source_dir.display()
            )));
        }

        output.info(&format!("Source directory: {}", build.source_dir.display()));
        output.info(&format!("Output directory: {}", build.output_dir.display()));

        let start = Instant::now();
        let sources = collect_sources(build);
        let results: Vec<(&PathBuf, Result<PageReport, CliError>)> = sources
            .par_iter()
            .map(|source| (source, build_page(build, source)))
            .collect();

        let mut pages = 0;
        let mut warnings = 0;
        let mut failed = 0;
        for (source, result) in results {
            match result {
                Ok(report) => {
                    pages += 1;
                    warnings += report.warnings;
                }
                Err(err) => {
                    failed += 1;
                    output.error(&format!("{}: {err}", source.display()));
                }
            }
        }

        if failed > 0 {
            return Err(CliError::Validation(format!(
                "{failed} of {} pages failed to build",
                sources.len()
            )));
        }

        let summary = format!(
            "Built {pages} pages with {warnings} warnings in {:.2?}",
            start.elapsed()
        );
        if warnings > 0 {
            output.warning(&summary);
        } else {
            output.success(&summary);
        }

        Ok(())
    }
}

/// Collect source files under the source directory, sorted by path.
///
/// Hidden entries and the output directory are skipped.
fn collect_sources(build: &BuildConfig) -> Vec<PathBuf> {
    let mut sources = Vec::new();
    scan_directory(build, &build.source_dir, &mut sources);
    sources.sort();
    sources
}

fn scan_directory(build: &BuildConfig, dir_path: &Path, sources: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir_path) else {
        tracing::warn!(path = %dir_path.display(), "Cannot read directory");
        return;
    };

    for entry in entries.filter_map(Result::ok) {
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }

        let path = entry.path();
        let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());
        if is_dir {
            if path != build.output_dir {
                scan_directory(build, &path, sources);
            }
        } else if build.is_source(&path) {
            sources.push(path);
        }
    }
}

/// Render one source file into the mirrored location under the output directory.
fn build_page(build: &BuildConfig, source: &Path) -> Result<PageReport, CliError> {
    let relative = source.strip_prefix(&build.source_dir).map_err(|_| {
        CliError::Validation(format!(
            "{} is outside {}",
            source.display(),
            build.source_dir.display()
        ))
    })?;
    let target = build.output_dir.join(relative).with_extension("html");

    let text = fs::read_to_string(source).map_err(|e| CliError::io_at(source, &e))?;
    let rendered = quill_renderer::render(&text);
    log_warnings(source, &rendered.warnings);
    let mut warnings = rendered.warnings.len();

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|e| CliError::io_at(parent, &e))?;
    }
    fs::write(&target, &rendered.html).map_err(|e| CliError::io_at(&target, &e))?;

    if build.write_metadata {
        let metadata = quill_renderer::get_metadata(&text);
        log_warnings(source, &metadata.warnings);
        warnings += metadata.warnings.len();

        if metadata.found {
            let meta_path = target.with_extension("meta.json");
            fs::write(&meta_path, metadata_json(&metadata)?)
                .map_err(|e| CliError::io_at(&meta_path, &e))?;
        }
    }

    tracing::info!(
        source = %source.display(),
        target = %target.display(),
        warnings,
        "Rendered page"
    );

    Ok(PageReport { warnings })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn build_config(root: &Path) -> BuildConfig {
        BuildConfig {
            source_dir: root.join("content"),
            output_dir: root.join("public"),
            extension: "qm".to_owned(),
            write_metadata: true,
        }
    }

    fn args(config: PathBuf) -> BuildArgs {
        BuildArgs {
            config: Some(config),
            source_dir: None,
            output_dir: None,
            no_metadata: false,
            verbose: false,
        }
    }

    #[test]
    fn test_collect_sources_skips_hidden_and_foreign() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(&root.join("content/index.qm"), "a");
        write(&root.join("content/guide/setup.qm"), "b");
        write(&root.join("content/.drafts/secret.qm"), "c");
        write(&root.join("content/.hidden.qm"), "d");
        write(&root.join("content/notes.txt"), "e");

        let build = build_config(root);
        let sources = collect_sources(&build);

        assert_eq!(
            sources,
            vec![
                root.join("content/guide/setup.qm"),
                root.join("content/index.qm"),
            ]
        );
    }

    #[test]
    fn test_collect_sources_skips_nested_output() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(&root.join("site/page.qm"), "a");
        write(&root.join("site/out/stale.qm"), "b");

        let build = BuildConfig {
            source_dir: root.join("site"),
            output_dir: root.join("site/out"),
            extension: "qm".to_owned(),
            write_metadata: false,
        };

        assert_eq!(collect_sources(&build), vec![root.join("site/page.qm")]);
    }

    #[test]
    fn test_build_page_writes_html_and_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        let source = root.join("content/guide/setup.qm");
        write(&source, "?\ntitle=Setup\n\n# Setup\n\nRun it.");

        let report = build_page(&build_config(root), &source).unwrap();

        assert_eq!(report.warnings, 0);
        assert_eq!(
            fs::read_to_string(root.join("public/guide/setup.html")).unwrap(),
            "<h1>Setup</h1>\n<p>Run it.</p>"
        );
        let meta: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(root.join("public/guide/setup.meta.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(
            meta,
            serde_json::json!({"found": true, "metadata": {"title": "Setup"}})
        );
    }

    #[test]
    fn test_build_page_without_front_matter_skips_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        let source = root.join("content/plain.qm");
        write(&source, "Just text");

        build_page(&build_config(root), &source).unwrap();

        assert!(root.join("public/plain.html").exists());
        assert!(!root.join("public/plain.meta.json").exists());
    }

    #[test]
    fn test_build_page_counts_warnings() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        let source = root.join("content/page.qm");
        write(&source, "?\nbroken line\n\nSee (http://bad host/).");

        let report = build_page(&build_config(root), &source).unwrap();

        assert_eq!(report.warnings, 2);
    }

    #[test]
    fn test_execute_builds_tree() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        let config = root.join("quill.toml");
        write(&config, "[build]\nwrite_metadata = false\n");
        write(&root.join("content/index.qm"), "Hello **world**");
        write(&root.join("content/a/b/deep.qm"), "* one\n* two");

        args(config).execute().unwrap();

        assert_eq!(
            fs::read_to_string(root.join("public/index.html")).unwrap(),
            "<p>Hello <b>world</b></p>"
        );
        assert_eq!(
            fs::read_to_string(root.join("public/a/b/deep.html")).unwrap(),
            "<ul>\n<li>one</li>\n<li>two</li>\n</ul>"
        );
        assert!(!root.join("public/index.meta.json").exists());
    }

    #[test]
    fn test_execute_missing_source_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("quill.toml");
        write(&config, "");

        let err = args(config).execute().unwrap_err();
        assert!(matches!(err, CliError::Validation(_)));
        assert!(err.to_string().contains("Source directory not found"));
    }

    #[test]
    fn test_execute_output_override() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        let config = root.join("quill.toml");
        write(&config, "");
        write(&root.join("content/page.qm"), "text");

        let mut build_args = args(config);
        build_args.output_dir = Some(root.join("dist"));
        build_args.execute().unwrap();

        assert!(root.join("dist/page.html").exists());
        assert!(!root.join("public").exists());
    }
}
