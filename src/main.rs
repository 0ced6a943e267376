use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use blocktint::cli::{CliArgs, OutputFormat, RunConfig, RunMode};
use blocktint::config::EngineConfig;
use blocktint::dispatch::{Annotator, Decoration, PassReport};
use blocktint::extract::ExtractOptions;
use blocktint::languages::LanguageId;
use blocktint::text::LineIndexedText;
use blocktint::theme::{self, ThemeSource};
use blocktint::theme_state::ThemeState;
use blocktint::tree::java::JavaTreeProvider;
use blocktint::tree::TreeProvider;

/// JSON output for one file
#[derive(Serialize)]
struct FileOutput<'a> {
    path: &'a Path,
    decorations: &'a [Decoration],
    skipped: usize,
}

fn main() -> Result<()> {
    blocktint::tracing::init();

    let args = CliArgs::parse();
    let config = args
        .into_config(EngineConfig::load())
        .map_err(anyhow::Error::msg)?;

    match &config.mode {
        RunMode::ListThemes => list_themes(),
        RunMode::Annotate(files) => annotate_files(&config, files),
    }
}

fn list_themes() -> Result<()> {
    let mut out = io::stdout().lock();
    for info in theme::list_available_themes() {
        let source = match info.source {
            ThemeSource::User => "user",
            ThemeSource::Builtin => "builtin",
        };
        writeln!(out, "{:<20} {:<24} {}", info.id, info.name, source)?;
    }
    Ok(())
}

fn annotate_files(config: &RunConfig, files: &[PathBuf]) -> Result<()> {
    let mut theme = theme::load_theme(&config.theme)
        .map_err(anyhow::Error::msg)
        .with_context(|| format!("Failed to load theme '{}'", config.theme))?;
    if let Some(background) = config.background {
        theme.background = background;
    }

    let state = Arc::new(ThemeState::from_theme(&theme));
    let options = ExtractOptions {
        indent_guides: config.indent_guides,
    };
    let annotator = Annotator::new(state, options);
    let mut provider = JavaTreeProvider::new().context("Failed to load the Java grammar")?;

    let mut out = io::stdout().lock();
    for path in files {
        let language = LanguageId::from_path(path);
        if !language.has_tree_provider() {
            tracing::warn!(
                "Skipping {}: no syntax trees for {}",
                path.display(),
                language.display_name()
            );
            continue;
        }

        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let tree = provider
            .parse(&source)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        let text = LineIndexedText::new(&source);
        let (decorations, report) = annotator.annotate_to_vec(&tree, &text);

        match config.format {
            OutputFormat::Text => write_text(&mut out, path, &text, &decorations)?,
            OutputFormat::Json => write_json(&mut out, path, &decorations, &report)?,
        }
    }
    Ok(())
}

fn write_text(
    out: &mut impl Write,
    path: &Path,
    text: &LineIndexedText,
    decorations: &[Decoration],
) -> Result<()> {
    for decoration in decorations {
        let (start_line, start_col) = text.line_col(decoration.range.start);
        let (end_line, end_col) = text.line_col(decoration.range.end);
        writeln!(
            out,
            "{}:{}:{}-{}:{} {} {}",
            path.display(),
            start_line + 1,
            start_col + 1,
            end_line + 1,
            end_col + 1,
            decoration.category.name(),
            decoration.color
        )?;
    }
    Ok(())
}

fn write_json(
    out: &mut impl Write,
    path: &Path,
    decorations: &[Decoration],
    report: &PassReport,
) -> Result<()> {
    let output = FileOutput {
        path,
        decorations,
        skipped: report.violations.len(),
    };
    serde_json::to_writer(&mut *out, &output)?;
    writeln!(out)?;
    Ok(())
}
