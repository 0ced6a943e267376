//! Command-line argument parsing
//!
//! Supports:
//! - Annotating Java files, or every Java file under a directory
//! - Picking a theme or overriding the background
//! - Text or JSON output

use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

use crate::config::EngineConfig;
use crate::languages::LanguageId;
use crate::theme::Color;

/// Block-level background tints for Java sources
#[derive(Parser, Debug)]
#[command(
    name = "blocktint",
    version,
    about = "Block-level background tints for Java sources"
)]
pub struct CliArgs {
    /// Java files or directories to annotate
    #[arg(value_name = "PATHS")]
    pub paths: Vec<PathBuf>,

    /// Theme id (overrides config.yaml)
    #[arg(short = 't', long, value_name = "ID")]
    pub theme: Option<String>,

    /// Editor background as #RRGGBB (overrides the theme's)
    #[arg(short = 'b', long, value_name = "HEX")]
    pub background: Option<String>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// List available themes and exit
    #[arg(long)]
    pub list_themes: bool,

    /// Don't decorate leading whitespace inside if-blocks
    #[arg(long)]
    pub no_indent_guides: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One decoration per line
    Text,
    /// One JSON document per file
    Json,
}

/// What to do, derived from CLI arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    ListThemes,
    Annotate(Vec<PathBuf>),
}

/// Configuration derived from CLI arguments and the config file
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub mode: RunMode,
    pub theme: String,
    /// Replaces the theme background when set
    pub background: Option<Color>,
    pub format: OutputFormat,
    pub indent_guides: bool,
}

impl CliArgs {
    /// Merge parsed CLI args over `config`
    pub fn into_config(self, config: EngineConfig) -> Result<RunConfig, String> {
        let background = self
            .background
            .as_deref()
            .map(|hex| Color::from_hex(hex).map_err(|e| format!("--background: {}", e)))
            .transpose()?;

        let mode = if self.list_themes {
            RunMode::ListThemes
        } else if self.paths.is_empty() {
            return Err("No input files".to_string());
        } else {
            let mut files = Vec::new();
            for path in &self.paths {
                if path.is_dir() {
                    collect_java_files(path, &mut files)?;
                } else {
                    files.push(path.clone());
                }
            }
            RunMode::Annotate(files)
        };

        Ok(RunConfig {
            mode,
            theme: self.theme.unwrap_or(config.theme),
            background,
            format: self.format,
            indent_guides: config.indent_guides && !self.no_indent_guides,
        })
    }
}

/// Every `.java` file under `dir`, recursively, in path order
fn collect_java_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), String> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| format!("Failed to read directory {}: {}", dir.display(), e))?;

    let mut paths: Vec<PathBuf> = entries.filter_map(|e| e.ok()).map(|e| e.path()).collect();
    paths.sort();

    for path in paths {
        if path.is_dir() {
            collect_java_files(&path, out)?;
        } else if LanguageId::from_path(&path).has_tree_provider() {
            out.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(paths: Vec<PathBuf>) -> CliArgs {
        CliArgs {
            paths,
            theme: None,
            background: None,
            format: OutputFormat::Text,
            list_themes: false,
            no_indent_guides: false,
        }
    }

    #[test]
    fn test_empty_args_is_an_error() {
        assert!(args(vec![]).into_config(EngineConfig::default()).is_err());
    }

    #[test]
    fn test_list_themes_needs_no_paths() {
        let mut cli = args(vec![]);
        cli.list_themes = true;
        let config = cli.into_config(EngineConfig::default()).unwrap();
        assert_eq!(config.mode, RunMode::ListThemes);
    }

    #[test]
    fn test_single_file() {
        let config = args(vec![PathBuf::from("Foo.java")])
            .into_config(EngineConfig::default())
            .unwrap();
        assert_eq!(config.mode, RunMode::Annotate(vec![PathBuf::from("Foo.java")]));
        assert_eq!(config.theme, "default-dark");
        assert!(config.indent_guides);
    }

    #[test]
    fn test_flags_override_config() {
        let mut cli = args(vec![PathBuf::from("Foo.java")]);
        cli.theme = Some("default-light".to_string());
        cli.background = Some("#000000".to_string());
        cli.no_indent_guides = true;
        let config = cli.into_config(EngineConfig::default()).unwrap();
        assert_eq!(config.theme, "default-light");
        assert_eq!(config.background, Some(Color::rgb(0, 0, 0)));
        assert!(!config.indent_guides);
    }

    #[test]
    fn test_config_can_disable_indent_guides() {
        let file_config = EngineConfig {
            theme: "mine".to_string(),
            indent_guides: false,
        };
        let config = args(vec![PathBuf::from("Foo.java")])
            .into_config(file_config)
            .unwrap();
        assert_eq!(config.theme, "mine");
        assert!(!config.indent_guides);
    }

    #[test]
    fn test_bad_background() {
        let mut cli = args(vec![PathBuf::from("Foo.java")]);
        cli.background = Some("white".to_string());
        let err = cli.into_config(EngineConfig::default()).unwrap_err();
        assert!(err.starts_with("--background"));
    }

    #[test]
    fn test_directory_expands_to_java_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("pkg")).unwrap();
        std::fs::write(dir.path().join("B.java"), "class B {}").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "").unwrap();
        std::fs::write(dir.path().join("pkg").join("A.java"), "class A {}").unwrap();

        let config = args(vec![dir.path().to_path_buf()])
            .into_config(EngineConfig::default())
            .unwrap();
        assert_eq!(
            config.mode,
            RunMode::Annotate(vec![
                dir.path().join("B.java"),
                dir.path().join("pkg").join("A.java"),
            ])
        );
    }
}
