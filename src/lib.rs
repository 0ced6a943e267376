//! blocktint - block-level background tints for Java syntax trees
//!
//! This crate walks a syntax tree, picks out the parts of imports, classes,
//! methods, statements and conditionals worth tinting, and blends a
//! translucent per-category color over the editor background for each one.

pub mod blend;
pub mod category;
pub mod cli;
pub mod config;
pub mod config_paths;
pub mod dispatch;
pub mod error;
pub mod extract;
pub mod indent;
pub mod languages;
pub mod text;
pub mod theme;
pub mod theme_state;
pub mod tracing;
pub mod tree;

// Re-export commonly used types
pub use blend::{Palette, Rgb};
pub use category::HighlightCategory;
pub use config::EngineConfig;
pub use dispatch::{Annotator, Decoration, DecorationSink, Dispatcher, PassReport};
pub use extract::ExtractOptions;
pub use theme::{Color, Theme};
pub use theme_state::{RefreshHost, ThemeReactor, ThemeState};
pub use tree::{ByteRange, Node, NodeKind, SyntaxTree, TreeProvider};
