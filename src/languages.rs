//! Language identification and detection
//!
//! Maps file extensions to language IDs. Only Java has a tree provider.

use std::path::Path;

/// Supported language identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LanguageId {
    #[default]
    PlainText,
    Java,
}

impl LanguageId {
    /// Detect language from file extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "java" => LanguageId::Java,
            _ => LanguageId::PlainText,
        }
    }

    /// Detect language from file path
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(LanguageId::PlainText)
    }

    /// Get display name for the language
    pub fn display_name(&self) -> &'static str {
        match self {
            LanguageId::PlainText => "Plain Text",
            LanguageId::Java => "Java",
        }
    }

    /// Check if files of this language can be decorated
    pub fn has_tree_provider(&self) -> bool {
        matches!(self, LanguageId::Java)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(LanguageId::from_extension("java"), LanguageId::Java);
        assert_eq!(LanguageId::from_extension("JAVA"), LanguageId::Java);
        assert_eq!(LanguageId::from_extension("kt"), LanguageId::PlainText);
        assert_eq!(LanguageId::from_extension("txt"), LanguageId::PlainText);
    }

    #[test]
    fn test_from_path() {
        assert_eq!(
            LanguageId::from_path(Path::new("src/main/java/Foo.java")),
            LanguageId::Java
        );
        assert_eq!(
            LanguageId::from_path(Path::new("no_extension")),
            LanguageId::PlainText
        );
        assert!(!LanguageId::PlainText.has_tree_provider());
    }
}
