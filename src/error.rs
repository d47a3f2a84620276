//! Error types for blogsite

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the blogsite build
#[derive(Debug, Error)]
pub enum BlogError {
    #[error("Input directory not found: {0}")]
    MissingInputDir(PathBuf),

    /// The asset manifest could not be loaded. Always fatal.
    #[error("Failed to load asset manifest {}: {reason}", path.display())]
    ConfigLoad { path: PathBuf, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Content error in {}: {message}", path.display())]
    Content { path: PathBuf, message: String },

    #[error("Template error: {0}")]
    Template(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Flatten a Tera error; the useful part of the message is in the source chain.
pub(crate) fn tera_message(err: &tera::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    message
}

impl From<tera::Error> for BlogError {
    fn from(err: tera::Error) -> Self {
        BlogError::Template(tera_message(&err))
    }
}

impl BlogError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            BlogError::MissingInputDir(_) => 2,
            BlogError::ConfigLoad { .. } => 3,
            BlogError::Template(_) => 4,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            BlogError::MissingInputDir(path) => {
                format!(
                    "Input directory not found: {}\n\n\
                    Suggestions:\n\
                    • Run blogsite from the project root, or pass --root <DIR>\n\
                    • Set BLOG_ROOT environment variable to your project path\n\
                    • Check [dirs] input in blogsite.toml",
                    path.display()
                )
            }
            BlogError::ConfigLoad { path, reason } => {
                format!(
                    "Failed to load asset manifest {}: {}\n\n\
                    Suggestions:\n\
                    • Run the asset bundler before building for production\n\
                    • Set APP_ENV=development to use the built-in development manifest\n\
                    • Check [build] manifest in blogsite.toml",
                    path.display(),
                    reason
                )
            }
            BlogError::Template(msg) => {
                format!(
                    "Template error: {}\n\n\
                    Suggestions:\n\
                    • Check that the layout named in front matter exists in the layouts directory\n\
                    • Available filters: excerpt, readableDate, htmlDateString, head, pageTags, readingTime\n\
                    • Available shortcodes: bundledcss(), bundledjs()",
                    msg
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using BlogError
pub type Result<T> = std::result::Result<T, BlogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_input_dir_suggestion() {
        let err = BlogError::MissingInputDir(PathBuf::from("/tmp/site/src"));
        let msg = err.display_with_suggestions();
        assert!(msg.contains("--root"));
        assert!(msg.contains("BLOG_ROOT"));
        assert!(msg.contains("Suggestions"));
    }

    #[test]
    fn test_config_load_suggestions() {
        let err = BlogError::ConfigLoad {
            path: PathBuf::from("docs/assets/manifest.json"),
            reason: "No such file or directory".to_string(),
        };
        let msg = err.display_with_suggestions();
        assert!(msg.contains("docs/assets/manifest.json"));
        assert!(msg.contains("APP_ENV=development"));
    }

    #[test]
    fn test_template_error_lists_filters() {
        let err = BlogError::Template("Template 'post.html' not found".to_string());
        let msg = err.display_with_suggestions();
        assert!(msg.contains("readableDate"));
        assert!(msg.contains("bundledcss()"));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(BlogError::MissingInputDir(PathBuf::from("src")).exit_code(), 2);
        assert_eq!(
            BlogError::ConfigLoad {
                path: PathBuf::from("m.json"),
                reason: String::new()
            }
            .exit_code(),
            3
        );
        assert_eq!(BlogError::Template(String::new()).exit_code(), 4);
        assert_eq!(BlogError::Config(String::new()).exit_code(), 1);
    }

    #[test]
    fn test_other_errors_fallback() {
        let err = BlogError::Config("bad value".to_string());
        let msg = err.display_with_suggestions();
        assert_eq!(msg, "Configuration error: bad value");
    }
}
