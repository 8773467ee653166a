use miette::Diagnostic;
use thiserror::Error;

/// Main error type for ripper operations
#[derive(Error, Diagnostic, Debug)]
pub enum RipError {
    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(ripper::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Image error with {path}: {message}")]
    #[diagnostic(code(ripper::image))]
    Image {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Config error: {message}")]
    #[diagnostic(code(ripper::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Report error: {message}")]
    #[diagnostic(code(ripper::report))]
    Report { message: String },
}

pub type Result<T> = std::result::Result<T, RipError>;
