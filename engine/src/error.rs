use std::path::PathBuf;

use log::error;
use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can go wrong while describing or generating an image
#[derive(Debug, Error, strum::IntoStaticStr)]
pub enum GenerationError {
    #[error("OpenAI API key not found, set OPENAI_API_KEY or pass --api-key")]
    MissingCredential,

    #[error("Inspiration image not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No prompt provided")]
    MissingPrompt,

    #[error("Unexpected API response: {0}")]
    MalformedResponse(String),

    #[error("Error downloading image: {status}")]
    Download { status: StatusCode },

    #[error("OpenAI error {status}: {message}")]
    Api { status: StatusCode, message: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl GenerationError {
    /// Name of the variant, e.g. `"MalformedResponse"`
    pub fn kind(&self) -> &'static str {
        self.into()
    }

    /// Logs the error together with its kind and everything it carries.
    pub fn report(&self) {
        error!("Error generating image: {self}");
        error!("Error type: {}", self.kind());
        error!("Error details: {self:#?}");
    }
}

pub type Result<T, E = GenerationError> = std::result::Result<T, E>;
