//! Skin Quality Error Types
//!
//! Only structurally broken input is an error here. A dark, small or blurry
//! photo is a normal outcome reported through `ValidationResult::issues`.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum QualityError {
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error(
        "Invalid RGBA buffer for {width}x{height}: expected {expected} bytes, got {actual}"
    )]
    InvalidBuffer {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid dimensions: width or height is 0")]
    ZeroDimensions,

    #[error("Invalid validation config: {0}")]
    InvalidConfig(String),

    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl QualityError {
    /// Errors caused by the uploaded bytes themselves, as opposed to caller
    /// misconfiguration or the filesystem.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            QualityError::Decode(_)
                | QualityError::InvalidBuffer { .. }
                | QualityError::ZeroDimensions
        )
    }
}

pub type Result<T> = std::result::Result<T, QualityError>;
