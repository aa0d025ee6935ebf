use thiserror::Error;

#[derive(Error, Debug)]
pub enum FractalError {
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("Coordinate ({x}, {y}) is outside a {size}x{size} grid")]
    OutOfRange { x: usize, y: usize, size: usize },

    #[error("No fractal has been generated yet")]
    NotGenerated,

    #[error("Malformed configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl FractalError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        FractalError::InvalidConfiguration {
            message: message.into(),
        }
    }
}

pub type FractalResult<T> = Result<T, FractalError>;
