use thiserror::Error;

#[derive(Error, Debug)]
pub enum SonoError {
    #[error("Invalid filter spec: {0}")]
    InvalidFilterSpec(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Frame parse error on line {line}: {message}")]
    FrameParse { line: usize, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),
}

pub type Result<T> = std::result::Result<T, SonoError>;
