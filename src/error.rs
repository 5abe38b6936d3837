use thiserror::Error;

/// Errors produced while building or stepping a simulation.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Two distinct bodies share a position, so the pairwise acceleration
    /// between them is undefined.
    #[error("bodies {first} and {second} coincide at step {step}")]
    DegenerateConfiguration {
        step: usize,
        first: usize,
        second: usize,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("config serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
