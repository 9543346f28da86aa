use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Invalid visibility threshold {0}: must be in (0, 1]")]
    InvalidThreshold(f64),
}

pub type Result<T> = std::result::Result<T, Error>;
