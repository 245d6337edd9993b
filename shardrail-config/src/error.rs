//! Configuration errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("syntax error in \"{path}\": {source}")]
    Toml {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

impl Error {
    /// Attach the config file path to a TOML syntax error.
    pub fn toml(path: &str, source: toml::de::Error) -> Self {
        Self::Toml {
            path: path.to_owned(),
            source,
        }
    }
}
