//! Errors for everything around the distance math: settings, parameters and output.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("toml serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("missing [{0}] section")]
    MissingSection(&'static str),

    #[error("{key} must be {expected}")]
    InvalidValue {
        key: &'static str,
        expected: &'static str,
    },

    #[error("invalid color '{0}': expected #RRGGBB or #RRGGBBAA")]
    InvalidColor(String),

    #[error("unknown arrow kind: {0}")]
    UnknownKind(String),

    #[error("unknown paint mode: {0}")]
    UnknownMode(String),

    #[error("invalid arrow parameters: {0}")]
    InvalidParams(String),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_messages_differ() {
        let de = toml::from_str::<toml::Value>("[arrow").unwrap_err();
        let ser = <toml::ser::Error as serde::ser::Error>::custom("unsupported value");

        let read = Error::from(de).to_string();
        let write = Error::from(ser).to_string();
        assert!(read.starts_with("toml error: "));
        assert!(write.starts_with("toml serialization error: "));
        assert!(write.ends_with("unsupported value"));
    }
}
