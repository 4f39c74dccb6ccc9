use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Opaque reference to image bytes, usually a filesystem path. Only the
/// rendering layer ever resolves it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locator(String);

impl Locator {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Locator {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Locator {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<PathBuf> for Locator {
    fn from(value: PathBuf) -> Self {
        Self(value.to_string_lossy().into_owned())
    }
}

/// A photo in the gallery. Records never change once created; the
/// collection changes only by appending or dropping whole records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Foto {
    pub locator: Locator,
    pub titulo: String,
}

impl Foto {
    /// New record with the default "Foto" titulo.
    #[allow(dead_code)]
    pub fn new(locator: impl Into<Locator>) -> Self {
        Self::with_titulo(locator, "Foto")
    }

    pub fn with_titulo(locator: impl Into<Locator>, titulo: impl Into<String>) -> Self {
        Self {
            locator: locator.into(),
            titulo: titulo.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_titulo() {
        let foto = Foto::new("/tmp/playa.jpg");
        assert_eq!(foto.titulo, "Foto");
        assert_eq!(foto.locator.as_str(), "/tmp/playa.jpg");
    }

    #[test]
    fn test_locator_from_path() {
        let locator = Locator::from(PathBuf::from("/cache/foto_1718000000123.png"));
        assert_eq!(locator.to_string(), "/cache/foto_1718000000123.png");
    }

    #[test]
    fn test_locator_serializes_as_plain_string() {
        let locator = Locator::from("/tmp/a.png");
        assert_eq!(serde_json::to_string(&locator).unwrap(), "\"/tmp/a.png\"");
    }
}
