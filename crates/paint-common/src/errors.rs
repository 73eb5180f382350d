use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// A bundle failed to import or did not have a valid shape.
///
/// Cloneable so a memoized failure can be handed to every caller waiting
/// on the same load.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Failed to load bundle \"{name}\": {message}")]
pub struct BundleError {
    /// Display name of the bundle (label, specifier or a placeholder).
    pub name: String,
    /// Underlying cause.
    pub message: String,
}

impl BundleError {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PaintError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    BundleInvalid(#[from] BundleError),

    #[error("Invalid catalog entry for \"{id}\": {message}")]
    CatalogInvalid { id: String, message: String },

    #[error("invalid cookie: {0}")]
    CookieInvalid(String),

    #[error("css proxy error: {0}")]
    Proxy(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PaintError {
    /// Stable machine-readable code for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "E_INVALID_INPUT",
            Self::BundleInvalid(_) => "E_BUNDLE_INVALID",
            Self::CatalogInvalid { .. } => "E_CATALOG_INVALID",
            Self::CookieInvalid(_) => "E_COOKIE_INVALID",
            Self::Proxy(_) => "E_PROXY",
            Self::Config(_) => "E_CONFIG",
            Self::Io(_) => "E_IO",
        }
    }
}
