use plutostate_pack::CodecError;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ToolsError {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("missing field: {0}")]
    MissingField(String),

    #[error("asset {url}: {message}")]
    Asset { url: String, message: String },

    #[error("render error: {0}")]
    Render(String),
}

impl ToolsError {
    pub fn missing_field(path: impl Into<String>) -> Self {
        Self::MissingField(path.into())
    }

    pub fn asset(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Asset { url: url.into(), message: message.into() }
    }
}
