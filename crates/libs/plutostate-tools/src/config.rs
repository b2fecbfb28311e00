use plutostate_pack::CodecConfig;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::ToolsError;

const DEFAULT_AUTHOR_IMAGE: &str = "https://avatars.githubusercontent.com/u/74617459?s=400&u=85ab12d22312806d5e577de6c5a8b6bf983c21a6&v=4";
const DEFAULT_EMOJI_BASE_URL: &str =
    "https://cdn.jsdelivr.net/gh/shuding/fluentui-emoji-unicode/assets/";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ToolsConfig {
    #[serde(default)]
    pub codec: CodecConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

/// Layout and raster options handed to the renderer collaborators.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    /// Raster output width; height follows the aspect ratio.
    pub fit_width: u32,
    pub background: String,
    pub font_family: String,
    pub default_author_image: String,
    pub emoji_base_url: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 600,
            height: 400,
            fit_width: 1200,
            background: "rgba(238, 235, 230, .9)".to_string(),
            font_family: "Roboto".to_string(),
            default_author_image: DEFAULT_AUTHOR_IMAGE.to_string(),
            emoji_base_url: DEFAULT_EMOJI_BASE_URL.to_string(),
        }
    }
}

impl ToolsConfig {
    pub fn from_toml(input: &str) -> Result<Self, ToolsError> {
        Ok(toml::from_str(input)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ToolsError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }
}
