use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine as _;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::ToolsError;

const EMOJI_KIND: &str = "emoji";
const SVG_DATA_URI_PREFIX: &str = "data:image/svg+xml;base64,";

/// Fetches remote text assets. Implemented by whatever transport the caller owns.
pub trait AssetLoader {
    fn load_text(&self, url: &str) -> Result<String, ToolsError>;
}

impl<T: AssetLoader + ?Sized> AssetLoader for &T {
    fn load_text(&self, url: &str) -> Result<String, ToolsError> {
        (**self).load_text(url)
    }
}

/// Resolves dynamic assets (emoji and the like) requested during layout.
pub trait AssetSource {
    /// Returns a data URI for the asset, or `None` when the kind is not served.
    fn dynamic_asset(&mut self, kind: &str, code: &str) -> Result<Option<String>, ToolsError>;
}

pub fn emoji_url(base_url: &str, code: &str) -> String {
    format!("{base_url}{}_color.svg", code.to_lowercase())
}

/// Memoizing asset source for one generation run.
///
/// Successful loads are kept for the cache's lifetime and never evicted;
/// failed loads are not cached.
pub struct AssetCache<'a, L: ?Sized> {
    loader: &'a L,
    emoji_base_url: String,
    entries: HashMap<String, String>,
}

impl<'a, L: AssetLoader + ?Sized> AssetCache<'a, L> {
    pub fn new(loader: &'a L, emoji_base_url: impl Into<String>) -> Self {
        Self { loader, emoji_base_url: emoji_base_url.into(), entries: HashMap::new() }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Emoji SVG source for `code`, loaded at most once per cache.
    pub fn load_emoji(&mut self, code: &str) -> Result<&str, ToolsError> {
        match self.entries.entry(format!("{EMOJI_KIND}:{code}")) {
            Entry::Occupied(entry) => {
                log::trace!("asset cache hit for {}", entry.key());
                Ok(entry.into_mut().as_str())
            }
            Entry::Vacant(slot) => {
                let url = emoji_url(&self.emoji_base_url, code);
                log::debug!("loading emoji asset {url}");
                let svg = self.loader.load_text(&url)?;
                Ok(slot.insert(svg).as_str())
            }
        }
    }
}

impl<L: AssetLoader + ?Sized> AssetSource for AssetCache<'_, L> {
    fn dynamic_asset(&mut self, kind: &str, code: &str) -> Result<Option<String>, ToolsError> {
        if kind != EMOJI_KIND {
            return Ok(None);
        }
        let svg = self.load_emoji(code)?;
        Ok(Some(format!("{SVG_DATA_URI_PREFIX}{}", BASE64_STANDARD.encode(svg))))
    }
}
