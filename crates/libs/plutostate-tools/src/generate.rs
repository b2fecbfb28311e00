use plutostate_pack::Codec;
use std::fs;
use std::path::{Path, PathBuf};

use crate::assets::{AssetCache, AssetLoader, AssetSource};
use crate::config::{RenderConfig, ToolsConfig};
use crate::header::HeaderProps;
use crate::statefile::{notebook_path, og_image_path, read_statefile};
use crate::ToolsError;

/// Lays out the header and returns SVG markup.
pub trait SvgRenderer {
    fn render_svg(
        &self,
        header: &HeaderProps,
        render: &RenderConfig,
        assets: &mut dyn AssetSource,
    ) -> Result<String, ToolsError>;
}

/// Turns SVG markup into PNG bytes, scaled to `render.fit_width`.
pub trait Rasterizer {
    fn rasterize(&self, svg: &str, render: &RenderConfig) -> Result<Vec<u8>, ToolsError>;
}

/// Writes `<notebook>.og-image.png` from `<notebook>.plutostate`.
pub struct OgImageGenerator<R, Z, L> {
    codec: Codec,
    render: RenderConfig,
    renderer: R,
    rasterizer: Z,
    loader: L,
}

impl<R, Z, L> OgImageGenerator<R, Z, L>
where
    R: SvgRenderer,
    Z: Rasterizer,
    L: AssetLoader,
{
    pub fn new(config: &ToolsConfig, renderer: R, rasterizer: Z, loader: L) -> Self {
        Self {
            codec: Codec::new(config.codec),
            render: config.render.clone(),
            renderer,
            rasterizer,
            loader,
        }
    }

    /// Generates the image for `notebook` and returns the written path.
    ///
    /// Assets fetched while rendering are cached for this call only.
    pub fn generate(&self, notebook: &Path) -> Result<PathBuf, ToolsError> {
        let state = read_statefile(&self.codec, notebook)?;
        let header = HeaderProps::from_statefile(&state, &notebook.to_string_lossy())?;

        let mut assets = AssetCache::new(&self.loader, self.render.emoji_base_url.as_str());
        let svg = self.renderer.render_svg(&header, &self.render, &mut assets)?;
        let png = self.rasterizer.rasterize(&svg, &self.render)?;

        let out = og_image_path(notebook);
        fs::write(&out, png)?;
        log::info!("wrote og image {}", out.display());
        Ok(out)
    }

    pub fn generate_from_state_path(&self, state_path: &Path) -> Result<PathBuf, ToolsError> {
        self.generate(&notebook_path(state_path))
    }
}
