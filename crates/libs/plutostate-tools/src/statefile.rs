use plutostate_pack::{Codec, Value};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use crate::ToolsError;

pub const STATE_FILE_SUFFIX: &str = ".plutostate";
pub const OG_IMAGE_SUFFIX: &str = ".og-image.png";

/// Notebook path for a state file path: the first `.plutostate` is removed.
pub fn notebook_path(state_path: &Path) -> PathBuf {
    PathBuf::from(state_path.to_string_lossy().replacen(STATE_FILE_SUFFIX, "", 1))
}

pub fn state_path(notebook: &Path) -> PathBuf {
    with_suffix(notebook, STATE_FILE_SUFFIX)
}

pub fn og_image_path(notebook: &Path) -> PathBuf {
    with_suffix(notebook, OG_IMAGE_SUFFIX)
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut out = path.as_os_str().to_os_string();
    out.push(OsStr::new(suffix));
    PathBuf::from(out)
}

/// Reads and unpacks the state file stored next to `notebook`.
pub fn read_statefile(codec: &Codec, notebook: &Path) -> Result<Value, ToolsError> {
    let path = state_path(notebook);
    let bytes = fs::read(&path)?;
    log::debug!("read {} bytes of state from {}", bytes.len(), path.display());
    Ok(codec.unpack(&bytes)?)
}
