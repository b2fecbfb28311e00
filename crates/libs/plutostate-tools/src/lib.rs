//! Notebook state file tooling built on [`plutostate_pack`].
//!
//! Covers the data side of the og-image generator and the state request
//! client. Rendering, rasterization, and transport stay behind the traits in
//! [`generate`] and [`assets`].

mod error;

pub mod assets;
pub mod config;
pub mod generate;
pub mod header;
pub mod request;
pub mod statefile;

pub use error::ToolsError;
