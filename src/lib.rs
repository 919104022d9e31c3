//! # vsix-outline
//!
//! Presents the contents of a VSIX extension package as a tree.
//!
//! A package is a zip archive whose central directory lists a flat,
//! unordered set of paths. This library turns that list into a single-rooted
//! tree of directories and files, and picks an icon for each node when a
//! host asks to render it.
//!
//! ## Features
//!
//! - Reads only the central directory (ZIP64 aware); entry data is never inflated
//! - Implied directories are created even when the archive never lists them
//! - Directories are listed before files, at the top level or at every level
//! - Icons come from light/dark SVG pairs with alias groups and a generic fallback
//! - Telemetry is an injected [`Telemetry`] sink; logging goes through `log`
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use vsix_outline::{LogTelemetry, OutlineConfig, OutlineProvider};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let provider = OutlineProvider::new(
//!         "my-extension.vsix",
//!         OutlineConfig::default(),
//!         Arc::new(LogTelemetry),
//!     );
//!
//!     let root = provider.root().await?;
//!     for child in provider.children(&root) {
//!         let item = provider.tree_item(child);
//!         println!("{} {:?}", item.label, item.icon);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod icon;
pub mod io;
pub mod provider;
pub mod scan;
pub mod telemetry;
pub mod tree;
pub mod zip;

pub use cli::Cli;
pub use config::OutlineConfig;
pub use error::{ScanError, ScanResult};
pub use icon::{AssetDir, IconAssets, IconRef, IconResolver};
pub use io::{LocalFileReader, ReadAt};
pub use provider::{OutlineProvider, TreeItem};
pub use scan::{build_tree, scan_archive};
pub use telemetry::{LogTelemetry, NoopTelemetry, Telemetry};
pub use tree::{Expansion, SortPolicy, TreeNode};
pub use zip::{ArchiveEntry, ArchiveReader};
