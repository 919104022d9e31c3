use std::path::PathBuf;

use crate::cli::Cli;
use crate::tree::SortPolicy;

/// Settings shared by every scan of an [`OutlineProvider`](crate::OutlineProvider).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineConfig {
    /// Directory containing `images/light` and `images/dark`.
    pub assets_dir: PathBuf,
    pub sort: SortPolicy,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from("."),
            sort: SortPolicy::default(),
        }
    }
}

impl From<&Cli> for OutlineConfig {
    fn from(cli: &Cli) -> Self {
        Self {
            assets_dir: cli.assets.clone(),
            sort: cli.sort,
        }
    }
}
