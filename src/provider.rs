//! What a tree-view host talks to: root, children and per-node display data.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use log::{debug, info, warn};
use tokio::sync::{Mutex, watch};

use crate::config::OutlineConfig;
use crate::error::{ScanError, ScanResult};
use crate::icon::{AssetDir, IconRef, IconResolver};
use crate::scan::scan_archive;
use crate::telemetry::Telemetry;
use crate::tree::{Expansion, TreeNode};

/// Display representation of one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeItem {
    pub label: String,
    pub icon: Option<IconRef>,
    pub tooltip: Option<String>,
    pub expansion: Expansion,
}

/// Serves the tree of one package to a display host.
///
/// Each [`refresh`](Self::refresh) rebuilds the tree from scratch. Only the
/// most recently started scan may publish; an older one that finishes later
/// returns [`ScanError::Superseded`]. A failed scan keeps the last good tree.
pub struct OutlineProvider {
    archive_path: PathBuf,
    config: OutlineConfig,
    icons: IconResolver<AssetDir>,
    telemetry: Arc<dyn Telemetry>,
    generation: AtomicU64,
    tree: RwLock<Option<Arc<TreeNode>>>,
    changed: watch::Sender<u64>,
    first_scan: Mutex<()>,
}

impl OutlineProvider {
    pub fn new(archive_path: impl Into<PathBuf>, config: OutlineConfig, telemetry: Arc<dyn Telemetry>) -> Self {
        let archive_path = archive_path.into();
        info!("outline provider for {}", archive_path.display());
        let (changed, _) = watch::channel(0);
        Self {
            icons: IconResolver::new(AssetDir::new(&config.assets_dir)),
            archive_path,
            config,
            telemetry,
            generation: AtomicU64::new(0),
            tree: RwLock::new(None),
            changed,
            first_scan: Mutex::new(()),
        }
    }

    /// Generation of the last published tree, updated on every publish.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.changed.subscribe()
    }

    /// The last published tree, if any.
    pub fn current(&self) -> Option<Arc<TreeNode>> {
        self.tree.read().ok().and_then(|tree| tree.clone())
    }

    /// Rescan the package and publish the new tree.
    pub async fn refresh(&self) -> ScanResult<Arc<TreeNode>> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("starting scan {}", generation);

        let root = scan_archive(&self.archive_path, self.config.sort, self.telemetry.as_ref()).await?;
        self.publish(generation, root)
    }

    fn publish(&self, generation: u64, root: TreeNode) -> ScanResult<Arc<TreeNode>> {
        let mut slot = match self.tree.write() {
            Ok(slot) => slot,
            Err(poisoned) => poisoned.into_inner(),
        };
        // Checked under the write lock so a stale scan can never overwrite a newer one.
        if self.generation.load(Ordering::SeqCst) != generation {
            warn!("discarding result of superseded scan {}", generation);
            return Err(ScanError::Superseded { generation });
        }
        let root = Arc::new(root);
        *slot = Some(root.clone());
        drop(slot);

        self.changed.send_replace(generation);
        Ok(root)
    }

    /// The published tree, scanning first when nothing has been published.
    ///
    /// This is the single top-level element the host shows. Concurrent first
    /// calls share one scan, and a scan superseded by an explicit
    /// [`refresh`](Self::refresh) hands back the newer tree instead of failing.
    pub async fn root(&self) -> ScanResult<Arc<TreeNode>> {
        if let Some(root) = self.current() {
            return Ok(root);
        }

        let _first = self.first_scan.lock().await;
        loop {
            if let Some(root) = self.current() {
                return Ok(root);
            }
            match self.refresh().await {
                Err(ScanError::Superseded { generation }) => {
                    debug!("scan {} superseded before a tree was available", generation);
                }
                other => return other,
            }
        }
    }

    /// Children of an expanded node.
    pub fn children<'a>(&self, node: &'a TreeNode) -> &'a [TreeNode] {
        debug!("Getting contents of '{}'", node.name);
        &node.children
    }

    pub fn tree_item(&self, node: &TreeNode) -> TreeItem {
        TreeItem {
            label: node.name.clone(),
            icon: self.icons.resolve(&node.icon_kind),
            tooltip: node.tooltip.clone(),
            expansion: node.expansion,
        }
    }
}
