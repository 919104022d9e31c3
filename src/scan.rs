//! A single pass over a package: open, fold every entry, close.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use log::{debug, error, info};

use crate::error::{ScanError, ScanResult};
use crate::io::{LocalFileReader, ReadAt};
use crate::telemetry::{PARSED_EVENT, PARSED_SECONDS, Telemetry};
use crate::tree::{SortPolicy, TreeNode};
use crate::zip::ArchiveReader;

/// Build a fresh tree for the package at `path`.
///
/// On failure the partial tree is dropped, the error is logged and sent to
/// `telemetry`, and then returned.
pub async fn scan_archive(path: &Path, sort: SortPolicy, telemetry: &dyn Telemetry) -> ScanResult<TreeNode> {
    let title = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    info!("Scanning {}", title);

    let outcome = match LocalFileReader::open(path) {
        Ok(reader) => {
            debug!("opened {} ({} bytes)", reader.path().display(), reader.size());
            build_tree(path, Arc::new(reader), sort, telemetry).await
        }
        Err(e) => Err(e),
    };

    outcome.map_err(|e| {
        error!("scan of {} failed: {:#}", path.display(), e);
        let err = ScanError::read(path, e);
        telemetry.send_error(&err);
        err
    })
}

/// Fold every entry of the archive behind `reader` into a tree rooted at `path`.
pub async fn build_tree<R: ReadAt>(
    path: &Path,
    reader: Arc<R>,
    sort: SortPolicy,
    telemetry: &dyn Telemetry,
) -> Result<TreeNode> {
    let archive = ArchiveReader::open(reader).await?;

    let started = Instant::now();
    info!("Entries read: {}", archive.entry_count());

    let mut root = TreeNode::root(path);
    for entry in archive.entries() {
        debug!(
            "Entry {} ({} bytes, {} compressed)",
            entry.name, entry.uncompressed_size, entry.compressed_size
        );
        root.fold_path(&entry.name, entry.is_directory);
    }
    archive.close();
    root.sort_children(sort);

    let seconds = started.elapsed().as_secs_f64();
    telemetry.send_event(PARSED_EVENT, &[(PARSED_SECONDS, seconds.to_string())]);
    info!("built {} nodes in {:.3}s", root.node_count(), seconds);

    Ok(root)
}
