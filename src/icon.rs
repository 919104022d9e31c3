//! Choosing an icon for a node from its icon kind.
//!
//! Icons are SVG pairs stored as `images/light/<name>.svg` and
//! `images/dark/<name>.svg` under an assets directory. Lookup order:
//!
//! 1. `dir` maps to the host's themed folder icon
//! 2. a few extensions share one icon family (`png`, `jpg`, ... → `image`)
//! 3. an icon pair named after the kind itself
//! 4. the generic `file` pair
//!
//! When none of these exist the result is `None` and the host draws its
//! own default.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::trace;

use crate::tree::DIRECTORY_KIND;

/// Icon used when nothing more specific exists.
pub const FALLBACK_ICON: &str = "file";

/// Extension groups that share a single icon.
const ALIASES: &[(&[&str], &str)] = &[
    (&["png", "gif", "jpg", "jpeg", "bmp"], "image"),
    (&["md", "markdown"], "markdown"),
    (&["gitignore"], "git"),
    (&["txt"], "text"),
];

/// A resolved icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconRef {
    /// The host's built-in folder icon.
    Folder,
    /// A light/dark pair of icon files.
    Themed { light: PathBuf, dark: PathBuf },
}

impl IconRef {
    /// Short name for display: `folder`, or the icon file stem.
    pub fn name(&self) -> String {
        match self {
            IconRef::Folder => "folder".to_string(),
            IconRef::Themed { light, .. } => light
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default(),
        }
    }
}

/// Read-only view of the icon files available to the resolver.
pub trait IconAssets: Send + Sync {
    fn exists(&self, path: &Path) -> bool;

    /// Absolute location of `relative` within the asset store.
    fn locate(&self, relative: &Path) -> PathBuf;
}

/// Icon assets on the local filesystem.
#[derive(Debug, Clone)]
pub struct AssetDir {
    root: PathBuf,
}

impl AssetDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl IconAssets for AssetDir {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn locate(&self, relative: &Path) -> PathBuf {
        self.root.join(relative)
    }
}

/// Map an extension to its shared icon family, if it belongs to one.
pub fn alias(kind: &str) -> Option<&'static str> {
    ALIASES
        .iter()
        .find(|(kinds, _)| kinds.contains(&kind))
        .map(|(_, icon)| *icon)
}

/// Resolves icon kinds against an asset store, remembering each answer.
pub struct IconResolver<A: IconAssets> {
    assets: A,
    cache: Mutex<HashMap<String, Option<IconRef>>>,
}

impl<A: IconAssets> IconResolver<A> {
    pub fn new(assets: A) -> Self {
        Self {
            assets,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn resolve(&self, kind: &str) -> Option<IconRef> {
        if kind == DIRECTORY_KIND {
            return Some(IconRef::Folder);
        }

        if let Ok(cache) = self.cache.lock() {
            if let Some(hit) = cache.get(kind) {
                return hit.clone();
            }
        }

        let icon = self.lookup(kind);
        trace!("icon for {:?}: {:?}", kind, icon);
        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(kind.to_string(), icon.clone());
        }
        icon
    }

    fn lookup(&self, kind: &str) -> Option<IconRef> {
        let name = alias(kind).unwrap_or(kind);
        if !name.is_empty() {
            if let Some(icon) = self.themed(name) {
                return Some(icon);
            }
        }
        self.themed(FALLBACK_ICON)
    }

    /// Both theme variants must exist; half a pair counts as missing.
    fn themed(&self, name: &str) -> Option<IconRef> {
        let file = format!("{name}.svg");
        let light = self.assets.locate(&Path::new("images").join("light").join(&file));
        let dark = self.assets.locate(&Path::new("images").join("dark").join(&file));
        if self.assets.exists(&light) && self.assets.exists(&dark) {
            Some(IconRef::Themed { light, dark })
        } else {
            None
        }
    }
}
