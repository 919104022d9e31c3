//! Folding flat archive paths into a nested tree.

use std::path::Path;

use log::debug;

/// Icon kind given to every directory node.
pub const DIRECTORY_KIND: &str = "dir";

/// Icon kind given to the archive root.
pub const ARCHIVE_KIND: &str = "vsix";

/// How a node is offered for expansion in the display host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expansion {
    Collapsed,
    Expanded,
    Leaf,
}

/// Which levels of the tree get the directories-first ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SortPolicy {
    /// Only the root's direct children are ordered.
    #[default]
    TopLevel,
    /// Every level is ordered.
    Recursive,
}

/// One path segment of the archive: a directory or a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub name: String,
    pub is_directory: bool,
    pub children: Vec<TreeNode>,
    pub expansion: Expansion,
    pub icon_kind: String,
    pub tooltip: Option<String>,
}

impl TreeNode {
    /// Root node for the archive at `archive_path`, labelled with its file name.
    pub fn root(archive_path: &Path) -> Self {
        let name = archive_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| archive_path.display().to_string());
        Self {
            name,
            is_directory: true,
            children: Vec::new(),
            expansion: Expansion::Expanded,
            icon_kind: ARCHIVE_KIND.to_string(),
            tooltip: Some(archive_path.display().to_string()),
        }
    }

    fn segment(name: &str, is_directory: bool) -> Self {
        Self {
            name: name.to_string(),
            is_directory,
            children: Vec::new(),
            expansion: if is_directory {
                Expansion::Collapsed
            } else {
                Expansion::Leaf
            },
            icon_kind: icon_kind_for(name, is_directory),
            tooltip: None,
        }
    }

    pub fn child(&self, name: &str) -> Option<&TreeNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Walk down from this node along a slash-separated path.
    pub fn find(&self, path: &str) -> Option<&TreeNode> {
        segments(path)
            .into_iter()
            .try_fold(self, |node, name| node.child(name))
    }

    /// Number of nodes below this one, not counting itself.
    pub fn node_count(&self) -> usize {
        self.children.iter().map(|c| 1 + c.node_count()).sum()
    }

    /// Merge one archive entry, given as path segments, into the tree.
    ///
    /// Every segment but the last becomes a directory; only the last takes
    /// `is_directory`. Existing nodes are reused, so folding the same entry
    /// twice changes nothing. A node's type is fixed when it is created: an
    /// entry that would descend below an existing file is dropped.
    pub fn fold(&mut self, segments: &[&str], is_directory: bool) {
        let Some((first, rest)) = segments.split_first() else {
            return;
        };
        if first.is_empty() {
            // Callers filter with `segments`, but an empty name must never become a node.
            return self.fold(rest, is_directory);
        }

        let terminal = rest.is_empty();
        let index = match self.children.iter().position(|c| c.name == *first) {
            Some(index) => index,
            None => {
                let as_directory = !terminal || is_directory;
                self.children.push(TreeNode::segment(first, as_directory));
                self.children.len() - 1
            }
        };
        let child = &mut self.children[index];
        if !terminal && !child.is_directory {
            debug!("skipping entry below file {:?}", child.name);
            return;
        }
        child.fold(rest, is_directory);
    }

    /// Fold a raw entry path. A trailing `/` always marks a directory.
    pub fn fold_path(&mut self, path: &str, is_directory: bool) {
        let is_directory = is_directory || path.ends_with('/');
        self.fold(&segments(path), is_directory);
    }

    /// Order directories before files. Same-type siblings keep insertion order.
    pub fn sort_children(&mut self, policy: SortPolicy) {
        self.children.sort_by_key(|c| !c.is_directory);
        if policy == SortPolicy::Recursive {
            for child in &mut self.children {
                child.sort_children(policy);
            }
        }
    }
}

/// Split an entry path on `/`, dropping empty segments.
pub fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Lower-cased text after the last `.`, or empty when there is none.
///
/// A leading-dot name such as `.gitignore` yields `gitignore`.
pub fn extension(name: &str) -> String {
    match name.rsplit_once('.') {
        Some((_, ext)) => ext.to_ascii_lowercase(),
        None => String::new(),
    }
}

fn icon_kind_for(name: &str, is_directory: bool) -> String {
    if is_directory {
        DIRECTORY_KIND.to_string()
    } else {
        extension(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(entries: &[(&str, bool)]) -> TreeNode {
        let mut root = TreeNode::root(Path::new("/tmp/sample.vsix"));
        for (path, is_directory) in entries {
            root.fold_path(path, *is_directory);
        }
        root
    }

    fn names(node: &TreeNode) -> Vec<&str> {
        node.children.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn segments_drop_empty_parts() {
        assert_eq!(segments("a//b/"), ["a", "b"]);
        assert_eq!(segments("/lead/trail/"), ["lead", "trail"]);
        assert!(segments("/").is_empty());
        assert!(segments("").is_empty());
    }

    #[test]
    fn root_carries_archive_name_and_path() {
        let root = TreeNode::root(Path::new("/tmp/sample.vsix"));
        assert_eq!(root.name, "sample.vsix");
        assert_eq!(root.tooltip.as_deref(), Some("/tmp/sample.vsix"));
        assert_eq!(root.icon_kind, ARCHIVE_KIND);
        assert_eq!(root.expansion, Expansion::Expanded);
    }

    #[test]
    fn manifest_example() {
        let mut root = build(&[
            ("META-INF/", true),
            ("META-INF/manifest.json", false),
            ("extension.vsixmanifest", false),
        ]);
        root.sort_children(SortPolicy::TopLevel);

        assert_eq!(names(&root), ["META-INF", "extension.vsixmanifest"]);
        let meta = &root.children[0];
        assert!(meta.is_directory);
        assert_eq!(meta.expansion, Expansion::Collapsed);
        assert_eq!(names(meta), ["manifest.json"]);
        let manifest = &meta.children[0];
        assert!(!manifest.is_directory);
        assert_eq!(manifest.expansion, Expansion::Leaf);
        assert_eq!(manifest.icon_kind, "json");
    }

    #[test]
    fn intermediate_segments_are_directories_in_any_order() {
        let orders: [&[(&str, bool)]; 3] = [
            &[("a/b/c.txt", false), ("a/b/", true)],
            &[("a/b/", true), ("a/b/c.txt", false)],
            &[("a/b/c.txt", false)],
        ];
        for entries in orders {
            let root = build(entries);
            assert_eq!(names(&root), ["a"]);
            let a = root.child("a").unwrap();
            assert!(a.is_directory);
            assert_eq!(names(a), ["b"]);
            let b = a.child("b").unwrap();
            assert!(b.is_directory);
            assert_eq!(names(b), ["c.txt"]);
            assert!(!b.children[0].is_directory);
        }
    }

    #[test]
    fn node_type_is_fixed_at_creation() {
        let root = build(&[("a/b", false), ("a/b/c", false), ("a/", false)]);
        let a = root.child("a").unwrap();
        assert!(a.is_directory);
        let b = a.child("b").unwrap();
        assert!(!b.is_directory);
        assert!(b.children.is_empty());

        let root = build(&[("x/", true), ("x", false)]);
        assert!(root.child("x").unwrap().is_directory);
    }

    #[test]
    fn trailing_slash_wins_over_file_flag() {
        let root = build(&[("a/b/", false), ("a/b/c.txt", false)]);
        let b = root.find("a/b").unwrap();
        assert!(b.is_directory);
        assert_eq!(names(b), ["c.txt"]);
    }

    #[test]
    fn folding_twice_is_idempotent() {
        let once = build(&[("extension/out/main.js", false)]);
        let twice = build(&[
            ("extension/out/main.js", false),
            ("extension/out/main.js", false),
        ]);
        assert_eq!(once, twice);
        assert_eq!(twice.node_count(), 3);
    }

    #[test]
    fn empty_entries_add_nothing() {
        let root = build(&[("/", true), ("//", false), ("", false)]);
        assert!(root.children.is_empty());
        assert_eq!(root.node_count(), 0);
    }

    #[test]
    fn top_level_sort_is_shallow() {
        let mut root = build(&[
            ("readme.md", false),
            ("ext/z.js", false),
            ("ext/lib/", true),
            ("LICENSE", false),
            ("images/", true),
        ]);
        root.sort_children(SortPolicy::TopLevel);
        assert_eq!(names(&root), ["ext", "images", "readme.md", "LICENSE"]);
        assert_eq!(names(root.child("ext").unwrap()), ["z.js", "lib"]);
    }

    #[test]
    fn recursive_sort_orders_every_level() {
        let mut root = build(&[("ext/z.js", false), ("ext/lib/", true), ("a.txt", false)]);
        root.sort_children(SortPolicy::Recursive);
        assert_eq!(names(&root), ["ext", "a.txt"]);
        assert_eq!(names(root.child("ext").unwrap()), ["lib", "z.js"]);
    }

    #[test]
    fn find_walks_paths() {
        let root = build(&[("extension/images/icon.png", false)]);
        assert_eq!(root.find("extension/images/icon.png").unwrap().icon_kind, "png");
        assert_eq!(root.find("/extension//images/").unwrap().name, "images");
        assert!(root.find("extension/missing").is_none());
        assert_eq!(root.find("").unwrap().name, "sample.vsix");
    }

    #[test]
    fn extension_rules() {
        assert_eq!(extension("Logo.PNG"), "png");
        assert_eq!(extension("archive.tar.gz"), "gz");
        assert_eq!(extension(".gitignore"), "gitignore");
        assert_eq!(extension("LICENSE"), "");
        assert_eq!(extension("trailing."), "");
    }
}
