//! Terminal host for the package outline.
//!
//! Plays the part of a sidebar tree view: asks the provider for the root,
//! expands every node it is allowed to, and prints one line per node.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;

use vsix_outline::{Cli, Expansion, LogTelemetry, OutlineConfig, OutlineProvider, TreeNode};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    let provider = OutlineProvider::new(cli.file.clone(), OutlineConfig::from(&cli), Arc::new(LogTelemetry));
    let root = provider.root().await?;

    let mut out = String::new();
    render(&provider, &root, 0, &cli, &mut out);
    print!("{out}");

    Ok(())
}

/// Append `node` and, depth permitting, its descendants to `out`.
fn render(provider: &OutlineProvider, node: &TreeNode, depth: usize, cli: &Cli, out: &mut String) {
    let item = provider.tree_item(node);
    let marker = match item.expansion {
        Expansion::Expanded => "▾ ",
        Expansion::Collapsed => "▸ ",
        Expansion::Leaf => "  ",
    };
    out.push_str(&"  ".repeat(depth));
    out.push_str(marker);
    out.push_str(&item.label);
    if !cli.no_icons {
        let icon = item.icon.map(|i| i.name()).unwrap_or_else(|| "-".to_string());
        out.push_str(&format!("  [{icon}]"));
    }
    out.push('\n');

    if cli.depth.is_some_and(|max| depth >= max) {
        return;
    }
    for child in provider.children(node) {
        render(provider, child, depth + 1, cli, out);
    }
}
