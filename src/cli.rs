use std::path::PathBuf;

use clap::Parser;

use crate::tree::SortPolicy;

#[derive(Parser, Debug)]
#[command(name = "vsix-outline")]
#[command(version)]
#[command(about = "Show the contents of a VSIX package as a tree", long_about = None)]
#[command(after_help = "Examples:\n  \
  vsix-outline my-extension.vsix                 tree with icon names\n  \
  vsix-outline my-extension.vsix --depth 1       top level only\n  \
  vsix-outline ext.vsix --sort recursive -v      directories first at every level, with debug logs")]
pub struct Cli {
    /// VSIX (zip) package to open
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Directory holding images/light and images/dark icon sets
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub assets: PathBuf,

    /// Which levels list directories before files
    #[arg(long, value_enum, default_value_t = SortPolicy::TopLevel)]
    pub sort: SortPolicy,

    /// Only print nodes up to this depth below the root
    #[arg(long, value_name = "N")]
    pub depth: Option<usize>,

    /// Hide icon names
    #[arg(long)]
    pub no_icons: bool,

    /// More logging (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode: errors only
    #[arg(short = 'q')]
    pub quiet: bool,
}

impl Cli {
    /// Log filter implied by `-v`/`-q`, used when `RUST_LOG` is unset.
    pub fn log_level(&self) -> log::LevelFilter {
        if self.quiet {
            return log::LevelFilter::Error;
        }
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}
