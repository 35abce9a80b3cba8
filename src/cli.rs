// src/cli.rs
use std::{error::Error, path::{Path, PathBuf}};

use clap::{Parser, Subcommand};

use crate::{
    config::Options,
    core::HttpClient,
    progress::Progress,
    runner,
    store::EntityKind,
    sync,
    upscale,
};

#[derive(Parser)]
#[command(name = "mb_scrape")]
#[command(version)]
#[command(about = "Resolve MegaBonk catalog images from the wikis", long_about = None)]
pub struct Cli {
    /// Config file (default: ./mb_scrape.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch missing images, then sync the catalogs
    Resolve {
        #[arg(short, long, value_delimiter = ',', value_parser = parse_kind)]
        kind: Vec<EntityKind>,

        /// Leave catalog files untouched
        #[arg(long)]
        no_sync: bool,
    },

    /// Write image references from the asset directory into the catalogs
    Sync {
        #[arg(short, long, value_delimiter = ',', value_parser = parse_kind)]
        kind: Vec<EntityKind>,
    },

    /// Entries and assets per kind
    Status {
        #[arg(short, long, value_delimiter = ',', value_parser = parse_kind)]
        kind: Vec<EntityKind>,
    },

    /// Resize PNG templates and regenerate WebP copies
    Upscale {
        /// Defaults to the configured kind's asset directory
        #[arg(short, long)]
        dir: Option<PathBuf>,

        #[arg(short, long)]
        size: Option<u32>,

        #[arg(long)]
        no_webp: bool,
    },
}

fn parse_kind(s: &str) -> Result<EntityKind, String> {
    EntityKind::parse(s).ok_or_else(|| format!("unknown kind `{s}` (items, weapons, tomes, characters)"))
}

fn kinds_or_all(kinds: Vec<EntityKind>) -> Vec<EntityKind> {
    if kinds.is_empty() { EntityKind::ALL.to_vec() } else { kinds }
}

/// Prints one line per resolved or exhausted entry.
#[derive(Default)]
pub struct ConsoleProgress {
    kind: Option<EntityKind>,
    done: usize,
    total: usize,
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, kind: EntityKind, total: usize) {
        self.kind = Some(kind);
        self.done = 0;
        self.total = total;
        println!("== {kind}: {total} missing");
    }

    fn log(&mut self, msg: &str) {
        println!("{msg}");
    }

    fn item_done(&mut self, id: &str, path: &Path) {
        self.done += 1;
        println!("  [{}/{}] {id} -> {}", self.done, self.total, path.display());
    }

    fn item_failed(&mut self, id: &str) {
        println!("  [--] {id}: no image found");
    }

    fn finish(&mut self, kind: EntityKind) {
        if self.kind == Some(kind) {
            println!("== {kind}: {}/{} resolved", self.done, self.total);
        }
    }
}

pub fn run() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    crate::log::init(cli.verbose);
    let opts = Options::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Resolve { kind, no_sync } => {
            let kinds = kinds_or_all(kind);
            let client = HttpClient::new(&opts.net);
            let mut progress = ConsoleProgress::default();
            let summary = runner::run(&opts, &kinds, &client, Some(&mut progress))?;

            println!("resolved: {}", summary.resolved());
            let exhausted: Vec<_> = summary.exhausted().collect();
            println!("exhausted: {}", exhausted.len());
            for (kind, id) in exhausted {
                println!("  {kind}/{id}");
            }

            if !no_sync {
                sync::sync_catalogs(&opts, &kinds)?;
            }
        }
        Commands::Sync { kind } => {
            for (kind, r) in sync::sync_catalogs(&opts, &kinds_or_all(kind))? {
                println!("{kind}: {} set, {} cleared, {} unchanged", r.set, r.cleared, r.unchanged);
            }
        }
        Commands::Status { kind } => {
            for line in runner::status(&opts, &kinds_or_all(kind))? {
                println!("{:<11} {:>4}/{:<4} with image", line.kind.key(), line.with_asset, line.entries);
            }
        }
        Commands::Upscale { dir, size, no_webp } => {
            let dir = dir.unwrap_or_else(|| opts.images_dir.join(opts.upscale.kind.key()));
            let size = size.unwrap_or(opts.upscale.size);
            let report = upscale::upscale_dir(&dir, size, opts.upscale.webp && !no_webp)?;
            for (path, err) in &report.failed {
                println!("  failed {}: {err}", path.display());
            }
            println!(
                "{}: {} resized, {} webp written",
                dir.display(),
                report.resized.len(),
                report.webp.len()
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_parse_from_a_list() {
        let cli = Cli::try_parse_from(["mb_scrape", "resolve", "--kind", "items,Tomes", "--no-sync"]).unwrap();
        match cli.command {
            Commands::Resolve { kind, no_sync } => {
                assert_eq!(kind, vec![EntityKind::Item, EntityKind::Tome]);
                assert!(no_sync);
            }
            _ => panic!("wrong subcommand"),
        }
        assert!(Cli::try_parse_from(["mb_scrape", "sync", "--kind", "hats"]).is_err());
    }

    #[test]
    fn empty_kind_list_means_all() {
        assert_eq!(kinds_or_all(Vec::new()), EntityKind::ALL.to_vec());
    }
}
