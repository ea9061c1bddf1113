//! CLI module - Command-line interface definitions and handlers

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::cache::Cache;
use crate::core::paths::normalize_path;

/// cachetree - a hierarchical filesystem-backed cache for CSV and JSON artifacts.
#[derive(Parser, Debug)]
#[command(name = "cachetree")]
#[command(
    author,
    version,
    about,
    long_about = r#"cachetree manages a tree of cache directories. Each directory stores named
artifacts as delimited text (CSV, append-or-replace) or structured records
(JSON, always replaced), with subcaches nested under their parent.

Examples:
    cachetree --root Cache init --overwrite
    cachetree --root Cache sub "Subcache 1"
    cachetree --root Cache csv data --sub "Subcache 1" $'hello there\n'
    cachetree --root Cache json data '[{"one":1,"two":2,"three":3}]'
    cachetree --root Cache path data.json
    cachetree --root Cache list
"#
)]
pub struct Cli {
    /// Root cache directory.
    #[arg(
        long,
        global = true,
        default_value = "Cache",
        value_name = "DIR",
        long_help = "Root cache directory (defaults to ./Cache).\n\n\
Relative names are anchored at the current working directory; the directory\n\
is created on first use."
    )]
    pub root: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the root cache directory
    Init {
        /// Irreversibly delete any existing contents first.
        #[arg(long)]
        overwrite: bool,
    },

    /// Create (or reopen) a subcache under the root
    Sub {
        /// Subcache directory name.
        name: String,

        /// Irreversibly delete any existing contents first.
        #[arg(long)]
        overwrite: bool,
    },

    /// Store a CSV payload (appends unless --overwrite)
    Csv {
        /// Artifact name; stored as <NAME>.csv.
        name: String,

        /// Payload text, written verbatim.
        payload: String,

        /// Replace the file instead of appending.
        #[arg(long)]
        overwrite: bool,

        /// Store under this subcache (created if missing).
        #[arg(long, value_name = "DIR")]
        sub: Option<String>,
    },

    /// Store a JSON payload (always replaces)
    Json {
        /// Artifact name; stored as <NAME>.json.
        name: String,

        /// JSON document; validated before storing.
        payload: String,

        /// Store under this subcache (created if missing).
        #[arg(long, value_name = "DIR")]
        sub: Option<String>,
    },

    /// Print the path of a cached file, if present
    Path {
        /// Full on-disk file name, extension included.
        name: String,

        /// Look inside this subcache instead of the root.
        #[arg(long, value_name = "DIR")]
        sub: Option<String>,
    },

    /// List every artifact and subcache under the root
    List,
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init { overwrite } => {
            let cache = Cache::new(&cli.root, overwrite)?;
            println!("{}", normalize_path(cache.path()));
        }

        Commands::Sub { name, overwrite } => {
            let root = Cache::new(&cli.root, false)?;
            let sub = root.create_subcache(&name, overwrite)?;
            println!("{}", normalize_path(sub.path()));
        }

        Commands::Csv {
            name,
            payload,
            overwrite,
            sub,
        } => {
            let cache = open_store_target(&cli.root, sub.as_deref())?;
            if !cache.store_csv(&name, overwrite, &payload)? {
                bail!("could not resolve a usable cache file for '{name}'");
            }
        }

        Commands::Json { name, payload, sub } => {
            let value: serde_json::Value =
                serde_json::from_str(&payload).context("payload is not valid JSON")?;
            let cache = open_store_target(&cli.root, sub.as_deref())?;
            if !cache.store_json(&name, &value)? {
                bail!("could not resolve a usable cache file for '{name}'");
            }
        }

        Commands::Path { name, sub } => {
            let root = Cache::new(&cli.root, false)?;
            let target = match sub {
                Some(dir) => root.subcache(&dir)?,
                None => Some(root),
            };
            match target {
                Some(cache) => match cache.file_path(&name)? {
                    Some(path) => println!("{}", normalize_path(&path)),
                    None => println!("not found"),
                },
                None => println!("not found"),
            }
        }

        Commands::List => {
            let root = Cache::new(&cli.root, false)?;
            for entry in WalkDir::new(root.path()).min_depth(1).sort_by_file_name() {
                let entry = entry?;
                let rel = entry.path().strip_prefix(root.path())?;
                let kind = if entry.file_type().is_dir() {
                    "subcache"
                } else {
                    "file"
                };
                println!("{}\t{}", kind, normalize_path(rel));
            }
        }
    }

    Ok(())
}

/// Open the root cache, descending into `--sub` when given.
///
/// Store commands create the subcache on demand, matching the cache's own
/// create-on-resolve behavior for files.
fn open_store_target(root: &Path, sub: Option<&str>) -> Result<Cache> {
    let root = Cache::new(root, false)?;
    match sub {
        Some(dir) => Ok(root.create_subcache(dir, false)?),
        None => Ok(root),
    }
}
