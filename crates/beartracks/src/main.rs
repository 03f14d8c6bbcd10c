//! Mini-BearTracks entry point.
//!
//! ```text
//! beartracks [--config PATH] [--data-dir DIR] [console|serve]
//! ```

use std::io;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing::info;

use beartracks::console::Console;
use beartracks::server::{self, AppState, SharedStore};
use beartracks::{AppConfig, FlatFileStore, Registrar};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Console,
    Serve,
}

#[derive(Debug)]
struct Args {
    config: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    mode: Mode,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args> {
    let mut parsed = Args {
        config: None,
        data_dir: None,
        mode: Mode::Console,
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let path = args.next().context("--config expects a path")?;
                parsed.config = Some(PathBuf::from(path));
            }
            "--data-dir" => {
                let dir = args.next().context("--data-dir expects a directory")?;
                parsed.data_dir = Some(PathBuf::from(dir));
            }
            "console" => parsed.mode = Mode::Console,
            "serve" => parsed.mode = Mode::Serve,
            other => bail!(
                "unrecognized argument '{}'\nusage: beartracks [--config PATH] [--data-dir DIR] [console|serve]",
                other
            ),
        }
    }

    Ok(parsed)
}

fn run() -> Result<()> {
    let args = parse_args(std::env::args().skip(1))?;

    let mut config = AppConfig::load(args.config.as_deref())?;
    if let Some(dir) = args.data_dir {
        config.data_dir = dir;
    }

    tracing_subscriber::fmt()
        .with_max_level(config.log_level()?)
        .with_writer(io::stderr)
        .init();

    let paths = config.store_paths();
    info!("Using record files in {}", config.data_dir.display());

    match args.mode {
        Mode::Console => {
            let registrar =
                Registrar::with_roster_policy(FlatFileStore::open(paths), config.roster_policy());
            let stdin = io::stdin();
            let stdout = io::stdout();
            Console::new(&registrar, stdin.lock(), stdout.lock())
                .run()
                .context("console I/O failed")?;
        }
        Mode::Serve => {
            let addr = config.listen_addr()?;
            let store: SharedStore = Box::new(FlatFileStore::open(paths));
            let state = Arc::new(AppState::new(Registrar::with_roster_policy(
                store,
                config.roster_policy(),
            )));

            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .context("failed to start async runtime")?;
            runtime
                .block_on(server::serve(state, addr))
                .with_context(|| format!("server on {} failed", addr))?;
        }
    }

    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_defaults_to_console() {
        let parsed = args(&[]).unwrap();
        assert_eq!(parsed.mode, Mode::Console);
        assert!(parsed.config.is_none());
    }

    #[test]
    fn test_flags_and_mode() {
        let parsed = args(&["--data-dir", "data", "serve", "--config", "bt.json"]).unwrap();
        assert_eq!(parsed.mode, Mode::Serve);
        assert_eq!(parsed.data_dir, Some(PathBuf::from("data")));
        assert_eq!(parsed.config, Some(PathBuf::from("bt.json")));
    }

    #[test]
    fn test_bad_arguments() {
        assert!(args(&["--config"]).is_err());
        assert!(args(&["launch"]).is_err());
    }
}
