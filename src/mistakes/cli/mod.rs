//! Terminal front end: argument parsing, logging setup, the menu loop and
//! everything it prints. Not part of the library API.

mod print;
pub mod setup;
mod shell;

use directories::ProjectDirs;
use mistakes::api::Journal;
use mistakes::config::TrackerConfig;
use mistakes::error::{Result, TrackerError};
use mistakes::store::fs::FileStore;
use mistakes::store::{StorePaths, DATA_FILENAME};
use setup::Cli;
use shell::Shell;
use std::io;
use tracing::warn;

pub fn run(args: Cli) -> Result<()> {
    let paths = resolve_paths(&args)?;

    let config_dir = paths
        .data_file
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_default();
    let config = TrackerConfig::load(&config_dir).unwrap_or_else(|e| {
        warn!(error = %e, "ignoring unreadable config, using defaults");
        TrackerConfig::default()
    });

    let store = FileStore::new(paths).with_max_backups(config.max_backups);
    let (mut journal, opened) = Journal::open(store, config);

    let mut out = io::stdout().lock();
    print::write_messages(&mut out, &opened.messages)?;

    if journal.config().assign_ids && journal.missing_ids() > 0 {
        let migrated = journal.migrate_ids();
        print::write_messages(&mut out, &migrated.messages)?;
    }

    Shell::new(&mut journal, io::stdin().lock(), out).run()?;
    Ok(())
}

fn resolve_paths(args: &Cli) -> Result<StorePaths> {
    let data_file = match &args.data_file {
        Some(path) => path.clone(),
        None => ProjectDirs::from("com", "mistakes", "mistakes")
            .ok_or_else(|| TrackerError::Store("Could not determine data directory".into()))?
            .data_dir()
            .join(DATA_FILENAME),
    };

    let paths = StorePaths::for_data_file(data_file);
    Ok(match &args.backup_dir {
        Some(dir) => paths.with_backup_dir(dir),
        None => paths,
    })
}
