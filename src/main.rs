mod executor;
mod matcher;
mod model;
mod sources;
mod state;
mod ui;

use anyhow::Result;
use clap::Parser;
use log::{info, warn};

use crate::model::AppIndex;
use crate::sources::{Source, desktop::DesktopSource};
use crate::state::AppState;

/// Keyboard-driven application launcher for the terminal.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {}

fn main() -> Result<()> {
    env_logger::init();
    let _args = Args::parse();

    let scan = DesktopSource.scan()?;
    info!(
        "indexed {} apps ({} descriptors skipped)",
        scan.entries.len(),
        scan.skipped
    );

    let index = AppIndex::new(scan.entries);
    if index.is_empty() {
        warn!("no launchable applications found");
    }
    let mut state = AppState::new(index);

    let mut terminal = ui::term::init()?;
    let result = ui::run(&mut terminal, &mut state);
    ui::term::restore()?;
    result
}
