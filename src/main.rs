// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use fintrack::config::Settings;
use fintrack::ledger::LedgerStore;
use fintrack::notify::{ConsoleNotifier, Notice, Notifier};
use fintrack::period::SystemClock;
use fintrack::{cli, commands, utils};

fn main() -> Result<()> {
    utils::init_tracing();
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let settings = Settings::resolve(matches.get_one::<std::path::PathBuf>("data-dir").cloned())?;
    let store = settings.open_store()?;
    let mut ledger = LedgerStore::load(store, &settings.collection_key)?;
    let clock = SystemClock;
    let notifier = ConsoleNotifier;
    if let Some(diag) = ledger.recovered_from() {
        notifier.notify(&Notice::recovered(diag));
    }

    match matches.subcommand() {
        Some(("add" | "edit" | "rm" | "clear" | "list", _)) => {
            commands::transactions::handle(&mut ledger, &matches, &clock, &notifier)?
        }
        Some(("month", sub)) => commands::reports::handle_month(ledger.transactions(), sub, &clock)?,
        Some(("summary", sub)) => {
            commands::reports::handle_summary(ledger.transactions(), sub, &clock)?
        }
        Some(("categories", sub)) => commands::categories::handle(sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
