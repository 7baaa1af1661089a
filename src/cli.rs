// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    )
}

fn kind_arg() -> Arg {
    Arg::new("type")
        .long("type")
        .value_parser(["income", "expense"])
        .help("income | expense")
}

pub fn build_cli() -> Command {
    Command::new("fintrack")
        .about("Track income and expenses, monthly balances and recurring projections")
        .version(clap::crate_version!())
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .global(true)
                .value_parser(value_parser!(std::path::PathBuf))
                .help("Directory holding the ledger (overrides FINTRACK_DATA_DIR)"),
        )
        .subcommand(
            Command::new("add")
                .about("Record a transaction")
                .arg(Arg::new("description").long("description").short('d').required(true))
                .arg(Arg::new("amount").long("amount").short('a').required(true))
                .arg(kind_arg().default_value("expense"))
                .arg(Arg::new("category").long("category").short('c').required(true))
                .arg(
                    Arg::new("date")
                        .long("date")
                        .help("YYYY-MM-DD, defaults to today"),
                )
                .arg(
                    Arg::new("recurring")
                        .long("recurring")
                        .action(ArgAction::SetTrue)
                        .help("Repeat every month"),
                ),
        )
        .subcommand(
            Command::new("edit")
                .about("Replace fields of an existing transaction")
                .arg(Arg::new("id").required(true))
                .arg(Arg::new("description").long("description").short('d'))
                .arg(Arg::new("amount").long("amount").short('a'))
                .arg(kind_arg())
                .arg(Arg::new("category").long("category").short('c'))
                .arg(Arg::new("date").long("date"))
                .arg(
                    Arg::new("recurring")
                        .long("recurring")
                        .value_parser(value_parser!(bool))
                        .help("true | false"),
                ),
        )
        .subcommand(
            Command::new("rm")
                .about("Delete a transaction")
                .arg(Arg::new("id").required(true)),
        )
        .subcommand(
            Command::new("clear").about("Delete every transaction").arg(
                Arg::new("yes")
                    .long("yes")
                    .action(ArgAction::SetTrue)
                    .help("Confirm removal of all data"),
            ),
        )
        .subcommand(json_flags(
            Command::new("list")
                .about("List transactions, most recent first")
                .arg(Arg::new("month").long("month").help("YYYY-MM"))
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                ),
        ))
        .subcommand(json_flags(
            Command::new("month")
                .about("Opening balance, totals and projection for a month")
                .arg(
                    Arg::new("month")
                        .long("month")
                        .help("YYYY-MM, defaults to the current month"),
                )
                .arg(
                    Arg::new("next")
                        .long("next")
                        .value_name("N")
                        .num_args(0..=1)
                        .default_missing_value("1")
                        .value_parser(value_parser!(u32))
                        .conflicts_with_all(["month", "prev"])
                        .help("N months after the current month (default 1)"),
                )
                .arg(
                    Arg::new("prev")
                        .long("prev")
                        .value_name("N")
                        .num_args(0..=1)
                        .default_missing_value("1")
                        .value_parser(value_parser!(u32))
                        .conflicts_with("month")
                        .help("N months before the current month (default 1)"),
                ),
        ))
        .subcommand(json_flags(
            Command::new("summary").about("Current month overview and recurring totals"),
        ))
        .subcommand(
            Command::new("categories")
                .about("List the categories available per type")
                .arg(kind_arg()),
        )
}
