use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::commands::{self, CommandReport};
use crate::commands::{expand::ExpandOptions, table::TableOptions, tags::TagsOptions};
use crate::dash::dedupe::SortKey;
use crate::dash::filter::FilterMode;

#[derive(Debug, Parser)]
#[command(
    name = "projdash",
    version,
    about = "Projects dashboard core: duration expansion, timeline filters, deduplicated tables"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Report resolved paths, configuration, and dataset health.
    Status {
        #[arg(long)]
        json: bool,
    },
    /// Check environment variables and dataset invariants.
    Verify {
        #[arg(long)]
        strict: bool,
        #[arg(long)]
        json: bool,
    },
    /// Render the deduplicated project table for a timeline year.
    Table(TableArgs),
    /// Dump the duration-expanded working set as JSON.
    Expand(ExpandArgs),
    /// List skill or software tags with stable colors.
    Tags(TagsArgs),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FilterModeArg {
    IncludeTimeline,
    SidebarOnly,
}

impl FilterModeArg {
    fn into_mode(self) -> FilterMode {
        match self {
            Self::IncludeTimeline => FilterMode::IncludeTimelineYear,
            Self::SidebarOnly => FilterMode::SidebarOnly,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortKeyArg {
    OriginalYear,
    InsertionOrder,
}

impl SortKeyArg {
    fn into_key(self) -> SortKey {
        match self {
            Self::OriginalYear => SortKey::OriginalYear,
            Self::InsertionOrder => SortKey::InsertionOrder,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TagColumnArg {
    Skills,
    Software,
}

impl TagColumnArg {
    fn into_column(self) -> commands::tags::TagColumn {
        match self {
            Self::Skills => commands::tags::TagColumn::Skills,
            Self::Software => commands::tags::TagColumn::Software,
        }
    }
}

#[derive(Debug, Args)]
struct TableArgs {
    /// Dataset CSV (defaults to PROJDASH_DATA_PATH or ~/.projdash/data.csv).
    #[arg(long)]
    data: Option<PathBuf>,
    /// Timeline year to highlight; defaults to the latest dataset year.
    #[arg(long)]
    year: Option<i32>,
    /// Sidebar year selection, repeatable; empty selects all years.
    #[arg(long = "filter-year")]
    filter_years: Vec<i32>,
    /// Industry filter, repeatable.
    #[arg(long = "industry")]
    industries: Vec<String>,
    /// Category filter, repeatable.
    #[arg(long = "category")]
    categories: Vec<String>,
    /// Role filter, repeatable.
    #[arg(long = "role")]
    roles: Vec<String>,
    /// How the timeline year combines with the year selection.
    #[arg(long, value_enum, default_value = "include-timeline")]
    mode: FilterModeArg,
    /// Duplicate-name resolution order (defaults to the configured key).
    #[arg(long, value_enum)]
    sort_by: Option<SortKeyArg>,
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct ExpandArgs {
    /// Dataset CSV (defaults to PROJDASH_DATA_PATH or ~/.projdash/data.csv).
    #[arg(long)]
    data: Option<PathBuf>,
    /// Keep only records active in this year.
    #[arg(long)]
    active_year: Option<i32>,
}

#[derive(Debug, Args)]
struct TagsArgs {
    /// Dataset CSV (defaults to PROJDASH_DATA_PATH or ~/.projdash/data.csv).
    #[arg(long)]
    data: Option<PathBuf>,
    /// Which tag column to list.
    #[arg(long, value_enum, default_value = "skills")]
    column: TagColumnArg,
    /// Year used for the active marker; defaults to the latest dataset year.
    #[arg(long)]
    year: Option<i32>,
    #[arg(long)]
    json: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Status { json } => emit_report(commands::status::run()?, json),
        Command::Verify { strict, json } => {
            let opts = commands::verify::VerifyOptions { strict };
            emit_report(commands::verify::run(&opts)?, json)
        }
        Command::Table(args) => commands::table::run(&TableOptions {
            data: args.data,
            query_year: args.year,
            years: args.filter_years,
            industries: args.industries,
            categories: args.categories,
            roles: args.roles,
            mode: args.mode.into_mode(),
            sort_by: args.sort_by.map(SortKeyArg::into_key),
            json: args.json,
        }),
        Command::Expand(args) => commands::expand::run(&ExpandOptions {
            data: args.data,
            active_year: args.active_year,
        }),
        Command::Tags(args) => commands::tags::run(&TagsOptions {
            data: args.data,
            column: args.column.into_column(),
            query_year: args.year,
            json: args.json,
        }),
    }
}

fn emit_report(report: CommandReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for detail in &report.details {
            println!("{detail}");
        }
        for issue in &report.issues {
            println!("issue: {issue}");
        }
    }
    if report.ok {
        Ok(())
    } else {
        anyhow::bail!("{} found {} issue(s)", report.command, report.issues.len())
    }
}
