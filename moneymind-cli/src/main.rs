use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use moneymind_core::{
    Currency, DateRange, InMemoryStore, Locale, StatsService, TransactionFilter, TransactionType,
    categories, sort_oldest_first,
};
use moneymind_ingest::load_store;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod config;
mod report;
mod state;

use config::Config;

#[derive(Parser, Debug)]
#[command(
    name = "moneymind",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("MONEYMIND_BUILD_SHA"), ")"),
    about = "Income/expense statistics over MoneyMind transaction exports"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Totals, expenses by category and income/expenses by month
    Stats {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        period: PeriodArgs,

        #[command(flatten)]
        display: DisplayArgs,

        /// Print the raw statistics as JSON instead of a report
        #[arg(long)]
        json: bool,
    },

    /// List transactions, newest first
    List {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        period: PeriodArgs,

        #[command(flatten)]
        display: DisplayArgs,

        /// Only income or only expenses
        #[arg(long = "type", value_enum)]
        kind: Option<KindArg>,

        /// Exact category
        #[arg(long)]
        category: Option<String>,

        /// Case-insensitive text in description or category
        #[arg(long)]
        search: Option<String>,
    },

    /// Distinct categories used by a user
    Categories {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Manage ~/.moneymind/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(clap::Args, Debug)]
struct SourceArgs {
    /// CSV or JSON export of the transaction table (defaults to [data].file)
    #[arg(long)]
    file: Option<PathBuf>,

    /// Owner of the transactions (defaults to [data].user)
    #[arg(long)]
    user: Option<String>,
}

#[derive(clap::Args, Debug)]
struct PeriodArgs {
    /// First day of the period (YYYY-MM-DD); needs --end
    #[arg(long)]
    start: Option<NaiveDate>,

    /// Last day of the period, inclusive (YYYY-MM-DD); needs --start
    #[arg(long)]
    end: Option<NaiveDate>,
}

#[derive(clap::Args, Debug)]
struct DisplayArgs {
    /// Currency code: EUR, USD, BRL, GBP
    #[arg(long)]
    currency: Option<Currency>,

    /// Display language: en, pt, es, de
    #[arg(long)]
    locale: Option<Locale>,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config file if none exists
    Init,
    /// Print the effective config
    Show,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum KindArg {
    Income,
    Expense,
}

impl From<KindArg> for TransactionType {
    fn from(k: KindArg) -> Self {
        match k {
            KindArg::Income => TransactionType::Income,
            KindArg::Expense => TransactionType::Expense,
        }
    }
}

/// Used when `RUST_LOG` is unset: info for the workspace crates, warn for dependencies.
const DEFAULT_LOG_FILTER: &str = "warn,moneymind_core=info,moneymind_ingest=info,moneymind_cli=info";

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Command::Stats {
            source,
            period,
            display,
            json,
        } => {
            let cfg = config::load_config()?;
            let (service, user) = open(&cfg, &source)?;
            let range = DateRange::from_bounds(period.start, period.end)?;
            warn_half_open(&period);

            let stats = service.stats(Some(&user), range)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                let fmt = cfg.money_format(display.currency, display.locale);
                println!("# Statistics for {user}\n");
                print!("{}", report::render_stats(&stats, &fmt));
            }
        }

        Command::List {
            source,
            period,
            display,
            kind,
            category,
            search,
        } => {
            let cfg = config::load_config()?;
            let (service, user) = open(&cfg, &source)?;
            warn_half_open(&period);

            let mut filter = TransactionFilter::new().for_user(&user);
            filter.range = DateRange::from_bounds(period.start, period.end)?;
            filter.kind = kind.map(Into::into);
            filter.category = category;
            if let Some(term) = search {
                filter = filter.with_search(term);
            }

            let txns = service.transactions(&filter)?;
            let fmt = cfg.money_format(display.currency, display.locale);
            tracing::debug!(?filter, active = filter.is_active(), count = txns.len(), "listed transactions");
            print!("{}", report::render_transactions(&txns, &fmt));
        }

        Command::Categories { source } => {
            let cfg = config::load_config()?;
            let (service, user) = open(&cfg, &source)?;
            let mut txns = service.transactions(&TransactionFilter::new().for_user(&user))?;
            sort_oldest_first(&mut txns);
            for c in categories(&txns) {
                println!("{c}");
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                let p = config::config_path()?;
                let cfg = config::load_config()?;
                println!("# {}\n", p.display());
                println!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

/// Load the export named by flags or config and resolve the user to report on.
fn open(cfg: &Config, source: &SourceArgs) -> Result<(StatsService<InMemoryStore>, String)> {
    let Some(file) = source.file.clone().or_else(|| cfg.data.file.clone()) else {
        bail!("no transaction file given (pass --file <path> or set [data].file in config.toml)");
    };

    let store = load_store(&file, cfg.timezone()?)
        .with_context(|| format!("loading {}", file.display()))?;

    let user = resolve_user(
        source.user.as_deref(),
        cfg.data.user.as_deref(),
        &store.user_ids(),
        &file,
    )?;

    Ok((StatsService::new(store), user))
}

/// `--user`, then `[data].user`, then the only user present in the file.
fn resolve_user(
    flag: Option<&str>,
    configured: Option<&str>,
    users_in_file: &[String],
    file: &Path,
) -> Result<String> {
    if let Some(u) = flag.or(configured) {
        return Ok(u.to_string());
    }
    match users_in_file {
        [only] => Ok(only.clone()),
        [] => bail!("{} contains no transactions", file.display()),
        _ => bail!(
            "{} holds transactions for several users ({}); pass --user",
            file.display(),
            users_in_file.join(", ")
        ),
    }
}

fn warn_half_open(period: &PeriodArgs) {
    if period.start.is_some() != period.end.is_some() {
        tracing::warn!("--start and --end only filter when both are given; showing all dates");
    }
}
