use std::{path::PathBuf, process::ExitCode};

use bank_analyzer::{
    config::ConfigManager,
    core::services::{AnalysisReport, AnalysisService},
    init,
    storage::{JsonExtractStore, RecordSource},
    utils::build_info,
};
use colored::Colorize;

const USAGE: &str = "\
Usage: bank_analyzer_cli [OPTIONS] [DIR]

Rebuilds daily balances from the account extracts found in DIR.

Options:
  --short          Stack accounts only over days every account covers
  --json           Print the full report as JSON
  --config FILE    Read preferences from FILE
  -h, --help       Show this message
  -V, --version    Show build information";

#[derive(Debug, Default)]
struct CliArgs {
    dir: Option<PathBuf>,
    config: Option<PathBuf>,
    short: bool,
    json: bool,
}

enum Command {
    Run(CliArgs),
    Help,
    Version,
}

fn main() -> ExitCode {
    init();

    let command = match parse_args(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(message) => {
            eprintln!("Error: {message}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    match command {
        Command::Help => {
            println!("{USAGE}");
            ExitCode::SUCCESS
        }
        Command::Version => {
            println!("{}", build_info::current());
            ExitCode::SUCCESS
        }
        Command::Run(args) => match run(args) {
            Ok(code) => code,
            Err(err) => {
                eprintln!("Error: {err}");
                ExitCode::from(1)
            }
        },
    }
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Command, String> {
    let mut parsed = CliArgs::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-V" | "--version" => return Ok(Command::Version),
            "--short" => parsed.short = true,
            "--json" => parsed.json = true,
            "--config" => {
                let path = args
                    .next()
                    .ok_or_else(|| "`--config` expects a file path".to_string())?;
                parsed.config = Some(PathBuf::from(path));
            }
            flag if flag.starts_with('-') => return Err(format!("unknown option `{flag}`")),
            _ if parsed.dir.is_some() => return Err(format!("unexpected argument `{arg}`")),
            _ => parsed.dir = Some(PathBuf::from(arg)),
        }
    }
    Ok(Command::Run(parsed))
}

fn run(args: CliArgs) -> bank_analyzer::Result<ExitCode> {
    let manager = args
        .config
        .map(ConfigManager::with_path)
        .unwrap_or_default();
    let mut config = manager.load()?;
    if args.short {
        config.short_period = true;
    }

    let Some(dir) = args.dir.or_else(|| config.default_extracts_dir.clone()) else {
        eprintln!("Error: no extract directory given and none configured\n\n{USAGE}");
        return Ok(ExitCode::from(2));
    };

    let store = JsonExtractStore::from_config(&dir, &config);
    let report = AnalysisService::run(store.load_records()?, &config);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if report.is_empty() {
        println!("Nothing to do: no account extracts in {}", dir.display());
    } else {
        print_summary(&report);
    }
    for error in &report.errors {
        eprintln!("{} {error}", "warning:".yellow().bold());
    }
    Ok(ExitCode::SUCCESS)
}

fn print_summary(report: &AnalysisReport) {
    println!("{}", "Accounts".bold());
    for account in &report.accounts {
        let closing = account
            .balances
            .last()
            .map(|balance| balance.amount.to_string())
            .unwrap_or_else(|| "-".into());
        println!(
            "  {:<32} {} .. {}  {:>5} txns  closing {} {}",
            account.identity.to_string(),
            account.window.start,
            account.window.end,
            account.transaction_count,
            closing,
            account.currency
        );
    }

    let Some(composite) = &report.composite else {
        return;
    };
    println!();
    println!("{}", "Composite".bold());
    match (composite.window, composite.sum_line.last(), composite.trend_line.last()) {
        (Some(window), Some(sum), Some(trend)) => {
            println!(
                "  {} .. {}  {} days  {} accounts",
                window.start,
                window.end,
                composite.dates.len(),
                composite.accounts.len()
            );
            println!(
                "  total {} {}  {}-day trend {} {}",
                sum.round_dp(2).to_string().green(),
                composite.currency,
                composite.trend_window_days,
                trend.round_dp(2),
                composite.currency
            );
        }
        _ => println!("  accounts share no common day"),
    }
}
