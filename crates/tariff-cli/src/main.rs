//! tariff-lab CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

use tariff_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use tariff_cli::commands::{run_elasticity, run_filter, run_laffer, run_load, run_pass_through};
use tariff_cli::logging::{LogConfig, LogFormat, init_logging};
use tariff_cli::summary::{print_laffer, print_load_summary, print_records};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(&cli.command) {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(command: &Command) -> anyhow::Result<()> {
    match command {
        Command::Load(args) => {
            let result = run_load(args)?;
            if args.json {
                println!("{}", result.table.to_json()?);
            } else {
                print_load_summary(&result);
            }
        }
        Command::Filter(args) => {
            let table = run_filter(args)?;
            if args.json {
                println!("{}", table.to_json()?);
            } else {
                print_records(&table);
            }
        }
        Command::PassThrough(args) => println!("{}", run_pass_through(args)),
        Command::Elasticity(args) => println!("{}", run_elasticity(args)),
        Command::Laffer(args) => print_laffer(&run_laffer(args)),
    }
    Ok(())
}

/// Build logging configuration from CLI flags.
///
/// `--log-level` beats `-v`/`-q`, and either one beats `RUST_LOG`.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    if let Some(level) = cli.log_level {
        config = config.with_explicit_level(match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        });
    } else if cli.verbosity.is_present() {
        let level_filter = config.level_filter;
        config = config.with_explicit_level(level_filter);
    }
    let mut config = config
        .with_format(match cli.log_format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        })
        .with_log_file(cli.log_file.clone());
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
