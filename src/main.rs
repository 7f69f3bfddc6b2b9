use banksim::application::engine::{BankingEngine, Report};
use banksim::application::scenarios::{self, SCENARIOS};
use banksim::config::Config;
use banksim::interfaces::csv::account_writer::AccountWriter;
use banksim::interfaces::http::{AppState, build_router};
use banksim::interfaces::text::command_reader::CommandReader;
use clap::{Parser, Subcommand, ValueEnum};
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a file of banking commands, one per line
    Run {
        input: PathBuf,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// List the built-in scenarios
    Scenarios,
    /// Run one built-in scenario in a fresh bank
    Scenario {
        id: String,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Serve the HTTP API
    Serve {
        /// Overrides BANKSIM_SERVER_PORT
        #[arg(long)]
        port: Option<u16>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
    Csv,
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the report, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { input, format } => {
            let file = File::open(&input).into_diagnostic()?;
            let commands = CommandReader::new(file)
                .commands()
                .collect::<banksim::error::Result<Vec<String>>>()
                .into_diagnostic()?;
            let report = BankingEngine::new().run(&commands);
            print_report(&report, format)
        }
        Commands::Scenarios => {
            let mut out = io::stdout().lock();
            for scenario in SCENARIOS {
                writeln!(out, "{}\t{}", scenario.id, scenario.title).into_diagnostic()?;
            }
            Ok(())
        }
        Commands::Scenario { id, format } => {
            let Some(scenario) = scenarios::find(&id) else {
                miette::bail!("unknown scenario `{id}`, run `banksim scenarios` to list them");
            };
            let report = BankingEngine::new().run(scenario.commands);
            print_report(&report, format)
        }
        Commands::Serve { port } => serve(port).await,
    }
}

fn print_report(report: &Report, format: Format) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        Format::Text => {
            for line in report.lines() {
                writeln!(out, "{line}").into_diagnostic()?;
            }
        }
        Format::Json => {
            serde_json::to_writer_pretty(&mut out, report).into_diagnostic()?;
            writeln!(out).into_diagnostic()?;
        }
        Format::Csv => {
            AccountWriter::new(&mut out)
                .write_accounts(&report.accounts)
                .into_diagnostic()?;
            for command in &report.invalid_commands {
                tracing::warn!(command = %command, "invalid command");
            }
        }
    }
    Ok(())
}

async fn serve(port: Option<u16>) -> Result<()> {
    let mut config = Config::from_env().into_diagnostic()?;
    if let Some(port) = port {
        config.server_port = port;
    }
    tracing::info!(max_sessions = config.max_sessions, "configuration loaded");

    let app = build_router(AppState::new(&config));

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await.into_diagnostic()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await.into_diagnostic()?;
    Ok(())
}
