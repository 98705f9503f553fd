use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use mango_n1ql::{
    config::{self, CliConfig, ServerConfig},
    mango_query::{IndexRequest, MangoQuery},
    n1ql_query_generator::OutputCompat,
    server, N1qlTranslator, TranslatorOptions,
};
use serde::de::DeserializeOwned;

/// mango-n1ql - Translate Mango queries into N1QL statements
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output compatibility mode: legacy or strict
    #[arg(long, global = true)]
    compat: Option<OutputCompat>,

    /// Maximum selector nesting depth
    #[arg(long, global = true)]
    max_selector_depth: Option<usize>,

    /// YAML configuration file (environment variables are used otherwise)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Translate a find query into a SELECT statement
    Find(InputArgs),
    /// Translate a find query into a SELECT COUNT statement
    Count(InputArgs),
    /// Print only the WHERE clause of a find query
    Where(InputArgs),
    /// Translate an index definition (or a selector) into CREATE INDEX
    Index(InputArgs),
    /// Print the normalized form of a selector
    Normalize(InputArgs),
    /// Run the HTTP translation service
    Serve {
        /// HTTP server host address
        #[arg(long)]
        http_host: Option<String>,

        /// HTTP server port
        #[arg(long)]
        http_port: Option<u16>,
    },
}

#[derive(Args)]
struct InputArgs {
    /// JSON document to translate (reads stdin when omitted)
    #[arg(short, long)]
    input: Option<PathBuf>,
}

fn read_input(args: &InputArgs) -> Result<String> {
    match &args.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            Ok(buffer)
        }
    }
}

fn parse_input<T: DeserializeOwned>(args: &InputArgs) -> Result<T> {
    let raw = read_input(args)?;
    serde_json::from_str(&raw).context("input is not a valid JSON document for this command")
}

fn load_config(cli: &Cli, overrides: CliConfig) -> Result<ServerConfig> {
    let base = match &cli.config {
        Some(path) => ServerConfig::from_yaml_file(path)
            .with_context(|| format!("invalid configuration file {}", path.display()))?,
        None => ServerConfig::from_env().context("invalid environment configuration")?,
    };
    base.with_cli(overrides).context("invalid command line configuration")
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    // Defaults to INFO level, can be overridden with RUST_LOG env var
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut overrides = config::CliConfig {
        compat: cli.compat,
        max_selector_depth: cli.max_selector_depth,
        ..Default::default()
    };
    if let Command::Serve {
        http_host,
        http_port,
    } = &cli.command
    {
        overrides.http_host = http_host.clone();
        overrides.http_port = *http_port;
    }

    let config = load_config(&cli, overrides)?;
    let translator = N1qlTranslator::new(TranslatorOptions::from(&config));

    let output = match &cli.command {
        Command::Find(args) => translator.build_find_statement(&parse_input::<MangoQuery>(args)?)?,
        Command::Count(args) => {
            translator.build_count_statement(&parse_input::<MangoQuery>(args)?)?
        }
        Command::Where(args) => translator.build_where_clause(&parse_input::<MangoQuery>(args)?)?,
        Command::Index(args) => {
            translator.build_index_statement(&parse_input::<IndexRequest>(args)?)?
        }
        Command::Normalize(args) => {
            let selector: serde_json::Value = parse_input(args)?;
            let normalized = translator.normalize_selector(&selector)?;
            serde_json::to_string_pretty(&normalized)?
        }
        Command::Serve { .. } => {
            println!("\nmango-n1ql v{}\n", env!("CARGO_PKG_VERSION"));
            server::run_with_config(config).await?;
            return Ok(());
        }
    };

    println!("{}", output);
    Ok(())
}
