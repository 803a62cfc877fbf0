use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use sqltree::{BuilderConfig, Query, Schema, SqlBuilder};

/// sqltree - compile entity queries over a tree-shaped schema into parameterized SQL
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Schema document (YAML, or JSON with a .json extension)
    #[arg(long)]
    schema: PathBuf,

    /// Query document (JSON)
    #[arg(long)]
    query: PathBuf,

    /// Builder configuration (YAML); defaults to SQLTREE_* environment variables
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn run(cli: Cli) -> anyhow::Result<String> {
    let config = match &cli.config {
        Some(path) => BuilderConfig::from_yaml_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => BuilderConfig::from_env().context("loading config from environment")?,
    };

    let schema = Schema::from_file(&cli.schema)
        .with_context(|| format!("loading schema {}", cli.schema.display()))?;
    let builder = SqlBuilder::with_config(schema, config).context("validating schema")?;

    let query_text = std::fs::read_to_string(&cli.query)
        .with_context(|| format!("reading query {}", cli.query.display()))?;
    let query: Query = serde_json::from_str(&query_text).context("parsing query")?;

    let statements = builder.build_sql(&query).context("building SQL")?;
    let output = if cli.pretty {
        serde_json::to_string_pretty(&statements)?
    } else {
        serde_json::to_string(&statements)?
    };
    Ok(output)
}

fn main() {
    dotenvy::dotenv().ok();
    // Initialize logger - defaults to INFO level, can be overridden with RUST_LOG env var
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
