//! leadform CLI - validate, display and fill schema-driven lead records.
//!
//! Commands:
//! - `leadform init <schema>`: Seed a schema directory with the built-in lead schema
//! - `leadform fields <schema>`: List the fields a schema defines
//! - `leadform validate <schema> <record>`: Check a record file against a schema
//! - `leadform show <schema> <record>`: Render a record for display
//! - `leadform new <schema> --out <file>`: Fill in a record interactively
//!
//! Environment variables:
//! - RUST_LOG: Override the log filter when `--debug` is not given
//!
//! Exit codes:
//! - 0: Success
//! - 1: Error
//! - 2: The record failed validation

use clap::Parser;
use tracing_subscriber::EnvFilter;

use leadform::{fields, fill, init, show, validate};
use leadform::{Cli, Commands};

/// Map a command result to an exit code, reporting errors on stderr.
fn handle_result(result: anyhow::Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::new("leadform=debug,leadform_fields=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = match cli.command {
        Commands::Init { schema } => handle_result(init::run_init(&schema).await),

        Commands::Fields { schema, json } => handle_result(fields::run_fields(&schema, json).await),

        Commands::Validate {
            schema,
            record,
            json,
        } => match validate::run_validate(&schema, &record, json).await {
            Ok(0) => 0,
            Ok(_) => 2,
            Err(e) => handle_result(Err(e)),
        },

        Commands::Show {
            schema,
            record,
            json,
        } => handle_result(show::run_show(&schema, &record, json).await),

        Commands::New { schema, out, from } => {
            handle_result(fill::run_fill(&schema, &out, from.as_deref()).await)
        }
    };

    std::process::exit(exit_code);
}
