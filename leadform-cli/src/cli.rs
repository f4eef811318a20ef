//! CLI definition for the leadform command-line interface.
//!
//! This module is self-contained -- it only depends on `clap` and `std`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// leadform - validate, display and fill schema-driven lead records.
///
/// A schema directory holds one YAML file per field under `fields/` and one
/// YAML file per list of values under `lov/`. Records are plain YAML or JSON
/// maps from field key to value.
#[derive(Parser, Debug)]
#[command(name = "leadform")]
#[command(version)]
#[command(about = "Validate, display and fill schema-driven lead records")]
#[command(
    long_about = "leadform validates and renders records whose fields are described by a \
    runtime schema.\n\n\
    The schema directory contains fields/<key>.yaml and lov/<CODE>.yaml files. \
    Run `leadform init <dir>` to seed the built-in lead schema.\n\n\
    Environment variables:\n  \
    RUST_LOG  Override the log filter (e.g. leadform_fields=debug)"
)]
pub struct Cli {
    /// Enable debug output to stderr
    #[arg(short, long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Seed a schema directory with the built-in lead fields and lists of values
    Init {
        /// Schema directory (created if missing)
        schema: PathBuf,
    },

    /// List the fields of a schema
    Fields {
        /// Schema directory
        schema: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a record file against a schema
    Validate {
        /// Schema directory
        schema: PathBuf,
        /// Record file (YAML or JSON)
        record: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render a record file for display
    Show {
        /// Schema directory
        schema: PathBuf,
        /// Record file (YAML or JSON)
        record: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Fill in a new record interactively
    New {
        /// Schema directory
        schema: PathBuf,
        /// Where to write the record once it validates
        #[arg(long, short)]
        out: PathBuf,
        /// Existing record to edit instead of starting from defaults
        #[arg(long)]
        from: Option<PathBuf>,
    },
}
