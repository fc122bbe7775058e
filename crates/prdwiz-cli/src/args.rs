use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{DocCommands, ServeArgs, TrackCommands};

/// Author Product Requirements Documents step by step and track their
/// implementation.
///
/// Documents are stored as JSON files in the data directory. Each document
/// gets an implementation checklist derived from its tech stack the first
/// time it is tracked.
#[derive(Parser)]
#[command(version, about, name = "prd")]
pub struct Args {
    /// Directory holding the documents/ and trackers/ namespaces. Defaults to
    /// $XDG_DATA_HOME/prdwiz
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage PRD documents
    #[command(alias = "d")]
    Doc {
        #[command(subcommand)]
        command: DocCommands,
    },
    /// Track implementation progress of a document
    #[command(alias = "t")]
    Track {
        #[command(subcommand)]
        command: TrackCommands,
    },
    /// Print the JSON Schema of a PRD document
    Schema,
    /// Serve the HTTP API
    Serve(ServeArgs),
}
