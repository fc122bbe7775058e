//! PRD wizard command line and HTTP server.

mod args;
mod cli;
mod http;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use prdwiz_core::CatalogBuilder;
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        data_dir,
        no_color,
        command,
    } = Args::parse();

    if let Some(Schema) = command {
        return cli::print_schema();
    }

    let catalog = CatalogBuilder::new()
        .with_data_dir(data_dir)
        .build()
        .await
        .context("Failed to open data directory")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("prd started with data in {}", catalog.data_dir().display());

    match command {
        Some(Doc { command }) => Cli::new(catalog, renderer).handle_doc_command(command).await,
        Some(Track { command }) => {
            Cli::new(catalog, renderer)
                .handle_track_command(command)
                .await
        }
        Some(Serve(args)) => http::serve(catalog, args.addr)
            .await
            .context("HTTP server failed"),
        Some(Schema) => cli::print_schema(),
        None => Cli::new(catalog, renderer).list_documents().await,
    }
}
