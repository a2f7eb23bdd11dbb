mod app;
mod catalog;
mod cli;
mod commands;
mod config;
mod conversation;
mod core;
mod display;
mod input;
mod providers;

use crate::app::Application;
use crate::catalog::CatalogService;
use crate::catalog::mock::MockCatalog;
use crate::cli::Args;
use crate::commands::{SessionState, create_command_registry};
use crate::core::error::FlowdeckError;
use crate::providers::dispatch::Dispatcher;
use clap::Parser;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(err) = run(args).await {
        display::error(&err.to_string());
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), FlowdeckError> {
    let catalog: Arc<dyn CatalogService> = Arc::new(MockCatalog::new()?);

    let mut state = SessionState::new(catalog);
    config::apply_initial_selection(&args, &mut state.selection)?;

    let mut application = Application::new(
        args,
        state,
        Dispatcher::new(),
        create_command_registry(),
    )?;
    application.run().await
}
