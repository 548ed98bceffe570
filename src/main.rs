//! CLI entry point for pin.

mod app;
mod build_info;
mod cli;

use clap::{CommandFactory, Parser};
use pin::render::Renderer;

#[tokio::main]
async fn main() {
    let args = cli::Args::parse();
    let color = !args.no_color;
    app::logging::init_logging(args.verbose, color);
    let renderer = Renderer::new(color);

    let Some(command) = args.resolved_command() else {
        if let Err(e) = cli::Args::command().print_help() {
            renderer.error(&format!("failed to print help: {e}"));
        }
        std::process::exit(2);
    };

    if let Err(msg) = app::dispatch(&renderer, args.config.as_deref(), command).await {
        renderer.error(&msg);
        std::process::exit(1);
    }
}
