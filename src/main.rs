// main.rs
mod args;
mod cli;
mod document;
mod eframe_host;
mod host;
mod icon;
mod page;
mod placement;
mod viewer;

use eframe_host::{AppContext, EframeHost};
use host::{IconOutcome, WindowHost};
use log::{info, warn};
use std::env;
use std::path::PathBuf;

const APP_ID: &str = "LocalViewer";

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let raw: Vec<String> = env::args().skip(1).collect();
    if let Some(request) = cli::info_request(&raw) {
        cli::print_info(&request);
        return Ok(());
    }

    let base_dir = env::current_dir().unwrap_or_else(|e| {
        warn!("Cannot read current directory ({}), resolving paths against '.'", e);
        PathBuf::from(".")
    });
    let config = args::resolve(&raw, &base_dir);
    info!("Resolved configuration: {:?}", config);

    let mut host = EframeHost::new(AppContext::new(APP_ID));
    match host::configure(&config, &mut host) {
        IconOutcome::NotRequested => {}
        IconOutcome::Applied => info!("Window icon applied"),
        IconOutcome::Failed(err) => warn!("Continuing without icon: {}", err),
    }
    host.show()
}
