use std::io::{self, BufRead as _};

use anyhow::{Context as _, Result};
use chat_router::config::Config;
use chat_router::host::announce_version;
use chat_router::utils::ResultExt as _;
use chat_router::{logging, store, EventHost, Router};
use log::{debug, info, warn};

fn run(config: Config) -> Result<()> {
    let routes = config.route_table();
    let router = Router::configure(config.prefix, routes.clone());
    if routes.is_empty() {
        warn!("No routes configured, every command will be ignored.");
    } else {
        info!(
            "Routing {} command(s) with prefix {:?}: {}",
            routes.len(),
            router.prefix(),
            routes.names().join(", ")
        );
    }

    let mut host = EventHost::new();
    host.on_ready(announce_version);
    host.on_chat_message(router.into_handler());
    host.ready();

    for line in io::stdin().lock().lines() {
        let line = line.context("Failed to read message from stdin")?;
        if line.trim().is_empty() {
            continue;
        }
        host.deliver_json(&line).print_err();
    }
    debug!("Input closed after {} message(s)", host.delivered());
    Ok(())
}

fn main() {
    let config = store::load_config();
    let logging_config = config
        .as_ref()
        .map(|c| c.logging.clone())
        .unwrap_or_default();
    let _logger = logging::init(&logging_config)
        .inspect_err(|e| eprintln!("{e:#}"))
        .ok();
    run(config.or_default_logged()).print_err();
    info!("Terminating.");
}
