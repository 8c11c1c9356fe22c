//! Application entry point for cms-core.
//!
//! Loads the listener configuration and prints the registered listener
//! definitions per event type.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use dotenv::dotenv;
use log::debug;
use log::info;
use log::warn;

use cms_core::config::Config;
use cms_core::container::Container;
use cms_core::container::ServiceContainer;
use cms_core::listener::ListenerConfig;
use cms_core::listener::ListenerProvider;
use cms_core::logging::setup_logging;

fn main() -> Result<()> {
    dotenv().ok();

    let init_start = Instant::now();
    let config = load_config()?;
    let provider = setup_listeners(&config)?;

    let definitions = provider.get_all_listener_definitions();
    println!("{}", serde_json::to_string_pretty(&definitions)?);

    info!(
        "Listed listeners of {} event type(s) in {:.2}s",
        definitions.len(),
        init_start.elapsed().as_secs_f64()
    );
    Ok(())
}

fn load_config() -> Result<Config> {
    let mut config = Config::new();
    config.load()?;
    setup_logging(&config)?;
    info!("Starting cms-core...");
    debug!("Configuration: {config:?}");
    Ok(config)
}

fn setup_listeners(config: &Config) -> Result<ListenerProvider> {
    debug!("Setting up listeners...");
    let container = Arc::new(ServiceContainer::new());
    debug!("Available services: {:?}", container.service_ids());
    let mut provider = ListenerProvider::new(container.clone());

    if config.listeners_path.exists() {
        let listeners = ListenerConfig::from_path(&config.listeners_path)?;
        listeners.register(&mut provider)?;
        for entry in &listeners.listeners {
            if !container.has(&entry.service) {
                warn!(
                    "Listener service \"{}\" for {} is not registered",
                    entry.service, entry.event
                );
            }
        }
    } else {
        info!(
            "No listener configuration at {}, starting without listeners",
            config.listeners_path.display()
        );
    }

    Ok(provider)
}
