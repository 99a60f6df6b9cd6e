mod agent;
mod client;
mod config;
mod error;
mod probe;
mod tddp;

use config::CONFIG;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
pub async fn main() {
    init_tracing();

    info!("Soil sensor configured as GPIO pin {}", CONFIG.sensor_pin_soil());
    info!("Ambient sensor configured as GPIO pin {}", CONFIG.sensor_pin_ambient());
    match CONFIG.smartplug_addr() {
        Some(addr) => info!("Light sensor configured as smart plug {}", addr),
        None => info!("No smart plug configured, light is not polled"),
    }

    let client = client::ApiClient::new(CONFIG.api_base_uri());
    let probes = probe::default_probes(&CONFIG);
    let agent = agent::PollingAgent::new(probes, client, CONFIG.poll_interval());
    agent.run().await;
}
