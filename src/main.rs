use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod models;
mod services;
mod utils;

use api::emulator::{EmulatorClient, TransferParameters};
use config::{EmulatorConfig, TransferInput};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Initialize tracing
    let filter = EnvFilter::from_default_env();
    let filter = match "wallet_emulator=debug".parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let config = match EmulatorConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(2);
        }
    };
    let input = TransferInput::from_env();

    let client = EmulatorClient::new(config);
    info!(
        "Sending {} to {} via {}",
        input.sum,
        input.receiver,
        client.config().endpoint
    );

    let parameters = TransferParameters::new(input.receiver, input.sum);
    match client.get_response(&parameters).await {
        Ok(transfer) => {
            if !transfer.is_complete() {
                warn!("Emulator confirmation is missing fields: {:?}", transfer);
            }
            match serde_json::to_string_pretty(&transfer) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    error!("Failed to serialize transfer: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Err(e) => {
            error!("Transfer failed: {}", e);
            std::process::exit(1);
        }
    }
}
