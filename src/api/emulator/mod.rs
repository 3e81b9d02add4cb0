pub mod client;
pub mod models;

pub use client::EmulatorClient;
pub use models::{EmulatorError, TransferParameters};
