//! Data models produced by the emulator services

pub mod transfer;

pub use transfer::ParsedTransfer;
