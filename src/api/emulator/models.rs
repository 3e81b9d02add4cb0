use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

/// Keys the emulator accepts in a transfer form
pub const ALLOWED_PARAMETERS: [&str; 2] = ["receiver", "sum"];

/// Form parameters sent with a transfer request
///
/// Kept as a plain map so that callers can hand over whatever they were given;
/// `EmulatorClient::validate_parameters` decides whether it is acceptable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TransferParameters(BTreeMap<String, String>);

impl TransferParameters {
    /// Build the usual `receiver` + `sum` pair
    pub fn new(receiver: impl Into<String>, sum: impl Into<String>) -> Self {
        let mut params = Self::default();
        params.insert("receiver", receiver);
        params.insert("sum", sum);
        params
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Wallet identifier the transfer is addressed to
    pub fn receiver(&self) -> Option<&str> {
        self.get("receiver")
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for TransferParameters
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Errors produced while talking to the emulator or reading its answer
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EmulatorError {
    /// Request parameters or method rejected before anything was sent
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// Nothing usable came back from the remote side
    #[error("Transport error: {0}")]
    TransportError(String),
    #[error("Invalid response from remote, valid response should have only 3 lines: {response}")]
    MalformedResponse { response: String },
}
