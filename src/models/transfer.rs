//! Transfer confirmation models

use serde::Serialize;

/// Structured view of an emulator confirmation
///
/// Each field is filled only when a line of the response was recognized for it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedTransfer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiver: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl ParsedTransfer {
    /// True once receiver, password and amount have all been seen
    pub fn is_complete(&self) -> bool {
        self.receiver.is_some() && self.password.is_some() && self.amount.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_are_omitted() {
        let transfer = ParsedTransfer {
            password: Some(7300),
            ..Default::default()
        };
        let json = serde_json::to_string(&transfer).expect("Serialization failed");

        assert_eq!(json, r#"{"password":7300}"#);
        assert!(!transfer.is_complete());
    }
}
