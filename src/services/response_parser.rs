//! Parser for the emulator's human-readable transfer confirmation
//!
//! A confirmation is three lines in no particular order:
//!
//! ```text
//! Пароль: 7300
//! Спишется 123,62р.
//! Перевод на счет 4100175017397
//! ```
//!
//! Every line is offered to the recognizers in a fixed order (receiver,
//! password, amount) and the first one that matches claims it. A recognized
//! line overwrites its field, so when two lines look alike the later one wins.
//! Lines nobody recognizes are skipped.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use tracing::{trace, warn};

use crate::api::emulator::EmulatorError;
use crate::models::ParsedTransfer;
use crate::utils::numbers::coerce_int;

lazy_static! {
    static ref PASSWORD_LINE: Regex =
        Regex::new(r"^(?P<label>.*): (?P<value>.*)$").expect("valid password pattern");
    static ref AMOUNT_LINE: Regex = Regex::new(
        r"^(?P<lead>.*) (?P<prefix>\$?)(?P<whole>[0-9]+),(?P<fraction>[0-9]+)(?P<suffix>kr|\$|£|€|р\.)?"
    )
    .expect("valid amount pattern");
}

/// Change to the parsed record produced by one recognized line
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    Receiver(String),
    Password(i64),
    Amount { amount: f64, currency: String },
}

impl FieldUpdate {
    fn apply(self, transfer: &mut ParsedTransfer) {
        match self {
            FieldUpdate::Receiver(receiver) => transfer.receiver = Some(receiver),
            FieldUpdate::Password(password) => transfer.password = Some(password),
            FieldUpdate::Amount { amount, currency } => {
                transfer.amount = Some(amount);
                transfer.currency = Some(currency);
            }
        }
    }
}

/// Pieces of an amount line, e.g. `Спишется $123,62` or `Спишется 123,62р.`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountMatch<'a> {
    pub whole: &'a str,
    pub fraction: &'a str,
    /// Symbol written before the number (only `$`)
    pub prefix_symbol: Option<&'a str>,
    /// Token written after the number
    pub suffix_token: Option<&'a str>,
}

impl<'a> AmountMatch<'a> {
    pub fn capture(line: &'a str) -> Option<Self> {
        let caps = AMOUNT_LINE.captures(line)?;
        Some(Self {
            whole: caps.name("whole")?.as_str(),
            fraction: caps.name("fraction")?.as_str(),
            prefix_symbol: non_empty(&caps, "prefix"),
            suffix_token: non_empty(&caps, "suffix"),
        })
    }

    /// `whole.fraction` as written, no rounding
    pub fn amount(&self) -> Option<f64> {
        format!("{}.{}", self.whole, self.fraction).parse().ok()
    }

    /// Suffix token beats prefix symbol; empty when neither was written
    pub fn currency(&self) -> &'a str {
        self.suffix_token.or(self.prefix_symbol).unwrap_or("")
    }
}

fn non_empty<'a>(caps: &Captures<'a>, name: &str) -> Option<&'a str> {
    caps.name(name).map(|m| m.as_str()).filter(|s| !s.is_empty())
}

type Recognizer = fn(line: &str, receiver: &str) -> Option<FieldUpdate>;

const RECOGNIZERS: [Recognizer; 3] = [recognize_receiver, recognize_password, recognize_amount];

/// `<anything> <receiver>` at the end of the line
///
/// Yields the receiver that was sent, not text taken from the line.
fn recognize_receiver(line: &str, receiver: &str) -> Option<FieldUpdate> {
    let rest = line.strip_suffix(receiver)?;
    rest.ends_with(' ')
        .then(|| FieldUpdate::Receiver(receiver.to_string()))
}

/// `<label>: <value>`, value coerced to an integer
fn recognize_password(line: &str, _receiver: &str) -> Option<FieldUpdate> {
    let caps = PASSWORD_LINE.captures(line)?;
    let value = caps.name("value").map_or(line, |m| m.as_str());
    Some(FieldUpdate::Password(coerce_int(value)))
}

fn recognize_amount(line: &str, _receiver: &str) -> Option<FieldUpdate> {
    let matched = AmountMatch::capture(line)?;
    Some(FieldUpdate::Amount {
        amount: matched.amount()?,
        currency: matched.currency().to_string(),
    })
}

/// Run the recognizers over one line, first match wins
pub fn recognize_line(line: &str, receiver: &str) -> Option<FieldUpdate> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    RECOGNIZERS.iter().find_map(|recognize| recognize(line, receiver))
}

/// Convert a raw emulator answer into a [`ParsedTransfer`]
///
/// `receiver` is the wallet the request was sent to. Fails only when the text
/// does not contain exactly two newlines.
pub fn parse_response(response: &str, receiver: &str) -> Result<ParsedTransfer, EmulatorError> {
    let newlines = response.matches('\n').count();
    if newlines <= 1 || newlines >= 3 {
        warn!("Emulator response has {} newlines, expected 2", newlines);
        return Err(EmulatorError::MalformedResponse {
            response: response.to_string(),
        });
    }

    let mut transfer = ParsedTransfer::default();
    for line in response.split('\n') {
        match recognize_line(line, receiver) {
            Some(update) => update.apply(&mut transfer),
            None => trace!("Skipping unrecognized line: {:?}", line),
        }
    }

    Ok(transfer)
}
