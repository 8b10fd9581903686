//! Exchange-rate quote types.

use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;

/// Errors raised while decoding an upstream quote body.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Body is not JSON, or the pair entry lacks a field.
    #[error("malformed quote body: {0}")]
    Json(#[from] serde_json::Error),

    /// Body is JSON but does not carry the requested pair.
    #[error("currency pair {0} missing from quote body")]
    MissingPair(String),
}

/// One exchange-rate observation as reported by the provider.
///
/// Every value is kept as the provider's text so locale-specific decimals
/// survive untouched. The only way to obtain a `Quote` is [`Quote::decode`]:
///
/// ```compile_fail
/// let quote: fx_quote::Quote = serde_json::from_str(r#"{"bid":"5.43"}"#).unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    code: String,
    code_in: String,
    name: String,
    high: String,
    low: String,
    bid: String,
    ask: String,
    var_bid: String,
    pct_change: String,
    timestamp: String,
    create_date: String,
}

/// Pair entry as it appears on the wire.
#[derive(Deserialize)]
struct QuoteWire {
    code: String,
    #[serde(rename = "codein")]
    code_in: String,
    name: String,
    high: String,
    low: String,
    bid: String,
    ask: String,
    #[serde(rename = "varBid")]
    var_bid: String,
    #[serde(rename = "pctChange")]
    pct_change: String,
    timestamp: String,
    create_date: String,
}

impl From<QuoteWire> for Quote {
    fn from(wire: QuoteWire) -> Self {
        Self {
            code: wire.code,
            code_in: wire.code_in,
            name: wire.name,
            high: wire.high,
            low: wire.low,
            bid: wire.bid,
            ask: wire.ask,
            var_bid: wire.var_bid,
            pct_change: wire.pct_change,
            timestamp: wire.timestamp,
            create_date: wire.create_date,
        }
    }
}

impl Quote {
    /// Decode a provider envelope such as `{"USDBRL": {...}}` and extract `pair_code`.
    pub fn decode(body: &[u8], pair_code: &str) -> Result<Self, DecodeError> {
        let mut envelope: HashMap<String, serde_json::Value> = serde_json::from_slice(body)?;
        let entry = envelope
            .remove(pair_code)
            .ok_or_else(|| DecodeError::MissingPair(pair_code.to_string()))?;
        let wire: QuoteWire = serde_json::from_value(entry)?;
        Ok(wire.into())
    }

    /// Base currency code (e.g., "USD").
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Quote currency code (e.g., "BRL").
    pub fn code_in(&self) -> &str {
        &self.code_in
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn high(&self) -> &str {
        &self.high
    }

    pub fn low(&self) -> &str {
        &self.low
    }

    /// The value exposed to callers, verbatim.
    pub fn bid(&self) -> &str {
        &self.bid
    }

    pub fn ask(&self) -> &str {
        &self.ask
    }

    pub fn var_bid(&self) -> &str {
        &self.var_bid
    }

    pub fn pct_change(&self) -> &str {
        &self.pct_change
    }

    /// Provider timestamp (unix seconds, as text).
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn create_date(&self) -> &str {
        &self.create_date
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    /// A body shaped like the provider's `USD-BRL` answer.
    pub fn usd_brl_body(bid: &str) -> String {
        format!(
            r#"{{"USDBRL":{{"code":"USD","codein":"BRL","name":"Dólar Americano/Real Brasileiro","high":"5.4612","low":"5.4011","varBid":"-0.0123","pctChange":"-0.23","bid":"{bid}","ask":"5.4312","timestamp":"1718035200","create_date":"2024-06-10 13:00:00"}}}}"#
        )
    }
}
