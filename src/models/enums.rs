//! Enumeration types for the Shoonya API.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Product code attached to holdings, positions and limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ProductType {
    /// Cash and carry (delivery)
    #[serde(rename = "C")]
    #[default]
    Cnc,
    /// Normal margin (carry-forward derivatives)
    #[serde(rename = "M")]
    Margin,
    /// Intraday
    #[serde(rename = "I")]
    Intraday,
    /// Cover order
    #[serde(rename = "H")]
    Cover,
    /// Bracket order
    #[serde(rename = "B")]
    Bracket,
}

impl ProductType {
    /// The single-letter wire code.
    pub fn code(&self) -> &'static str {
        match self {
            ProductType::Cnc => "C",
            ProductType::Margin => "M",
            ProductType::Intraday => "I",
            ProductType::Cover => "H",
            ProductType::Bracket => "B",
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Exchange segment used to narrow a limits query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Segment {
    /// Cash market
    #[serde(rename = "CM")]
    Cash,
    /// Futures and options
    #[serde(rename = "FO")]
    Derivatives,
    /// Currency derivatives
    #[serde(rename = "CUR")]
    Currency,
    /// Commodities
    #[serde(rename = "COM")]
    Commodity,
}

/// Exchange code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Exchange {
    /// National Stock Exchange, cash
    Nse,
    /// Bombay Stock Exchange, cash
    Bse,
    /// NSE futures and options
    Nfo,
    /// BSE futures and options
    Bfo,
    /// NSE currency derivatives
    Cds,
    /// Multi Commodity Exchange
    Mcx,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_codes() {
        assert_eq!(ProductType::default().code(), "C");
        assert_eq!(serde_json::to_value(ProductType::Intraday).unwrap(), "I");
        assert_eq!(ProductType::Bracket.to_string(), "B");
    }

    #[test]
    fn test_exchange_and_segment_wire_values() {
        assert_eq!(serde_json::to_value(Exchange::Nfo).unwrap(), "NFO");
        assert_eq!(serde_json::to_value(Segment::Currency).unwrap(), "CUR");
        let exch: Exchange = serde_json::from_str("\"MCX\"").unwrap();
        assert_eq!(exch, Exchange::Mcx);
    }
}
