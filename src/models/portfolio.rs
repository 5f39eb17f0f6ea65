//! Holdings, limits and position models.
//!
//! Noren sends numbers as strings and occasionally as empty strings, so
//! numeric fields go through a lenient decimal parser that maps anything
//! unparsable to `None` instead of failing the whole reply. Arrays sent as
//! `null` decode as empty.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::de::{lenient_decimal, null_as_default};

/// One tradable symbol a holding is listed under.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HoldingSymbol {
    /// Exchange code
    #[serde(default)]
    pub exch: Option<String>,
    /// Exchange token
    #[serde(default)]
    pub token: Option<String>,
    /// Trading symbol
    #[serde(default)]
    pub tsym: Option<String>,
    /// Price precision
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub pp: Option<Decimal>,
    /// Tick size
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub ti: Option<Decimal>,
    /// Lot size
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub ls: Option<Decimal>,
    /// ISIN
    #[serde(default)]
    pub isin: Option<String>,
}

/// A demat holding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Symbols the holding trades under
    #[serde(default, deserialize_with = "null_as_default")]
    pub exch_tsym: Vec<HoldingSymbol>,
    /// Holding quantity
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub holdqty: Option<Decimal>,
    /// Quantity held in the demat account
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub dpqty: Option<Decimal>,
    /// Quantity pledged as collateral
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub colqty: Option<Decimal>,
    /// Buy-today-sell-tomorrow quantity
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub btstqty: Option<Decimal>,
    /// Quantity already used (sold)
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub usedqty: Option<Decimal>,
    /// Average upload price
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub upldprc: Option<Decimal>,
    /// Product code
    #[serde(default)]
    pub prd: Option<String>,
    /// Any other fields the server sent
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl Holding {
    /// Trading symbol on the first listed exchange.
    pub fn symbol(&self) -> Option<&str> {
        self.exch_tsym.first().and_then(|s| s.tsym.as_deref())
    }
}

/// Cash and margin limits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Limits {
    /// `"Ok"` or `"Not_Ok"`
    #[serde(default)]
    pub stat: Option<String>,
    /// Error message when rejected
    #[serde(default)]
    pub emsg: Option<String>,
    /// Account id
    #[serde(default)]
    pub actid: Option<String>,
    /// Product the limits apply to
    #[serde(default)]
    pub prd: Option<String>,
    /// Segment the limits apply to
    #[serde(default)]
    pub seg: Option<String>,
    /// Exchange the limits apply to
    #[serde(default)]
    pub exch: Option<String>,
    /// Cash margin available
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub cash: Option<Decimal>,
    /// Total amount transferred in today
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub payin: Option<Decimal>,
    /// Total amount requested for withdrawal today
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub payout: Option<Decimal>,
    /// Collateral from pledged holdings
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub brkcollamt: Option<Decimal>,
    /// Uncleared cash
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub unclearedcash: Option<Decimal>,
    /// Margin currently blocked
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub marginused: Option<Decimal>,
    /// Realized profit and loss
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub rpnl: Option<Decimal>,
    /// Unrealized mark-to-market
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub urmtom: Option<Decimal>,
    /// Any other fields the server sent
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl Limits {
    /// Whether the server reported success.
    pub fn is_ok(&self) -> bool {
        self.stat.as_deref() == Some(super::STAT_OK)
    }
}

/// A net position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Account id
    #[serde(default)]
    pub actid: Option<String>,
    /// Exchange code
    #[serde(default)]
    pub exch: Option<String>,
    /// Trading symbol
    #[serde(default)]
    pub tsym: Option<String>,
    /// Exchange token
    #[serde(default)]
    pub token: Option<String>,
    /// Product code
    #[serde(default)]
    pub prd: Option<String>,
    /// Net quantity, negative when short
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub netqty: Option<Decimal>,
    /// Net average price
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub netavgprc: Option<Decimal>,
    /// Quantity bought today
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub daybuyqty: Option<Decimal>,
    /// Quantity sold today
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub daysellqty: Option<Decimal>,
    /// Last traded price
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub lp: Option<Decimal>,
    /// Realized profit and loss
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub rpnl: Option<Decimal>,
    /// Unrealized mark-to-market
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub urmtom: Option<Decimal>,
    /// Any other fields the server sent
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl Position {
    /// Returns `true` if the net quantity is zero or missing.
    pub fn is_flat(&self) -> bool {
        self.netqty.map_or(true, |q| q.is_zero())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    use crate::models::ProductType;

    #[test]
    fn test_holding_parsing() {
        let json = serde_json::json!({
            "stat": "Ok",
            "exch_tsym": [
                {"exch": "NSE", "token": "22", "tsym": "ACC-EQ", "pp": "2", "ti": "0.05", "ls": "1", "isin": "INE012A01025"},
                {"exch": "BSE", "token": "500410", "tsym": "ACC", "pp": "2", "ti": "0.05", "ls": "1"}
            ],
            "holdqty": "10",
            "colqty": "0",
            "upldprc": "1850.35",
            "prd": "C"
        });

        let holding: Holding = serde_json::from_value(json).unwrap();
        assert_eq!(holding.symbol(), Some("ACC-EQ"));
        assert_eq!(holding.holdqty, Some(dec!(10)));
        assert_eq!(holding.upldprc, Some(dec!(1850.35)));
        assert_eq!(holding.exch_tsym[0].ti, Some(dec!(0.05)));
        assert_eq!(holding.prd.as_deref(), Some(ProductType::Cnc.code()));
        assert_eq!(holding.extra["stat"], "Ok");
    }

    #[test]
    fn test_lenient_numbers() {
        let json = serde_json::json!({
            "tsym": "NIFTY-FUT",
            "netqty": "-50",
            "netavgprc": "",
            "lp": 24500.5,
            "urmtom": null
        });

        let position: Position = serde_json::from_value(json).unwrap();
        assert_eq!(position.netqty, Some(dec!(-50)));
        assert_eq!(position.netavgprc, None);
        assert_eq!(position.lp, Some(dec!(24500.5)));
        assert_eq!(position.urmtom, None);
        assert!(!position.is_flat());
    }

    #[test]
    fn test_holding_null_symbols() {
        let json = serde_json::json!([{"exch_tsym": null, "holdqty": "1"}]);
        let list: crate::models::ListResponse<Holding> = serde_json::from_value(json).unwrap();

        let records = list.into_result().unwrap();
        assert!(records[0].exch_tsym.is_empty());
        assert_eq!(records[0].symbol(), None);
        assert_eq!(records[0].holdqty, Some(dec!(1)));
    }

    #[test]
    fn test_limits_parsing() {
        let json = serde_json::json!({
            "request_time": "09:20:00 16-10-2026",
            "stat": "Ok",
            "prfname": "SHOONYA1",
            "cash": "150000.00",
            "payin": "0.00",
            "marginused": "2500.75"
        });

        let limits: Limits = serde_json::from_value(json).unwrap();
        assert!(limits.is_ok());
        assert_eq!(limits.cash, Some(dec!(150000.00)));
        assert_eq!(limits.marginused, Some(dec!(2500.75)));
        assert_eq!(limits.payout, None);
        assert_eq!(limits.extra["prfname"], "SHOONYA1");
    }
}
