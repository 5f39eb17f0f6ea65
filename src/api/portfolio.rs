//! Holdings, limits and positions service.

use std::sync::Arc;

use serde::Serialize;

use crate::auth::SessionInner;
use crate::client::Route;
use crate::models::{Exchange, Holding, Limits, ListResponse, Position, ProductType, Segment};
use crate::Result;

/// Service for account-level portfolio queries.
///
/// Every request carries the session's user id, account id and token.
///
/// # Example
///
/// ```no_run
/// # async fn example(session: shoonya_rs::Session) -> shoonya_rs::Result<()> {
/// use shoonya_rs::api::LimitsQuery;
/// use shoonya_rs::models::ProductType;
///
/// let holdings = session.portfolio().holdings(None).await?;
/// for holding in holdings.records() {
///     println!("{:?}: {:?}", holding.symbol(), holding.holdqty);
/// }
///
/// let limits = session
///     .portfolio()
///     .limits(LimitsQuery::new().product(ProductType::Intraday))
///     .await?;
/// println!("Cash: {:?}", limits.cash);
/// # Ok(())
/// # }
/// ```
pub struct PortfolioService {
    inner: Arc<SessionInner>,
}

/// Optional filters for [`PortfolioService::limits`].
///
/// Filters left unset are omitted from the request entirely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LimitsQuery {
    product: Option<ProductType>,
    segment: Option<Segment>,
    exchange: Option<Exchange>,
}

impl LimitsQuery {
    /// An unfiltered query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to a product.
    pub fn product(mut self, product: ProductType) -> Self {
        self.product = Some(product);
        self
    }

    /// Restrict to a segment.
    pub fn segment(mut self, segment: Segment) -> Self {
        self.segment = Some(segment);
        self
    }

    /// Restrict to an exchange.
    pub fn exchange(mut self, exchange: Exchange) -> Self {
        self.exchange = Some(exchange);
        self
    }
}

#[derive(Debug, Serialize)]
struct AccountPayload {
    uid: String,
    actid: String,
}

#[derive(Debug, Serialize)]
struct HoldingsPayload {
    uid: String,
    actid: String,
    prd: ProductType,
}

#[derive(Debug, Serialize)]
struct LimitsPayload {
    uid: String,
    actid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    prd: Option<ProductType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    seg: Option<Segment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    exch: Option<Exchange>,
}

impl PortfolioService {
    pub(crate) fn new(inner: Arc<SessionInner>) -> Self {
        Self { inner }
    }

    /// Get holdings for a product, cash-and-carry when `None`.
    pub async fn holdings(&self, product: Option<ProductType>) -> Result<ListResponse<Holding>> {
        let (uid, actid) = self.inner.identity().await;
        let payload = HoldingsPayload {
            uid,
            actid,
            prd: product.unwrap_or_default(),
        };

        self.inner.channel.post(Route::Holdings, &payload).await
    }

    /// Get cash and margin limits.
    pub async fn limits(&self, query: LimitsQuery) -> Result<Limits> {
        let (uid, actid) = self.inner.identity().await;
        let payload = LimitsPayload {
            uid,
            actid,
            prd: query.product,
            seg: query.segment,
            exch: query.exchange,
        };

        self.inner.channel.post(Route::Limits, &payload).await
    }

    /// Get the net position book.
    pub async fn positions(&self) -> Result<ListResponse<Position>> {
        let (uid, actid) = self.inner.identity().await;
        self.inner
            .channel
            .post(Route::Positions, &AccountPayload { uid, actid })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limits_payload_omits_unset_filters() {
        let payload = LimitsPayload {
            uid: "FA12345".into(),
            actid: "FA12345".into(),
            prd: None,
            seg: Some(Segment::Derivatives),
            exch: None,
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json, serde_json::json!({"uid": "FA12345", "actid": "FA12345", "seg": "FO"}));
    }

    #[test]
    fn test_limits_query_builder() {
        let query = LimitsQuery::new()
            .product(ProductType::Margin)
            .exchange(Exchange::Nfo);
        assert_eq!(query.product, Some(ProductType::Margin));
        assert_eq!(query.segment, None);
        assert_eq!(query.exchange, Some(Exchange::Nfo));
    }
}
