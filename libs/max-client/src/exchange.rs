use crate::rest::Result;
use crate::types::{Account, Order, OrderRequest, Side};
use async_trait::async_trait;

/// Exchange operations the ladder driver depends on
///
/// Implemented by [`crate::MaxRestClient`] for the live exchange. Tests provide
/// their own implementation instead of talking to a real exchange.
#[async_trait]
pub trait ExchangeClient: Send + Sync {
    /// Cancel every open order for `pair` on `side`
    async fn cancel_orders(&self, pair: &str, side: Side) -> Result<Vec<Order>>;

    /// Orders for `pair` whose state is one of `states`
    async fn order_history(&self, pair: &str, states: &[String]) -> Result<Vec<Order>>;

    /// Place one limit order
    async fn create_order(&self, order: &OrderRequest) -> Result<Order>;

    /// Place several limit orders on `pair` in one request
    async fn create_orders(&self, pair: &str, orders: &[OrderRequest]) -> Result<Vec<Order>>;

    /// All account balances
    async fn balances(&self) -> Result<Vec<Account>>;
}
