//! REST API client for the MAX exchange (API v2)

use crate::auth::{AuthError, MaxAuth};
use crate::exchange::ExchangeClient;
use crate::helpers::{parse_json, require_success, with_headers};
use crate::types::{Account, Order, OrderRequest, Side};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Map, Value};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_MAX_URL: &str = "https://max-api.maicoin.com";

const ACCOUNTS_PATH: &str = "/api/v2/members/accounts";
const ORDERS_PATH: &str = "/api/v2/orders";
const ORDERS_MULTI_PATH: &str = "/api/v2/orders/multi";
const ORDERS_CLEAR_PATH: &str = "/api/v2/orders/clear";

#[derive(Error, Debug)]
pub enum RestError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Authentication failed: {0}")]
    AuthFailed(#[from] AuthError),

    #[error("Deserialization failed: {0}")]
    DeserializeFailed(String),
}

pub type Result<T> = std::result::Result<T, RestError>;

/// Authenticated REST client for MAX
pub struct MaxRestClient {
    pub(crate) base_url: String,
    client: Client,
    auth: MaxAuth,
}

impl MaxRestClient {
    pub fn new(base_url: impl Into<String>, auth: MaxAuth) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
            auth,
        })
    }

    /// Signed GET; `params` go both into the payload and the query string
    async fn private_get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: Map<String, Value>,
        query: &[(String, String)],
        context: &str,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let headers = self.auth.headers(path, &params)?;

        debug!("GET {} {:?}", url, query);

        let req = with_headers(self.client.get(&url).query(query), headers);
        let response = req.send().await?;
        let response = require_success(response, context).await?;

        parse_json(response).await
    }

    /// Signed POST with the parameters as JSON body
    async fn private_post<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: Map<String, Value>,
        context: &str,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let headers = self.auth.headers(path, &params)?;
        let body = serde_json::to_string(&params)
            .map_err(|e| RestError::ApiError(e.to_string()))?;

        debug!("POST {} {}", url, body);

        let req = with_headers(
            self.client.post(&url).header("Content-Type", "application/json"),
            headers,
        );
        let response = req.body(body).send().await?;
        let response = require_success(response, context).await?;

        parse_json(response).await
    }
}

fn into_map(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// Exchange-side decimal formatting for prices and volumes
fn decimal(value: f64) -> String {
    let formatted = format!("{:.8}", value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_string()
}

fn order_body(order: &OrderRequest) -> Value {
    json!({
        "side": order.side.as_str(),
        "volume": decimal(order.size),
        "price": decimal(order.price),
        "ord_type": "limit",
    })
}

fn cancel_params(pair: &str, side: Side) -> Map<String, Value> {
    into_map(json!({ "market": pair, "side": side.as_str() }))
}

/// Signed parameters and the matching `state[]` query string
fn history_params(pair: &str, states: &[String]) -> (Map<String, Value>, Vec<(String, String)>) {
    let params = into_map(json!({ "market": pair, "state": states }));
    let mut query = vec![("market".to_string(), pair.to_string())];
    query.extend(states.iter().map(|s| ("state[]".to_string(), s.clone())));
    (params, query)
}

fn create_params(order: &OrderRequest) -> Map<String, Value> {
    let mut params = into_map(order_body(order));
    params.insert("market".to_string(), Value::String(order.pair.clone()));
    params
}

fn batch_params(pair: &str, orders: &[OrderRequest]) -> Map<String, Value> {
    let bodies: Vec<Value> = orders.iter().map(order_body).collect();
    into_map(json!({ "market": pair, "orders": bodies }))
}

#[async_trait]
impl ExchangeClient for MaxRestClient {
    async fn cancel_orders(&self, pair: &str, side: Side) -> Result<Vec<Order>> {
        debug!("Canceling all {} orders on {}", side, pair);

        let params = cancel_params(pair, side);
        self.private_post(ORDERS_CLEAR_PATH, params, "Failed to cancel orders")
            .await
    }

    async fn order_history(&self, pair: &str, states: &[String]) -> Result<Vec<Order>> {
        debug!("Fetching {} order history for states {:?}", pair, states);

        let (params, query) = history_params(pair, states);

        self.private_get(ORDERS_PATH, params, &query, "Failed to fetch order history")
            .await
    }

    async fn create_order(&self, order: &OrderRequest) -> Result<Order> {
        debug!(
            "Placing {} order on {}: {} @ {}",
            order.side, order.pair, order.size, order.price
        );

        let params = create_params(order);
        self.private_post(ORDERS_PATH, params, "Failed to place order")
            .await
    }

    async fn create_orders(&self, pair: &str, orders: &[OrderRequest]) -> Result<Vec<Order>> {
        if orders.is_empty() {
            return Ok(Vec::new());
        }

        debug!("Placing {} orders on {}", orders.len(), pair);

        let params = batch_params(pair, orders);
        self.private_post(ORDERS_MULTI_PATH, params, "Failed to place orders")
            .await
    }

    async fn balances(&self) -> Result<Vec<Account>> {
        debug!("Fetching account balances");

        self.private_get(ACCOUNTS_PATH, Map::new(), &[], "Failed to fetch balances")
            .await
    }
}
