//! Shared test utilities for ladder session tests
//!
//! Provides an in-memory exchange that records every call.

use async_trait::async_trait;
use max_ladder_bot::max_client::rest::Result as RestResult;
use max_ladder_bot::max_client::{Account, ExchangeClient, Order, OrderRequest, RestError, Side};
use std::collections::HashSet;
use std::sync::Mutex;

/// One call made against the exchange
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Balances,
    Cancel(String, Side),
    History(String, Vec<String>),
    Create(OrderRequest),
    CreateBatch(String, usize),
}

/// Exchange double that records calls and fails on request
#[derive(Default)]
pub struct RecordingExchange {
    pub accounts: Vec<Account>,
    pub fail_balances: bool,
    /// 1-based positions among `create_order` calls that are rejected
    pub failing_orders: HashSet<usize>,
    calls: Mutex<Vec<Call>>,
}

impl RecordingExchange {
    pub fn with_accounts(accounts: &[(&str, &str)]) -> Self {
        Self {
            accounts: accounts
                .iter()
                .map(|(currency, balance)| Account {
                    currency: currency.to_string(),
                    balance: balance.to_string(),
                    locked: Some("0.0".to_string()),
                })
                .collect(),
            ..Default::default()
        }
    }

    /// Exchange whose balance query is rejected
    pub fn failing_balances() -> Self {
        Self {
            fail_balances: true,
            ..Default::default()
        }
    }

    pub fn failing_on(mut self, positions: &[usize]) -> Self {
        self.failing_orders = positions.iter().copied().collect();
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn created(&self) -> Vec<OrderRequest> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Create(order) => Some(order),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) -> usize {
        let mut calls = self.calls.lock().unwrap();
        calls.push(call);
        calls.iter().filter(|c| matches!(c, Call::Create(_))).count()
    }
}

fn exchange_order(id: u64, request: &OrderRequest) -> Order {
    Order {
        id,
        side: request.side,
        ord_type: Some("limit".to_string()),
        price: Some(request.price.to_string()),
        state: "wait".to_string(),
        market: request.pair.clone(),
        volume: request.size.to_string(),
        remaining_volume: Some(request.size.to_string()),
        executed_volume: Some("0.0".to_string()),
        created_at_in_ms: Some(1_700_000_000_000),
    }
}

#[async_trait]
impl ExchangeClient for RecordingExchange {
    async fn cancel_orders(&self, pair: &str, side: Side) -> RestResult<Vec<Order>> {
        self.record(Call::Cancel(pair.to_string(), side));
        Ok(Vec::new())
    }

    async fn order_history(&self, pair: &str, states: &[String]) -> RestResult<Vec<Order>> {
        self.record(Call::History(pair.to_string(), states.to_vec()));
        Ok(Vec::new())
    }

    async fn create_order(&self, order: &OrderRequest) -> RestResult<Order> {
        let position = self.record(Call::Create(order.clone()));
        if self.failing_orders.contains(&position) {
            return Err(RestError::ApiError(format!(
                "Failed to place order (400 Bad Request): [2007] order {} rejected",
                position
            )));
        }
        Ok(exchange_order(position as u64, order))
    }

    async fn create_orders(&self, pair: &str, orders: &[OrderRequest]) -> RestResult<Vec<Order>> {
        self.record(Call::CreateBatch(pair.to_string(), orders.len()));
        Ok(orders
            .iter()
            .enumerate()
            .map(|(i, o)| exchange_order(i as u64 + 1, o))
            .collect())
    }

    async fn balances(&self) -> RestResult<Vec<Account>> {
        self.record(Call::Balances);
        if self.fail_balances {
            return Err(RestError::ApiError(
                "Failed to fetch balances (401 Unauthorized): [2006] invalid signature".to_string(),
            ));
        }
        Ok(self.accounts.clone())
    }
}
