use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderSide {
    Buy,
    Sell,
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderSide::Buy => write!(f, "BUY"),
            OrderSide::Sell => write!(f, "SELL"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Submitted,
    Filled,
    PartiallyFilled,
    Cancelled,
    Rejected,
}

/// The request the policy/risk planes hand the execution plane to open a
/// new position.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionRequest {
    pub market: String,
    pub side: OrderSide,
    pub price: f64,
    pub volume: f64,
    pub strategy_name: String,
    pub stop_loss: f64,
    pub take_profit_1: f64,
    pub take_profit_2: f64,
    pub breakeven_trigger: f64,
    pub trailing_start: f64,
}

/// A fill/status event the execution plane hands back to the coordinator.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionUpdate {
    pub order_id: String,
    pub market: String,
    pub side: OrderSide,
    pub status: OrderStatus,
    pub filled_volume: f64,
    pub order_volume: f64,
    pub avg_price: f64,
    pub strategy_name: String,
    pub source: String,
    pub event: String,
    pub terminal: bool,
    pub ts_ms: i64,
}

/// Verdict returned by the risk plane's pre-trade checks.
#[derive(Debug, Clone, PartialEq)]
pub struct PreTradeCheck {
    pub allowed: bool,
    pub reason: String,
}

impl PreTradeCheck {
    pub fn allowed(reason: impl Into<String>) -> Self {
        Self {
            allowed: true,
            reason: reason.into(),
        }
    }

    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            reason: reason.into(),
        }
    }
}

/// The minimal open-position view `validate_exit` needs. Full position
/// lifecycle bookkeeping belongs to the concrete risk manager.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Position {
    pub size: f64,
    pub avg_entry_price: f64,
    pub unrealized_pnl: f64,
    pub realized_pnl: f64,
}
