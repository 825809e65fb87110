use std::fmt;

use serde::{Deserialize, Serialize};

/// Which of the three order partitions a record lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderKind {
    Recharge,
    Withdraw,
    Buysell,
}

impl OrderKind {
    pub fn parse(s: &str) -> Option<OrderKind> {
        match s {
            "recharge" => Some(OrderKind::Recharge),
            "withdraw" => Some(OrderKind::Withdraw),
            "buysell" => Some(OrderKind::Buysell),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderKind::Recharge => "recharge",
            OrderKind::Withdraw => "withdraw",
            OrderKind::Buysell => "buysell",
        }
    }
}

impl fmt::Display for OrderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Approved,
    Rejected,
    Completed,
}

impl OrderStatus {
    /// Transition table: pending -> approved|rejected, approved -> completed.
    /// rejected and completed are terminal.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::Pending, OrderStatus::Approved)
                | (OrderStatus::Pending, OrderStatus::Rejected)
                | (OrderStatus::Approved, OrderStatus::Completed)
        )
    }

    pub fn parse(s: &str) -> Option<OrderStatus> {
        match s {
            "pending" => Some(OrderStatus::Pending),
            "approved" => Some(OrderStatus::Approved),
            "rejected" => Some(OrderStatus::Rejected),
            "completed" => Some(OrderStatus::Completed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Approved => "approved",
            OrderStatus::Rejected => "rejected",
            OrderStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: String,

    #[serde(rename = "type")]
    pub kind: OrderKind,

    pub user_id: String,
    pub time: i64,
    pub amount: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coin: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,

    pub status: OrderStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// One audit-log entry. `admin` is the acting admin id, or the submitting
/// user id for the creation event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderEvent {
    pub time: i64,
    pub admin: String,
    pub status: OrderStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// What goes over the SSE push channel: enough for a dashboard to refetch
/// the one record that changed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderChange {
    #[serde(rename = "type")]
    pub kind: OrderKind,
    pub order_id: String,
    pub status: OrderStatus,
}
