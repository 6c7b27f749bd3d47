//! Order / line-item state catalog
//!
//! One enumeration covers both orders and their line items. States are
//! stored and serialized as SCREAMING_SNAKE_CASE names; the numeric codes
//! of the legacy schema are still accepted on input and normalized here.
//!
//! # Legacy codes
//!
//! | Code | State |
//! |------|-------|
//! | 1 | IN_PREPARATION |
//! | 2 | READY |
//! | 3 | CANCELLED |
//! | 4 | DELIVERED |
//! | 5 | BILLED |
//! | 6 | CANCELLED (legacy alias, migrated on parse) |
//!
//! Code 6 never appears in new data: it is folded into `Cancelled` at the
//! parse boundary and the canonical name is written back from then on.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Rejected state input (unknown name or numeric code)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown order state: {0}")]
pub struct UnknownState(pub String);

/// Lifecycle state of an order or a single line item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderState {
    /// Sent to the kitchen, being prepared
    #[default]
    InPreparation,
    /// Prepared, waiting to be taken to the table
    Ready,
    /// Cancelled before delivery
    Cancelled,
    /// Delivered to the table
    Delivered,
    /// Finalized by an invoice
    Billed,
}

impl OrderState {
    /// All catalog states, in legacy-code order
    pub const ALL: [OrderState; 5] = [
        OrderState::InPreparation,
        OrderState::Ready,
        OrderState::Cancelled,
        OrderState::Delivered,
        OrderState::Billed,
    ];

    /// Canonical name, identical to the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderState::InPreparation => "IN_PREPARATION",
            OrderState::Ready => "READY",
            OrderState::Cancelled => "CANCELLED",
            OrderState::Delivered => "DELIVERED",
            OrderState::Billed => "BILLED",
        }
    }

    /// Canonical numeric code of the legacy schema
    pub fn code(&self) -> u8 {
        match self {
            OrderState::InPreparation => 1,
            OrderState::Ready => 2,
            OrderState::Cancelled => 3,
            OrderState::Delivered => 4,
            OrderState::Billed => 5,
        }
    }

    /// Parse a canonical name
    pub fn from_name(name: &str) -> Result<Self, UnknownState> {
        match name {
            "IN_PREPARATION" => Ok(OrderState::InPreparation),
            "READY" => Ok(OrderState::Ready),
            "CANCELLED" => Ok(OrderState::Cancelled),
            "DELIVERED" => Ok(OrderState::Delivered),
            "BILLED" => Ok(OrderState::Billed),
            other => Err(UnknownState(other.to_string())),
        }
    }

    /// Parse a legacy numeric code
    ///
    /// Code 6 was used interchangeably with 3 by the legacy schema; both
    /// normalize to [`OrderState::Cancelled`].
    pub fn from_code(code: i64) -> Result<Self, UnknownState> {
        match code {
            1 => Ok(OrderState::InPreparation),
            2 => Ok(OrderState::Ready),
            3 | 6 => Ok(OrderState::Cancelled),
            4 => Ok(OrderState::Delivered),
            5 => Ok(OrderState::Billed),
            other => Err(UnknownState(other.to_string())),
        }
    }

    /// True once the state can never change again on its own
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderState::Cancelled | OrderState::Delivered | OrderState::Billed
        )
    }

    /// True when a line item in this state no longer blocks billing
    pub fn is_payable_terminal(&self) -> bool {
        matches!(self, OrderState::Delivered | OrderState::Cancelled)
    }
}

impl std::fmt::Display for OrderState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderState {
    type Err = UnknownState;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

// Accept both the canonical name and the legacy numeric code.
impl<'de> Deserialize<'de> for OrderState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};
        use std::fmt;

        struct StateVisitor;

        impl<'de> Visitor<'de> for StateVisitor {
            type Value = OrderState;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an order state name or legacy numeric code")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                OrderState::from_name(value).map_err(de::Error::custom)
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                OrderState::from_code(value).map_err(de::Error::custom)
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                self.visit_i64(value as i64)
            }
        }

        deserializer.deserialize_any(StateVisitor)
    }
}
