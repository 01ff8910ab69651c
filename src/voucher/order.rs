//! Order identifier generation.
//!
//! Order ids are display tokens, not keys: uniqueness is probabilistic and
//! nothing registers or checks them.

use chrono::Utc;
use std::str::FromStr;

pub const ORDER_ID_PREFIX: &str = "IQDATA";

const SUFFIX_LEN: usize = 8;
const BASE36: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// How the suffix after the fixed prefix is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderIdStrategy {
    /// Eight random base-36 characters, uppercase.
    Random,
    /// Current Unix time in milliseconds.
    Timestamp,
}

impl FromStr for OrderIdStrategy {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.to_ascii_lowercase().as_str() {
            "random" => Ok(OrderIdStrategy::Random),
            "timestamp" => Ok(OrderIdStrategy::Timestamp),
            other => Err(format!(
                "unknown order id strategy '{other}' (expected 'random' or 'timestamp')"
            )),
        }
    }
}

pub fn generate_order_id(strategy: OrderIdStrategy) -> String {
    match strategy {
        OrderIdStrategy::Random => {
            let mut id = String::with_capacity(ORDER_ID_PREFIX.len() + SUFFIX_LEN);
            id.push_str(ORDER_ID_PREFIX);
            for _ in 0..SUFFIX_LEN {
                id.push(BASE36[fastrand::usize(..BASE36.len())] as char);
            }
            id
        }
        OrderIdStrategy::Timestamp => {
            format!("{}{}", ORDER_ID_PREFIX, Utc::now().timestamp_millis())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_id_has_prefix_and_base36_suffix() {
        let id = generate_order_id(OrderIdStrategy::Random);
        assert!(id.starts_with(ORDER_ID_PREFIX));

        let suffix = &id[ORDER_ID_PREFIX.len()..];
        assert_eq!(suffix.len(), SUFFIX_LEN);
        assert!(suffix
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn timestamp_id_has_prefix_and_numeric_suffix() {
        let id = generate_order_id(OrderIdStrategy::Timestamp);
        assert!(id.starts_with(ORDER_ID_PREFIX));

        let suffix = &id[ORDER_ID_PREFIX.len()..];
        assert!(!suffix.is_empty());
        assert!(suffix.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn strategy_parses_case_insensitively() {
        assert_eq!(
            "Random".parse::<OrderIdStrategy>().unwrap(),
            OrderIdStrategy::Random
        );
        assert_eq!(
            "TIMESTAMP".parse::<OrderIdStrategy>().unwrap(),
            OrderIdStrategy::Timestamp
        );
        assert!("uuid".parse::<OrderIdStrategy>().is_err());
    }
}
