use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Raw token amount in the smallest unit of its ledger
pub type Amount = u128;

/// Fixed-point quantity scaled by [`crate::WAD`] (1.0 == 10^18)
pub type Wad = u128;

/// Signed fixed-point quantity scaled by [`crate::WAD`]
pub type SignedWad = i128;

/// Timestamp in UTC
pub type Timestamp = DateTime<Utc>;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl $name {
            /// Create a new identifier
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the identifier as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// An empty identifier plays the role of the zero address
            pub fn is_empty(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}

string_id!(
    /// Holder of balances on a ledger (user, treasury, the reactor itself)
    AccountId
);

string_id!(
    /// Identifier of a fungible asset ledger (reserve, stable or volatile token)
    AssetId
);

string_id!(
    /// Identifier of an oracle price feed
    FeedId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_ids_are_empty() {
        assert!(AccountId::new("").is_empty());
        assert!(AccountId::new("   ").is_empty());
        assert!(!AccountId::new("treasury").is_empty());
    }

    #[test]
    fn test_id_display_and_conversion() {
        let feed: FeedId = "ETH/USD".into();
        assert_eq!(feed.to_string(), "ETH/USD");
        assert_eq!(AssetId::from("WETH".to_string()).as_str(), "WETH");
    }
}
