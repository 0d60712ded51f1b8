use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::math::WAD;
use crate::values::{AccountId, AssetId, FeedId, Wad};

/// Default target reserve ratio (400%)
pub const DEFAULT_TARGET_RESERVE_RATIO: Wad = 4 * WAD;

/// Default maximum oracle price age in seconds
pub const DEFAULT_MAX_PRICE_AGE_SECS: u64 = 60;

/// How fission splits deposited reserve between the two tokens
///
/// Chosen once at construction and fixed for the reactor's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FissionMode {
    /// Split by the target reserve ratio and the oracle price:
    /// `stable = net * P / r*`, `volatile = net - net / r*`
    #[default]
    TargetRatio,
    /// Mint in proportion to existing supplies; bootstrap 1:1 when either
    /// supply is zero
    RatioPreserving,
}

/// Immutable reactor configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactorConfig {
    /// Asset held in reserve
    pub reserve_asset: AssetId,

    /// Pegged token ("neutron")
    pub stable_token: AssetId,

    /// Residual token ("proton")
    pub volatile_token: AssetId,

    /// Recipient of fission/fusion fees and sole fee-curve authority
    pub treasury: AccountId,

    /// Fee on fission, in WAD (must be < 100%)
    pub fission_fee: Wad,

    /// Fee on fusion, in WAD (must be < 100%)
    pub fusion_fee: Wad,

    /// Target reserve ratio, in WAD (must be >= 100%)
    pub target_reserve_ratio: Wad,

    /// Oracle feed pricing the reserve asset in peg units
    pub price_feed: FeedId,

    /// Maximum accepted age of an oracle price for value-affecting calls
    pub max_price_age_secs: u64,

    /// Fission formula variant
    #[serde(default)]
    pub fission_mode: FissionMode,
}

impl ReactorConfig {
    /// Create a configuration with zero fees, the default target ratio and
    /// the default price age
    pub fn new(
        reserve_asset: impl Into<AssetId>,
        stable_token: impl Into<AssetId>,
        volatile_token: impl Into<AssetId>,
        treasury: impl Into<AccountId>,
        price_feed: impl Into<FeedId>,
    ) -> Self {
        Self {
            reserve_asset: reserve_asset.into(),
            stable_token: stable_token.into(),
            volatile_token: volatile_token.into(),
            treasury: treasury.into(),
            fission_fee: 0,
            fusion_fee: 0,
            target_reserve_ratio: DEFAULT_TARGET_RESERVE_RATIO,
            price_feed: price_feed.into(),
            max_price_age_secs: DEFAULT_MAX_PRICE_AGE_SECS,
            fission_mode: FissionMode::default(),
        }
    }

    /// Set fission and fusion fees
    pub fn with_fees(mut self, fission_fee: Wad, fusion_fee: Wad) -> Self {
        self.fission_fee = fission_fee;
        self.fusion_fee = fusion_fee;
        self
    }

    /// Set the target reserve ratio
    pub fn with_target_reserve_ratio(mut self, ratio: Wad) -> Self {
        self.target_reserve_ratio = ratio;
        self
    }

    /// Set the maximum oracle price age
    pub fn with_max_price_age(mut self, secs: u64) -> Self {
        self.max_price_age_secs = secs;
        self
    }

    /// Select the fission formula
    pub fn with_fission_mode(mut self, mode: FissionMode) -> Self {
        self.fission_mode = mode;
        self
    }

    /// Check identifiers, fee bounds and the ratio floor
    pub fn validate(&self) -> ConfigResult<()> {
        let ids = [
            ("reserve_asset", self.reserve_asset.as_str()),
            ("stable_token", self.stable_token.as_str()),
            ("volatile_token", self.volatile_token.as_str()),
            ("treasury", self.treasury.as_str()),
            ("price_feed", self.price_feed.as_str()),
        ];
        for (name, id) in ids {
            if id.trim().is_empty() {
                return Err(ConfigError::InvalidArgument(format!("{} is empty", name)));
            }
        }

        if self.reserve_asset == self.stable_token
            || self.reserve_asset == self.volatile_token
            || self.stable_token == self.volatile_token
        {
            return Err(ConfigError::InvalidArgument(
                "reserve, stable and volatile assets must be distinct".to_string(),
            ));
        }

        if self.fission_fee >= WAD {
            return Err(ConfigError::FeeTooHigh {
                name: "fission_fee",
                value: self.fission_fee,
            });
        }
        if self.fusion_fee >= WAD {
            return Err(ConfigError::FeeTooHigh {
                name: "fusion_fee",
                value: self.fusion_fee,
            });
        }
        if self.target_reserve_ratio < WAD {
            return Err(ConfigError::RatioTooLow(self.target_reserve_ratio));
        }

        Ok(())
    }
}
