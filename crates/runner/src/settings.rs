//! Human-facing reactor settings
//!
//! Fees, ratios and curve parameters are written as decimals (`"0.003"`,
//! `"4"`) and converted to WAD once, at bootstrap.

use reactor_core::math::wad_from_decimal;
use reactor_core::{FeeCurveParams, FissionMode, ReactorConfig};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{Result, RunnerError};

/// Fee curve parameters as decimals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeeCurveSettings {
    pub phi0: Decimal,
    pub phi1: Decimal,
    pub decay_per_second: Decimal,
}

impl Default for FeeCurveSettings {
    fn default() -> Self {
        Self {
            phi0: dec!(0.001),
            phi1: dec!(0.05),
            decay_per_second: dec!(0.999),
        }
    }
}

impl FeeCurveSettings {
    pub fn to_params(&self) -> Result<FeeCurveParams> {
        let params = FeeCurveParams::new(
            wad_from_decimal(self.phi0)?,
            wad_from_decimal(self.phi1)?,
            wad_from_decimal(self.decay_per_second)?,
        );
        params.validate()?;
        Ok(params)
    }
}

/// Reactor configuration as an operator writes it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReactorSettings {
    pub reserve_asset: String,
    pub reserve_decimals: u8,
    pub stable_token: String,
    pub volatile_token: String,
    pub treasury: String,
    pub price_feed: String,
    pub fission_fee: Decimal,
    pub fusion_fee: Decimal,
    pub target_reserve_ratio: Decimal,
    pub max_price_age_secs: u64,
    pub fission_mode: FissionMode,
    pub fee_curve: FeeCurveSettings,
}

impl Default for ReactorSettings {
    fn default() -> Self {
        Self {
            reserve_asset: "WETH".to_string(),
            reserve_decimals: 18,
            stable_token: "nUSD".to_string(),
            volatile_token: "pETH".to_string(),
            treasury: "treasury".to_string(),
            price_feed: "ETH/USD".to_string(),
            fission_fee: dec!(0.003),
            fusion_fee: dec!(0.003),
            target_reserve_ratio: dec!(4),
            max_price_age_secs: 60,
            fission_mode: FissionMode::TargetRatio,
            fee_curve: FeeCurveSettings::default(),
        }
    }
}

impl ReactorSettings {
    /// Convert to a validated [`ReactorConfig`]
    pub fn to_config(&self) -> Result<ReactorConfig> {
        if self.reserve_decimals > 18 {
            return Err(RunnerError::Settings(format!(
                "reserve_decimals {} exceeds 18",
                self.reserve_decimals
            )));
        }

        let config = ReactorConfig::new(
            self.reserve_asset.as_str(),
            self.stable_token.as_str(),
            self.volatile_token.as_str(),
            self.treasury.as_str(),
            self.price_feed.as_str(),
        )
        .with_fees(
            wad_from_decimal(self.fission_fee)?,
            wad_from_decimal(self.fusion_fee)?,
        )
        .with_target_reserve_ratio(wad_from_decimal(self.target_reserve_ratio)?)
        .with_max_price_age(self.max_price_age_secs)
        .with_fission_mode(self.fission_mode);

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reactor_core::{ConfigError, MathError, WAD};

    #[test]
    fn test_default_settings_convert() {
        let config = ReactorSettings::default().to_config().unwrap();
        assert_eq!(config.fission_fee, 3 * WAD / 1000);
        assert_eq!(config.target_reserve_ratio, 4 * WAD);
        assert_eq!(config.treasury.as_str(), "treasury");

        let params = FeeCurveSettings::default().to_params().unwrap();
        assert_eq!(params.phi0, WAD / 1000);
        assert_eq!(params.decay_per_second, 999 * WAD / 1000);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let settings = ReactorSettings {
            fission_fee: dec!(1),
            ..Default::default()
        };
        assert!(matches!(
            settings.to_config(),
            Err(RunnerError::Config(ConfigError::FeeTooHigh { .. }))
        ));

        let settings = ReactorSettings {
            target_reserve_ratio: dec!(-2),
            ..Default::default()
        };
        assert!(matches!(
            settings.to_config(),
            Err(RunnerError::Math(MathError::Negative))
        ));

        let curve = FeeCurveSettings {
            decay_per_second: dec!(1.5),
            ..Default::default()
        };
        assert!(curve.to_params().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: ReactorSettings =
            serde_json::from_str(r#"{ "fission_fee": "0.01", "fission_mode": "ratio_preserving" }"#)
                .unwrap();
        assert_eq!(settings.fission_fee, dec!(0.01));
        assert_eq!(settings.fission_mode, FissionMode::RatioPreserving);
        assert_eq!(settings.target_reserve_ratio, dec!(4));
    }
}
