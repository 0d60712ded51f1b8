use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Raw oracle quote: `mantissa * 10^exponent` units of peg per reserve unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub mantissa: i64,
    pub exponent: i32,
    pub publish_time: DateTime<Utc>,
}

impl PriceQuote {
    pub fn new(mantissa: i64, exponent: i32, publish_time: DateTime<Utc>) -> Self {
        Self {
            mantissa,
            exponent,
            publish_time,
        }
    }

    /// Seconds elapsed since publication; a publish time in the future is age 0
    pub fn age_secs(&self, now: DateTime<Utc>) -> u64 {
        let age = (now - self.publish_time).num_seconds();
        u64::try_from(age).unwrap_or(0)
    }

    /// True when the quote is at most `max_age_secs` old
    pub fn is_fresh(&self, now: DateTime<Utc>, max_age_secs: u64) -> bool {
        self.age_secs(now) <= max_age_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_age_and_freshness() {
        let quote = PriceQuote::new(200_000_000_000, -8, t0());
        assert_eq!(quote.age_secs(t0()), 0);
        assert_eq!(quote.age_secs(t0() + Duration::seconds(61)), 61);
        assert!(quote.is_fresh(t0() + Duration::seconds(60), 60));
        assert!(!quote.is_fresh(t0() + Duration::seconds(61), 60));
    }

    #[test]
    fn test_future_publish_time_is_fresh() {
        let quote = PriceQuote::new(1, 0, t0() + Duration::seconds(30));
        assert_eq!(quote.age_secs(t0()), 0);
        assert!(quote.is_fresh(t0(), 0));
    }
}
