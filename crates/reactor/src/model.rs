//! Quotes, receipts and notifications
//!
//! A quote is what an operation would do; a receipt is what it did. Each
//! committed operation also emits one [`ReactorEvent`] carrying its receipt.

use reactor_core::{AccountId, Amount, FeeCurveParams, FeedId, SignedWad, Supplies, Timestamp, Wad};
use reactor_fees::FlowDirection;
use serde::{Deserialize, Serialize};

/// Planned outcome of a fission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FissionQuote {
    /// Reserve pulled in, raw units
    pub reserve_in: Amount,
    /// Part of `reserve_in` forwarded to the treasury
    pub fee: Amount,
    /// Part of `reserve_in` kept as backing
    pub net: Amount,
    pub stable_out: Amount,
    pub volatile_out: Amount,
}

/// Planned outcome of a fusion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FusionQuote {
    /// Reserve redeemed, raw units
    pub reserve_amount: Amount,
    pub stable_burn: Amount,
    pub volatile_burn: Amount,
    pub fee: Amount,
    /// `reserve_amount - fee`, paid to the recipient
    pub reserve_out: Amount,
}

/// Planned outcome of a transmutation
///
/// Values are in 18-decimal reserve units; amounts are token units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransmuteQuote {
    pub direction: FlowDirection,
    pub amount_in: Amount,
    pub gross_value: Wad,
    pub fee_rate: Wad,
    pub fee_value: Wad,
    pub net_value: Wad,
    pub amount_out: Amount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FissionReceipt {
    pub caller: AccountId,
    pub recipient: AccountId,
    pub quote: FissionQuote,
    /// Oracle price used, peg per reserve unit
    pub price: Wad,
    pub supplies: Supplies,
    pub timestamp: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FusionReceipt {
    pub caller: AccountId,
    pub recipient: AccountId,
    pub quote: FusionQuote,
    pub supplies: Supplies,
    pub timestamp: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransmuteReceipt {
    pub caller: AccountId,
    pub recipient: AccountId,
    pub quote: TransmuteQuote,
    /// Ledger value after recording this flow
    pub decayed_volume: SignedWad,
    pub supplies: Supplies,
    pub timestamp: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceUpdateReceipt {
    pub caller: AccountId,
    pub feed: FeedId,
    /// Normalized price after the update
    pub price: Wad,
    pub publish_time: Timestamp,
    pub fee_paid: Amount,
    pub timestamp: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeCurveUpdate {
    pub caller: AccountId,
    pub previous: FeeCurveParams,
    pub current: FeeCurveParams,
    /// Ledger value at the moment of the switch
    pub decayed_volume: SignedWad,
    pub timestamp: Timestamp,
}

/// Notification emitted after a committed state transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReactorEvent {
    Fission(FissionReceipt),
    Fusion(FusionReceipt),
    TransmutedToStable(TransmuteReceipt),
    TransmutedToVolatile(TransmuteReceipt),
    PriceUpdated(PriceUpdateReceipt),
    FeeCurveUpdated(FeeCurveUpdate),
}

impl ReactorEvent {
    pub fn timestamp(&self) -> Timestamp {
        match self {
            ReactorEvent::Fission(r) => r.timestamp,
            ReactorEvent::Fusion(r) => r.timestamp,
            ReactorEvent::TransmutedToStable(r) | ReactorEvent::TransmutedToVolatile(r) => {
                r.timestamp
            }
            ReactorEvent::PriceUpdated(r) => r.timestamp,
            ReactorEvent::FeeCurveUpdated(r) => r.timestamp,
        }
    }

    /// Short name for logs and counters
    pub fn kind(&self) -> &'static str {
        match self {
            ReactorEvent::Fission(_) => "fission",
            ReactorEvent::Fusion(_) => "fusion",
            ReactorEvent::TransmutedToStable(_) => "transmute_to_stable",
            ReactorEvent::TransmutedToVolatile(_) => "transmute_to_volatile",
            ReactorEvent::PriceUpdated(_) => "price_update",
            ReactorEvent::FeeCurveUpdated(_) => "fee_curve_update",
        }
    }
}

impl From<TransmuteReceipt> for ReactorEvent {
    fn from(receipt: TransmuteReceipt) -> Self {
        match receipt.quote.direction {
            FlowDirection::ToStable => ReactorEvent::TransmutedToStable(receipt),
            FlowDirection::ToVolatile => ReactorEvent::TransmutedToVolatile(receipt),
        }
    }
}
