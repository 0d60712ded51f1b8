//! Reactor Scenario Tests
//!
//! Drives a reactor wired to in-memory ledgers, a manual oracle and a
//! manual clock through fission, fusion, transmutation, price updates and
//! fee-curve changes.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;
use reactor_clock::{Clock, ManualClock};
use reactor_core::math::mul_div;
use reactor_core::{
    AccountId, ConfigError, FeeCurveParams, FeedId, FissionMode, PriceQuote, ReactorConfig,
    ReserveHealth, Supplies, WAD,
};
use reactor_engine::{
    InMemoryLedger, ManualOracle, PricePayload, Reactor, ReactorCollaborators, ReactorError,
    ReactorEvent,
};
use reactor_ports::{FungibleLedger, IssuedToken, PriceOracle, TransferError};
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};

const REACTOR: &str = "reactor";
const TREASURY: &str = "treasury";

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

fn feed() -> FeedId {
    FeedId::new("ETH/USD")
}

fn alice() -> AccountId {
    AccountId::new("alice")
}

fn bob() -> AccountId {
    AccountId::new("bob")
}

fn treasury() -> AccountId {
    AccountId::new(TREASURY)
}

struct Harness {
    reactor: Reactor,
    reserve: Arc<InMemoryLedger>,
    stable: Arc<InMemoryLedger>,
    volatile: Arc<InMemoryLedger>,
    oracle: Arc<ManualOracle>,
    clock: ManualClock,
    events: UnboundedReceiver<ReactorEvent>,
}

impl Harness {
    fn new(config: ReactorConfig) -> Self {
        Self::with_reserve_decimals(config, 18)
    }

    fn with_reserve_decimals(config: ReactorConfig, decimals: u8) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let reactor_id = AccountId::new(REACTOR);
        let reserve = Arc::new(InMemoryLedger::new("WETH", decimals));
        let stable = Arc::new(InMemoryLedger::new("nUSD", 18).with_minter(reactor_id.clone()));
        let volatile = Arc::new(InMemoryLedger::new("pETH", 18).with_minter(reactor_id.clone()));
        let oracle = Arc::new(ManualOracle::new().with_update_fee(10));
        let clock = ManualClock::starting_at(t0());
        oracle.set_price(&feed(), PriceQuote::new(100_000_000, -8, t0()));

        let (tx, events) = unbounded_channel();
        let reactor = Reactor::new(
            reactor_id,
            config,
            ReactorCollaborators {
                reserve: reserve.clone(),
                stable: stable.clone(),
                volatile: volatile.clone(),
                oracle: oracle.clone(),
                clock: Arc::new(clock.clone()),
            },
        )
        .unwrap()
        .with_event_sender(tx);

        Self {
            reactor,
            reserve,
            stable,
            volatile,
            oracle,
            clock,
            events,
        }
    }

    /// Give `account` reserve and let the reactor pull it
    fn fund(&self, account: &AccountId, amount: u128) {
        self.reserve.deposit(account, amount).unwrap();
        let allowance = self.reserve.allowance(account, self.reactor.account());
        self.reserve
            .approve(account, self.reactor.account(), allowance + amount);
    }

    fn set_price(&self, mantissa: i64, exponent: i32) {
        self.oracle
            .set_price(&feed(), PriceQuote::new(mantissa, exponent, self.clock.now()));
    }

    fn drain_events(&mut self) -> Vec<ReactorEvent> {
        let mut out = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            out.push(event);
        }
        out
    }
}

fn config() -> ReactorConfig {
    ReactorConfig::new("WETH", "nUSD", "pETH", TREASURY, "ETH/USD")
}

#[test]
fn test_fission_then_fusion_scenario() {
    let mut h = Harness::new(config());
    h.fund(&alice(), 1000 * WAD);

    let fission = h.reactor.fission(&alice(), 1000 * WAD, &alice(), None).unwrap();
    assert_eq!(fission.quote.stable_out, 250 * WAD);
    assert_eq!(fission.quote.volatile_out, 750 * WAD);
    assert_eq!(h.stable.balance_of(&alice()), 250 * WAD);
    assert_eq!(h.volatile.balance_of(&alice()), 750 * WAD);
    assert_eq!(h.reactor.reserve_balance().unwrap(), 1000 * WAD);
    assert_eq!(h.reactor.reserve_ratio().unwrap(), 4 * WAD);
    assert_eq!(h.reactor.reserve_health().unwrap(), ReserveHealth::Healthy);

    let fusion = h.reactor.fusion(&alice(), 250 * WAD, &bob(), None).unwrap();
    assert_eq!(fusion.quote.stable_burn, 62_500_000_000_000_000_000);
    assert_eq!(fusion.quote.volatile_burn, 187_500_000_000_000_000_000);
    assert_eq!(fusion.quote.reserve_out, 250 * WAD);
    assert_eq!(h.reserve.balance_of(&bob()), 250 * WAD);
    assert_eq!(
        h.reactor.supplies().unwrap(),
        Supplies::new(187_500_000_000_000_000_000, 562_500_000_000_000_000_000)
    );
    assert_eq!(h.stable.total_supply(), 187_500_000_000_000_000_000);

    let kinds: Vec<_> = h.drain_events().iter().map(|e| e.kind()).collect();
    assert_eq!(kinds, vec!["fission", "fusion"]);
}

#[test]
fn test_fission_fee_goes_to_treasury() {
    let h = Harness::new(config().with_fees(WAD / 100, WAD / 50));
    h.fund(&alice(), 1000 * WAD);

    let receipt = h.reactor.fission(&alice(), 1000 * WAD, &alice(), None).unwrap();
    assert_eq!(receipt.quote.fee, 10 * WAD);
    assert_eq!(h.reserve.balance_of(&treasury()), 10 * WAD);
    assert_eq!(h.reactor.reserve_balance().unwrap(), 990 * WAD);

    let fusion = h.reactor.fusion(&alice(), 100 * WAD, &alice(), None).unwrap();
    assert_eq!(fusion.quote.fee, 2 * WAD);
    assert_eq!(h.reserve.balance_of(&alice()), 98 * WAD);
    assert_eq!(h.reserve.balance_of(&treasury()), 12 * WAD);
    assert_eq!(h.reactor.reserve_balance().unwrap(), 890 * WAD);
}

#[test]
fn test_fission_value_is_conserved() {
    let h = Harness::new(config());
    h.set_price(2_000_00000000, -8);
    h.fund(&alice(), 3 * WAD);

    let receipt = h.reactor.fission(&alice(), 3 * WAD, &alice(), None).unwrap();
    let stable_value = receipt.quote.stable_out * h.reactor.stable_price().unwrap() / WAD;
    let volatile_value = receipt.quote.volatile_out * h.reactor.volatile_price().unwrap() / WAD;

    let net = receipt.quote.net;
    let total = stable_value + volatile_value;
    assert!(total <= net);
    assert!(net - total <= 2, "net {} total {}", net, total);
    // 3 ETH at 2000 with r* = 4 backs 1500 stable
    assert_eq!(receipt.quote.stable_out, 1500 * WAD);
}

proptest! {
    #[test]
    fn prop_fission_value_is_conserved(
        amount in (WAD / 1000)..(1_000_000_000_000 * WAD),
        mantissa in 1i64..=1_000_000_000_000,
        exponent in -12i32..=-6,
        fee in 0..(WAD / 10),
    ) {
        let h = Harness::new(config().with_fees(fee, 0));
        h.set_price(mantissa, exponent);
        h.fund(&alice(), amount);

        let quote = h.reactor.fission(&alice(), amount, &alice(), None).unwrap().quote;
        prop_assert_eq!(h.reactor.reserve_balance().unwrap(), quote.net);

        let stable_value =
            mul_div(quote.stable_out, h.reactor.stable_price().unwrap(), WAD).unwrap();
        let volatile_value =
            mul_div(quote.volatile_out, h.reactor.volatile_price().unwrap(), WAD).unwrap();
        let total = stable_value + volatile_value;

        // Implied prices are floored to one unit, which costs at most one unit
        // per whole token, plus one for each term's own floor
        let tolerance = 2 + (quote.stable_out + quote.volatile_out) / WAD;
        prop_assert!(total <= quote.net, "net {} total {}", quote.net, total);
        prop_assert!(
            quote.net - total <= tolerance,
            "net {} total {} tolerance {}",
            quote.net,
            total,
            tolerance
        );
    }
}

#[test]
fn test_stale_price_rejects_and_changes_nothing() {
    let mut h = Harness::new(config());
    h.fund(&alice(), 10 * WAD);
    h.clock.advance_secs(61);

    let err = h.reactor.fission(&alice(), 10 * WAD, &alice(), None).unwrap_err();
    assert_eq!(
        err,
        ReactorError::StalePrice {
            age_secs: 61,
            max_age_secs: 60
        }
    );
    assert!(err.is_transient());
    assert_eq!(h.reserve.balance_of(&alice()), 10 * WAD);
    assert_eq!(h.reactor.supplies().unwrap(), Supplies::default());
    assert!(h.drain_events().is_empty());

    // Informational views still work on the old price
    assert!(h.reactor.quote_fission(10 * WAD).is_ok());
}

#[test]
fn test_price_update_attached_to_operation() {
    let mut h = Harness::new(config());
    h.fund(&alice(), 10 * WAD);
    h.clock.advance_secs(120);

    let update = PricePayload::new(
        feed(),
        PriceQuote::new(200_000_000, -8, h.clock.now()),
    )
    .into_update(10)
    .unwrap();

    let receipt = h
        .reactor
        .fission(&alice(), 10 * WAD, &alice(), Some(&update))
        .unwrap();
    assert_eq!(receipt.price, 2 * WAD);
    assert_eq!(receipt.quote.stable_out, 5 * WAD);
    assert_eq!(h.oracle.fees_collected(), 10);
    assert_eq!(h.drain_events().len(), 1);
}

#[test]
fn test_failed_operation_refunds_attached_update() {
    let mut h = Harness::new(config());
    h.clock.advance_secs(30);
    let original = h.oracle.read_unsafe(&feed()).unwrap();
    let update = PricePayload::new(
        feed(),
        PriceQuote::new(200_000_000, -8, h.clock.now()),
    )
    .into_update(10)
    .unwrap();

    // Rejected before the update is paid for
    assert!(matches!(
        h.reactor.fission(&alice(), 0, &alice(), Some(&update)),
        Err(ReactorError::InvalidArgument(_))
    ));
    assert!(matches!(
        h.reactor.transmute_to_stable(&alice(), 0, &alice(), Some(&update)),
        Err(ReactorError::InvalidArgument(_))
    ));
    assert!(matches!(
        h.reactor.fusion(&alice(), WAD, &alice(), Some(&update)),
        Err(ReactorError::InsufficientSupply(_))
    ));
    assert_eq!(h.oracle.fees_collected(), 0);
    assert_eq!(h.oracle.read_unsafe(&feed()).unwrap(), original);

    // Applied, then undone when the pull fails for lack of allowance
    h.reserve.deposit(&alice(), 10 * WAD).unwrap();
    let err = h
        .reactor
        .fission(&alice(), 10 * WAD, &alice(), Some(&update))
        .unwrap_err();
    assert!(matches!(
        err,
        ReactorError::TransferFailed {
            source: TransferError::InsufficientAllowance { .. },
            ..
        }
    ));
    assert_eq!(h.oracle.fees_collected(), 0);
    assert_eq!(h.oracle.read_unsafe(&feed()).unwrap(), original);
    assert_eq!(h.reactor.supplies().unwrap(), Supplies::default());
    assert!(h.drain_events().is_empty());

    // The same update goes through once the call can succeed
    h.reserve
        .approve(&alice(), h.reactor.account(), 10 * WAD);
    let receipt = h
        .reactor
        .fission(&alice(), 10 * WAD, &alice(), Some(&update))
        .unwrap();
    assert_eq!(receipt.price, 2 * WAD);
    assert_eq!(h.oracle.fees_collected(), 10);
    assert_eq!(h.drain_events().len(), 1);
}

#[test]
fn test_closed_event_receiver_does_not_fail_operations() {
    let Harness {
        reactor,
        reserve,
        events,
        ..
    } = Harness::new(config());
    drop(events);

    reserve.deposit(&alice(), WAD).unwrap();
    reserve.approve(&alice(), reactor.account(), WAD);
    assert!(reactor.fission(&alice(), WAD, &alice(), None).is_ok());
    assert_eq!(reactor.supplies().unwrap().volatile, 3 * WAD / 4);
}

#[test]
fn test_standalone_price_update() {
    let mut h = Harness::new(config());
    h.clock.advance_secs(5);
    let quote = PriceQuote::new(150_000_000, -8, h.clock.now());

    let underpaid = PricePayload::new(feed(), quote).into_update(9).unwrap();
    assert!(matches!(
        h.reactor.update_price(&bob(), &underpaid),
        Err(ReactorError::OracleUnavailable(_))
    ));

    let paid = PricePayload::new(feed(), quote).into_update(25).unwrap();
    let receipt = h.reactor.update_price(&bob(), &paid).unwrap();
    assert_eq!(receipt.price, 3 * WAD / 2);
    assert_eq!(receipt.fee_paid, 10);

    match h.drain_events().as_slice() {
        [ReactorEvent::PriceUpdated(r)] => assert_eq!(r.publish_time, quote.publish_time),
        other => panic!("unexpected events {:?}", other),
    }
}

#[test]
fn test_transmute_zero_fee_and_base_fee() {
    let mut h = Harness::new(config());
    h.fund(&alice(), 1000 * WAD);
    h.reactor.fission(&alice(), 1000 * WAD, &alice(), None).unwrap();

    // Zero curve: free regardless of ledger
    let free = h
        .reactor
        .transmute_to_stable(&alice(), 100 * WAD, &alice(), None)
        .unwrap();
    assert_eq!(free.quote.fee_value, 0);
    assert_eq!(free.quote.amount_out, 100 * WAD);
    assert_eq!(free.decayed_volume, 100 * WAD as i128);

    // Lean the ledger the other way, then charge phi0 = 1%
    h.reactor
        .transmute_to_volatile(&alice(), 200 * WAD, &alice(), None)
        .unwrap();
    assert!(h.reactor.decayed_volume().unwrap() <= 0);

    h.reactor
        .set_fee_curve(&treasury(), FeeCurveParams::new(WAD / 100, 0, WAD))
        .unwrap();
    let charged = h
        .reactor
        .transmute_to_stable(&alice(), 50 * WAD, &alice(), None)
        .unwrap();
    assert_eq!(charged.quote.fee_rate, WAD / 100);
    assert_eq!(charged.quote.fee_value, charged.quote.gross_value / 100);

    let kinds: Vec<_> = h.drain_events().iter().map(|e| e.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            "fission",
            "transmute_to_stable",
            "transmute_to_volatile",
            "fee_curve_update",
            "transmute_to_stable"
        ]
    );
}

#[test]
fn test_transmute_fee_stays_in_reserve() {
    let h = Harness::new(config());
    h.fund(&alice(), 1000 * WAD);
    h.reactor.fission(&alice(), 1000 * WAD, &alice(), None).unwrap();
    h.reactor
        .set_fee_curve(&treasury(), FeeCurveParams::new(WAD / 10, 0, WAD))
        .unwrap();

    let before = h.reactor.reserve_balance().unwrap();
    let receipt = h
        .reactor
        .transmute_to_stable(&alice(), 100 * WAD, &alice(), None)
        .unwrap();
    assert_eq!(receipt.quote.amount_out, 90 * WAD);
    assert_eq!(h.reactor.reserve_balance().unwrap(), before);
    assert_eq!(
        h.reactor.supplies().unwrap(),
        Supplies::new(340 * WAD, 650 * WAD)
    );
}

#[test]
fn test_ledger_decays_between_operations() {
    let h = Harness::new(config());
    h.fund(&alice(), 1000 * WAD);
    h.reactor.fission(&alice(), 1000 * WAD, &alice(), None).unwrap();
    h.reactor
        .set_fee_curve(&treasury(), FeeCurveParams::new(0, WAD, WAD / 2))
        .unwrap();

    h.reactor
        .transmute_to_stable(&alice(), 80 * WAD, &alice(), None)
        .unwrap();
    assert_eq!(h.reactor.decayed_volume().unwrap(), 80 * WAD as i128);

    h.clock.advance_secs(2);
    assert_eq!(h.reactor.decayed_volume().unwrap(), 20 * WAD as i128);

    // Surplus-side rate rose with the flow; the deficit side did not
    let (to_stable, to_volatile) = h.reactor.fee_rates().unwrap();
    assert!(to_stable > 0);
    assert_eq!(to_volatile, 0);
}

#[test]
fn test_unauthorized_fee_update_leaves_params() {
    let mut h = Harness::new(config());
    let before = h.reactor.fee_curve().unwrap();

    let err = h
        .reactor
        .set_fee_curve(&alice(), FeeCurveParams::new(WAD / 100, 0, WAD))
        .unwrap_err();
    assert_eq!(err, ReactorError::Unauthorized(alice()));
    assert_eq!(h.reactor.fee_curve().unwrap(), before);

    let err = h
        .reactor
        .set_fee_curve(&treasury(), FeeCurveParams::new(WAD + 1, 0, WAD))
        .unwrap_err();
    assert!(matches!(
        err,
        ReactorError::Configuration(ConfigError::CurveParamTooHigh { name: "phi0", .. })
    ));
    assert_eq!(h.reactor.fee_curve().unwrap(), before);
    assert!(h.drain_events().is_empty());
}

#[test]
fn test_failed_pull_leaves_no_trace() {
    let mut h = Harness::new(config());
    h.reserve.deposit(&alice(), 10 * WAD).unwrap();

    let err = h.reactor.fission(&alice(), 10 * WAD, &alice(), None).unwrap_err();
    assert!(matches!(
        err,
        ReactorError::TransferFailed {
            source: TransferError::InsufficientAllowance { .. },
            ..
        }
    ));
    assert_eq!(h.reactor.supplies().unwrap(), Supplies::default());
    assert_eq!(h.stable.total_supply(), 0);
    assert!(h.drain_events().is_empty());
}

#[test]
fn test_fusion_burn_failure_rolls_back() {
    let h = Harness::new(config());
    h.fund(&alice(), 1000 * WAD);
    h.reactor.fission(&alice(), 1000 * WAD, &alice(), None).unwrap();

    // Alice gives away her volatile tokens; the second burn fails
    h.volatile.transfer(&alice(), &bob(), 750 * WAD).unwrap();
    let err = h.reactor.fusion(&alice(), 100 * WAD, &alice(), None).unwrap_err();
    assert!(matches!(
        err,
        ReactorError::TransferFailed {
            source: TransferError::InsufficientBalance { .. },
            ..
        }
    ));

    assert_eq!(h.stable.balance_of(&alice()), 250 * WAD);
    assert_eq!(h.reactor.reserve_balance().unwrap(), 1000 * WAD);
    assert_eq!(
        h.reactor.supplies().unwrap(),
        Supplies::new(250 * WAD, 750 * WAD)
    );
}

#[test]
fn test_fusion_preconditions() {
    let h = Harness::new(config());
    assert!(matches!(
        h.reactor.fusion(&alice(), WAD, &alice(), None),
        Err(ReactorError::InsufficientSupply(_))
    ));
    assert!(matches!(
        h.reactor.fission(&alice(), 0, &alice(), None),
        Err(ReactorError::InvalidArgument(_))
    ));
    assert!(matches!(
        h.reactor.fission(&alice(), WAD, &AccountId::new(""), None),
        Err(ReactorError::InvalidArgument(_))
    ));
}

#[test]
fn test_fusion_then_fission_round_trip() {
    for mode in [FissionMode::TargetRatio, FissionMode::RatioPreserving] {
        let h = Harness::new(config().with_fission_mode(mode));
        h.fund(&alice(), 1000 * WAD);
        h.reactor.fission(&alice(), 1000 * WAD, &alice(), None).unwrap();
        let before = h.reactor.supplies().unwrap();

        let fusion = h.reactor.fusion(&alice(), 250 * WAD, &alice(), None).unwrap();
        h.reserve
            .approve(&alice(), h.reactor.account(), fusion.quote.reserve_out);
        h.reactor
            .fission(&alice(), fusion.quote.reserve_out, &alice(), None)
            .unwrap();

        let after = h.reactor.supplies().unwrap();
        assert!(before.stable.abs_diff(after.stable) <= 2, "{:?}", mode);
        assert!(before.volatile.abs_diff(after.volatile) <= 2, "{:?}", mode);
    }
}

#[test]
fn test_ratio_preserving_bootstrap() {
    let h = Harness::new(config().with_fission_mode(FissionMode::RatioPreserving));
    h.fund(&alice(), 100 * WAD);
    let receipt = h.reactor.fission(&alice(), 100 * WAD, &alice(), None).unwrap();
    assert_eq!(receipt.quote.stable_out, 100 * WAD);
    assert_eq!(receipt.quote.volatile_out, 100 * WAD);
}

#[test]
fn test_health_follows_price() {
    let h = Harness::new(config());
    h.fund(&alice(), 1000 * WAD);
    h.reactor.fission(&alice(), 1000 * WAD, &alice(), None).unwrap();

    h.set_price(50_000_000, -8);
    assert_eq!(h.reactor.reserve_ratio().unwrap(), 2 * WAD);
    assert_eq!(h.reactor.reserve_health().unwrap(), ReserveHealth::BelowTarget);

    h.set_price(20_000_000, -8);
    assert_eq!(h.reactor.reserve_health().unwrap(), ReserveHealth::Critical);
    // Stable holders still own a quarter of the reserve at any price
    assert_eq!(h.reactor.stable_price().unwrap(), WAD);
    assert_eq!(h.reactor.stable_price_in_peg().unwrap(), WAD / 5);
}

#[test]
fn test_six_decimal_reserve() {
    let h = Harness::with_reserve_decimals(config(), 6);
    let thousand = 1_000_000_000u128;
    h.fund(&alice(), thousand);

    let receipt = h.reactor.fission(&alice(), thousand, &alice(), None).unwrap();
    assert_eq!(receipt.quote.stable_out, 250 * WAD);
    assert_eq!(h.reactor.reserve_ratio().unwrap(), 4 * WAD);

    let fusion = h.reactor.fusion(&alice(), thousand / 4, &alice(), None).unwrap();
    assert_eq!(fusion.quote.stable_burn, 62_500_000_000_000_000_000);
    assert_eq!(h.reserve.balance_of(&alice()), thousand / 4);
}

#[test]
fn test_quotes_match_operations() {
    let h = Harness::new(config().with_fees(WAD / 200, WAD / 200));
    h.fund(&alice(), 1000 * WAD);
    h.reactor
        .set_fee_curve(&treasury(), FeeCurveParams::new(WAD / 100, WAD / 10, WAD))
        .unwrap();

    let quoted = h.reactor.quote_fission(1000 * WAD).unwrap();
    let done = h.reactor.fission(&alice(), 1000 * WAD, &alice(), None).unwrap();
    assert_eq!(quoted, done.quote);

    let quoted = h.reactor.quote_transmute_to_volatile(30 * WAD).unwrap();
    let done = h
        .reactor
        .transmute_to_volatile(&alice(), 30 * WAD, &alice(), None)
        .unwrap();
    assert_eq!(quoted, done.quote);

    let quoted = h.reactor.quote_fusion(10 * WAD).unwrap();
    let done = h.reactor.fusion(&alice(), 10 * WAD, &alice(), None).unwrap();
    assert_eq!(quoted, done.quote);
}

#[test]
fn test_collaborator_checks() {
    let reactor_id = AccountId::new(REACTOR);
    let clock = ManualClock::starting_at(t0());
    let build = |reserve_decimals: u8, stable_asset: &str| {
        Reactor::new(
            reactor_id.clone(),
            config(),
            ReactorCollaborators {
                reserve: Arc::new(InMemoryLedger::new("WETH", reserve_decimals)),
                stable: Arc::new(InMemoryLedger::new(stable_asset, 18)),
                volatile: Arc::new(InMemoryLedger::new("pETH", 18)),
                oracle: Arc::new(ManualOracle::new()),
                clock: Arc::new(clock.clone()),
            },
        )
    };

    assert!(build(18, "nUSD").is_ok());
    assert!(matches!(
        build(18, "OTHER"),
        Err(ReactorError::Configuration(ConfigError::CollaboratorMismatch(_)))
    ));
    assert_eq!(
        build(24, "nUSD").unwrap_err(),
        ReactorError::Configuration(ConfigError::UnsupportedDecimals(24))
    );
}
