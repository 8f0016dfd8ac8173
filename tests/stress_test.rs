//! Stress tests for the order book.
//!
//! These tests verify:
//! 1. Structural invariants hold under random Add/Modify/Delete churn
//! 2. Ladder contents match a naive reference model
//! 3. Determinism is preserved across runs
//! 4. Rejected events never change the book
//!
//! ## Running Stress Tests
//!
//! ```bash
//! # Run all stress tests (release mode recommended)
//! cargo test --release --test stress_test -- --nocapture
//!
//! # Run specific test
//! cargo test --release --test stress_test stress_random_churn -- --nocapture
//! ```

use std::collections::HashMap;
use std::time::Instant;

use ladder_book::orderbook::{Ladder, LevelOrder};
use ladder_book::{Action, BookError, OrderBook, OrderRecord, Side};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// ============================================================================
// TEST CONSTANTS
// ============================================================================

/// Number of events for the churn test
const STRESS_EVENT_COUNT: usize = 200_000;

/// Securities the random feed spreads over
const SECURITIES: [&str; 4] = ["US30303M1027", "US02079K1079", "US0378331005", "US5949181045"];

/// Price grid: BASE_TICK ± TICK_SPREAD ticks of 0.01
const BASE_TICK: i32 = 10_000;
const TICK_SPREAD: i32 = 150;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

type ModelKey = (&'static str, Side);

/// Resting orders per security and side, in arrival order.
#[derive(Default)]
struct Model {
    resting: HashMap<ModelKey, Vec<OrderRecord>>,
}

impl Model {
    fn orders(&self, security: &'static str, side: Side) -> &[OrderRecord] {
        self.resting
            .get(&(security, side))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

fn grid_price(rng: &mut ChaCha8Rng) -> f32 {
    let tick = BASE_TICK + rng.gen_range(-TICK_SPREAD..=TICK_SPREAD);
    tick as f32 / 100.0
}

/// Generate a deterministic valid feed, tracking the expected resting state.
///
/// Uses a seeded RNG for reproducibility. Same seed = same feed.
fn generate_churn(count: usize, seed: u64) -> (Vec<OrderRecord>, Model) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut model = Model::default();
    let mut feed = Vec::with_capacity(count);
    let mut next_id = 1u64;

    for _ in 0..count {
        let security = SECURITIES[rng.gen_range(0..SECURITIES.len())];
        let side = if rng.gen_bool(0.5) { Side::Buy } else { Side::Sell };
        let resting = model.resting.entry((security, side)).or_default();

        let roll: f64 = rng.gen();
        if resting.is_empty() || roll < 0.55 {
            let order = OrderRecord::add(next_id, side, security, grid_price(&mut rng), rng.gen_range(1..=10_000));
            next_id += 1;
            resting.push(order.clone());
            feed.push(order);
        } else if roll < 0.75 {
            let index = rng.gen_range(0..resting.len());
            let target = &mut resting[index];
            let event = OrderRecord::modify(target.id, side, security, target.price, rng.gen_range(1..=10_000));
            *target = event.clone();
            feed.push(event);
        } else {
            let index = rng.gen_range(0..resting.len());
            let target = resting.remove(index);
            feed.push(OrderRecord::delete(target.id, side, security, target.price, target.volume));
        }
    }

    (feed, model)
}

/// Check ladder structure and compare it with the reference model.
fn assert_ladder_matches<O: LevelOrder>(ladder: &Ladder<O>, expected: &[OrderRecord]) {
    let mut previous = None;
    let mut order_count = 0;

    for level in ladder.levels() {
        assert!(!level.is_empty(), "empty level at {}", level.price());
        assert_eq!(
            level.total_volume(),
            level.iter().map(|o| o.volume).sum::<u64>(),
            "cached volume at {}",
            level.price()
        );

        if let Some(prev) = previous {
            match ladder.side() {
                Side::Buy => assert!(level.price() < prev, "bids must descend"),
                Side::Sell => assert!(level.price() > prev, "asks must ascend"),
            }
        }
        previous = Some(level.price());

        let queued: Vec<&OrderRecord> = level.iter().collect();
        let modelled: Vec<&OrderRecord> = expected
            .iter()
            .filter(|o| o.price_key() == level.price())
            .collect();
        assert_eq!(queued, modelled, "queue at {}", level.price());
        order_count += level.len();
    }

    assert_eq!(order_count, expected.len());
    assert_eq!(ladder.order_count(), expected.len());
}

// ============================================================================
// STRESS TESTS
// ============================================================================

/// Main stress test: random churn against a reference model.
///
/// # Verification
/// - Every generated event is accepted
/// - No empty levels, cached volumes are exact, levels sorted by side
/// - Each level's queue equals the model's orders at that price, in order
#[test]
fn stress_random_churn() {
    println!("\n=== STRESS TEST: Random Churn ===\n");

    let (feed, model) = generate_churn(STRESS_EVENT_COUNT, 42);
    let mut book = OrderBook::with_capacity(SECURITIES.len());

    let start = Instant::now();
    let report = book.replay(&feed);
    let elapsed = start.elapsed();

    println!("  Events processed:  {:>12}", report.events_processed);
    println!("  Events rejected:   {:>12}", report.events_rejected);
    println!("  Elapsed time:      {:>12.2?}", elapsed);
    println!(
        "  Throughput:        {:>12.0} events/sec",
        STRESS_EVENT_COUNT as f64 / elapsed.as_secs_f64()
    );
    println!("  State root:        {}", report.state_root_hex());

    assert_eq!(report.events_processed, STRESS_EVENT_COUNT as u64);
    assert_eq!(report.events_rejected, 0);

    for security in SECURITIES {
        let instrument = book.instrument(security).expect("security was fed");
        assert_ladder_matches(&instrument.bid, model.orders(security, Side::Buy));
        assert_ladder_matches(&instrument.ask, model.orders(security, Side::Sell));
    }

    println!("\n=== STRESS TEST PASSED ===\n");
}

/// Verify determinism: Same feed produces identical state root.
#[test]
fn verify_determinism() {
    println!("\n=== DETERMINISM TEST ===\n");

    const TEST_COUNT: usize = 10_000;
    const SEED: u64 = 12345;

    let run = |seed: u64| {
        let (feed, _) = generate_churn(TEST_COUNT, seed);
        let mut book = OrderBook::new();
        book.replay(&feed).state_root
    };

    let root1 = run(SEED);
    let root2 = run(SEED);
    println!("  Run 1 state root: {}", hex::encode(root1));
    println!("  Run 2 state root: {}", hex::encode(root2));
    assert_eq!(root1, root2, "State roots must match for determinism");

    let root3 = run(SEED + 1);
    println!("  Different seed:   {}", hex::encode(root3));
    assert_ne!(root1, root3, "Different seeds should produce different roots");

    println!("\n=== DETERMINISM VERIFIED ===\n");
}

/// Rejected events interleaved with valid churn leave no trace.
#[test]
fn stress_rejections_are_side_effect_free() {
    println!("\n=== REJECTION STRESS TEST ===\n");

    const EVENT_COUNT: usize = 5_000;
    const INVALID_EVERY: usize = 25;

    let (feed, _) = generate_churn(EVENT_COUNT, 7);
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let mut book = OrderBook::new();
    let mut rejected = 0;

    for (i, order) in feed.iter().enumerate() {
        book.process(order).expect("generated events are valid");
        if i % INVALID_EVERY != 0 {
            continue;
        }

        let before = book.state_root();
        let security = order.security.as_str();
        let side = order.side().unwrap_or_default();
        let bad = match rng.gen_range(0..4) {
            // Off-grid price: never a level
            0 => OrderRecord::delete(order.id, side, security, 1.005, 1),
            // Unused id, at a price that may or may not be a level
            1 => OrderRecord::modify(u64::MAX, side, security, order.price, 1),
            // Re-sent Add is a duplicate, re-sent Delete finds nothing
            2 if order.action() != Some(Action::Modify) => order.clone(),
            _ => {
                let mut corrupt = order.clone();
                if rng.gen_bool(0.5) {
                    corrupt.side_raw = 2;
                } else {
                    corrupt.action_raw = 0;
                }
                corrupt
            }
        };

        let err = book.process(&bad).expect_err("event must be rejected");
        assert_ne!(err.code(), 0);
        assert_eq!(book.state_root(), before, "{err} changed the book");
        rejected += 1;
    }

    println!("  Rejected events:   {:>12}", rejected);
    assert!(rejected > 0);

    println!("\n=== REJECTION TEST PASSED ===\n");
}

/// Same id resting on both sides, and reused after delete.
#[test]
fn stress_id_reuse() {
    let mut book = OrderBook::new();
    let security = SECURITIES[0];

    for round in 0..1_000u64 {
        let price = 100.0 + (round % 10) as f32;
        book.process(&OrderRecord::add(1, Side::Buy, security, price, round + 1)).unwrap();
        book.process(&OrderRecord::add(1, Side::Sell, security, price + 1.0, round + 1)).unwrap();

        let err = book
            .process(&OrderRecord::add(1, Side::Buy, security, price, 1))
            .unwrap_err();
        assert!(matches!(err, BookError::DuplicateOrderId { order_id: 1, .. }));

        book.process(&OrderRecord::delete(1, Side::Buy, security, price, 0)).unwrap();
        book.process(&OrderRecord::delete(1, Side::Sell, security, price + 1.0, 0)).unwrap();
    }

    assert_eq!(book.depth(security, Side::Buy), 0);
    assert_eq!(book.depth(security, Side::Sell), 0);
    assert!(book.instrument(security).unwrap().is_empty());
}
