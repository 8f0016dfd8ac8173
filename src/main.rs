//! Ladder Book - Binary Entry Point
//!
//! Replays the built-in sample feed and then prints a book, runs the
//! self-check, or compares record footprints.
//!
//! ```bash
//! ladder-book --print US30303M1027
//! ladder-book --test
//! RUST_LOG=debug ladder-book --size
//! ```

use std::mem::size_of;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing::info;
use tracing_subscriber::EnvFilter;

use ladder_book::feed::{self, ABSENT_SECURITY, FORWARD_SECURITY, REVERSE_SECURITY};
use ladder_book::orderbook::render;
use ladder_book::types::{CompactOrder, OrderRecord, Price, Side};
use ladder_book::OrderBook;

#[derive(Parser)]
#[command(name = "ladder-book")]
#[command(about = "Replay an order feed into per-security bid/ask ladders")]
struct Cli {
    /// Print the book of a security after the sample feed
    #[arg(short, long, value_name = "SECURITY")]
    print: Option<String>,

    /// Run the sample-feed self-check
    #[arg(short, long)]
    test: bool,

    /// Compare the in-memory and compact record sizes
    #[arg(short, long)]
    size: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    if cli.print.is_none() && !cli.test && !cli.size {
        // Printing help only fails if stdout is gone
        let _ = Cli::command().print_help();
        return ExitCode::SUCCESS;
    }

    let mut book = OrderBook::with_capacity(2);
    let report = book.replay(&feed::sample_feed());
    info!(
        processed = report.events_processed,
        rejected = report.events_rejected,
        state_root = %report.state_root_hex(),
        "sample feed replayed"
    );

    let mut status = ExitCode::SUCCESS;

    if let Some(security) = &cli.print {
        if let Err(err) = print_book(&book, security) {
            eprintln!("{err}");
            status = ExitCode::from(exit_code(err.code()));
        }
    }

    if cli.test && !self_check(&book) {
        status = ExitCode::FAILURE;
    }

    if cli.size {
        print_sizes();
    }

    status
}

fn exit_code(code: i32) -> u8 {
    u8::try_from(code).unwrap_or(1)
}

fn print_book(book: &OrderBook, security: &str) -> ladder_book::Result<()> {
    let rows = book.render(security)?;

    println!("{security}");
    println!("{}", render::header());
    println!("{}", "-".repeat(80));
    for row in rows {
        println!("{row}");
    }
    Ok(())
}

fn level_volumes(book: &OrderBook, security: &str, side: Side, index: usize) -> Vec<u64> {
    book.level_at(security, side, index)
        .iter()
        .map(|o: &OrderRecord| o.volume)
        .collect()
}

fn self_check(book: &OrderBook) -> bool {
    let mut checks: Vec<(String, bool)> = vec![(
        format!("{ABSENT_SECURITY} does not exist"),
        !book.exists(ABSENT_SECURITY),
    )];

    for security in [FORWARD_SECURITY, REVERSE_SECURITY] {
        checks.push((format!("{security} exists"), book.exists(security)));
        checks.push((
            format!("{security} bid depth is 2"),
            book.depth(security, Side::Buy) == 2,
        ));
        checks.push((
            format!("{security} ask depth is 3"),
            book.depth(security, Side::Sell) == 3,
        ));
        checks.push((
            format!("{security} best bid is 100 with [500, 5000]"),
            book.top(security, Side::Buy).price() == Some(Price::new(100.0))
                && level_volumes(book, security, Side::Buy, 0) == [500, 5_000],
        ));
        checks.push((
            format!("{security} second bid is 99.9 with [2000]"),
            level_volumes(book, security, Side::Buy, 1) == [2_000],
        ));
        checks.push((
            format!("{security} best ask is 100.1"),
            book.top(security, Side::Sell).price() == Some(Price::new(100.1)),
        ));
    }

    let mut passed = true;
    for (name, ok) in &checks {
        println!("[{}] {name}", if *ok { "PASS" } else { "FAIL" });
        passed &= ok;
    }
    passed
}

fn print_sizes() {
    let in_memory = size_of::<OrderRecord>();
    println!("In-memory record: {in_memory} bytes (plus security heap allocation)");
    println!("Compact record:   {} bytes", CompactOrder::ENCODED_LEN);
    println!(
        "Reduction:        {:.1}%",
        100.0 * (1.0 - CompactOrder::ENCODED_LEN as f64 / in_memory as f64)
    );
}
