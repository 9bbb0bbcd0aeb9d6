//! Precomputed hand-table builder.
//!
//! Usage:
//!   cargo run --release --bin build_table -- [OPTIONS]
//!
//! Options:
//!   --deck <CARDS>     Cards to enumerate (default: full 52-card deck)
//!   --output <FILE>    Table file (default: hands.tbl)
//!   --verify           Reload the written file and compare entry counts
//!
//! The full deck has C(52,7) = 133,784,560 hands; expect a long run and a
//! multi-gigabyte file. Reduced decks build in seconds.

use std::env;
use std::error::Error;
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};

use cfr_poker::eval::{Card, HandTable};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();

    let mut deck_spec: Option<String> = None;
    let mut output_file = "hands.tbl".to_string();
    let mut verify = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--deck" | "-d" => {
                i += 1;
                if i < args.len() {
                    deck_spec = Some(args[i].clone());
                }
            }
            "--output" | "-o" => {
                i += 1;
                if i < args.len() {
                    output_file = args[i].clone();
                }
            }
            "--verify" => {
                verify = true;
            }
            "--help" | "-h" => {
                print_help();
                return;
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_help();
                return;
            }
        }
        i += 1;
    }

    if let Err(e) = run(deck_spec.as_deref(), &output_file, verify) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(deck_spec: Option<&str>, output_file: &str, verify: bool) -> Result<(), Box<dyn Error>> {
    let deck = match deck_spec {
        Some(spec) => Card::parse_many(spec)?,
        None => Card::deck(),
    };

    println!("Deck: {} cards", deck.len());
    println!("Output: {}", output_file);
    println!();

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {elapsed} {msg}")?);
    spinner.set_message("rating 7-card hands");
    spinner.enable_steady_tick(Duration::from_millis(200));

    let start_time = Instant::now();
    let table = HandTable::build(&deck)?;
    spinner.finish_with_message(format!("{} hands rated", table.len()));

    table.save(output_file)?;
    println!(
        "Saved {} entries to {} in {:.2}s",
        table.len(),
        output_file,
        start_time.elapsed().as_secs_f64()
    );

    if verify {
        let loaded = HandTable::load(output_file)?;
        if loaded.len() != table.len() {
            return Err(format!(
                "verification failed: wrote {} entries, read {}",
                table.len(),
                loaded.len()
            )
            .into());
        }
        println!("Verified {} entries", loaded.len());
    }

    Ok(())
}

fn print_help() {
    println!("Hand Table Builder");
    println!();
    println!("Usage: build_table [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -d, --deck <CARDS>       Cards to enumerate (default: full deck)");
    println!("  -o, --output <FILE>      Table file (default: hands.tbl)");
    println!("  --verify                 Reload the file and check the entry count");
    println!("  -h, --help               Show this help");
    println!();
    println!("Examples:");
    println!("  build_table --deck \"10S JS QS KS AS 10H JH 9C 2D\" --output small.tbl");
    println!("  build_table --output full.tbl");
}
