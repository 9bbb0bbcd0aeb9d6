//! CFR training driver.
//!
//! Usage:
//!   cargo run --release --bin train -- [OPTIONS]
//!
//! Options:
//!   --game <NAME>          kuhn | pennies | holdem (default: kuhn)
//!   --iterations <N>       Iterations to run (default: 100000)
//!   --mode <MODE>          vanilla | outcome-sampling (default: vanilla)
//!   --exploration <E>      Exploration for outcome sampling
//!   --seed <N>             Random seed (optional)
//!   --config <FILE>        Solver configuration JSON (flags override it)
//!   --log-every <N>        Progress report interval (default: iterations / 10)
//!   --metrics <FILE>       Write run metrics as JSON lines
//!   --output <FILE>        Strategy report (default: strategy.json)
//!   --deck <CARDS>         Hold'em deck, e.g. "10S JS QS KS AS 10H JH 9C 2D"
//!   --table <FILE>         Hold'em showdowns via a precomputed hand table

use std::collections::BTreeMap;
use std::env;
use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};

use cfr_poker::cfr::{CFRConfig, CFRSolver, Game, InfoSetTable, TraversalMode};
use cfr_poker::eval::{BitmaskEvaluator, Card, Evaluator, HandTable};
use cfr_poker::games::holdem::HeadsUpHoldem;
use cfr_poker::games::kuhn::KuhnPoker;
use cfr_poker::games::pennies::MatchingPennies;
use cfr_poker::telemetry::{training_metrics, JsonLinesLogger, RunLogger};

const DEFAULT_DECK: &str = "10S JS QS KS AS 10H JH 9C 2D";

struct Options {
    game: String,
    iterations: u64,
    mode: Option<TraversalMode>,
    exploration: Option<f64>,
    seed: Option<u64>,
    config_file: Option<String>,
    log_every: Option<u64>,
    metrics_file: Option<String>,
    output_file: String,
    deck: String,
    table_file: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            game: "kuhn".to_string(),
            iterations: 100_000,
            mode: None,
            exploration: None,
            seed: None,
            config_file: None,
            log_every: None,
            metrics_file: None,
            output_file: "strategy.json".to_string(),
            deck: DEFAULT_DECK.to_string(),
            table_file: None,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let mut opts = Options::default();

    let mut i = 1;
    while i < args.len() {
        let value = args.get(i + 1).cloned();
        match args[i].as_str() {
            "--game" | "-g" => {
                i += 1;
                if let Some(v) = value {
                    opts.game = v;
                }
            }
            "--iterations" | "-i" => {
                i += 1;
                if let Some(n) = value.and_then(|v| v.parse().ok()) {
                    opts.iterations = n;
                }
            }
            "--mode" | "-m" => {
                i += 1;
                opts.mode = match value.as_deref() {
                    Some("vanilla") => Some(TraversalMode::Vanilla),
                    Some("outcome-sampling") | Some("outcome") => Some(TraversalMode::OutcomeSampling),
                    other => {
                        eprintln!("Unknown mode: {:?}", other);
                        print_help();
                        return;
                    }
                };
            }
            "--exploration" => {
                i += 1;
                opts.exploration = value.and_then(|v| v.parse().ok());
            }
            "--seed" | "-s" => {
                i += 1;
                opts.seed = value.and_then(|v| v.parse().ok());
            }
            "--config" | "-c" => {
                i += 1;
                opts.config_file = value;
            }
            "--log-every" => {
                i += 1;
                opts.log_every = value.and_then(|v| v.parse().ok());
            }
            "--metrics" => {
                i += 1;
                opts.metrics_file = value;
            }
            "--output" | "-o" => {
                i += 1;
                if let Some(v) = value {
                    opts.output_file = v;
                }
            }
            "--deck" => {
                i += 1;
                if let Some(v) = value {
                    opts.deck = v;
                }
            }
            "--table" => {
                i += 1;
                opts.table_file = value;
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

    if let Err(e) = dispatch(&opts) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn dispatch(opts: &Options) -> Result<(), Box<dyn Error>> {
    match opts.game.as_str() {
        "kuhn" => run(KuhnPoker::new(), opts),
        "pennies" => run(MatchingPennies::new(), opts),
        "holdem" => {
            let deck = Card::parse_many(&opts.deck)?;
            let evaluator: Box<dyn Evaluator> = match &opts.table_file {
                Some(path) => Box::new(HandTable::load(path)?),
                None => Box::new(BitmaskEvaluator::new()),
            };
            run(HeadsUpHoldem::new(evaluator, deck)?, opts)
        }
        other => Err(format!("unknown game: {}", other).into()),
    }
}

fn solver_config(opts: &Options) -> Result<CFRConfig, Box<dyn Error>> {
    let mut config = match &opts.config_file {
        Some(path) => CFRConfig::from_json_file(path)?,
        None => CFRConfig::default(),
    };
    if let Some(mode) = opts.mode {
        config = config.with_mode(mode);
    }
    if let Some(exploration) = opts.exploration {
        config = config.with_exploration(exploration);
    }
    if let Some(seed) = opts.seed {
        config = config.with_seed(seed);
    }
    Ok(config)
}

fn run<G: Game>(game: G, opts: &Options) -> Result<(), Box<dyn Error>> {
    let config = solver_config(opts)?;

    println!("=================================================");
    println!("  CFR Trainer: {}", opts.game);
    println!("=================================================");
    println!("Mode: {:?}", config.mode);
    println!("Iterations: {}", opts.iterations);
    if let Some(s) = config.seed {
        println!("Seed: {}", s);
    }
    println!("Output: {}", opts.output_file);
    println!();

    let mut logger = match &opts.metrics_file {
        Some(path) => {
            let mut params = BTreeMap::new();
            params.insert("game".to_string(), opts.game.clone());
            params.insert("iterations".to_string(), opts.iterations.to_string());
            params.insert("mode".to_string(), format!("{:?}", config.mode));
            params.insert("exploration".to_string(), config.exploration.to_string());
            params.insert(
                "seed".to_string(),
                config.seed.map(|s| s.to_string()).unwrap_or_default(),
            );
            let run_name = format!("{}-{}", opts.game, config.seed.unwrap_or(0));
            Some(JsonLinesLogger::create(path, run_name, params)?)
        }
        None => None,
    };

    let root = game.initial_history();
    let mut solver = CFRSolver::new(game, config)?;

    let interval = opts.log_every.unwrap_or(opts.iterations / 10).max(1);
    let bar = ProgressBar::new(opts.iterations);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")?
            .progress_chars("#>-"),
    );

    let start_time = Instant::now();
    let mut snapshot = None;
    let mut telemetry_error = None;

    solver.train_with_callback(opts.iterations, &root, interval, |stats, table: &InfoSetTable| {
        let drift = snapshot.as_ref().map(|s| table.drift(s));
        snapshot = Some(table.snapshot());

        bar.set_position(stats.iterations);
        bar.set_message(format!(
            "{} info sets | {:.0} it/s | drift {:.4}",
            stats.info_sets,
            stats.iterations_per_second,
            drift.unwrap_or(f64::NAN)
        ));

        if telemetry_error.is_some() {
            return;
        }
        if let Some(logger) = logger.as_mut() {
            if let Err(e) = logger.log_metrics(&training_metrics(stats, drift), stats.iterations) {
                telemetry_error = Some(e);
            }
        }
    })?;
    bar.finish_with_message("done");

    if let Some(e) = telemetry_error {
        return Err(e.into());
    }
    if let Some(logger) = logger.as_mut() {
        logger.finish()?;
    }

    let stats = solver.stats();
    println!();
    println!("Training complete!");
    println!("Total time: {:.2}s", start_time.elapsed().as_secs_f64());
    println!("Info sets: {}", stats.info_sets);
    println!("Average speed: {:.0} iterations/second", stats.iterations_per_second);

    let ev = solver.expected_values(&root)?;
    for (player, value) in ev.iter().enumerate() {
        println!("P{} expected value: {:+.4}", player, value);
    }

    let report = solver.report();
    let file = BufWriter::new(File::create(&opts.output_file)?);
    serde_json::to_writer_pretty(file, &report)?;
    println!("Strategies saved to {}", opts.output_file);

    println!();
    println!("=== Sample Strategies ===");
    for record in report.iter().take(6) {
        println!("{}", record.key);
        for (action, prob) in record.actions.iter().zip(&record.average) {
            if *prob > 0.001 {
                println!("  {}: {:.1}%", action, prob * 100.0);
            }
        }
    }

    Ok(())
}

fn print_help() {
    println!("CFR Trainer");
    println!();
    println!("Usage: train [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -g, --game <NAME>        kuhn | pennies | holdem (default: kuhn)");
    println!("  -i, --iterations <N>     Iterations to run (default: 100000)");
    println!("  -m, --mode <MODE>        vanilla | outcome-sampling (default: vanilla)");
    println!("  --exploration <E>        Exploration for outcome sampling (0-1)");
    println!("  -s, --seed <N>           Random seed");
    println!("  -c, --config <FILE>      Solver configuration JSON");
    println!("  --log-every <N>          Progress interval (default: iterations / 10)");
    println!("  --metrics <FILE>         Write run metrics as JSON lines");
    println!("  -o, --output <FILE>      Strategy report (default: strategy.json)");
    println!("  --deck <CARDS>           Hold'em deck (default: \"{}\")", DEFAULT_DECK);
    println!("  --table <FILE>           Hold'em showdowns via a precomputed table");
    println!("  -h, --help               Show this help");
    println!();
    println!("Examples:");
    println!("  train --game kuhn --iterations 100000 --seed 42");
    println!("  train --game pennies --mode outcome-sampling --metrics run.jsonl");
    println!("  build_table --deck \"{}\" --output small.tbl", DEFAULT_DECK);
    println!("  train --game holdem --table small.tbl --iterations 20000");
}
