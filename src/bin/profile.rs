//! Policy profiler.
//!
//! Runs the bot over randomly generated turns in parallel and reports how
//! often it chooses each action.
//!
//! Usage:
//!   cargo run --release --bin profile -- [OPTIONS]
//!
//! Options:
//!   --config <FILE>      Bot configuration JSON file (optional)
//!   --decisions <N>      Number of turns to decide (default: 1,000,000)
//!   --batches <N>        Number of seeded batches (default: 64)
//!   --seed <N>           Base random seed (default: config seed or 0)
//!   --output <FILE>      Write the profile as JSON (optional)

use std::env;
use std::process;
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};

use drawbot::bot::BotConfig;
use drawbot::sim;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mut config_file: Option<String> = None;
    let mut decisions: u64 = 1_000_000;
    let mut batches: usize = 64;
    let mut seed: Option<u64> = None;
    let mut output_file: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                i += 1;
                config_file = args.get(i).cloned();
            }
            "--decisions" | "-n" => {
                i += 1;
                decisions = args.get(i).and_then(|s| s.parse().ok()).unwrap_or(decisions);
            }
            "--batches" | "-b" => {
                i += 1;
                batches = args.get(i).and_then(|s| s.parse().ok()).unwrap_or(batches);
            }
            "--seed" | "-s" => {
                i += 1;
                seed = args.get(i).and_then(|s| s.parse().ok());
            }
            "--output" | "-o" => {
                i += 1;
                output_file = args.get(i).cloned();
            }
            "--help" | "-h" => {
                print_help();
                return;
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    println!("=== Draw Bot Policy Profile ===\n");

    let config = match &config_file {
        Some(path) => {
            println!("Loading configuration from: {}", path);
            match BotConfig::from_json_file(path) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Error loading config: {}", e);
                    process::exit(1);
                }
            }
        }
        None => BotConfig::default(),
    };
    let seed = seed.or(config.seed).unwrap_or(0);

    println!("Configuration: {}", config.name);
    println!("Discard strategy: {:?}", config.discard.strategy);
    println!("Decisions: {} in {} batches, seed {}", decisions, batches, seed);
    println!();

    let pb = ProgressBar::new(decisions);
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} turns ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-"),
    );

    let start = Instant::now();
    let result = sim::profile(&config, decisions, batches, seed, |n| pb.inc(n));
    pb.finish_and_clear();

    println!("Completed in {:.2}s\n", start.elapsed().as_secs_f64());
    result.print_summary();

    if let Some(path) = output_file {
        match result.save_json(&path) {
            Ok(_) => println!("\nSaved JSON: {}", path),
            Err(e) => {
                eprintln!("Error saving JSON: {}", e);
                process::exit(1);
            }
        }
    }
}

fn print_help() {
    println!("Usage: profile [--config <FILE>] [--decisions <N>] [--batches <N>] [--seed <N>] [--output <FILE>]");
}
