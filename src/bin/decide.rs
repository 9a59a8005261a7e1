//! Decide a single recorded turn.
//!
//! Usage:
//!   cargo run --release --bin decide -- --snapshot <FILE> [OPTIONS]
//!
//! Options:
//!   --snapshot <FILE>    Round snapshot JSON file (required)
//!   --config <FILE>      Bot configuration JSON file (optional)
//!   --seed <N>           Random seed (overrides the config)
//!   --explain            Print the pair score and discard breakdown
//!
//! Prints the chosen action code (`F`, `C`, `K`, `R<amount>`, `D<index>`).

use std::env;
use std::fs;
use std::process;

use drawbot::bot::{BotConfig, DrawBot, PokerBot, RoundSnapshot};
use drawbot::eval::PairStrengthTable;
use rand::rngs::mock::StepRng;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mut snapshot_file: Option<String> = None;
    let mut config_file: Option<String> = None;
    let mut seed: Option<u64> = None;
    let mut explain = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--snapshot" | "-s" => {
                i += 1;
                snapshot_file = args.get(i).cloned();
            }
            "--config" | "-c" => {
                i += 1;
                config_file = args.get(i).cloned();
            }
            "--seed" => {
                i += 1;
                seed = args.get(i).and_then(|s| s.parse().ok());
            }
            "--explain" | "-e" => {
                explain = true;
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

    let Some(snapshot_file) = snapshot_file else {
        eprintln!("Missing --snapshot <FILE>");
        print_help();
        process::exit(1);
    };

    let mut config = match &config_file {
        Some(path) => match BotConfig::from_json_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config: {}", e);
                process::exit(1);
            }
        },
        None => BotConfig::default(),
    };
    if let Some(s) = seed {
        config = config.with_seed(s);
    }

    let snapshot: RoundSnapshot = match fs::read_to_string(&snapshot_file)
        .map_err(|e| e.to_string())
        .and_then(|json| serde_json::from_str(&json).map_err(|e| e.to_string()))
    {
        Ok(snapshot) => snapshot,
        Err(e) => {
            eprintln!("Error reading snapshot {}: {}", snapshot_file, e);
            process::exit(1);
        }
    };

    let mut bot = DrawBot::new(&config);
    if explain {
        print_explanation(&bot, &snapshot);
    }

    match bot.get_action(&snapshot) {
        Ok(action) => println!("{}", action.code()),
        Err(e) => {
            eprintln!("Engine contract violation: {}", e);
            process::exit(1);
        }
    }
}

fn print_explanation(bot: &DrawBot, snapshot: &RoundSnapshot) {
    let hand = snapshot.my_hand();
    println!("Street: {}  Board: {:?}  Hand: {:?}", snapshot.street, snapshot.board, hand);
    if hand.len() >= 2 {
        println!("Pair score {}{}: {:.2}", hand[0], hand[1], PairStrengthTable::score_pair(hand[0], hand[1]));
    }
    if let Some(cards) = snapshot.three_cards() {
        let evaluator = bot.policy().discard_evaluator();
        if let Some(index) = evaluator.split_pair(&cards) {
            println!("Pair/kicker split: throw #{} ({})", index, cards[index]);
        }
        // noise shown as zero; the real decision draws from the bot's RNG
        let scores = evaluator.score_candidates(&cards, snapshot.board.cards(), &mut StepRng::new(0, 0));
        for (i, (card, score)) in cards.iter().zip(scores.iter()).enumerate() {
            println!("  #{} {}: {}", i, card, score);
        }
    }
}

fn print_help() {
    println!("Usage: decide --snapshot <FILE> [--config <FILE>] [--seed <N>] [--explain]");
}
