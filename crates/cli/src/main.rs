// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Draw Poker CLI.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use ahash::AHashMap;
use anyhow::Result;
use clap::{Parser, Subcommand};
use log::error;

use drawpoker_eval::{Card, DiscardAdvisor, Hand, HandRank, MAX_CARDS_TO_DISCARD};

pub mod table;

#[derive(Debug, Parser)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Deals a hand to each player and plays the draw.
    Play {
        /// Number of players at the table.
        #[clap(long, short, default_value_t = 5, value_parser = clap::value_parser!(u8).range(1..=10))]
        players: u8,
        /// Maximum number of cards swapped by a player.
        #[clap(long, default_value_t = MAX_CARDS_TO_DISCARD as u8, value_parser = clap::value_parser!(u8).range(0..=5))]
        max_discards: u8,
        /// Number of rounds to play.
        #[clap(long, short, default_value_t = 1)]
        rounds: u32,
        /// Seed for the deck shuffling.
        #[clap(long, short)]
        seed: Option<u64>,
    },
    /// Evaluates a hand and shows which cards to discard.
    Eval {
        /// The five cards, for example: AH KD 10C 10S 2D
        #[clap(num_args = 5, required = true)]
        cards: Vec<Card>,
    },
}

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let res = match cli.command {
        Command::Play {
            players,
            max_discards,
            rounds,
            seed,
        } => {
            let config = table::Config {
                players: players as usize,
                max_discards: max_discards as usize,
                seed,
            };
            play(&config, rounds)
        }
        Command::Eval { cards } => eval(&cards),
    };

    if let Err(e) = res {
        error!("{e}");
        std::process::exit(1);
    }
}

fn play(config: &table::Config, rounds: u32) -> Result<()> {
    let mut table = table::Table::new(config)?;
    let mut stats = AHashMap::<HandRank, usize>::default();

    for round in 1..=rounds {
        println!("Round {round}");

        let seats = table.play_round()?;
        for (idx, seat) in seats.iter().enumerate() {
            println!("Player {}", idx + 1);
            println!("  dealt:  {}  {}", seat.dealt, seat.outcome.dealt_value());

            let advice = seat
                .outcome
                .signals()
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
                .join(" ");
            println!("  advice: {advice}");

            match seat.value {
                Some(value) => {
                    println!("  drew {}: {}  {value}", seat.outcome.count(), seat.hand);
                    *stats.entry(value.rank()).or_default() += 1;
                }
                None => println!("  drew {}: {}  short hand", seat.outcome.count(), seat.hand),
            }
        }

        match table::winners(&seats).as_slice() {
            [] => println!("No winner"),
            [winner] => println!("Player {} wins", winner + 1),
            winners => {
                let players = winners
                    .iter()
                    .map(|idx| (idx + 1).to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                println!("Players {players} split");
            }
        }
        println!();
    }

    if rounds > 1 {
        println!("Hands after the draw");
        for rank in HandRank::ranks() {
            let label = format!("{rank}:");
            println!("{label:<17}{}", stats.get(&rank).copied().unwrap_or_default());
        }
    }

    Ok(())
}

fn eval(cards: &[Card]) -> Result<()> {
    let hand = Hand::new(cards)?;
    let advisor = DiscardAdvisor::new(&hand)?;

    println!("{hand}  {}", advisor.value());
    for (idx, signal) in advisor.signals().iter().enumerate() {
        if let Some(card) = hand.card(idx) {
            println!("  {card}\t{signal}");
        }
    }

    Ok(())
}
