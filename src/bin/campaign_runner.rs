//! Headless Campaign Runner
//!
//! Plays a campaign with the player faction idle and every rival under AI
//! control, then prints the outcome. Used for balance runs and replays.

use std::path::PathBuf;

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use sango_engine::core::error::Result;
use sango_engine::turn::{end_turn, VictoryStatus};
use sango_engine::{init_world_with_config, EngineConfig};

/// Headless Campaign Runner - AI rivals against an idle player
#[derive(Parser, Debug)]
#[command(name = "campaign_runner")]
#[command(about = "Run a seeded campaign and report how it ended")]
struct Args {
    /// Player faction (Wei, Shu or Wu)
    #[arg(long, default_value = "Shu")]
    faction: String,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum number of turns (months) to play
    #[arg(long, default_value_t = 120)]
    turns: u32,

    /// Engine configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,
}

#[derive(Serialize)]
struct FactionResult {
    name: String,
    cities: usize,
    officers: usize,
    troops: u64,
    gold: u64,
}

#[derive(Serialize)]
struct CampaignResult {
    seed: u64,
    player: String,
    turns_played: u32,
    year: u32,
    month: u8,
    victory: VictoryStatus,
    battles: usize,
    defections: usize,
    factions: Vec<FactionResult>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sango_engine=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => EngineConfig::from_toml_str(&std::fs::read_to_string(path)?)?,
        None => EngineConfig::default(),
    };

    let seed = args.seed.unwrap_or_else(|| rand::random());
    let mut state = init_world_with_config(&args.faction, seed, config)?;
    // World building consumed its own generator; turns draw from a separate stream
    let mut rng = ChaCha8Rng::seed_from_u64(seed.wrapping_add(1));

    let mut turns_played = 0;
    let mut battles = 0;
    let mut defections = 0;
    let mut victory = VictoryStatus::Ongoing;

    while turns_played < args.turns && !victory.is_terminal() {
        let summary = end_turn(&mut state, &mut rng);
        battles += summary.ai_turns.iter().map(|t| t.battles.len()).sum::<usize>();
        defections += summary.defections.len();
        victory = summary.victory;
        turns_played += 1;

        if args.format == "text" {
            for event in &summary.events {
                eprintln!("[{}-{:02}] {:?}", event.year, event.month, event.event_type);
            }
        }
    }

    let factions = state
        .factions
        .keys()
        .filter_map(|id| state.faction_view(*id))
        .map(|view| FactionResult {
            name: view.name,
            cities: view.cities.len(),
            officers: view.officers.len(),
            troops: view.army,
            gold: view.treasury,
        })
        .collect();

    let result = CampaignResult {
        seed,
        player: args.faction.clone(),
        turns_played,
        year: state.year(),
        month: state.month(),
        victory,
        battles,
        defections,
        factions,
    };

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("=== Campaign Result ===");
        println!("Seed: {}  Player: {}", result.seed, result.player);
        println!(
            "Ended {}-{:02} after {} turns: {:?}",
            result.year, result.month, result.turns_played, result.victory
        );
        println!("Battles: {}  Defections: {}", result.battles, result.defections);
        for f in &result.factions {
            println!(
                "  {:<4} cities={} officers={} troops={} gold={}",
                f.name, f.cities, f.officers, f.troops, f.gold
            );
        }
    }

    Ok(())
}
