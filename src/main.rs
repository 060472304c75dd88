//! Civic Minds - headless demo
//!
//! Builds a small seeded city, spawns citizens and runs the behavior core
//! for a number of cycles, printing the community mood once per day.

use std::path::PathBuf;

use civic_minds::city::{BuildingKind, BuildingSnapshot, CityEventKind, CityView, ResourceLedger};
use civic_minds::core::error::Result;
use civic_minds::core::types::{BuildingId, Vec2};
use civic_minds::core::{BehaviorConfig, RandomSource, SeededRandom, WorldClock};
use civic_minds::entity::CitizenFactory;
use civic_minds::rules::{load_catalog, PatternCatalog};
use civic_minds::simulation::{CycleReport, SimulationContext};
use clap::Parser;

/// Run the citizen behavior core against a generated city
#[derive(Parser, Debug)]
#[command(name = "civic-minds")]
#[command(about = "Simulate citizen decisions in a small generated city")]
struct Args {
    /// Number of citizens to spawn
    #[arg(long, default_value_t = 25)]
    citizens: usize,

    /// Cycles (in-game hours) to simulate
    #[arg(long, default_value_t = 72)]
    cycles: u64,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Behavior config TOML file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pattern catalog TOML file (built-in catalog when omitted)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Print the final cycle report as JSON
    #[arg(long)]
    json: bool,
}

const CITY_SIZE: f32 = 60.0;
const BLOCK: f32 = 12.0;

/// Lay buildings out on a grid, one kind per block
fn demo_city(rng: &mut dyn RandomSource) -> Vec<BuildingSnapshot> {
    let layout = [
        BuildingKind::Residential,
        BuildingKind::Office,
        BuildingKind::Residential,
        BuildingKind::Market,
        BuildingKind::Park,
        BuildingKind::Industrial,
        BuildingKind::Residential,
        BuildingKind::Commercial,
        BuildingKind::Farm,
        BuildingKind::Civic,
    ];

    let per_row = (CITY_SIZE / BLOCK) as u32;
    let mut buildings = Vec::new();
    for (index, kind) in layout.iter().cycle().take(20).enumerate() {
        let index = index as u32;
        let position = Vec2::new(
            (index % per_row) as f32 * BLOCK + rng.range(2.0, BLOCK - 2.0),
            (index / per_row) as f32 * BLOCK + rng.range(2.0, BLOCK - 2.0),
        );
        let workers = if kind.is_workplace() {
            rng.pick_index(12) as u32
        } else {
            0
        };
        buildings.push(
            BuildingSnapshot::new(BuildingId(index + 1), *kind, position)
                .with_workers(workers)
                .with_level(1 + rng.pick_index(3) as u32)
                .with_utility_efficiency(rng.range(0.6, 1.0)),
        );
    }
    buildings
}

/// Occasional city-wide events so the threat feed is not flat
fn events_for_day(day: u64) -> Vec<CityEventKind> {
    match day % 5 {
        1 => vec![CityEventKind::Festival],
        3 => vec![CityEventKind::CrimeWave],
        4 => vec![CityEventKind::Recession],
        _ => Vec::new(),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("civic_minds=info")),
        )
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);

    let config = match &args.config {
        Some(path) => BehaviorConfig::load(path)?,
        None => BehaviorConfig::default(),
    };
    let catalog = match &args.catalog {
        Some(path) => load_catalog(path)?,
        None => PatternCatalog::builtin(),
    };

    tracing::info!(
        seed,
        citizens = args.citizens,
        cycles = args.cycles,
        patterns = catalog.len(),
        "Civic Minds starting"
    );

    let mut rng = SeededRandom::new(seed);
    let buildings = demo_city(&mut rng);

    let mut factory = CitizenFactory::new(seed, Vec2::new(0.0, 0.0), Vec2::new(CITY_SIZE, CITY_SIZE))
        .with_buildings(&buildings);
    let mut context = SimulationContext::new(catalog, config);
    for citizen in factory.spawn_population(args.citizens) {
        context.add_citizen(citizen);
    }

    let mut clock = WorldClock::at_cycle(6);
    let mut last_report: Option<CycleReport> = None;
    let mut life_events = 0usize;

    for _ in 0..args.cycles {
        let food = (args.citizens as f32 * 2.0) - clock.day() as f32 * 8.0;
        let ledger = ResourceLedger::new().with("food", food.max(0.0));
        let events = events_for_day(clock.day());
        let view = CityView::new(clock, &buildings, &ledger, &events).with_base_threat(15.0);

        let report = context.run_cycle(&view, &mut rng);
        life_events += report.life_events.len();
        for fired in &report.life_events {
            tracing::info!(citizen = %fired.citizen, "{}", fired.record.description);
        }

        if report.hour == 23 && !args.json {
            println!(
                "Day {:>3} | {:<6} | happiness {:>5.1} | stress {:>5.1} | satisfaction {:>5.1} | threat {:>5.1}",
                clock.day(),
                format!("{:?}", clock.season()),
                report.community.happiness,
                report.community.stress,
                report.community.satisfaction,
                report.threat_level,
            );
        }

        last_report = Some(report);
        clock = clock.next();
    }

    if args.json {
        if let Some(report) = &last_report {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
    } else {
        let mood = context.community_mood();
        println!();
        println!("Simulated {} cycles for {} citizens (seed {})", args.cycles, context.citizens().len(), seed);
        println!("Life events fired: {}", life_events);
        println!(
            "Final community mood: happiness {:.1}, stress {:.1}, satisfaction {:.1}",
            mood.happiness, mood.stress, mood.satisfaction
        );
    }

    Ok(())
}
