//! Colony Sim - headless entry point
//!
//! Founds (or loads) a colony, runs it day by day and prints a summary of
//! every day. All simulation happens inside the library.

use std::path::PathBuf;

use clap::Parser;
use colony_sim::core::error::Result;
use colony_sim::core::types::GridPos;
use colony_sim::economy::ProductionKind;
use colony_sim::persistence;
use colony_sim::population::JobType;
use colony_sim::simulation::{Colony, DayOutcome, DayReport};
use colony_sim::SimulationConfig;
use tracing_subscriber::EnvFilter;

/// Headless survival colony simulation
#[derive(Parser, Debug)]
#[command(name = "colony-sim")]
#[command(about = "Run a survival colony day by day and print what happened")]
struct Args {
    /// Random seed (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of days to simulate
    #[arg(long, default_value_t = 30)]
    days: u32,

    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write a JSON save here when the run ends
    #[arg(long)]
    save: Option<PathBuf>,

    /// Continue from a JSON save instead of founding a new colony
    #[arg(long)]
    load: Option<PathBuf>,

    /// Print every day report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("colony_sim=info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let mut colony = match &args.load {
        Some(path) => {
            let (colony, failures) = persistence::load_from_file(path, config)?;
            for failure in &failures {
                println!("  skipped {}", failure);
            }
            colony
        }
        None => {
            let mut colony = Colony::new(config)?;
            starter_base(&mut colony)?;
            colony
        }
    };

    println!("\n=== COLONY SIM ===");
    println!(
        "Day {} - {} survivors - seed {}",
        colony.day(),
        colony.population.len(),
        colony.config().seed
    );

    for _ in 0..args.days {
        match colony.advance_day() {
            DayOutcome::Completed(report) => {
                if args.json {
                    println!("{}", serde_json::to_string(&report)?);
                } else {
                    print_report(&report);
                }
            }
            DayOutcome::GameOver(over) => {
                println!("\nGAME OVER! {}", over.cause);
                println!("Survived until day {}", over.day);
                break;
            }
        }
    }

    if let Some(report) = colony.economy_report() {
        println!("\n=== ECONOMY (last {} days) ===", report.days);
        println!(
            "Food produced {:.1}, eaten {:.1}/day, trend {:+.1}",
            report.total_food_produced, report.average_food_consumption, report.food_trend
        );
        println!(
            "Water produced {:.1}, drunk {:.1}/day, trend {:+.1}",
            report.total_water_produced, report.average_water_consumption, report.water_trend
        );
        for (resource, forecast) in &report.shortages {
            println!("  {}: {:?}", resource, forecast);
        }
    }

    if let Some(path) = &args.save {
        persistence::save_to_file(&colony, path)?;
        println!("Saved to {}", path.display());
    }

    Ok(())
}

/// A shelter, a farm, and everyone put to work
fn starter_base(colony: &mut Colony) -> Result<()> {
    colony.place_building("shelter", GridPos::new(50, 50))?;
    colony.place_building("farm", GridPos::new(52, 50))?;

    let ids: Vec<_> = colony.population.iter().map(|s| s.id).collect();
    let jobs = [JobType::Farmer, JobType::Builder, JobType::Guard, JobType::Farmer, JobType::Scout];
    for (id, job) in ids.iter().zip(jobs.iter().cycle()) {
        colony.population.assign_job(*id, *job)?;
    }

    let farmers = colony.population.assigned(JobType::Farmer);
    let others: Vec<_> = ids.iter().copied().filter(|id| !farmers.contains(id)).collect();
    colony.register_production(ProductionKind::Farm, farmers);
    colony.register_production(ProductionKind::WaterCollector, others);
    Ok(())
}

fn print_report(report: &DayReport) {
    println!(
        "\nDay {} ({}) - {} survivors, {} zombies",
        report.day, report.weather, report.population, report.horde_size
    );
    for event in &report.events {
        let tag = if event.cascaded { " (cascade)" } else { "" };
        println!("  Event: {} severity {}{}", event.kind, event.severity, tag);
    }
    for skipped in &report.skipped_effects {
        println!("  Skipped {}: {}", skipped.event.kind, skipped.reason);
    }
    for hit in &report.combat {
        println!(
            "  {} attacked {} with {} - hit: {}, damage: {}, critical: {}{}",
            hit.attacker_name,
            hit.zombie_kind,
            hit.weapon,
            hit.hit,
            hit.damage,
            hit.critical,
            if hit.killed { " - killed" } else { "" }
        );
    }
    for casualty in &report.deaths {
        println!("  {} died", casualty.name);
    }
    let resources: Vec<String> = report
        .economy
        .resources
        .iter()
        .map(|(r, amount)| format!("{} {:.0}", r, amount))
        .collect();
    println!("  Stock: {}", resources.join(", "));
}
