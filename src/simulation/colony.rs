//! Day orchestrator - owns all colony state and advances it one day at a time
//!
//! Order of a day:
//! needs -> economy -> construction -> events -> horde -> combat -> clock.
//! Each step sees the mutations of the steps before it.

use crate::city::{BuildingGrid, CraftItem, RecipeCatalog};
use crate::combat::{group_combat, Combatant, WeaponKind, WeaponTable};
use crate::core::config::SimulationConfig;
use crate::core::error::Result;
use crate::core::rng::SimRng;
use crate::core::types::{BuildingId, Day, GridPos, SurvivorId, Vec2, Weather};
use crate::economy::{Economy, EconomyReport, ProductionKind, Stockpile};
use crate::events::{combined_impact, DayForecast, EventEngine, GameConditions};
use crate::horde::{Horde, ZombieKind};
use crate::population::{JobType, Population, SkillType};
use crate::simulation::report::{
    Casualty, DailySnapshot, DayOutcome, DayReport, GameOver, GameOverCause, SkippedEffect,
};

/// The whole simulated colony
pub struct Colony {
    config: SimulationConfig,
    day: Day,
    weather: Weather,
    pub(crate) rng: SimRng,
    pub population: Population,
    pub economy: Economy,
    pub buildings: BuildingGrid,
    pub horde: Horde,
    pub(crate) events: EventEngine,
    weapons: WeaponTable,
    recipes: RecipeCatalog,
    /// Kinds spawned by a zombie attack, with weights
    pub(crate) spawn_mix: Vec<(ZombieKind, f32)>,
}

impl Colony {
    /// Found a colony with the configured starting stock and survivors
    pub fn new(config: SimulationConfig) -> Result<Self> {
        let mut colony = Self::empty(config)?;
        for _ in 0..colony.config.initial_survivors {
            colony.population.add_random(&mut colony.rng);
        }
        tracing::info!(
            "Colony founded with {} survivors (seed {})",
            colony.population.len(),
            colony.config.seed
        );
        Ok(colony)
    }

    /// Colony with starting stock but nobody in it
    pub fn empty(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            day: 1,
            weather: Weather::Clear,
            rng: SimRng::from_seed(config.seed),
            population: Population::new(),
            economy: Economy::new(Stockpile::from_amounts(&config.starting_resources)),
            buildings: BuildingGrid::new(config.grid_size),
            horde: Horde::new(),
            events: EventEngine::default(),
            weapons: WeaponTable::default(),
            recipes: RecipeCatalog::with_defaults(),
            spawn_mix: vec![(ZombieKind::Shambler, 1.0), (ZombieKind::Runner, 1.0)],
            config,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn day(&self) -> Day {
        self.day
    }

    pub fn weather(&self) -> Weather {
        self.weather
    }

    pub(crate) fn set_clock(&mut self, day: Day, weather: Weather) {
        self.day = day;
        self.weather = weather;
    }

    pub fn set_weather(&mut self, weather: Weather) {
        self.weather = weather;
    }

    pub fn rng_mut(&mut self) -> &mut SimRng {
        &mut self.rng
    }

    pub fn event_engine(&self) -> &EventEngine {
        &self.events
    }

    pub fn recipes(&self) -> &RecipeCatalog {
        &self.recipes
    }

    pub fn place_building(&mut self, kind: &str, position: GridPos) -> Result<BuildingId> {
        self.buildings.place_named(kind, position)
    }

    pub fn assign_job(&mut self, survivor: SurvivorId, job: &str) -> Result<()> {
        let job = JobType::from_name(job)?;
        self.population.assign_job(survivor, job)
    }

    pub fn register_production(&mut self, kind: ProductionKind, workers: Vec<SurvivorId>) -> usize {
        self.economy.register_production(kind, workers)
    }

    /// Craft at a workshop, paying from the colony stockpile
    pub fn craft(&mut self, workshop: BuildingId, recipe: &str) -> Result<CraftItem> {
        self.buildings
            .craft(workshop, recipe, &self.recipes, &mut self.economy.stockpile)
    }

    /// Conditions the event engine would see right now
    pub fn conditions(&self) -> GameConditions {
        GameConditions {
            day: self.day,
            population: self.population.len(),
            resource_shortage: self
                .economy
                .stockpile
                .shortage_count(self.config.shortage_threshold),
            weather: self.weather,
        }
    }

    pub fn forecast(&self, days: u32) -> Vec<DayForecast> {
        self.events.forecast(&self.conditions(), days)
    }

    pub fn economy_report(&self) -> Option<EconomyReport> {
        self.economy.economy_report(self.config.history_window)
    }

    pub fn daily_snapshot(&self) -> DailySnapshot {
        DailySnapshot {
            day: self.day,
            survivors: self.population.survivors().to_vec(),
            resources: self.economy.stockpile.amounts(),
            building_count: self.buildings.len(),
        }
    }

    /// Advance the colony by one day.
    ///
    /// Returns `GameOver` without touching the day counter if nobody is
    /// alive at the start of the day or after the needs update.
    pub fn advance_day(&mut self) -> DayOutcome {
        let day = self.day;
        let weather = self.weather;

        if self.population.is_empty() {
            return DayOutcome::GameOver(GameOver {
                day,
                cause: GameOverCause::NoSurvivors,
            });
        }

        // Needs and job hazards
        let mut deaths: Vec<Casualty> = self
            .population
            .daily_update(&mut self.rng)
            .iter()
            .map(Casualty::from)
            .collect();
        self.forget(&deaths);
        if self.population.is_empty() {
            tracing::info!("Day {}: the last survivors perished", day);
            return DayOutcome::GameOver(GameOver {
                day,
                cause: GameOverCause::AllPerished,
            });
        }

        let economy = self
            .economy
            .process_day(day, &mut self.population, weather, self.config.rationing);

        let construction = self.buildings.daily_update(self.config.construction_workers);

        // Events and their cascades
        let conditions = GameConditions {
            day,
            population: self.population.len(),
            resource_shortage: economy
                .resources
                .values()
                .filter(|amount| **amount < self.config.shortage_threshold)
                .count(),
            weather,
        };
        let mut events = Vec::new();
        for event in self.events.check_triggers(&conditions, &mut self.rng) {
            events.extend(self.events.create_chain(
                event,
                &conditions,
                self.config.cascade_max_length,
                &mut self.rng,
            ));
        }

        let mut skipped_effects = Vec::new();
        for event in &events {
            if let Err(err) = self.apply_event(event) {
                tracing::warn!("Day {}: skipped {} effect: {}", day, event.kind, err);
                skipped_effects.push(SkippedEffect {
                    event: *event,
                    reason: err.to_string(),
                });
            }
        }
        let event_deaths: Vec<Casualty> = self.population.reap_dead().iter().map(Casualty::from).collect();
        self.forget(&event_deaths);
        deaths.extend(event_deaths);

        // Horde and combat share today's survivor positions
        let positions = self.survivor_positions();
        self.horde.update_all(
            &positions,
            self.config.detection_radius,
            self.config.scream_radius,
        );
        let combatants = self.combatants(&positions);
        let combat = group_combat(&combatants, &mut self.horde, false, &self.weapons, &mut self.rng);

        self.day += 1;
        self.weather = self.rng.choose(&Weather::DAILY).copied().unwrap_or_default();

        let report = DayReport {
            day,
            weather,
            impact: combined_impact(&events),
            events,
            skipped_effects,
            combat,
            economy,
            construction,
            job_outputs: self.population.job_outputs(),
            deaths,
            population: self.population.len(),
            horde_size: self.horde.len(),
        };
        tracing::info!(
            "Day {} done: {} survivors, {} events, {} zombies ({} killed)",
            day,
            report.population,
            report.events.len(),
            report.horde_size,
            report.zombies_killed()
        );
        DayOutcome::Completed(report)
    }

    fn forget(&mut self, casualties: &[Casualty]) {
        if casualties.is_empty() {
            return;
        }
        let ids: Vec<SurvivorId> = casualties.iter().map(|c| c.id).collect();
        self.economy.forget_workers(&ids);
    }

    /// A fresh random cell for every survivor, in population order
    fn survivor_positions(&mut self) -> Vec<Vec2> {
        let size = self.config.grid_size;
        (0..self.population.len())
            .map(|_| {
                let x = self.rng.int_range(0, size) as f32;
                let y = self.rng.int_range(0, size) as f32;
                Vec2::new(x, y)
            })
            .collect()
    }

    /// Survivors skilled enough to fight, each with a melee weapon
    fn combatants(&mut self, positions: &[Vec2]) -> Vec<Combatant> {
        let threshold = self.config.combat_skill_threshold;
        let mut combatants = Vec::new();
        for (survivor, &position) in self.population.survivors().iter().zip(positions) {
            let skill = survivor.skills.get(SkillType::Combat);
            if skill <= threshold {
                continue;
            }
            let weapon = self
                .rng
                .choose(&WeaponKind::MELEE)
                .copied()
                .unwrap_or(WeaponKind::Fists);
            combatants.push(Combatant {
                id: survivor.id,
                name: survivor.name.clone(),
                skill,
                position,
                weapon,
            });
        }
        combatants
    }
}
