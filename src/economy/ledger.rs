//! Economy manager - production sites, daily processing and history

use serde::{Deserialize, Serialize};

use crate::core::types::{Day, SurvivorId, Weather};
use crate::economy::production::{
    calculate_efficiency, predict_shortage, Consumption, ProductionKind, ProductionTable,
    ShortageForecast,
};
use crate::economy::stockpile::{ResourceAmounts, ResourceType, Stockpile};
use crate::population::Population;

/// A staffed production site
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductionSite {
    pub kind: ProductionKind,
    pub workers: Vec<SurvivorId>,
    pub level: u32,
    /// Structural damage 0-200; 200 stops production entirely
    pub damage: f32,
}

/// One day's flows and closing stock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyLedger {
    pub day: Day,
    pub production: ResourceAmounts,
    pub consumption: Consumption,
    pub resources: ResourceAmounts,
}

/// What the economy did today, as reported to the orchestrator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EconomySummary {
    pub production: ResourceAmounts,
    pub consumption: Consumption,
    pub resources: ResourceAmounts,
}

/// Aggregate over the most recent days of history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EconomyReport {
    pub days: usize,
    pub total_food_produced: f32,
    pub total_water_produced: f32,
    pub average_food_consumption: f32,
    pub average_water_consumption: f32,
    pub food_trend: f32,
    pub water_trend: f32,
    pub shortages: Vec<(ResourceType, ShortageForecast)>,
}

/// Suggested split of idle workers across production
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerPlan {
    pub farm: usize,
    pub water_collector: usize,
    pub scavenging: usize,
}

#[derive(Debug, Clone)]
pub struct Economy {
    pub stockpile: Stockpile,
    sites: Vec<ProductionSite>,
    history: Vec<DailyLedger>,
    table: ProductionTable,
}

impl Economy {
    pub fn new(stockpile: Stockpile) -> Self {
        Self {
            stockpile,
            sites: Vec::new(),
            history: Vec::new(),
            table: ProductionTable::default(),
        }
    }

    pub fn table(&self) -> &ProductionTable {
        &self.table
    }

    pub fn sites(&self) -> &[ProductionSite] {
        &self.sites
    }

    pub fn sites_mut(&mut self) -> &mut [ProductionSite] {
        &mut self.sites
    }

    pub fn history(&self) -> &[DailyLedger] {
        &self.history
    }

    /// Register a level-1 undamaged site, returns its index
    pub fn register_production(&mut self, kind: ProductionKind, workers: Vec<SurvivorId>) -> usize {
        tracing::debug!("Added {} with {} workers", kind, workers.len());
        self.sites.push(ProductionSite {
            kind,
            workers,
            level: 1,
            damage: 0.0,
        });
        self.sites.len() - 1
    }

    /// Drop survivors (usually the dead) from every site's crew
    pub fn forget_workers(&mut self, gone: &[SurvivorId]) {
        for site in &mut self.sites {
            site.workers.retain(|id| !gone.contains(id));
        }
    }

    fn site_output(&self, site: &ProductionSite, population: &Population, weather: Weather) -> f32 {
        let crew: Vec<_> = site.workers.iter().filter_map(|id| population.get(*id)).collect();
        let count = crew.len();
        let divisor = count.max(1) as f32;
        let avg_skill = crew.iter().map(|s| s.skills.get(site.kind.worker_skill())).sum::<f32>() / divisor;
        let avg_morale = crew.iter().map(|s| s.morale).sum::<f32>() / divisor;

        let efficiency = calculate_efficiency(avg_morale, site.damage, weather);
        self.table.calculate_production(site.kind, count, avg_skill, site.level) * efficiency
    }

    /// Run one day: produce, consume, clamp at zero, record history.
    ///
    /// With `rationing` the food and water actually withdrawn are shared
    /// evenly and eaten by every survivor.
    pub fn process_day(
        &mut self,
        day: Day,
        population: &mut Population,
        weather: Weather,
        rationing: bool,
    ) -> EconomySummary {
        let mut production: ResourceAmounts = [
            (ResourceType::Food, 0.0),
            (ResourceType::Water, 0.0),
            (ResourceType::Materials, 0.0),
        ]
        .into_iter()
        .collect();

        if population.is_empty() {
            return EconomySummary {
                production,
                consumption: Consumption::default(),
                resources: self.stockpile.amounts(),
            };
        }

        for site in &self.sites {
            let output = self.site_output(site, population, weather);
            *production.entry(site.kind.output()).or_insert(0.0) += output;
        }

        let stress = 100.0 - population.average_morale();
        let consumption =
            self.table
                .calculate_consumption(population.len(), population.sick_count(), stress);

        for (resource, produced) in &production {
            self.stockpile.add(*resource, *produced);
        }
        let food_eaten = self.stockpile.remove(ResourceType::Food, consumption.food);
        let water_drunk = self.stockpile.remove(ResourceType::Water, consumption.water);
        self.stockpile.remove(ResourceType::Medicine, consumption.medicine);

        if rationing {
            let n = population.len() as f32;
            let (food_ration, water_ration) = (food_eaten / n, water_drunk / n);
            for survivor in population.iter_mut() {
                survivor.consume_resources(food_ration, water_ration);
            }
        }

        let resources = self.stockpile.amounts();
        self.history.push(DailyLedger {
            day,
            production: production.clone(),
            consumption,
            resources: resources.clone(),
        });

        EconomySummary {
            production,
            consumption,
            resources,
        }
    }

    /// Summary of the last `days` of history, None before the first day
    pub fn economy_report(&self, days: usize) -> Option<EconomyReport> {
        let last = self.history.last()?;
        let window = &self.history[self.history.len().saturating_sub(days.max(1))..];
        let n = window.len() as f32;

        let produced = |r: ResourceType| -> f32 {
            window.iter().map(|d| d.production.get(&r).copied().unwrap_or(0.0)).sum()
        };
        let consumed = |r: ResourceType| -> f32 { window.iter().map(|d| d.consumption.get(r)).sum() };

        let baseline = &self.history[self.history.len().saturating_sub(days + 1)];
        let trend = |r: ResourceType| -> f32 {
            last.resources.get(&r).copied().unwrap_or(0.0)
                - baseline.resources.get(&r).copied().unwrap_or(0.0)
        };

        let avg_production: ResourceAmounts =
            ResourceType::ALL.into_iter().map(|r| (r, produced(r) / n)).collect();
        let avg_consumption: ResourceAmounts =
            ResourceType::ALL.into_iter().map(|r| (r, consumed(r) / n)).collect();

        Some(EconomyReport {
            days: window.len(),
            total_food_produced: produced(ResourceType::Food),
            total_water_produced: produced(ResourceType::Water),
            average_food_consumption: consumed(ResourceType::Food) / n,
            average_water_consumption: consumed(ResourceType::Water) / n,
            food_trend: trend(ResourceType::Food),
            water_trend: trend(ResourceType::Water),
            shortages: predict_shortage(&self.stockpile.amounts(), &avg_production, &avg_consumption),
        })
    }

    /// Split workers by how far food, water and materials are below target
    pub fn recommend_workers(&self, available: usize) -> WorkerPlan {
        let food_priority = (100.0 - self.stockpile.get(ResourceType::Food)).max(0.0) / 100.0;
        let water_priority = (100.0 - self.stockpile.get(ResourceType::Water)).max(0.0) / 100.0;
        let materials_priority = (50.0 - self.stockpile.get(ResourceType::Materials)).max(0.0) / 50.0;

        let mut total = food_priority + water_priority + materials_priority;
        if total == 0.0 {
            total = 1.0;
        }

        let n = available as f32;
        let farm = (n * food_priority / total) as usize;
        let water_collector = (n * water_priority / total) as usize;
        WorkerPlan {
            farm,
            water_collector,
            scavenging: available - farm - water_collector,
        }
    }
}
