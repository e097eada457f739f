//! Event probability engine
//!
//! `p = base * (1 + day/100) * (1 + population/50) * shortage * weather`,
//! where the shortage factor `1 + shortage/20` applies only to
//! shortage-sensitive events. Each event type is an independent Bernoulli
//! draw per day, so several can fire together.

use serde::{Deserialize, Serialize};

use crate::core::rng::SimRng;
use crate::core::types::{Day, Weather};
use crate::events::catalog::{CascadeMap, EventKind, EventTable};

/// A triggered event
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub kind: EventKind,
    pub severity: u32,
    pub day: Day,
    /// Raised by another event rather than drawn from the daily table
    #[serde(default)]
    pub cascaded: bool,
}

/// Read-only view of the colony the engine conditions on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameConditions {
    pub day: Day,
    pub population: usize,
    /// Number of resources below the shortage threshold
    pub resource_shortage: usize,
    pub weather: Weather,
}

/// Probabilities of every event type for one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayForecast {
    pub day: Day,
    pub probabilities: Vec<(EventKind, f32)>,
}

#[derive(Debug, Clone, Default)]
pub struct EventEngine {
    table: EventTable,
    cascades: CascadeMap,
}

impl EventEngine {
    pub fn new(table: EventTable, cascades: CascadeMap) -> Self {
        Self { table, cascades }
    }

    pub fn table(&self) -> &EventTable {
        &self.table
    }

    pub fn cascades(&self) -> &CascadeMap {
        &self.cascades
    }

    /// Deterministic probability in [0, 1]
    pub fn probability(&self, kind: EventKind, conditions: &GameConditions) -> f32 {
        let Some(spec) = self.table.get(kind) else {
            return 0.0;
        };
        let mut p = spec.base_prob;
        p *= 1.0 + conditions.day as f32 / 100.0;
        p *= 1.0 + conditions.population as f32 / 50.0;
        if kind.shortage_sensitive() {
            p *= 1.0 + conditions.resource_shortage as f32 / 20.0;
        }
        p *= conditions.weather.event_modifier();
        p.clamp(0.0, 1.0)
    }

    /// `round(min(2*max, randint(min, max) * (1 + day/50)))`, halves to even
    pub fn severity(&self, kind: EventKind, day: Day, rng: &mut SimRng) -> u32 {
        let Some(spec) = self.table.get(kind) else {
            return 0;
        };
        let base = rng.int_range(spec.min_severity as i32, spec.max_severity as i32) as f32;
        let scaled = (base * (1.0 + day as f32 / 50.0)).min(2.0 * spec.max_severity as f32);
        scaled.round_ties_even() as u32
    }

    /// Sample every event type once, in table order
    pub fn check_triggers(&self, conditions: &GameConditions, rng: &mut SimRng) -> Vec<Event> {
        let mut triggered = Vec::new();
        for spec in self.table.iter() {
            let p = self.probability(spec.kind, conditions);
            if rng.uniform() < p {
                triggered.push(Event {
                    kind: spec.kind,
                    severity: self.severity(spec.kind, conditions.day, rng),
                    day: conditions.day,
                    cascaded: false,
                });
            }
        }
        triggered
    }

    /// Follow-ups of `event` that fire, each drawn at `clamp(base + delta)`
    pub fn cascade_followups(
        &self,
        event: &Event,
        conditions: &GameConditions,
        rng: &mut SimRng,
    ) -> Vec<Event> {
        let mut fired = Vec::new();
        for &(followup, delta) in self.cascades.followups(event.kind) {
            let p = (self.table.base_prob(followup) + delta).clamp(0.0, 1.0);
            if rng.uniform() < p {
                fired.push(Event {
                    kind: followup,
                    severity: self.severity(followup, conditions.day, rng),
                    day: conditions.day,
                    cascaded: true,
                });
            }
        }
        fired
    }

    /// `initial` followed by up to `max_length - 1` cascaded events. Each
    /// link is picked uniformly among the follow-ups of the previous one;
    /// the chain ends at the first link with none.
    pub fn create_chain(
        &self,
        initial: Event,
        conditions: &GameConditions,
        max_length: usize,
        rng: &mut SimRng,
    ) -> Vec<Event> {
        let mut chain = vec![initial];
        let mut current = initial;
        for _ in 1..max_length {
            let followups = self.cascade_followups(&current, conditions, rng);
            let Some(&next) = rng.choose(&followups) else {
                break;
            };
            chain.push(next);
            current = next;
        }
        chain
    }

    /// Probability table for `days` days starting at `conditions.day`
    pub fn forecast(&self, conditions: &GameConditions, days: u32) -> Vec<DayForecast> {
        (conditions.day..conditions.day + days)
            .map(|day| {
                let at = GameConditions { day, ..*conditions };
                DayForecast {
                    day,
                    probabilities: self
                        .table
                        .iter()
                        .map(|s| (s.kind, self.probability(s.kind, &at)))
                        .collect(),
                }
            })
            .collect()
    }
}

/// Weighted severity sum; positive means the day went badly
pub fn combined_impact(events: &[Event]) -> f32 {
    events
        .iter()
        .map(|e| e.severity as f32 * e.kind.impact_multiplier())
        .sum()
}
