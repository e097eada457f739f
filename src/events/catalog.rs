//! Event catalog tables: base probabilities, severity ranges, cascade links
//! and impact weights. Built once and shared by reference.

use derive_more::Display;
use serde::{Deserialize, Serialize};

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    #[display(fmt = "zombie_attack")]
    ZombieAttack,
    #[display(fmt = "survivor_joins")]
    SurvivorJoins,
    #[display(fmt = "resource_discovery")]
    ResourceDiscovery,
    #[display(fmt = "equipment_failure")]
    EquipmentFailure,
    #[display(fmt = "disease_outbreak")]
    DiseaseOutbreak,
    #[display(fmt = "weather_event")]
    WeatherEvent,
}

impl EventKind {
    pub const ALL: [EventKind; 6] = [
        EventKind::ZombieAttack,
        EventKind::SurvivorJoins,
        EventKind::ResourceDiscovery,
        EventKind::EquipmentFailure,
        EventKind::DiseaseOutbreak,
        EventKind::WeatherEvent,
    ];

    /// Whether resource shortages make this event more likely
    pub fn shortage_sensitive(&self) -> bool {
        matches!(
            self,
            EventKind::ZombieAttack | EventKind::EquipmentFailure | EventKind::DiseaseOutbreak
        )
    }

    /// Weight of one severity point in `combined_impact`; negative is good news
    pub fn impact_multiplier(&self) -> f32 {
        match self {
            EventKind::ZombieAttack => 1.5,
            EventKind::SurvivorJoins => -1.0,
            EventKind::ResourceDiscovery => -0.8,
            EventKind::EquipmentFailure => 1.2,
            EventKind::DiseaseOutbreak => 2.0,
            EventKind::WeatherEvent => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EventSpec {
    pub kind: EventKind,
    pub base_prob: f32,
    pub min_severity: u32,
    pub max_severity: u32,
}

/// Event types in trigger order
#[derive(Debug, Clone)]
pub struct EventTable {
    specs: Vec<EventSpec>,
}

impl Default for EventTable {
    fn default() -> Self {
        let spec = |kind, base_prob, min_severity, max_severity| EventSpec {
            kind,
            base_prob,
            min_severity,
            max_severity,
        };
        Self {
            specs: vec![
                spec(EventKind::ZombieAttack, 0.3, 1, 5),
                spec(EventKind::SurvivorJoins, 0.1, 1, 3),
                spec(EventKind::ResourceDiscovery, 0.15, 1, 4),
                spec(EventKind::EquipmentFailure, 0.2, 1, 3),
                spec(EventKind::DiseaseOutbreak, 0.1, 2, 5),
                spec(EventKind::WeatherEvent, 0.25, 1, 4),
            ],
        }
    }
}

impl EventTable {
    pub fn get(&self, kind: EventKind) -> Option<&EventSpec> {
        self.specs.iter().find(|s| s.kind == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EventSpec> {
        self.specs.iter()
    }

    pub fn base_prob(&self, kind: EventKind) -> f32 {
        self.get(kind).map_or(0.0, |s| s.base_prob)
    }
}

/// Directed map from a triggering event to follow-ups with probability deltas
#[derive(Debug, Clone)]
pub struct CascadeMap {
    links: Vec<(EventKind, Vec<(EventKind, f32)>)>,
}

impl Default for CascadeMap {
    fn default() -> Self {
        Self {
            links: vec![
                (
                    EventKind::EquipmentFailure,
                    vec![(EventKind::ZombieAttack, 0.4), (EventKind::SurvivorJoins, 0.1)],
                ),
                (
                    EventKind::DiseaseOutbreak,
                    vec![(EventKind::ResourceDiscovery, 0.2), (EventKind::SurvivorJoins, -0.3)],
                ),
                (
                    EventKind::WeatherEvent,
                    vec![(EventKind::ResourceDiscovery, 0.1), (EventKind::EquipmentFailure, 0.3)],
                ),
            ],
        }
    }
}

impl CascadeMap {
    /// Follow-ups of `kind`, empty if it cascades into nothing
    pub fn followups(&self, kind: EventKind) -> &[(EventKind, f32)] {
        self.links
            .iter()
            .find(|(from, _)| *from == kind)
            .map(|(_, to)| to.as_slice())
            .unwrap_or(&[])
    }
}
