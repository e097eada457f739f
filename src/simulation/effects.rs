//! Applying a triggered event to the colony
//!
//! Caps are checked before anything is mutated, so a rejected effect leaves
//! the colony exactly as it was.

use crate::core::error::{ColonyError, Result};
use crate::economy::ResourceType;
use crate::events::{Event, EventKind};
use crate::horde::ZombieKind;
use crate::simulation::colony::Colony;

/// Resources a discovery can turn up
const DISCOVERABLE: [ResourceType; 4] = [
    ResourceType::Food,
    ResourceType::Water,
    ResourceType::Wood,
    ResourceType::Metal,
];

impl Colony {
    pub fn apply_event(&mut self, event: &Event) -> Result<()> {
        let severity = event.severity as usize;
        match event.kind {
            EventKind::ZombieAttack => {
                let limit = self.config().max_horde_size;
                if self.horde.len() + severity > limit {
                    return Err(ColonyError::EventEffect {
                        kind: event.kind,
                        reason: format!(
                            "{} more zombies would exceed the horde cap of {}",
                            severity, limit
                        ),
                    });
                }
                let grid_size = self.config().grid_size;
                for _ in 0..severity {
                    let kind = self
                        .rng
                        .weighted_choice(&self.spawn_mix)
                        .copied()
                        .unwrap_or(ZombieKind::Shambler);
                    self.horde.spawn(kind, &mut self.rng, grid_size);
                }
                tracing::info!("{} zombies approach the colony", severity);
            }
            EventKind::SurvivorJoins => {
                let limit = self.config().max_population;
                if self.population.len() + severity > limit {
                    return Err(ColonyError::EventEffect {
                        kind: event.kind,
                        reason: format!(
                            "{} newcomers would exceed the population cap of {}",
                            severity, limit
                        ),
                    });
                }
                for _ in 0..severity {
                    let id = self.population.add_random(&mut self.rng);
                    if let Some(survivor) = self.population.get(id) {
                        tracing::info!("{} joined the colony", survivor.name);
                    }
                }
            }
            EventKind::ResourceDiscovery => {
                for _ in 0..severity {
                    let rng = &mut self.rng;
                    let resource = rng.choose(&DISCOVERABLE).copied().unwrap_or(ResourceType::Food);
                    let amount = rng.int_range(10, 30) as f32;
                    self.economy.stockpile.add(resource, amount);
                    tracing::debug!("Found {} {}", amount, resource);
                }
            }
            EventKind::DiseaseOutbreak => {
                let count = severity.min(self.population.len());
                let picked = self.rng.sample_indices(self.population.len(), count);
                let victims: Vec<_> = picked
                    .into_iter()
                    .map(|i| self.population.survivors()[i].id)
                    .collect();
                for id in victims {
                    let damage = self.rng.int_range(10, 30) as f32;
                    if let Some(survivor) = self.population.get_mut(id) {
                        survivor.take_damage(damage);
                        tracing::debug!("{} fell ill ({} damage)", survivor.name, damage);
                    }
                }
            }
            // Reported and available for cascades, no direct effect
            EventKind::EquipmentFailure | EventKind::WeatherEvent => {}
        }
        Ok(())
    }
}
