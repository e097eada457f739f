//! Population arena and job assignments
//!
//! Survivors live in one list keyed by stable ids. Job assignment is a
//! separate id -> job map, so a death is one list removal plus one map
//! removal and nothing can keep pointing at a dead survivor.

use ahash::AHashMap;

use crate::core::error::{ColonyError, Result};
use crate::core::rng::SimRng;
use crate::core::types::SurvivorId;
use crate::population::job::JobType;
use crate::population::survivor::{SkillType, Survivor};

/// Health under which a survivor needs medicine
pub const SICK_THRESHOLD: f32 = 70.0;

#[derive(Debug, Clone, Default)]
pub struct Population {
    survivors: Vec<Survivor>,
    assignments: AHashMap<SurvivorId, JobType>,
    next_id: u32,
}

impl Population {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.survivors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.survivors.is_empty()
    }

    pub fn survivors(&self) -> &[Survivor] {
        &self.survivors
    }

    pub fn iter(&self) -> impl Iterator<Item = &Survivor> {
        self.survivors.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Survivor> {
        self.survivors.iter_mut()
    }

    pub fn get(&self, id: SurvivorId) -> Option<&Survivor> {
        self.survivors.iter().find(|s| s.id == id)
    }

    pub fn get_mut(&mut self, id: SurvivorId) -> Option<&mut Survivor> {
        self.survivors.iter_mut().find(|s| s.id == id)
    }

    fn allocate_id(&mut self) -> SurvivorId {
        let id = SurvivorId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add a fresh survivor with default stats
    pub fn add(&mut self, name: impl Into<String>, age: u32) -> SurvivorId {
        let id = self.allocate_id();
        self.survivors.push(Survivor::new(id, name, age));
        id
    }

    /// Add a randomly generated newcomer
    pub fn add_random(&mut self, rng: &mut SimRng) -> SurvivorId {
        let id = self.allocate_id();
        self.survivors.push(Survivor::random(id, rng));
        id
    }

    pub fn assign_job(&mut self, id: SurvivorId, job: JobType) -> Result<()> {
        if self.get(id).is_none() {
            return Err(ColonyError::SurvivorNotFound(id));
        }
        self.assignments.insert(id, job);
        Ok(())
    }

    pub fn unassign(&mut self, id: SurvivorId) -> Option<JobType> {
        self.assignments.remove(&id)
    }

    pub fn job_of(&self, id: SurvivorId) -> Option<JobType> {
        self.assignments.get(&id).copied()
    }

    /// Ids working a job, in population order
    pub fn assigned(&self, job: JobType) -> Vec<SurvivorId> {
        self.survivors
            .iter()
            .filter(|s| self.assignments.get(&s.id) == Some(&job))
            .map(|s| s.id)
            .collect()
    }

    /// Needs update for everyone, then job hazards, then removal of the dead
    pub fn daily_update(&mut self, rng: &mut SimRng) -> Vec<Survivor> {
        for survivor in &mut self.survivors {
            survivor.update_needs();
        }
        self.process_danger(rng);
        self.reap_dead()
    }

    /// Roll job hazards in catalog order, survivors in population order
    pub fn process_danger(&mut self, rng: &mut SimRng) {
        for job in JobType::ALL {
            for survivor in self.survivors.iter_mut() {
                if self.assignments.get(&survivor.id) != Some(&job) || survivor.is_dead() {
                    continue;
                }
                if let Some(damage) = job.apply_danger(survivor, rng) {
                    tracing::debug!("{} hurt on {} duty for {}", survivor.name, job, damage);
                }
            }
        }
    }

    /// Remove every dead survivor from the list and the assignment map
    pub fn reap_dead(&mut self) -> Vec<Survivor> {
        let (dead, living): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.survivors).into_iter().partition(|s| s.is_dead());
        self.survivors = living;
        for survivor in &dead {
            self.assignments.remove(&survivor.id);
            tracing::info!("{} ({}) has died", survivor.name, survivor.id);
        }
        dead
    }

    pub fn specialists(&self, skill: SkillType, min_level: f32) -> impl Iterator<Item = &Survivor> {
        self.survivors
            .iter()
            .filter(move |s| s.skills.get(skill) >= min_level)
    }

    /// Sum of skill x productivity over a job's workers
    pub fn job_output(&self, job: JobType) -> f32 {
        self.survivors
            .iter()
            .filter(|s| self.assignments.get(&s.id) == Some(&job))
            .map(|s| job.output_of(s))
            .sum()
    }

    pub fn job_outputs(&self) -> Vec<(JobType, f32)> {
        JobType::ALL
            .into_iter()
            .map(|job| (job, self.job_output(job)))
            .collect()
    }

    /// 0 for an empty population
    pub fn average_morale(&self) -> f32 {
        if self.survivors.is_empty() {
            return 0.0;
        }
        self.survivors.iter().map(|s| s.morale).sum::<f32>() / self.survivors.len() as f32
    }

    pub fn sick_count(&self) -> usize {
        self.survivors
            .iter()
            .filter(|s| s.health < SICK_THRESHOLD)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_stable_and_unique() {
        let mut pop = Population::new();
        let a = pop.add("Alex", 30);
        let b = pop.add("Jamie", 22);
        assert_ne!(a, b);
        pop.get_mut(a).unwrap().health = 0.0;
        pop.reap_dead();
        let c = pop.add("Taylor", 41);
        assert_ne!(a, c);
        assert_eq!(pop.get(b).unwrap().name, "Jamie");
    }

    #[test]
    fn test_assign_unknown_survivor_rejected() {
        let mut pop = Population::new();
        let err = pop.assign_job(SurvivorId(99), JobType::Guard).unwrap_err();
        assert!(matches!(err, ColonyError::SurvivorNotFound(SurvivorId(99))));
    }

    #[test]
    fn test_reassignment_moves_survivor() {
        let mut pop = Population::new();
        let a = pop.add("Alex", 30);
        pop.assign_job(a, JobType::Guard).unwrap();
        pop.assign_job(a, JobType::Scout).unwrap();
        assert!(pop.assigned(JobType::Guard).is_empty());
        assert_eq!(pop.assigned(JobType::Scout), vec![a]);
    }

    #[test]
    fn test_death_clears_assignment() {
        let mut pop = Population::new();
        let a = pop.add("Alex", 30);
        let b = pop.add("Casey", 30);
        pop.assign_job(a, JobType::Farmer).unwrap();
        pop.assign_job(b, JobType::Farmer).unwrap();
        pop.get_mut(a).unwrap().thirst = 95.0;

        let mut rng = SimRng::from_seed(1);
        let dead = pop.daily_update(&mut rng);

        assert_eq!(dead.len(), 1);
        assert_eq!(dead[0].id, a);
        assert_eq!(pop.len(), 1);
        assert_eq!(pop.job_of(a), None);
        assert_eq!(pop.assigned(JobType::Farmer), vec![b]);
    }

    #[test]
    fn test_job_output_sums_workers() {
        let mut pop = Population::new();
        let a = pop.add("Alex", 30);
        let b = pop.add("Riley", 30);
        pop.add("Morgan", 30);
        pop.get_mut(a).unwrap().skills.building = 3.0;
        pop.get_mut(b).unwrap().skills.building = 5.0;
        pop.assign_job(a, JobType::Builder).unwrap();
        pop.assign_job(b, JobType::Builder).unwrap();

        // fresh survivors have productivity 0.9
        assert!((pop.job_output(JobType::Builder) - 8.0 * 0.9).abs() < 1e-4);
        assert_eq!(pop.job_output(JobType::Medic), 0.0);
    }

    #[test]
    fn test_specialists_threshold_inclusive() {
        let mut pop = Population::new();
        let a = pop.add("Alex", 30);
        pop.add("Jamie", 30);
        pop.get_mut(a).unwrap().skills.combat = 3.0;
        let ids: Vec<_> = pop.specialists(SkillType::Combat, 3.0).map(|s| s.id).collect();
        assert_eq!(ids, vec![a]);
    }

    #[test]
    fn test_sick_count_and_morale() {
        let mut pop = Population::new();
        let a = pop.add("Alex", 30);
        pop.add("Jamie", 30);
        pop.get_mut(a).unwrap().health = 50.0;
        pop.get_mut(a).unwrap().morale = 25.0;
        assert_eq!(pop.sick_count(), 1);
        assert_eq!(pop.average_morale(), 50.0);
        assert_eq!(Population::new().average_morale(), 0.0);
    }
}
