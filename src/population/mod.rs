//! Population layer - survivors, needs, skills and jobs

pub mod job;
pub mod roster;
pub mod survivor;

pub use job::JobType;
pub use roster::{Population, SICK_THRESHOLD};
pub use survivor::{SkillType, Skills, Survivor, SKILL_MAX, SKILL_MIN, STAT_MAX};
