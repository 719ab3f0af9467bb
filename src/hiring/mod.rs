//! Hiring relations between students and tutors.

mod manager;

pub use crate::db::HiringRelation;
pub use manager::HiringRelationManager;
