pub mod evaluator;
pub mod kicks;
pub mod ranking;
pub mod strength;
