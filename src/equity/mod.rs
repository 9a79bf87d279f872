pub mod simulator;
pub mod tie;
