pub mod action;
pub mod bucket;
pub mod infoset;
pub mod policy;
pub mod proxy;
pub mod solver;
pub mod state;
pub mod store;
pub mod strategy;
