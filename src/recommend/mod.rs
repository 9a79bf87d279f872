pub mod policy;
pub mod recommendation;
