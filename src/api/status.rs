use serde::Serialize;

/// Point-in-time engine counters.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Status {
    /// Monte Carlo trials run since construction
    pub simulations: u64,
    /// CFR updates applied since construction
    pub iterations: u64,
    /// info sets currently resident
    pub infosets: usize,
    /// equity results currently cached
    pub cached: usize,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} trials, {} updates, {} infosets, {} cached equities",
            self.simulations, self.iterations, self.infosets, self.cached
        )
    }
}
