use super::config::EngineConfig;
use super::status::Status;
use crate::cards::hand::Hand;
use crate::cards::hole::Hole;
use crate::cfr::bucket::Bucket;
use crate::cfr::policy::Policy;
use crate::cfr::solver::Solver;
use crate::cfr::state::GameState;
use crate::cfr::store::Store;
use crate::equity::simulator::Simulator;
use crate::error::EngineError;
use crate::recommend::recommendation::Recommendation;
use crate::Equity;
use rayon::prelude::*;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;

/// Top-level façade over the simulator, the info-set store, and the
/// recommendation policy. All methods take &self; internal state is
/// behind its own synchronization, so one Engine can serve concurrent
/// callers. Dropping the Engine releases everything.
pub struct Engine {
    config: EngineConfig,
    store: Store,
    cache: Mutex<HashMap<(Hole, Hand, usize), Equity>>,
    pool: rayon::ThreadPool,
    cancel: Arc<AtomicBool>,
    simulations: AtomicU64,
    iterations: AtomicU64,
    streams: AtomicU64,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        log::info!(
            "engine up: {} trials, {} threads, seed {}",
            config.trials,
            config.threads,
            config.seed
        );
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .build()
            .expect("spawn worker threads");
        Self {
            store: Store::new(config.capacity),
            cache: Mutex::new(HashMap::new()),
            pool,
            cancel: Arc::new(AtomicBool::new(false)),
            simulations: AtomicU64::new(0),
            iterations: AtomicU64::new(0),
            streams: AtomicU64::new(0),
            config,
        }
    }

    /// Monte Carlo equity for hero against `opponents` random holdings.
    /// Identical queries are served from cache without re-simulating.
    pub fn equity(
        &self,
        hole: Hole,
        board: Hand,
        opponents: usize,
        trials: usize,
    ) -> Result<Equity, EngineError> {
        let key = (hole, board, opponents);
        if let Some(equity) = self.cache().get(&key) {
            return Ok(*equity);
        }
        let simulator = Simulator::new(opponents, trials)
            .tie(self.config.tie)
            .seed(self.config.seed)
            .cancel(Arc::clone(&self.cancel));
        let equity = self.pool.install(|| simulator.estimate(hole, board))?;
        self.simulations.fetch_add(trials as u64, Ordering::Relaxed);
        let mut cache = self.cache();
        if cache.len() >= self.config.cache {
            log::debug!("equity cache full at {}, flushing", cache.len());
            cache.clear();
        }
        cache.insert(key, equity);
        Ok(equity)
    }

    /// Advise a line for one decision point. A state that fails
    /// validation yields an error rather than a guessed action.
    pub fn recommend(&self, state: &GameState) -> Result<Recommendation, EngineError> {
        state.validate()?;
        let equity = self.equity(state.hole, state.board, state.players - 1, self.config.trials)?;
        let average = self.strategy(state)?;
        let recommendation = self.config.policy.decide(state, equity, &average)?;
        log::info!("{} -> {}", state, recommendation);
        Ok(recommendation)
    }

    /// average strategy learned for this state's bucket. uniform over
    /// the legal actions if the bucket has never been trained.
    pub fn strategy(&self, state: &GameState) -> Result<Policy, EngineError> {
        state.validate()?;
        let legal = state.legal();
        match self.store.get(&Bucket::from(state)) {
            Some(slot) => Ok(slot.lock().strategy().average(&legal)),
            None => Ok(Policy::uniform(&legal)),
        }
    }

    /// One CFR pass over a batch of observed states. Returns the mean
    /// absolute regret delta per processed state, a convergence signal
    /// that trends toward zero as the strategies settle.
    ///
    /// The whole batch is validated before any update, so a malformed
    /// state aborts the pass without mutating the store.
    pub fn train(&self, states: &[GameState]) -> Result<f64, EngineError> {
        for state in states {
            state.validate()?;
        }
        let base = self
            .streams
            .fetch_add(states.len() as u64, Ordering::Relaxed);
        let solver = Solver::new(&self.store, self.config.model, self.config.cfr_plus);
        let (drift, done) = self.pool.install(|| {
            states
                .par_iter()
                .enumerate()
                .map(|(i, state)| {
                    if self.cancel.load(Ordering::Relaxed) {
                        return Ok((0.0, 0u64));
                    }
                    let stream = Simulator::stream(self.config.seed, base + i as u64);
                    let update = solver.update(state, 1.0, stream)?;
                    Ok((update.convergence, 1))
                })
                .try_reduce(|| (0.0, 0), |a, b| Ok((a.0 + b.0, a.1 + b.1)))
        })?;
        self.iterations.fetch_add(done, Ordering::Relaxed);
        if done == 0 {
            Ok(0.0)
        } else {
            Ok(drift / done as f64)
        }
    }

    /// Repeated passes over the same batch. Logs progress periodically
    /// and stops early on interrupt. Returns the final pass's drift.
    pub fn train_intensive(
        &self,
        states: &[GameState],
        passes: usize,
    ) -> Result<f64, EngineError> {
        let mut drift = 0.0;
        for pass in 0..passes {
            if self.cancel.load(Ordering::Relaxed) {
                log::info!("training interrupted after {} passes", pass);
                break;
            }
            drift = self.train(states)?;
            if (pass + 1) % 100 == 0 {
                log::info!("pass {}: drift {:.4}", pass + 1, drift);
            }
        }
        Ok(drift)
    }

    /// cooperative cancellation: in-flight simulation and training
    /// finish their current chunk and stop
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }
    pub fn resume(&self) {
        self.cancel.store(false, Ordering::Relaxed);
    }

    pub fn status(&self) -> Status {
        Status {
            simulations: self.simulations.load(Ordering::Relaxed),
            iterations: self.iterations.load(Ordering::Relaxed),
            infosets: self.store.len(),
            cached: self.cache().len(),
        }
    }

    /// serialize every learned info set to JSON
    pub fn export(&self) -> Result<String, EngineError> {
        self.store.export()
    }

    /// load a previously exported snapshot, replacing colliding buckets
    pub fn import(&self, json: &str) -> Result<usize, EngineError> {
        self.store.import(json)
    }

    fn cache(&self) -> std::sync::MutexGuard<HashMap<(Hole, Hand, usize), Equity>> {
        self.cache.lock().expect("equity cache lock poisoned")
    }
}
