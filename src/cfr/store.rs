use super::bucket::Bucket;
use super::infoset::InfoSet;
use crate::error::EngineError;
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::RwLock;

/// One resident info set. The touch stamp lives outside the data mutex
/// so eviction scans never contend with learners.
#[derive(Debug)]
pub struct Slot {
    touched: AtomicU64,
    infoset: Mutex<InfoSet>,
}

impl Slot {
    fn new(infoset: InfoSet, stamp: u64) -> Self {
        Self {
            touched: AtomicU64::new(stamp),
            infoset: Mutex::new(infoset),
        }
    }

    pub fn lock(&self) -> MutexGuard<InfoSet> {
        self.infoset.lock().expect("infoset lock poisoned")
    }
}

/// Concurrent info-set table keyed by abstraction bucket.
///
/// Reads take the shared lock and clone an Arc; mutation happens under
/// each Slot's own mutex, so two learners only serialize when they land
/// in the same bucket. With a capacity set, inserting past it evicts the
/// least recently touched slot.
#[derive(Debug)]
pub struct Store {
    slots: RwLock<HashMap<Bucket, Arc<Slot>>>,
    capacity: Option<usize>,
    clock: AtomicU64,
}

impl Store {
    pub fn new(capacity: Option<usize>) -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
            capacity,
            clock: AtomicU64::new(0),
        }
    }

    pub fn get(&self, bucket: &Bucket) -> Option<Arc<Slot>> {
        let slots = self.slots.read().expect("store lock poisoned");
        let slot = slots.get(bucket).cloned();
        if let Some(ref slot) = slot {
            slot.touched.store(self.tick(), Ordering::Relaxed);
        }
        slot
    }

    pub fn get_or_create(&self, bucket: Bucket) -> Arc<Slot> {
        if let Some(slot) = self.get(&bucket) {
            return slot;
        }
        let mut slots = self.slots.write().expect("store lock poisoned");
        // double-checked: another writer may have created it meanwhile
        let slot = slots
            .entry(bucket)
            .or_insert_with(|| Arc::new(Slot::new(InfoSet::default(), self.tick())))
            .clone();
        self.evict(&mut slots);
        slot
    }

    pub fn len(&self) -> usize {
        self.slots.read().expect("store lock poisoned").len()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.slots.write().expect("store lock poisoned").clear();
    }

    /// snapshot every info set as a JSON object keyed by bucket
    pub fn export(&self) -> Result<String, EngineError> {
        let slots = self.slots.read().expect("store lock poisoned");
        let snapshot = slots
            .iter()
            .map(|(bucket, slot)| (bucket.to_string(), slot.lock().clone()))
            .collect::<BTreeMap<String, InfoSet>>();
        serde_json::to_string(&snapshot).map_err(|e| EngineError::Serialization(e.to_string()))
    }

    /// merge a previously exported snapshot, replacing any colliding
    /// buckets. returns the number of info sets loaded.
    pub fn import(&self, json: &str) -> Result<usize, EngineError> {
        let snapshot = serde_json::from_str::<BTreeMap<String, InfoSet>>(json)
            .map_err(|e| EngineError::Serialization(e.to_string()))?;
        let mut loaded = HashMap::new();
        for (key, infoset) in snapshot {
            let bucket =
                Bucket::try_from(key.as_str()).map_err(EngineError::Serialization)?;
            loaded.insert(bucket, Arc::new(Slot::new(infoset, self.tick())));
        }
        let count = loaded.len();
        let mut slots = self.slots.write().expect("store lock poisoned");
        slots.extend(loaded);
        self.evict(&mut slots);
        Ok(count)
    }

    /// drop least recently touched slots until within capacity
    fn evict(&self, slots: &mut HashMap<Bucket, Arc<Slot>>) {
        let Some(capacity) = self.capacity else {
            return;
        };
        while slots.len() > capacity {
            let coldest = slots
                .iter()
                .min_by_key(|(_, slot)| slot.touched.load(Ordering::Relaxed))
                .map(|(bucket, _)| *bucket);
            match coldest {
                Some(bucket) => {
                    log::trace!("evicting {}", bucket);
                    slots.remove(&bucket)
                }
                None => break,
            };
        }
    }

    fn tick(&self) -> u64 {
        self.clock.fetch_add(1, Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cfr::state::GameState;
    use crate::Arbitrary;

    fn bucket() -> Bucket {
        Bucket::from(&GameState::random())
    }

    #[test]
    fn create_then_get_same_slot() {
        let store = Store::new(None);
        let bucket = bucket();
        let a = store.get_or_create(bucket);
        let b = store.get(&bucket).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn missing_bucket_is_none() {
        let store = Store::new(None);
        assert!(store.get(&bucket()).is_none());
    }

    #[test]
    fn eviction_drops_the_coldest() {
        let store = Store::new(Some(8));
        let mut buckets = std::collections::HashSet::new();
        while buckets.len() < 16 {
            buckets.insert(bucket());
        }
        let buckets = buckets.into_iter().collect::<Vec<_>>();
        for b in &buckets {
            store.get_or_create(*b);
        }
        assert_eq!(store.len(), 8);
        // the freshest insert survives
        assert!(store.get(buckets.last().unwrap()).is_some());
    }

    #[test]
    fn export_import_round_trip() {
        let store = Store::new(None);
        let bucket = bucket();
        {
            let slot = store.get_or_create(bucket);
            let mut info = slot.lock();
            info.witness(0.0);
            info.strategy_mut()
                .add_regret(crate::cfr::action::Action::Bet, 2.5, false);
        }
        let json = store.export().unwrap();
        let other = Store::new(None);
        assert_eq!(other.import(&json).unwrap(), 1);
        let slot = other.get(&bucket).unwrap();
        let info = slot.lock();
        assert_eq!(info.visits(), 1);
        assert_eq!(
            info.strategy().regret(&crate::cfr::action::Action::Bet),
            2.5
        );
    }

    #[test]
    fn import_rejects_garbage() {
        let store = Store::new(None);
        assert!(matches!(
            store.import("not json"),
            Err(EngineError::Serialization(_))
        ));
    }

    #[test]
    fn concurrent_visits_are_exact() {
        use std::thread;
        let store = Arc::new(Store::new(None));
        let bucket = bucket();
        store.get_or_create(bucket);
        let workers: u64 = 8;
        let per_worker: u64 = 1_000;
        let handles = (0..workers)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for _ in 0..per_worker {
                        store.get_or_create(bucket).lock().witness(1.0);
                    }
                })
            })
            .collect::<Vec<_>>();
        for handle in handles {
            handle.join().unwrap();
        }
        let visits = store.get(&bucket).unwrap().lock().visits();
        assert_eq!(visits, workers * per_worker);
    }
}
