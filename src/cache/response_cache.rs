use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::CacheStats;
use crate::response::OperationResult;

/// Proof that a cache miss happened at a particular point in the
/// invalidation history of an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadTicket {
    id: u64,
    epoch: u64,
    generation: u64,
}

impl ReadTicket {
    pub fn id(&self) -> u64 {
        self.id
    }
}

/// Result of [`ResponseCache::lookup`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Hit(OperationResult),
    Miss(ReadTicket),
}

/// Number of generation counters. Ids share a counter when they are equal
/// modulo this value, so invalidating one fences in-flight reads of the others.
const GENERATION_SLOTS: usize = 64;

struct CacheState {
    entries: HashMap<u64, OperationResult>,
    /// Bumped by `invalidate(id)` in the id's slot. Reset on `invalidate_all`,
    /// which bumps `epoch`.
    generations: [u64; GENERATION_SLOTS],
    epoch: u64,
    stats: CacheStats,
}

impl Default for CacheState {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            generations: [0; GENERATION_SLOTS],
            epoch: 0,
            stats: CacheStats::default(),
        }
    }
}

fn slot(id: u64) -> usize {
    (id % GENERATION_SLOTS as u64) as usize
}

impl CacheState {
    fn generation(&self, id: u64) -> u64 {
        self.generations[slot(id)]
    }

    fn ticket(&self, id: u64) -> ReadTicket {
        ReadTicket {
            id,
            epoch: self.epoch,
            generation: self.generation(id),
        }
    }

    fn is_current(&self, ticket: &ReadTicket) -> bool {
        ticket.epoch == self.epoch && ticket.generation == self.generation(ticket.id)
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.generations = [0; GENERATION_SLOTS];
        self.epoch = self.epoch.wrapping_add(1);
    }
}

/// Id → last successful read result, guarded by a single mutex.
///
/// Clone-friendly via Arc: clones share the same entries, so the owner of a
/// facade can keep a handle to the cache it built the facade with.
#[derive(Clone, Default)]
pub struct ResponseCache {
    state: Arc<Mutex<CacheState>>,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every operation is a short critical section over map calls, so a
    /// poisoned lock can be recovered; the contents are dropped on recovery.
    fn state(&self) -> MutexGuard<'_, CacheState> {
        match self.state.lock() {
            Ok(state) => state,
            Err(poisoned) => {
                tracing::error!("response cache lock poisoned, dropping all entries");
                let mut state = poisoned.into_inner();
                state.clear();
                self.state.clear_poison();
                state
            }
        }
    }

    /// Cached result for `id`, if any.
    pub fn get(&self, id: u64) -> Option<OperationResult> {
        let mut state = self.state();
        let entry = state.entries.get(&id).cloned();
        match entry {
            Some(_) => state.stats.hits += 1,
            None => state.stats.misses += 1,
        }
        entry
    }

    /// Like [`get`](Self::get), but a miss yields a ticket for
    /// [`put_fenced`](Self::put_fenced). Both happen under one lock.
    pub fn lookup(&self, id: u64) -> Lookup {
        let mut state = self.state();
        if let Some(entry) = state.entries.get(&id).cloned() {
            state.stats.hits += 1;
            return Lookup::Hit(entry);
        }
        state.stats.misses += 1;
        Lookup::Miss(state.ticket(id))
    }

    /// Start a read of `id` without consulting the entries.
    pub fn begin_read(&self, id: u64) -> ReadTicket {
        self.state().ticket(id)
    }

    /// Store `result` for `id`. Error results are never stored.
    ///
    /// Returns whether anything was stored.
    pub fn put(&self, id: u64, result: OperationResult) -> bool {
        if !result.is_success() {
            return false;
        }
        let mut state = self.state();
        state.entries.insert(id, result);
        state.stats.stored += 1;
        true
    }

    /// Store `result` only if no invalidation affecting the ticket's id has
    /// happened since the ticket was issued. Error results are never stored.
    ///
    /// Returns whether anything was stored.
    pub fn put_fenced(&self, ticket: ReadTicket, result: OperationResult) -> bool {
        if !result.is_success() {
            return false;
        }
        let mut state = self.state();
        if !state.is_current(&ticket) {
            state.stats.rejected += 1;
            return false;
        }
        state.entries.insert(ticket.id, result);
        state.stats.stored += 1;
        true
    }

    /// Drop the entry for `id` (if any) and fence out in-flight reads of it.
    pub fn invalidate(&self, id: u64) {
        let mut state = self.state();
        state.entries.remove(&id);
        let generation = &mut state.generations[slot(id)];
        *generation = generation.wrapping_add(1);
        state.stats.invalidations += 1;
    }

    /// Drop every entry and fence out every in-flight read.
    pub fn invalidate_all(&self) {
        let mut state = self.state();
        state.clear();
        state.stats.invalidations += 1;
    }

    /// Whether an entry exists for `id`. Does not count as a lookup.
    pub fn contains(&self, id: u64) -> bool {
        self.state().entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.state().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        self.state().stats
    }
}
