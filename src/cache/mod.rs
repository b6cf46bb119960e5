//! Read-through response cache.
//!
//! Maps a record id to the last successful read result for that id. There
//! is no time-based expiry and no capacity bound: entries leave the cache only
//! when a mutation invalidates them.
//!
//! ## Fencing
//!
//! A reader that misses the cache, goes to the store and then fills the cache
//! can race a writer: if the writer's invalidation lands between the store
//! read and the fill, the fill would resurrect the pre-write value. To close
//! that window every id maps to one of a fixed set of generation counters
//! (`id % 64`) and the cache carries an epoch. Ids sharing a counter fence
//! each other, which can only cost a skipped fill, never a stale one.
//! [`ResponseCache::lookup`] hands out a [`ReadTicket`] on a miss, and
//! [`ResponseCache::put_fenced`] refuses to store if either counter moved
//! since the ticket was issued.
//!
//! ```ignore
//! use news_proxy::{Lookup, OperationResult, ResponseCache};
//!
//! let cache = ResponseCache::new();
//! let ticket = match cache.lookup(1) {
//!     Lookup::Hit(result) => return result,
//!     Lookup::Miss(ticket) => ticket,
//! };
//! let result = OperationResult::success("Title: Content");
//! cache.put_fenced(ticket, result.clone());
//! ```

mod response_cache;
mod stats;

pub use response_cache::{Lookup, ReadTicket, ResponseCache};
pub use stats::CacheStats;
