//! The permissioned, cache-backed facade over a [`ContentStore`].
//!
//! Every operation follows the same protocol:
//!
//! 1. check the caller's role against the [`AccessPolicy`]; a denied caller
//!    causes no store call and no cache interaction;
//! 2. call the store;
//! 3. update the cache, always *after* the store call returned;
//! 4. return an [`OperationResult`].
//!
//! ## Example
//!
//! ```ignore
//! use news_proxy::{Caller, InMemoryContentStore, NewsFacade, Role};
//!
//! let facade = NewsFacade::new(InMemoryContentStore::new());
//! let john = Caller::new("John", Role::User);
//!
//! facade.add_message("Title", "Content", &john);
//! let read = facade.read_message(1, &john);
//! assert_eq!(read.message(), "Title: Content");
//! ```

mod proxy;

use tracing::{debug, error, info, warn};

use crate::cache::{Lookup, ResponseCache};
use crate::caller::Caller;
use crate::config::FacadeConfig;
use crate::policy::{AccessPolicy, Operation};
use crate::response::{OperationError, OperationResult};
use crate::store::{ContentStore, Record};

pub use proxy::CallerProxy;

/// Access-checked, cached front for a content store.
///
/// `Send + Sync` whenever the store is, so it can be shared behind an `Arc`.
/// No lock is held across a store call.
pub struct NewsFacade<S> {
    store: S,
    cache: ResponseCache,
    policy: AccessPolicy,
    config: FacadeConfig,
}

impl<S: ContentStore> NewsFacade<S> {
    /// Facade with a fresh cache and the default config.
    pub fn new(store: S) -> Self {
        Self::with_config(store, FacadeConfig::default())
    }

    pub fn with_config(store: S, config: FacadeConfig) -> Self {
        Self::with_cache(store, ResponseCache::new(), config)
    }

    /// Facade over an externally owned cache handle.
    pub fn with_cache(store: S, cache: ResponseCache, config: FacadeConfig) -> Self {
        Self {
            store,
            cache,
            policy: AccessPolicy::new(),
            config,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    pub fn policy(&self) -> &AccessPolicy {
        &self.policy
    }

    pub fn config(&self) -> &FacadeConfig {
        &self.config
    }

    /// Bind `caller` so the operations can be invoked without repeating it.
    pub fn as_caller<'a>(&'a self, caller: &'a Caller) -> CallerProxy<'a, S> {
        CallerProxy::new(self, caller)
    }

    /// Create a message. Clears the whole cache, even when the store fails.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(caller = %caller.name(), role = %caller.role())
    )]
    pub fn add_message(&self, title: &str, content: &str, caller: &Caller) -> OperationResult {
        self.guarded(Operation::Add, caller, || {
            let outcome = self.store.create(title, content);
            self.invalidate_all();
            let id = outcome?;
            info!(id, "message added");
            Ok(OperationResult::success("Message added successfully."))
        })
    }

    /// Read a message as `"<title>: <content>"`, from the cache when possible.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(id = id, caller = %caller.name(), role = %caller.role())
    )]
    pub fn read_message(&self, id: u64, caller: &Caller) -> OperationResult {
        self.guarded(Operation::Read, caller, || {
            if !self.config.cache.enabled {
                let record = self.store.read(id)?;
                return Ok(render(&record));
            }

            let ticket = match self.cache.lookup(id) {
                Lookup::Hit(cached) => {
                    debug!(id, "cache hit");
                    return Ok(cached);
                }
                Lookup::Miss(ticket) => ticket,
            };
            debug!(id, "cache miss");

            let record = self.store.read(id)?;
            let result = render(&record);

            if self.config.cache.fencing {
                if !self.cache.put_fenced(ticket, result.clone()) {
                    warn!(id, "read overtaken by an invalidation, not caching");
                }
            } else {
                self.cache.put(id, result.clone());
            }

            Ok(result)
        })
    }

    /// Replace a message's content. The id is invalidated whether or not the
    /// store found it.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(id = id, caller = %caller.name(), role = %caller.role())
    )]
    pub fn edit_message(&self, id: u64, new_content: &str, caller: &Caller) -> OperationResult {
        self.guarded(Operation::Edit, caller, || {
            let outcome = self.store.update(id, new_content);
            self.invalidate(id);
            outcome?;
            info!(id, "message edited");
            Ok(OperationResult::success("Message edited successfully."))
        })
    }

    /// Delete a message. The id is invalidated whether or not the store
    /// found it.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(id = id, caller = %caller.name(), role = %caller.role())
    )]
    pub fn delete_message(&self, id: u64, caller: &Caller) -> OperationResult {
        self.guarded(Operation::Delete, caller, || {
            let outcome = self.store.delete(id);
            self.invalidate(id);
            outcome?;
            info!(id, "message deleted");
            Ok(OperationResult::success("Message deleted successfully."))
        })
    }

    /// Run `body` only if `caller` may perform `operation`, folding errors
    /// into the returned result.
    fn guarded<F>(&self, operation: Operation, caller: &Caller, body: F) -> OperationResult
    where
        F: FnOnce() -> Result<OperationResult, OperationError>,
    {
        if !self.policy.authorize(operation, caller.role()) {
            warn!(
                %operation,
                required = %self.policy.minimum_role(operation),
                "access denied"
            );
            return OperationError::AccessDenied(operation).into();
        }

        body().unwrap_or_else(|err| {
            match &err {
                OperationError::Unavailable(detail) => {
                    error!(%operation, detail = %detail, "content store failed")
                }
                _ => debug!(%operation, error = %err, "operation failed"),
            }
            err.into()
        })
    }

    fn invalidate(&self, id: u64) {
        if self.config.cache.enabled {
            self.cache.invalidate(id);
        }
    }

    fn invalidate_all(&self) {
        if self.config.cache.enabled {
            self.cache.invalidate_all();
        }
    }
}

fn render(record: &Record) -> OperationResult {
    OperationResult::success(format!("{}: {}", record.title, record.content))
}
