//! news_proxy: a permissioned, cache-backed content facade.
//!
//! [`NewsFacade`] sits in front of a [`ContentStore`] and
//!
//! - checks every call against a role-ordered [`AccessPolicy`]
//!   (`Guest < User < Moderator < Admin`), and
//! - serves reads through a [`ResponseCache`] that mutations invalidate.
//!
//! Every operation returns an [`OperationResult`]; denied and missing records
//! are ordinary results, not errors.
//!
//! ## Features
//!
//! - `http`: an axum router exposing the four operations over HTTP.

mod cache;
mod caller;
mod config;
mod facade;
mod policy;
mod response;
mod store;

#[cfg(feature = "http")]
pub mod http;

pub use cache::{CacheStats, Lookup, ReadTicket, ResponseCache};
pub use caller::{Caller, Role, RoleParseError};
pub use config::{CacheConfig, ConfigError, FacadeConfig, ENV_PREFIX};
pub use facade::{CallerProxy, NewsFacade};
pub use policy::{AccessPolicy, Operation};
pub use response::{OperationError, OperationResult, Status};
pub use store::{ContentStore, InMemoryContentStore, Record, StoreError};
