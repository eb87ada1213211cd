//! Scratch User Resolver
//!
//! Resolves Scratch usernames to numeric user IDs through the public Scratch
//! API, caching confirmed IDs, and builds avatar image URLs from them.
//! Every lookup ends in one of three outcomes (found, not found, transient
//! failure) and only found IDs are ever cached.

mod avatar;
mod cache;
mod client;
mod error;
mod resolver;
mod types;

pub use avatar::{AvatarUrlTemplate, ResolvedAvatar};
pub use cache::{cache_key, IdCache, MokaIdCache};
pub use client::{ScratchApiClient, UserDirectory};
pub use error::{FetchFailure, ResolverError, Result};
pub use resolver::{normalize, UserIdResolver};
pub use types::{LookupFailure, LookupResult, LEGACY_API_FAILURE, LEGACY_USERNAME_NOT_FOUND};
