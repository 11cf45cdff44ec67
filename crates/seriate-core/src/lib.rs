#![forbid(unsafe_code)]
//! seriate-core: deterministic dependency ordering.
//!
//! Given an ordered slice of [`Item`]s, each optionally declaring the ids of
//! items it depends on, [`order`] produces a total order (as indices into the
//! input) in which every item appears after all of its dependencies, or fails
//! with a typed [`OrderError`] naming the unresolved id or the cycle members.
//!
//! The engine is synchronous, allocation-local, and reentrant: each call owns
//! its own bookkeeping and never mutates the input, so independent graphs can
//! be ordered concurrently with no coordination.
//!
//! ```
//! use seriate_core::{Item, order};
//!
//! let items = [
//!     Item::new("core"),
//!     Item::new("net").depends_on(["core"]),
//!     Item::new("app").depends_on(["core", "net"]),
//! ];
//! assert_eq!(order(&items), Ok(vec![0, 1, 2]));
//! ```
//!
//! # Conventions
//!
//! - **Errors**: typed `thiserror` enums; no panics on caller data.
//! - **Logging**: `tracing` macros (`debug!`, `instrument`).

pub mod cycles;
pub mod engine;
pub mod error;
pub mod item;

pub use engine::order;
pub use error::OrderError;
pub use item::Item;
