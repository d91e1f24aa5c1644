//! Sharuco Effects - In-Memory Data Layer
//!
//! Handlers implementing [`ProfileSource`](sharuco_core::ProfileSource) and
//! [`SnippetSource`](sharuco_core::SnippetSource) over in-process state.
//!
//! Every record partition is a `tokio::sync::watch` channel. A subscription
//! is a receiver on that channel wrapped as a stream, so dropping the stream
//! is all it takes to release it. Both stores expose the hooks tests and demo
//! hosts need to drive a view through every state:
//!
//! - `hold` parks a partition in a pending state (no value is delivered)
//! - `fail` reports a fetch fault to current and future subscribers
//! - `resume` returns a partition to normal delivery
//! - `subscriber_count` and `lookup_count` expose subscription bookkeeping

#![forbid(unsafe_code)]

mod profiles;
mod slot;
mod snippets;

pub use profiles::MemoryProfileStore;
pub use snippets::MemorySnippetStore;
