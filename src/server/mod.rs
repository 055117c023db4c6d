//! Request and response values exchanged with the host server.
//!
//! These stay thin: the dispatcher needs the method, the target,
//! and headers from a request, and a status, headers, and body bytes for a
//! response. Socket handling and body parsing belong to the host.

use smallvec::SmallVec;
use std::sync::Arc;

mod request;
mod response;

pub use request::{QueryParams, QueryValue, Request, MAX_INLINE_QUERY};
pub use response::Response;

/// Maximum inline headers before heap allocation
pub const MAX_INLINE_HEADERS: usize = 16;

/// Stack-allocated header storage
///
/// Header names are `Arc<str>`; values are per-request `String`s.
pub type HeaderVec = SmallVec<[(Arc<str>, String); MAX_INLINE_HEADERS]>;
