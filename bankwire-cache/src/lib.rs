//! In-process implementations of the bankwire credential cache.
#![warn(missing_docs)]

mod memory;

pub use memory::MemoryCache;
