pub mod condition;
pub mod filter;
pub mod layer;

#[cfg(windows)]
mod engine;
#[cfg(windows)]
mod ffi;
#[cfg(windows)]
pub mod transaction;

#[cfg(windows)]
pub use engine::FilterEngine;
