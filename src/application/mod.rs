// Application layer - the shared service callers go through.
// Owns the ledger behind a single lock, parses caller input and logs
// every mutation.

pub mod error;
mod service;

pub use error::*;
pub use service::*;
