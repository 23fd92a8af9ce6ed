pub mod config;
mod defect;
mod error;
mod evaluation;
mod hash;
mod ledger;

pub use defect::*;
pub use error::*;
pub use evaluation::*;
pub use hash::*;
pub use ledger::*;
