pub mod core;

// Re-export key items for easy importing in this crate
pub use core::store::LedgerStore;
pub use core::types;

// Re-export key items for easy importing in other crates
pub use core::engine;
pub use core::git::{GitCli, VersionControl};
pub use core::main_shared::run_main;
