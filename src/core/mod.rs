pub mod cli;
pub mod cmds;
pub mod engine;
pub mod git;
pub mod logging;
pub mod main_shared;
pub mod store;
pub mod types;
