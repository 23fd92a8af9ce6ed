pub mod deploy;
pub mod diff;
pub mod generator;
pub mod mutators;
pub mod selector;
pub mod verify;
