// Library exports for the fishing-derby agent
// This allows integration tests and external harnesses to use the core search logic

pub mod config;
pub mod controller;
pub mod debug_logger;
pub mod game_tree;
pub mod heuristic;
pub mod protocol;
pub mod search;
pub mod types;
