pub mod commit;
pub mod config;
pub mod prune;
pub mod start;
