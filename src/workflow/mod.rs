pub mod commit;
pub mod prune;
pub mod start;
