pub mod branch;
pub mod change;
pub mod message;
pub mod pull_request;
pub mod reconcile;
