pub mod dashboard;
pub mod runner;
