pub mod process;
pub mod scheduler;
pub mod segment;
pub mod simulation;
pub mod statistics;
