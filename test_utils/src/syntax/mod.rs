pub mod fixtures;
pub mod generator;
pub mod scripted;
