//! Core traits

mod runner;

pub use runner::CommandRunner;
