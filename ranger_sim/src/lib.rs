// ranger_sim/src/lib.rs

//! Driver for the `ranger_core` filter: scenario configuration, data file
//! readers, a synthetic run generator and the loop that ties them together.

// This prelude is for convenience for other files WITHIN the ranger_sim crate.
pub mod prelude;

pub mod cli;
pub mod config;
pub mod error;
pub mod io;
pub mod observers;
pub mod runner;
pub mod synthetic;
