// ranger_core/src/models/measurement/mod.rs

pub mod range;
