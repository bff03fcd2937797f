// ranger_core/src/models/motion/mod.rs

pub mod odometry;
