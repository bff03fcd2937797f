// ranger_core/src/lib.rs

//! Range-only extended Kalman filter for 2D robot pose estimation.
//!
//! The core is pure: [`models::MotionModel::predict`] and
//! [`models::MeasurementModel::correct`] take a [`types::Belief`] and return a
//! new one. [`estimation::filters::ExtendedKalmanFilter`] owns a belief between
//! timesteps for callers that want a stateful filter.

pub mod error;
pub mod estimation;
pub mod mapping;
pub mod messages;
pub mod models;
pub mod observer;
pub mod prelude;
pub mod types;
pub mod utils;
