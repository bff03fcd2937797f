// ranger_core/src/messages.rs

use crate::error::{EstimationError, Result};
use crate::types::LandmarkId;
use serde::{Deserialize, Serialize};

// =========================================================================
// == Motion Input ==
// =========================================================================

/// One odometry reading in rotate-translate-rotate form.
///
/// The robot first turns by `rot1`, drives `trans` along its new heading and
/// then turns by `rot2`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OdometryDelta {
    pub rot1: f64,
    pub trans: f64,
    pub rot2: f64,
}

impl OdometryDelta {
    pub fn new(rot1: f64, trans: f64, rot2: f64) -> Self {
        Self { rot1, trans, rot2 }
    }
}

// =========================================================================
// == Sensor Input ==
// =========================================================================

/// A single range (and bearing) reading of a known landmark.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LandmarkObservation {
    pub landmark_id: LandmarkId,
    /// Measured distance to the landmark.
    pub range: f64,
    /// Measured bearing. Carried through from the log, never fused.
    pub bearing: f64,
}

impl LandmarkObservation {
    pub fn new(landmark_id: impl Into<LandmarkId>, range: f64, bearing: f64) -> Self {
        Self {
            landmark_id: landmark_id.into(),
            range,
            bearing,
        }
    }
}

/// Observations of one timestep in column form, the way sensor logs
/// usually hand them over.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObservationBatch {
    pub ids: Vec<LandmarkId>,
    pub ranges: Vec<f64>,
    pub bearings: Vec<f64>,
}

impl ObservationBatch {
    /// Zips the three columns into observations, preserving their order.
    pub fn to_observations(&self) -> Result<Vec<LandmarkObservation>> {
        let (ids, ranges, bearings) = (self.ids.len(), self.ranges.len(), self.bearings.len());
        if ids != ranges || ids != bearings {
            return Err(EstimationError::DimensionMismatch {
                ids,
                ranges,
                bearings,
            });
        }

        Ok(self
            .ids
            .iter()
            .zip(&self.ranges)
            .zip(&self.bearings)
            .map(|((&landmark_id, &range), &bearing)| LandmarkObservation {
                landmark_id,
                range,
                bearing,
            })
            .collect())
    }
}

impl FromIterator<LandmarkObservation> for ObservationBatch {
    fn from_iter<I: IntoIterator<Item = LandmarkObservation>>(iter: I) -> Self {
        let mut batch = ObservationBatch::default();
        for obs in iter {
            batch.ids.push(obs.landmark_id);
            batch.ranges.push(obs.range);
            batch.bearings.push(obs.bearing);
        }
        batch
    }
}

// =========================================================================
// == Timestep Input ==
// =========================================================================

/// Everything the filter consumes for one timestep.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimestepRecord {
    pub odometry: OdometryDelta,
    /// Observations in the order they were recorded.
    pub observations: Vec<LandmarkObservation>,
}

impl TimestepRecord {
    pub fn new(odometry: OdometryDelta, observations: Vec<LandmarkObservation>) -> Self {
        Self {
            odometry,
            observations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_zips_columns_in_order() {
        let batch = ObservationBatch {
            ids: vec![LandmarkId(3), LandmarkId(1)],
            ranges: vec![2.5, 4.0],
            bearings: vec![0.1, -0.2],
        };

        let obs = batch.to_observations().unwrap();
        assert_eq!(obs.len(), 2);
        assert_eq!(obs[0], LandmarkObservation::new(3, 2.5, 0.1));
        assert_eq!(obs[1], LandmarkObservation::new(1, 4.0, -0.2));
    }

    #[test]
    fn batch_with_ragged_columns_is_rejected() {
        let batch = ObservationBatch {
            ids: vec![LandmarkId(1), LandmarkId(2)],
            ranges: vec![1.0],
            bearings: vec![0.0, 0.0],
        };

        assert_eq!(
            batch.to_observations(),
            Err(EstimationError::DimensionMismatch {
                ids: 2,
                ranges: 1,
                bearings: 2
            })
        );
    }

    #[test]
    fn batch_collects_back_from_observations() {
        let obs = vec![
            LandmarkObservation::new(5, 1.0, 0.5),
            LandmarkObservation::new(6, 2.0, 0.25),
        ];
        let batch: ObservationBatch = obs.iter().copied().collect();
        assert_eq!(batch.ids, vec![LandmarkId(5), LandmarkId(6)]);
        assert_eq!(batch.to_observations().unwrap(), obs);
    }
}
