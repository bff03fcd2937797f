// ranger_core/src/mapping/mod.rs

use crate::error::{EstimationError, Result};
use crate::types::LandmarkId;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// --- Map Data Structures ---
/// Known landmark positions in the world frame.
///
/// The filter only ever reads from the map. Ids are positive and unique;
/// iteration is in ascending id order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LandmarkMap {
    landmarks: BTreeMap<LandmarkId, Point2<f64>>,
}

impl LandmarkMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a map from `(id, position)` pairs, failing on the first invalid entry.
    pub fn from_landmarks<I>(landmarks: I) -> Result<Self>
    where
        I: IntoIterator<Item = (LandmarkId, Point2<f64>)>,
    {
        let mut map = Self::new();
        for (id, position) in landmarks {
            map.insert(id, position)?;
        }
        Ok(map)
    }

    /// Adds a landmark. Id 0, duplicate ids and non-finite positions are rejected.
    pub fn insert(&mut self, id: LandmarkId, position: Point2<f64>) -> Result<()> {
        if id.0 == 0 {
            return Err(EstimationError::InvalidLandmark {
                id,
                reason: "landmark ids must be positive",
            });
        }
        if !position.x.is_finite() || !position.y.is_finite() {
            return Err(EstimationError::InvalidLandmark {
                id,
                reason: "position is not finite",
            });
        }
        if self.landmarks.contains_key(&id) {
            return Err(EstimationError::InvalidLandmark {
                id,
                reason: "duplicate landmark id",
            });
        }
        self.landmarks.insert(id, position);
        Ok(())
    }

    pub fn get(&self, id: LandmarkId) -> Option<&Point2<f64>> {
        self.landmarks.get(&id)
    }

    /// Like [`get`](Self::get), but an absent id is an [`EstimationError::UnknownLandmark`].
    pub fn position(&self, id: LandmarkId) -> Result<Point2<f64>> {
        self.landmarks
            .get(&id)
            .copied()
            .ok_or(EstimationError::UnknownLandmark { id })
    }

    pub fn contains(&self, id: LandmarkId) -> bool {
        self.landmarks.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (LandmarkId, &Point2<f64>)> {
        self.landmarks.iter().map(|(id, p)| (*id, p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_of_known_and_unknown_ids() {
        let map = LandmarkMap::from_landmarks([
            (LandmarkId(1), Point2::new(2.0, 1.0)),
            (LandmarkId(2), Point2::new(0.0, 4.0)),
        ])
        .unwrap();

        assert_eq!(map.len(), 2);
        assert_eq!(map.position(LandmarkId(2)).unwrap(), Point2::new(0.0, 4.0));
        assert_eq!(
            map.position(LandmarkId(9)),
            Err(EstimationError::UnknownLandmark { id: LandmarkId(9) })
        );
    }

    #[test]
    fn rejects_zero_and_duplicate_ids() {
        let mut map = LandmarkMap::new();
        assert!(map.insert(LandmarkId(0), Point2::origin()).is_err());
        map.insert(LandmarkId(4), Point2::origin()).unwrap();
        assert!(matches!(
            map.insert(LandmarkId(4), Point2::new(1.0, 1.0)),
            Err(EstimationError::InvalidLandmark { .. })
        ));
        assert_eq!(map.get(LandmarkId(4)), Some(&Point2::origin()));
    }

    #[test]
    fn iterates_in_id_order() {
        let map = LandmarkMap::from_landmarks([
            (LandmarkId(7), Point2::new(7.0, 0.0)),
            (LandmarkId(3), Point2::new(3.0, 0.0)),
        ])
        .unwrap();
        let ids: Vec<_> = map.iter().map(|(id, _)| id.0).collect();
        assert_eq!(ids, vec![3, 7]);
    }
}
