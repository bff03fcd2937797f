// ranger_sim/src/observers.rs

//! Belief observers shipped with the driver. Rendering is left to whoever
//! consumes the snapshots; these only log or record them.

use ranger_core::prelude::*;
use tracing::{debug, info};

/// Logs snapshots through `tracing`: every one at debug level, every
/// `log_every`-th at info level.
#[derive(Debug, Clone)]
pub struct TracingObserver {
    log_every: usize,
}

impl TracingObserver {
    pub fn new(log_every: usize) -> Self {
        Self {
            log_every: log_every.max(1),
        }
    }
}

impl BeliefObserver for TracingObserver {
    fn on_start(&mut self, landmarks: &LandmarkMap) {
        for (id, position) in landmarks.iter() {
            debug!("Landmark {} at ({:.3}, {:.3})", id, position.x, position.y);
        }
    }

    fn observe(&mut self, snapshot: &BeliefSnapshot) {
        let belief = &snapshot.belief;
        let ellipse = &snapshot.ellipse;
        if snapshot.timestep % self.log_every == 0 {
            info!(
                "t={:>5} pose=({:.3}, {:.3}, {:.3}) ellipse={:.3}x{:.3}@{:.1}deg",
                snapshot.timestep,
                belief.x(),
                belief.y(),
                belief.theta(),
                ellipse.width,
                ellipse.height,
                ellipse.angle.to_degrees()
            );
        } else {
            debug!(
                "t={:>5} pose=({:.3}, {:.3}, {:.3}) trace={:.4}",
                snapshot.timestep,
                belief.x(),
                belief.y(),
                belief.theta(),
                belief.trace()
            );
        }
    }
}

/// Keeps every snapshot in memory.
#[derive(Debug, Clone, Default)]
pub struct TrajectoryRecorder {
    landmarks: LandmarkMap,
    snapshots: Vec<BeliefSnapshot>,
    finished: bool,
}

impl TrajectoryRecorder {
    pub fn snapshots(&self) -> &[BeliefSnapshot] {
        &self.snapshots
    }

    pub fn landmarks(&self) -> &LandmarkMap {
        &self.landmarks
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Mean poses in timestep order.
    pub fn poses(&self) -> Vec<Pose> {
        self.snapshots.iter().map(|s| s.belief.mean).collect()
    }
}

impl BeliefObserver for TrajectoryRecorder {
    fn on_start(&mut self, landmarks: &LandmarkMap) {
        self.landmarks = landmarks.clone();
        self.snapshots.clear();
        self.finished = false;
    }

    fn observe(&mut self, snapshot: &BeliefSnapshot) {
        self.snapshots.push(*snapshot);
    }

    fn on_finish(&mut self) {
        self.finished = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point2;

    #[test]
    fn recorder_resets_on_start() {
        let landmarks =
            LandmarkMap::from_landmarks([(LandmarkId(1), Point2::new(1.0, 1.0))]).unwrap();
        let mut recorder = TrajectoryRecorder::default();

        recorder.on_start(&landmarks);
        recorder.observe(&BeliefSnapshot::new(0, Belief::default()));
        recorder.on_finish();
        assert_eq!(recorder.snapshots().len(), 1);
        assert_eq!(recorder.landmarks().len(), 1);

        recorder.on_start(&LandmarkMap::new());
        assert!(recorder.snapshots().is_empty());
        assert!(!recorder.is_finished());
    }

    #[test]
    fn tracing_observer_never_divides_by_zero() {
        let mut observer = TracingObserver::new(0);
        observer.observe(&BeliefSnapshot::new(3, Belief::default()));
    }
}
