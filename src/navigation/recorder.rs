//! Waypoint capture while the player moves

use super::path::{write_path, SharedPath, Waypoint};
use crate::core::types::Vec3;
use tracing::debug;

/// Appends the player's planar position whenever it has moved far enough
#[derive(Debug, Clone)]
pub struct PathRecorder {
    path: SharedPath,
    min_spacing: f32,
}

impl PathRecorder {
    pub fn new(path: SharedPath, min_spacing: f32) -> Self {
        PathRecorder { path, min_spacing }
    }

    pub fn path(&self) -> &SharedPath {
        &self.path
    }

    /// Record `position` if the path is empty or the last point is more than
    /// `min_spacing` away. Returns whether a point was appended.
    pub fn observe(&self, position: Vec3) -> bool {
        let here = position.planar();
        if !here.is_finite() {
            return false;
        }

        let mut path = write_path(&self.path);
        let far_enough = match path.last() {
            Some(last) => last.position().distance(here) > self.min_spacing,
            None => true,
        };
        if far_enough {
            path.push(Waypoint::from(here));
            debug!("Recorded waypoint {} at ({}, {})", path.len() - 1, here.x, here.y);
        }
        far_enough
    }
}
