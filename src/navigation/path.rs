//! Waypoints and the shared path

use crate::core::types::Vec2;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A planar point on the path, stored on disk as `[x, y]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 2]", into = "[f32; 2]")]
pub struct Waypoint {
    pub x: f32,
    pub y: f32,
}

impl Waypoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Waypoint { x, y }
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

impl From<[f32; 2]> for Waypoint {
    fn from([x, y]: [f32; 2]) -> Self {
        Waypoint { x, y }
    }
}

impl From<Waypoint> for [f32; 2] {
    fn from(waypoint: Waypoint) -> Self {
        [waypoint.x, waypoint.y]
    }
}

impl From<Vec2> for Waypoint {
    fn from(v: Vec2) -> Self {
        Waypoint::new(v.x, v.y)
    }
}

/// Ordered waypoint sequence
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WaypointPath {
    points: Vec<Waypoint>,
}

impl WaypointPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Waypoint> {
        self.points.get(index).copied()
    }

    pub fn last(&self) -> Option<Waypoint> {
        self.points.last().copied()
    }

    pub fn push(&mut self, waypoint: Waypoint) {
        self.points.push(waypoint);
    }

    /// Reverse the traversal order in place
    pub fn reverse(&mut self) {
        self.points.reverse();
    }

    pub fn points(&self) -> &[Waypoint] {
        &self.points
    }
}

impl From<Vec<Waypoint>> for WaypointPath {
    fn from(points: Vec<Waypoint>) -> Self {
        WaypointPath { points }
    }
}

impl FromIterator<Waypoint> for WaypointPath {
    fn from_iter<I: IntoIterator<Item = Waypoint>>(iter: I) -> Self {
        WaypointPath {
            points: iter.into_iter().collect(),
        }
    }
}

/// Path shared between the recorder (appends) and the controller (reads, reverses)
pub type SharedPath = Arc<RwLock<WaypointPath>>;

pub fn shared(path: WaypointPath) -> SharedPath {
    Arc::new(RwLock::new(path))
}

/// Lock a shared path for reading.
///
/// Waypoints are plain values, so a poisoned lock still holds usable data.
pub fn read_path(path: &SharedPath) -> RwLockReadGuard<'_, WaypointPath> {
    path.read().unwrap_or_else(PoisonError::into_inner)
}

/// Lock a shared path for writing, recovering from poisoning like `read_path`
pub fn write_path(path: &SharedPath) -> RwLockWriteGuard<'_, WaypointPath> {
    path.write().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_waypoint_json_is_pair() {
        let json = serde_json::to_string(&Waypoint::new(-171.5, 12.25)).unwrap();
        assert_eq!(json, "[-171.5,12.25]");

        let parsed: Waypoint = serde_json::from_str("[3, 4.5]").unwrap();
        assert_eq!(parsed, Waypoint::new(3.0, 4.5));
    }

    #[test]
    fn test_path_json_is_array_of_pairs() {
        let path: WaypointPath = serde_json::from_str("[[1.0, 2.0], [3.0, 4.0]]").unwrap();
        assert_eq!(path.len(), 2);
        assert_eq!(path.last(), Some(Waypoint::new(3.0, 4.0)));
        assert!(serde_json::from_str::<WaypointPath>("[[1.0, 2.0, 3.0]]").is_err());
    }

    #[test]
    fn test_reverse_in_place() {
        let mut path: WaypointPath = (0..3).map(|i| Waypoint::new(i as f32, 0.0)).collect();
        path.reverse();
        assert_eq!(path.get(0), Some(Waypoint::new(2.0, 0.0)));
        assert_eq!(path.get(2), Some(Waypoint::new(0.0, 0.0)));
    }
}
