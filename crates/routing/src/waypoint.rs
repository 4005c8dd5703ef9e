//! Waypoints and the invariant-checked waypoint list.
//!
//! A route always has a first and a last slot, present even while
//! unresolved; only interior waypoints may be removed.

use geo::Point;

use crate::crs::CrsCode;

/// A user-specified route endpoint or intermediate stop.
///
/// `position == None` marks a placeholder: a slot the user has not yet
/// resolved through search or location selection.
#[derive(Clone, Debug, PartialEq)]
pub struct Waypoint {
    pub text: String,
    pub position: Option<Point>,
    pub crs: Option<CrsCode>,
}

impl Waypoint {
    /// An empty, unresolved slot.
    pub fn placeholder() -> Self {
        Self {
            text: String::new(),
            position: None,
            crs: None,
        }
    }

    pub fn resolved(text: impl Into<String>, position: Point, crs: Option<CrsCode>) -> Self {
        Self {
            text: text.into(),
            position: Some(position),
            crs,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.position.is_some()
    }
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum WaypointError {
    #[error("waypoint index {0} is out of bounds")]
    OutOfBounds(usize),

    #[error("waypoint {0} is an endpoint and cannot be removed")]
    EndpointRemoval(usize),
}

/// Ordered, mutable sequence of route waypoints.
///
/// Invariants: the list never has fewer than two entries, and the first
/// and last slots exist even while unresolved.
#[derive(Clone, Debug, PartialEq)]
pub struct WaypointList {
    entries: Vec<Waypoint>,
}

impl WaypointList {
    /// A fresh list: two placeholder slots (origin and destination).
    pub fn new() -> Self {
        Self {
            entries: vec![Waypoint::placeholder(), Waypoint::placeholder()],
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, index: usize) -> Option<&Waypoint> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Waypoint> {
        self.entries.iter()
    }

    /// Ordered resolved positions with the CRS each was resolved in.
    pub fn resolved(&self) -> Vec<(Point, Option<CrsCode>)> {
        self.entries
            .iter()
            .filter_map(|wp| wp.position.map(|pos| (pos, wp.crs.clone())))
            .collect()
    }

    pub fn resolved_count(&self) -> usize {
        self.entries.iter().filter(|wp| wp.is_resolved()).count()
    }

    /// Insert a new placeholder immediately before the final slot.
    ///
    /// The first slot stays first and the previous last slot stays last.
    /// Returns the index of the new entry.
    pub fn insert_before_last(&mut self) -> usize {
        let index = self.entries.len() - 1;
        self.entries.insert(index, Waypoint::placeholder());
        index
    }

    /// Remove an interior waypoint.
    ///
    /// The first and last slots are positionally anchored and cannot be
    /// removed, which also keeps the list at two entries or more.
    pub fn remove(&mut self, index: usize) -> Result<Waypoint, WaypointError> {
        if index >= self.entries.len() {
            return Err(WaypointError::OutOfBounds(index));
        }
        if index == 0 || index == self.entries.len() - 1 {
            return Err(WaypointError::EndpointRemoval(index));
        }
        Ok(self.entries.remove(index))
    }

    /// Reverse the order in place; the first and last slots swap roles.
    pub fn reverse(&mut self) {
        self.entries.reverse();
    }

    /// Resolve a slot with a selected search result or located position.
    pub fn resolve(
        &mut self,
        index: usize,
        text: impl Into<String>,
        position: Point,
        crs: Option<CrsCode>,
    ) -> Result<(), WaypointError> {
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(WaypointError::OutOfBounds(index))?;
        *entry = Waypoint::resolved(text, position, crs);
        Ok(())
    }

    /// Clear a slot back to a placeholder (selection removed).
    pub fn clear(&mut self, index: usize) -> Result<(), WaypointError> {
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(WaypointError::OutOfBounds(index))?;
        *entry = Waypoint::placeholder();
        Ok(())
    }
}

impl Default for WaypointList {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved_list(labels: &[&str]) -> WaypointList {
        let mut list = WaypointList::new();
        list.resolve(0, labels[0], Point::new(0.0, 0.0), None).unwrap();
        list.resolve(1, labels[labels.len() - 1], Point::new(1.0, 1.0), None)
            .unwrap();
        for label in &labels[1..labels.len() - 1] {
            let idx = list.insert_before_last();
            list.resolve(idx, *label, Point::new(idx as f64, 0.0), None)
                .unwrap();
        }
        list
    }

    fn labels(list: &WaypointList) -> Vec<String> {
        list.iter().map(|wp| wp.text.clone()).collect()
    }

    #[test]
    fn test_new_list_has_two_placeholders() {
        let list = WaypointList::new();
        assert_eq!(list.len(), 2);
        assert_eq!(list.resolved_count(), 0);
        assert!(!list.get(0).unwrap().is_resolved());
    }

    #[test]
    fn test_insert_before_last_anchors_endpoints() {
        let mut list = resolved_list(&["A", "B"]);
        let idx = list.insert_before_last();

        assert_eq!(idx, 1);
        assert_eq!(list.len(), 3);
        assert_eq!(list.get(0).unwrap().text, "A");
        assert!(!list.get(1).unwrap().is_resolved());
        assert_eq!(list.get(2).unwrap().text, "B");
    }

    #[test]
    fn test_remove_interior() {
        let mut list = resolved_list(&["A", "B", "C"]);
        assert_eq!(list.remove(1).unwrap().text, "B");
        assert_eq!(labels(&list), ["A", "C"]);
    }

    #[test]
    fn test_remove_endpoint_refused() {
        let mut list = resolved_list(&["A", "B", "C"]);
        assert_eq!(list.remove(0), Err(WaypointError::EndpointRemoval(0)));
        assert_eq!(list.remove(2), Err(WaypointError::EndpointRemoval(2)));
        assert_eq!(list.remove(7), Err(WaypointError::OutOfBounds(7)));
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_length_never_below_two() {
        let mut list = resolved_list(&["A", "B", "C"]);
        list.remove(1).unwrap();
        assert_eq!(list.remove(1), Err(WaypointError::EndpointRemoval(1)));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_reverse_is_involution() {
        let mut list = resolved_list(&["A", "B", "C"]);
        list.reverse();
        assert_eq!(labels(&list), ["C", "B", "A"]);
        list.reverse();
        assert_eq!(labels(&list), ["A", "B", "C"]);
    }

    #[test]
    fn test_resolve_and_clear() {
        let mut list = WaypointList::new();
        list.resolve(0, "Bern", Point::new(7.4474, 46.948), Some("EPSG:4326".into()))
            .unwrap();
        assert_eq!(list.resolved_count(), 1);

        list.clear(0).unwrap();
        assert_eq!(list.resolved_count(), 0);
        assert_eq!(list.get(0).unwrap().text, "");

        assert_eq!(
            list.resolve(5, "x", Point::new(0.0, 0.0), None),
            Err(WaypointError::OutOfBounds(5))
        );
    }

    #[test]
    fn test_resolved_preserves_order() {
        let mut list = resolved_list(&["A", "B", "C"]);
        list.clear(1).unwrap();
        let resolved = list.resolved();
        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].0, Point::new(0.0, 0.0));
        assert_eq!(resolved[1].0, Point::new(1.0, 1.0));
    }
}
