//! Finger up/down classification and fingertip distances.
//!
//! The classification is a fixed geometric heuristic on image axes, so it
//! assumes an upright hand facing the camera. A rotated hand gives wrong
//! answers; that is a known limitation of the approach.

use serde::{Deserialize, Serialize};

use handmouse_hand_model::landmark::{ids, LandmarkSet};

/// Which of the tracked fingers are extended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FingerState {
    pub thumb: bool,
    pub index: bool,
    pub middle: bool,
}

impl FingerState {
    pub fn new(thumb: bool, index: bool, middle: bool) -> Self {
        Self {
            thumb,
            index,
            middle,
        }
    }

    /// Classify the fingers of one hand.
    ///
    /// - thumb: tip is right of the joint below it (larger x)
    /// - index/middle: tip is above the joint two segments below it
    ///   (smaller y)
    ///
    /// Returns `None` for an empty set, or one too short to hold every
    /// point the rules need.
    pub fn classify(landmarks: &LandmarkSet) -> Option<Self> {
        let thumb_tip = landmarks.get(ids::THUMB_TIP)?;
        let thumb_ip = landmarks.get(ids::THUMB_IP)?;
        let index_tip = landmarks.get(ids::INDEX_TIP)?;
        let index_pip = landmarks.get(ids::INDEX_PIP)?;
        let middle_tip = landmarks.get(ids::MIDDLE_TIP)?;
        let middle_pip = landmarks.get(ids::MIDDLE_PIP)?;

        Some(Self {
            thumb: thumb_tip.x > thumb_ip.x,
            index: index_tip.y < index_pip.y,
            middle: middle_tip.y < middle_pip.y,
        })
    }

    /// `[thumb, index, middle]`.
    pub fn as_array(&self) -> [bool; 3] {
        [self.thumb, self.index, self.middle]
    }

    /// The pointing pose: index extended, middle folded. The thumb is free.
    pub fn is_pointing(&self) -> bool {
        self.index && !self.middle
    }
}

/// Euclidean pixel distance between two landmarks.
///
/// Returns `0.0` when either id is missing from the set.
pub fn distance(landmarks: &LandmarkSet, a: usize, b: usize) -> f64 {
    match (landmarks.point(a), landmarks.point(b)) {
        (Some(pa), Some(pb)) => pa.distance_to(&pb),
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use handmouse_hand_model::landmark::Landmark;

    /// 21 points stacked at one spot, then overrides applied by id.
    fn hand(overrides: &[(usize, i32, i32)]) -> LandmarkSet {
        let mut points: Vec<Landmark> = (0..ids::HAND_POINTS)
            .map(|id| Landmark::new(id, 300, 300))
            .collect();
        for &(id, x, y) in overrides {
            points[id] = Landmark::new(id, x, y);
        }
        LandmarkSet::new(points)
    }

    #[test]
    fn test_all_fingers_up() {
        let set = hand(&[
            (ids::THUMB_IP, 200, 300),
            (ids::THUMB_TIP, 220, 300),
            (ids::INDEX_PIP, 300, 250),
            (ids::INDEX_TIP, 300, 150),
            (ids::MIDDLE_PIP, 330, 250),
            (ids::MIDDLE_TIP, 330, 140),
        ]);
        let state = FingerState::classify(&set).unwrap();
        assert_eq!(state.as_array(), [true, true, true]);
    }

    #[test]
    fn test_folded_fingers_are_down() {
        let set = hand(&[
            (ids::THUMB_IP, 200, 300),
            (ids::THUMB_TIP, 180, 300),
            (ids::INDEX_PIP, 300, 250),
            (ids::INDEX_TIP, 300, 280),
            (ids::MIDDLE_PIP, 330, 250),
            (ids::MIDDLE_TIP, 330, 250),
        ]);
        let state = FingerState::classify(&set).unwrap();
        assert_eq!(state, FingerState::new(false, false, false));
    }

    #[test]
    fn test_pointing_ignores_the_thumb() {
        assert!(FingerState::new(true, true, false).is_pointing());
        assert!(FingerState::new(false, true, false).is_pointing());
        assert!(!FingerState::new(false, true, true).is_pointing());
        assert!(!FingerState::new(false, false, false).is_pointing());
    }

    #[test]
    fn test_empty_or_short_sets_have_no_state() {
        assert_eq!(FingerState::classify(&LandmarkSet::empty()), None);

        let short = LandmarkSet::new(
            (0..=ids::INDEX_TIP)
                .map(|id| Landmark::new(id, 0, 0))
                .collect(),
        );
        assert_eq!(FingerState::classify(&short), None);
    }

    #[test]
    fn test_distance_between_points() {
        let set = LandmarkSet::new(vec![Landmark::new(0, 0, 0), Landmark::new(1, 3, 4)]);
        assert_eq!(distance(&set, 0, 1), 5.0);
        assert_eq!(distance(&set, 1, 1), 0.0);
    }

    #[test]
    fn test_distance_out_of_range_is_zero() {
        let empty = LandmarkSet::empty();
        assert_eq!(distance(&empty, ids::INDEX_TIP, ids::THUMB_TIP), 0.0);

        let set = LandmarkSet::new(vec![Landmark::new(0, 0, 0)]);
        assert_eq!(distance(&set, 0, 21), 0.0);
    }
}
