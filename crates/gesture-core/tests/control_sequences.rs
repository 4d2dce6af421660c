use handmouse_common::config::GestureConfig;
use handmouse_gesture_core::{CursorState, GestureController, TrackingState};
use handmouse_hand_model::action::PointerAction;
use handmouse_hand_model::geometry::Point2D;
use handmouse_hand_model::landmark::{ids, Landmark, LandmarkSet};

const FRAME: (u32, u32) = (700, 500);
const SCREEN: (u32, u32) = (1920, 1080);

/// Open hand pointing with the index finger at `(x, y)`; thumb and middle folded.
fn pointing_at(x: i32, y: i32) -> LandmarkSet {
    let mut points: Vec<Landmark> = (0..ids::HAND_POINTS)
        .map(|id| Landmark::new(id, x, y + 80))
        .collect();
    points[ids::THUMB_IP] = Landmark::new(ids::THUMB_IP, x - 40, y + 90);
    points[ids::THUMB_TIP] = Landmark::new(ids::THUMB_TIP, x - 60, y + 90);
    points[ids::INDEX_PIP] = Landmark::new(ids::INDEX_PIP, x, y + 50);
    points[ids::INDEX_TIP] = Landmark::new(ids::INDEX_TIP, x, y);
    points[ids::MIDDLE_PIP] = Landmark::new(ids::MIDDLE_PIP, x + 20, y + 50);
    points[ids::MIDDLE_TIP] = Landmark::new(ids::MIDDLE_TIP, x + 20, y + 70);
    LandmarkSet::new(points)
}

fn controller() -> GestureController {
    let config = GestureConfig {
        mirror_x: false,
        ..GestureConfig::default()
    };
    GestureController::new(&config, FRAME, SCREEN)
}

#[test]
fn test_frames_without_a_hand_never_move_the_cursor() {
    let mut controller = controller();
    for _ in 0..100 {
        let outcome = controller.process(&LandmarkSet::empty());
        assert_eq!(outcome.state, TrackingState::NoHand);
        assert!(outcome.actions.is_empty());
    }
    assert_eq!(controller.cursor(), CursorState::default());
}

#[test]
fn test_losing_the_hand_keeps_the_cursor_where_it_was() {
    let mut controller = controller();
    for _ in 0..5 {
        controller.process(&pointing_at(350, 250));
    }
    let before = controller.cursor();
    assert_ne!(before.current, Point2D::ORIGIN);

    for _ in 0..20 {
        controller.process(&LandmarkSet::empty());
    }
    assert_eq!(controller.state(), TrackingState::NoHand);
    assert_eq!(controller.cursor(), before);

    // tracking resumes from the held position
    let outcome = controller.process(&pointing_at(350, 250));
    assert_eq!(outcome.state, TrackingState::HandTracking);
    assert_eq!(controller.cursor().previous, before.current);
}

#[test]
fn test_steady_pointing_converges_on_the_mapped_target() {
    let mut controller = controller();
    let mut last = None;
    for _ in 0..150 {
        let outcome = controller.process(&pointing_at(350, 250));
        assert_eq!(outcome.actions.len(), 1);
        last = outcome.actions.first().copied();
    }

    let Some(PointerAction::Move { x, y }) = last else {
        panic!("expected a move, got {last:?}");
    };
    assert!((x - 960.0).abs() < 0.1, "x={x}");
    assert!((y - 540.0).abs() < 0.1, "y={y}");
}

#[test]
fn test_cursor_moves_monotonically_toward_a_new_target() {
    let mut controller = controller();
    let mut prev_x = 0.0;
    for _ in 0..30 {
        controller.process(&pointing_at(600, 250));
        let x = controller.cursor().current.x;
        assert!(x > prev_x);
        assert!(x <= 1920.0);
        prev_x = x;
    }
}
