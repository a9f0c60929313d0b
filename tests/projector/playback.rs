//! Integration tests for playback cursors driving a projector

use racereel_projector::{EndBehavior, FrameProjector, Playback, ProjectorConfig, RaceFeeds};

use crate::timeline;

fn projector() -> FrameProjector {
    FrameProjector::new(
        timeline(&[("A", 0.0, 0.0), ("A", 2.0, 2.0)]),
        ProjectorConfig::new().with_fps(2.0),
        RaceFeeds::new(),
    )
    .unwrap()
}

// =============================================================================
// Cursor over frames
// =============================================================================

#[test]
fn cursor_walks_every_frame_once() {
    let p = projector();
    let mut playback = Playback::new(p.len());
    let mut seen = vec![playback.current().unwrap()];
    while let Some(index) = playback.advance() {
        seen.push(index);
    }
    assert_eq!(seen, [0, 1, 2, 3, 4]);
    assert!(p.frame_at(playback.current().unwrap()).is_some());
}

#[test]
fn looping_cursor_wraps() {
    let p = projector();
    let mut playback = Playback::new(p.len()).with_end(EndBehavior::Loop);
    playback.seek(4);
    assert_eq!(playback.advance(), Some(0));
    assert_eq!(p.frame_at(0).unwrap().clock(), "00:00.000");
}

#[test]
fn seeking_by_time() {
    let p = projector();
    let mut playback = Playback::new(p.len());
    let index = p.index_at(crate::secs(1.4)).unwrap();
    assert_eq!(playback.seek(index), Some(3));
    assert_eq!(p.frame_at(3).unwrap().clock(), "00:01.500");
}

#[test]
fn cursors_are_independent() {
    let p = projector();
    let mut a = Playback::new(p.len());
    let b = Playback::new(p.len());
    a.advance_by(3);
    assert_eq!(a.current(), Some(3));
    assert_eq!(b.current(), Some(0));
}
