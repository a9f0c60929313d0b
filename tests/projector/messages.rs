//! Integration tests for message attachment

use racereel_foundation::Message;
use racereel_projector::{FrameProjector, ProjectorConfig, RaceFeeds, ReplayWindow};

use crate::{secs, timeline};

fn projector(messages: Vec<Message>, config: ProjectorConfig) -> FrameProjector {
    FrameProjector::new(
        timeline(&[("A", 0.0, 0.0), ("A", 10.0, 10.0)]),
        config,
        RaceFeeds::new().with_messages(messages),
    )
    .unwrap()
}

// =============================================================================
// Nearest-frame attachment
// =============================================================================

#[test]
fn message_attaches_to_nearest_frame() {
    let p = projector(vec![Message::new(secs(7.02), "YELLOW FLAG")], ProjectorConfig::new());
    // 7.02s * 30fps = 210.6, nearest frame is 211.
    let frame = p.frame_at(211).unwrap();
    assert_eq!(frame.messages.len(), 1);
    assert!(p.frame_at(210).unwrap().messages.is_empty());
    assert!(p.frame_at(212).unwrap().messages.is_empty());
}

#[test]
fn halfway_message_goes_to_earlier_frame() {
    let p = projector(
        vec![Message::new(secs(1.5), "GREEN FLAG")],
        ProjectorConfig::new().with_fps(1.0),
    );
    assert_eq!(p.frame_at(1).unwrap().messages.len(), 1);
    assert!(p.frame_at(2).unwrap().messages.is_empty());
}

#[test]
fn messages_in_one_frame_keep_time_order() {
    let p = projector(
        vec![
            Message::new(secs(3.1), "second"),
            Message::new(secs(2.9), "first"),
        ],
        ProjectorConfig::new().with_fps(1.0),
    );
    let texts: Vec<String> = p
        .frame_at(3)
        .unwrap()
        .messages
        .iter()
        .map(|m| m.text().to_string())
        .collect();
    assert_eq!(texts, ["first", "second"]);
}

#[test]
fn every_message_is_attached_or_reported() {
    let messages: Vec<Message> = (-3..15)
        .map(|i| Message::new(secs(f64::from(i) * 0.77), format!("m{i}")))
        .collect();
    let total = messages.len();
    let p = projector(messages, ProjectorConfig::new());
    let attached: usize = p.frames().map(|f| f.messages.len()).sum();
    assert_eq!(attached + p.unattached().len(), total);
    assert!(!p.unattached().is_empty());
}

// =============================================================================
// Banners and windows
// =============================================================================

#[test]
fn latest_message_stays_visible() {
    let p = projector(
        vec![
            Message::new(secs(1.0), "GREEN FLAG"),
            Message::new(secs(4.0), "SAFETY CAR"),
        ],
        ProjectorConfig::new().with_fps(1.0),
    );
    assert!(p.latest_message_at(0).is_none());
    assert_eq!(p.latest_message_at(3).map(Message::text), Some("GREEN FLAG"));
    assert_eq!(p.latest_message_at(9).map(Message::text), Some("SAFETY CAR"));
}

#[test]
fn flag_to_flag_window() {
    let p = projector(
        vec![Message::new(secs(2.0), "GREEN FLAG"), Message::new(secs(8.0), "END")],
        ProjectorConfig::new()
            .with_fps(1.0)
            .with_window(ReplayWindow::FlagToFlag),
    );
    assert_eq!(p.len(), 7);
    assert_eq!(p.frame_at(0).unwrap().messages[0].text(), "GREEN FLAG");
    assert_eq!(p.frame_at(6).unwrap().messages[0].text(), "END");
}
