//! Tests for the normalized result type.

use tutorkit_core::{NormalizedResult, TaskId, TaskStatus, offline_reply};

#[test]
fn text_preserves_unicode() {
    let original = "∀x ∈ ℝ: x² ≥ 0, héllo 你好 🎓";
    let result = NormalizedResult::Text(original.to_string());
    assert_eq!(result.as_text(), Some(original));
}

#[test]
fn audio_data_uri_encodes_base64() {
    let result = NormalizedResult::Audio {
        data: vec![0xff, 0xf3, 0x00],
        mime: "audio/mpeg".into(),
    };
    let uri = result.into_data_uri().expect("data uri");
    assert!(uri.starts_with("data:audio/mpeg;base64,"));
    assert!(uri.ends_with("//MA"));
}

#[test]
fn non_audio_has_no_data_uri() {
    assert!(NormalizedResult::Text("hi".into()).into_data_uri().is_none());
    assert!(
        NormalizedResult::ImageRef("https://example.com/x.png".into())
            .into_data_uri()
            .is_none()
    );
}

#[test]
fn task_status_terminality() {
    assert!(!TaskStatus::Pending.is_terminal());
    assert!(!TaskStatus::Processing.is_terminal());
    assert!(TaskStatus::Succeeded { artifact: "url".into() }.is_terminal());
    assert!(TaskStatus::Failed { reason: "oops".into() }.is_terminal());
    assert!(TaskStatus::TimedOut.is_terminal());
}

#[test]
fn task_id_round_trips() {
    let id = TaskId::new("abc-123");
    assert_eq!(id.as_str(), "abc-123");
    assert_eq!(id.to_string(), "abc-123");
}

#[test]
fn offline_reply_echoes_prompt() {
    let reply = offline_reply("what is 2+2?");
    assert!(reply.contains("what is 2+2?"));
    // Deterministic: same input, same output.
    assert_eq!(reply, offline_reply("what is 2+2?"));
}
