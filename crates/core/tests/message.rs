//! Tests for conversation-history bounding.

use tutorkit_core::{ChatTurn, HISTORY_WINDOW, Role, recent_turns};

fn history(len: usize) -> Vec<ChatTurn> {
    (0..len)
        .map(|i| {
            if i % 2 == 0 {
                ChatTurn::user(format!("question {i}"))
            } else {
                ChatTurn::assistant(format!("answer {i}"))
            }
        })
        .collect()
}

#[test]
fn recent_turns_bounds_long_history() {
    let turns = history(15);
    let window = recent_turns(&turns, HISTORY_WINDOW);

    assert_eq!(window.len(), 10);
    assert_eq!(window[0].content, "answer 5");
    assert_eq!(window[9].content, "question 14");
}

#[test]
fn recent_turns_preserves_order() {
    let turns = history(15);
    let window = recent_turns(&turns, HISTORY_WINDOW);

    let contents: Vec<&str> = window.iter().map(|t| t.content.as_str()).collect();
    let expected: Vec<String> = turns[5..].iter().map(|t| t.content.clone()).collect();
    assert_eq!(contents, expected.iter().map(String::as_str).collect::<Vec<_>>());
}

#[test]
fn recent_turns_short_history_unchanged() {
    let turns = history(3);
    let window = recent_turns(&turns, HISTORY_WINDOW);
    assert_eq!(window.len(), 3);
    assert_eq!(window[0].content, "question 0");
}

#[test]
fn recent_turns_empty_history() {
    assert!(recent_turns(&[], HISTORY_WINDOW).is_empty());
}

#[test]
fn turn_constructors_set_roles() {
    assert_eq!(ChatTurn::user("hi").role, Role::User);
    assert_eq!(ChatTurn::assistant("hello").role, Role::Assistant);
}

#[test]
fn turn_with_images_keeps_order() {
    let turn = ChatTurn::user("look")
        .with_images(vec!["data:image/png;base64,a".into(), "data:image/png;base64,b".into()]);
    assert_eq!(turn.images.len(), 2);
    assert!(turn.images[0].ends_with(",a"));
    assert!(turn.images[1].ends_with(",b"));
}
