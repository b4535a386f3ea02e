use huddle_core::ServerEvent;

use crate::integration::{create_test_hub, init_tracing};
use crate::utils::TestConnection;

fn chat_lines(events: &[ServerEvent]) -> Vec<(String, String, u64)> {
    events
        .iter()
        .filter_map(|e| match e {
            ServerEvent::ChatMessage {
                username,
                message,
                timestamp,
                is_system: false,
            } => Some((username.clone(), message.clone(), *timestamp)),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn test_chat_reaches_everyone_including_sender() {
    init_tracing();

    let (hub, _recorder) = create_test_hub();

    let mut alice = TestConnection::connect(&hub).await.expect("connect alice");
    let mut bob = TestConnection::connect(&hub).await.expect("connect bob");
    alice.join_ok("r1", "alice").await.expect("alice join");
    bob.join_ok("r1", "bob").await.expect("bob join");
    alice.drain().await;

    alice.chat("hi").await.expect("chat");

    for peer in [&mut alice, &mut bob] {
        match peer.recv().await.expect("chat-message") {
            ServerEvent::ChatMessage {
                username,
                message,
                is_system,
                ..
            } => {
                assert_eq!(username, "alice");
                assert_eq!(message, "hi");
                assert!(!is_system);
            }
            other => panic!("Expected chat-message, got {:?}", other),
        }
    }
}

#[tokio::test]
async fn test_rapid_chat_keeps_one_order_for_all() {
    init_tracing();

    let (hub, _recorder) = create_test_hub();

    let mut alice = TestConnection::connect(&hub).await.expect("connect alice");
    let mut bob = TestConnection::connect(&hub).await.expect("connect bob");
    let mut carol = TestConnection::connect(&hub).await.expect("connect carol");
    alice.join_ok("r1", "alice").await.expect("alice join");
    bob.join_ok("r1", "bob").await.expect("bob join");
    carol.join_ok("r1", "carol").await.expect("carol join");
    alice.drain().await;
    bob.drain().await;

    for i in 0..20 {
        alice.chat(&format!("a{}", i)).await.expect("chat");
        bob.chat(&format!("b{}", i)).await.expect("chat");
    }

    let seen_by_alice = chat_lines(&alice.drain().await);
    let seen_by_bob = chat_lines(&bob.drain().await);
    let seen_by_carol = chat_lines(&carol.drain().await);

    assert_eq!(seen_by_alice.len(), 40);
    assert_eq!(seen_by_alice, seen_by_bob, "Members disagree on chat order");
    assert_eq!(seen_by_alice, seen_by_carol, "Members disagree on chat order");

    // Each sender's own messages stay in send order.
    let from_alice: Vec<_> = seen_by_alice
        .iter()
        .filter(|(u, _, _)| u == "alice")
        .map(|(_, m, _)| m.clone())
        .collect();
    let expected: Vec<_> = (0..20).map(|i| format!("a{}", i)).collect();
    assert_eq!(from_alice, expected);

    assert!(
        seen_by_alice.windows(2).all(|w| w[0].2 <= w[1].2),
        "Timestamps must never go backwards"
    );
}
