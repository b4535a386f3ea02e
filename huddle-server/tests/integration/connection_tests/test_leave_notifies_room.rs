use huddle_core::ServerEvent;

use crate::integration::{create_test_hub, init_tracing};
use crate::utils::{TestConnection, sync};

#[tokio::test]
async fn test_leave_notifies_remaining_members() {
    init_tracing();

    let (hub, _recorder) = create_test_hub();

    let mut alice = TestConnection::connect(&hub).await.expect("connect alice");
    let mut bob = TestConnection::connect(&hub).await.expect("connect bob");
    let mut carol = TestConnection::connect(&hub).await.expect("connect carol");

    alice.join_ok("retro", "alice").await.expect("alice join");
    bob.join_ok("retro", "bob").await.expect("bob join");
    carol.join_ok("retro", "carol").await.expect("carol join");
    alice.drain().await;
    bob.drain().await;

    let bob_id = bob.id;
    bob.disconnect().await.expect("Disconnect failed");

    for peer in [&mut alice, &mut carol] {
        match peer.recv().await.expect("user-left") {
            ServerEvent::UserLeft { user_id } => assert_eq!(user_id, bob_id),
            other => panic!("Expected user-left, got {:?}", other),
        }
        match peer.recv().await.expect("leave notice") {
            ServerEvent::ChatMessage {
                username,
                message,
                is_system,
                ..
            } => {
                assert!(is_system);
                assert_eq!(username, "System");
                assert_eq!(message, "bob left the room");
            }
            other => panic!("Expected leave notice, got {:?}", other),
        }
    }

    let rooms = sync(&hub).await;
    let names: Vec<_> = rooms[0].users.iter().map(|m| m.username.as_str()).collect();
    assert_eq!(names, vec!["alice", "carol"]);
}

#[tokio::test]
async fn test_name_is_free_again_after_leave() {
    init_tracing();

    let (hub, _recorder) = create_test_hub();

    let mut alice = TestConnection::connect(&hub).await.expect("connect alice");
    let bob = TestConnection::connect(&hub).await.expect("connect bob");
    alice.join_ok("retro", "alice").await.expect("alice join");
    bob.join("retro", "bob").await.expect("bob join");
    bob.disconnect().await.expect("Disconnect failed");

    let mut bob_again = TestConnection::connect(&hub).await.expect("reconnect bob");
    let users = bob_again
        .join_ok("retro", "bob")
        .await
        .expect("The old name must be reusable");

    assert_eq!(users.len(), 1);
    assert_eq!(users[0].username, "alice");
}
