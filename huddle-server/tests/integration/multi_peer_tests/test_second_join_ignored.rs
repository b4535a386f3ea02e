use huddle_core::ServerEvent;

use crate::integration::{create_test_hub, init_tracing};
use crate::utils::{TestConnection, sync};

#[tokio::test]
async fn test_second_join_on_same_connection_is_ignored() {
    init_tracing();

    let (hub, _recorder) = create_test_hub();

    let mut alice = TestConnection::connect(&hub).await.expect("connect alice");
    alice.join_ok("r1", "alice").await.expect("first join");

    alice.join("r2", "alice").await.expect("send second join");
    alice.join("r1", "alias").await.expect("send third join");

    assert!(alice.drain().await.is_empty());

    let rooms = sync(&hub).await;
    assert_eq!(rooms.len(), 1, "No second room is created");
    assert_eq!(rooms[0].room_id.as_str(), "r1");
    assert_eq!(rooms[0].users[0].username, "alice");
}

#[tokio::test]
async fn test_join_without_room_or_name_is_ignored() {
    init_tracing();

    let (hub, _recorder) = create_test_hub();

    let mut alice = TestConnection::connect(&hub).await.expect("connect alice");
    alice.join("", "alice").await.expect("send join");
    alice.join("r1", "").await.expect("send join");

    assert!(alice.drain().await.is_empty());
    assert!(sync(&hub).await.is_empty());

    alice
        .join_ok("r1", "alice")
        .await
        .expect("A proper join still works afterwards");
}

#[tokio::test]
async fn test_blank_room_or_name_is_ignored() {
    init_tracing();

    let (hub, _recorder) = create_test_hub();

    let mut alice = TestConnection::connect(&hub).await.expect("connect alice");
    alice.join("   ", "alice").await.expect("send join");
    alice.join("r1", " \t ").await.expect("send join");

    assert!(alice.drain().await.is_empty());
    assert!(sync(&hub).await.is_empty());
}

#[tokio::test]
async fn test_room_and_name_are_trimmed() {
    init_tracing();

    let (hub, _recorder) = create_test_hub();

    let mut alice = TestConnection::connect(&hub).await.expect("connect alice");
    let mut bob = TestConnection::connect(&hub).await.expect("connect bob");

    alice.join_ok(" r1 ", "alice ").await.expect("padded join");

    let rooms = sync(&hub).await;
    assert_eq!(rooms[0].room_id.as_str(), "r1");
    assert_eq!(rooms[0].users[0].username, "alice");

    bob.join("r1", " alice").await.expect("send join");
    match bob.recv().await.expect("join-error") {
        ServerEvent::JoinError { message } => assert_eq!(message, "Username already taken"),
        other => panic!("Expected join-error, got {:?}", other),
    }
}
