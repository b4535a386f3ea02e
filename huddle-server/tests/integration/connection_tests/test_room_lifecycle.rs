use huddle_server::SessionEventKind;

use crate::integration::{create_test_hub, init_tracing};
use crate::utils::{RECORDER_TIMEOUT_MS, TestConnection, sync};

#[tokio::test]
async fn test_room_is_dropped_when_last_member_leaves() {
    init_tracing();

    let (hub, recorder) = create_test_hub();

    let mut alice = TestConnection::connect(&hub).await.expect("connect alice");
    alice.join_ok("design", "alice").await.expect("alice join");
    assert_eq!(sync(&hub).await.len(), 1);

    alice.disconnect().await.expect("Disconnect failed");
    assert!(sync(&hub).await.is_empty(), "Empty rooms must not linger");

    // Re-using the id creates a brand new room.
    let mut bob = TestConnection::connect(&hub).await.expect("connect bob");
    let users = bob.join_ok("design", "bob").await.expect("bob join");
    assert!(users.is_empty(), "The new room must start empty");

    assert!(recorder.wait_for_records(5, RECORDER_TIMEOUT_MS).await);
    assert_eq!(
        recorder.kinds().await,
        vec![
            SessionEventKind::RoomCreated,
            SessionEventKind::Join,
            SessionEventKind::Disconnect,
            SessionEventKind::RoomCreated,
            SessionEventKind::Join,
        ]
    );
}

#[tokio::test]
async fn test_rooms_are_isolated() {
    init_tracing();

    let (hub, _recorder) = create_test_hub();

    let mut alice = TestConnection::connect(&hub).await.expect("connect alice");
    let mut bob = TestConnection::connect(&hub).await.expect("connect bob");

    alice.join_ok("red", "alice").await.expect("alice join");
    let users = bob.join_ok("blue", "alice").await.expect("same name, other room");
    assert!(users.is_empty());

    bob.chat("hello blue").await.expect("chat");
    bob.drain().await;
    assert!(alice.drain().await.is_empty(), "Other rooms never see traffic");

    // Room ids are case-sensitive.
    let mut carol = TestConnection::connect(&hub).await.expect("connect carol");
    carol.join_ok("Red", "carol").await.expect("carol join");
    assert_eq!(sync(&hub).await.len(), 3);
}
