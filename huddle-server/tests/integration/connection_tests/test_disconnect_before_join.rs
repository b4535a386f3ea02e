use huddle_server::SessionEventKind;

use crate::integration::{create_test_hub, init_tracing};
use crate::utils::{RECORDER_TIMEOUT_MS, TestConnection, sync};

#[tokio::test]
async fn test_disconnect_before_join_is_silent() {
    init_tracing();

    let (hub, recorder) = create_test_hub();

    let mut alice = TestConnection::connect(&hub)
        .await
        .expect("Failed to connect alice");
    alice.join_ok("lobby", "alice").await.expect("Join failed");

    let lurker = TestConnection::connect(&hub)
        .await
        .expect("Failed to connect lurker");
    lurker.disconnect().await.expect("Disconnect failed");

    assert!(
        alice.drain().await.is_empty(),
        "Room members must not hear about connections that never joined"
    );

    let rooms = sync(&hub).await;
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0].user_count, 1);

    assert!(recorder.wait_for_records(2, RECORDER_TIMEOUT_MS).await);
    assert_eq!(
        recorder.kinds().await,
        vec![SessionEventKind::RoomCreated, SessionEventKind::Join],
        "Only the joined connection shows up in the session log"
    );
}

#[tokio::test]
async fn test_duplicate_disconnect_is_ignored() {
    init_tracing();

    let (hub, _recorder) = create_test_hub();

    let mut alice = TestConnection::connect(&hub)
        .await
        .expect("Failed to connect alice");
    let mut bob = TestConnection::connect(&hub)
        .await
        .expect("Failed to connect bob");
    alice.join_ok("lobby", "alice").await.expect("Join failed");
    bob.join_ok("lobby", "bob").await.expect("Join failed");

    let bob_id = bob.id;
    hub.disconnect(bob_id).await.expect("Disconnect failed");
    hub.disconnect(bob_id).await.expect("Disconnect failed");

    let events = alice.drain().await;
    let left = events
        .iter()
        .filter(|e| matches!(e, huddle_core::ServerEvent::UserLeft { .. }))
        .count();
    assert_eq!(left, 1, "A departure is announced exactly once");
}
