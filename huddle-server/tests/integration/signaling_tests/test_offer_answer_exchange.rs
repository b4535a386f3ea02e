use huddle_core::{ClientEvent, ServerEvent};
use serde_json::json;

use crate::integration::{create_test_hub, init_tracing};
use crate::utils::TestConnection;

#[tokio::test]
async fn test_offer_answer_and_candidates_are_unicast() {
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

    let offer = json!({ "type": "offer", "sdp": "v=0 alice" });
    bob.send(ClientEvent::Offer {
        offer: Some(offer.clone()),
        to: Some(alice.id),
    })
    .await
    .expect("offer");

    match alice.recv().await.expect("offer") {
        ServerEvent::Offer {
            offer: received,
            from,
            username,
        } => {
            assert_eq!(received, offer);
            assert_eq!(from, bob.id);
            assert_eq!(username.as_deref(), Some("bob"));
        }
        other => panic!("Expected offer, got {:?}", other),
    }

    let answer = json!({ "type": "answer", "sdp": "v=0 bob" });
    alice
        .send(ClientEvent::Answer {
            answer: Some(answer.clone()),
            to: Some(bob.id),
        })
        .await
        .expect("answer");

    match bob.recv().await.expect("answer") {
        ServerEvent::Answer {
            answer: received,
            from,
            username,
        } => {
            assert_eq!(received, answer);
            assert_eq!(from, alice.id);
            assert_eq!(username.as_deref(), Some("alice"));
        }
        other => panic!("Expected answer, got {:?}", other),
    }

    let candidate = json!({ "candidate": "candidate:1 1 udp 2122260223 10.0.0.2 50000 typ host", "sdpMLineIndex": 0 });
    alice
        .send(ClientEvent::IceCandidate {
            candidate: Some(candidate.clone()),
            to: Some(bob.id),
        })
        .await
        .expect("ice-candidate");

    match bob.recv().await.expect("ice-candidate") {
        ServerEvent::IceCandidate {
            candidate: received,
            from,
        } => {
            assert_eq!(received, candidate);
            assert_eq!(from, alice.id);
        }
        other => panic!("Expected ice-candidate, got {:?}", other),
    }

    assert!(carol.drain().await.is_empty(), "Third parties see no signaling");
    assert!(alice.drain().await.is_empty());
    assert!(bob.drain().await.is_empty());
}
