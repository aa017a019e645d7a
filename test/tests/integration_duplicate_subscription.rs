//! One live mirror per (node, lane): the default policy replaces by
//! closing-then-reopening; the strict policy rejects.

use lanelink_client::{Client, ClientConfig, DuplicatePolicy, SubscribeError, SyncState};
use lanelink_shared::{EntryKey, LaneUri, LinkEvent, NodeUri, Payload};
use lanelink_test::{TestTransport, TransportOp};

#[test]
fn replace_policy_closes_then_reopens() {
    let (transport, log) = TestTransport::new();
    let mut client = Client::new(transport);
    let node = NodeUri::from("/room/public");
    let lane = LaneUri::from("messageList");

    let first = client.open_map(&node, &lane).unwrap();
    let second = client.open_map(&node, &lane).unwrap();

    assert_eq!(first.sync_state(), SyncState::Closed);
    assert_eq!(second.sync_state(), SyncState::Opening);

    // Close-then-reopen on the wire: link, unlink, link
    let ops = log.borrow();
    assert_eq!(
        *ops,
        vec![
            TransportOp::Link(node.clone(), lane.clone()),
            TransportOp::Unlink(node.clone(), lane.clone()),
            TransportOp::Link(node.clone(), lane.clone()),
        ]
    );
}

#[test]
fn reject_policy_refuses_a_second_mirror() {
    let config = ClientConfig {
        duplicate_policy: DuplicatePolicy::Reject,
    };
    let (transport, _log) = TestTransport::new();
    let mut client = Client::with_config(config, transport);
    let node = NodeUri::from("/room/public");
    let lane = LaneUri::from("messageList");

    let first = client.open_map(&node, &lane).unwrap();
    let result = client.open_map(&node, &lane);

    assert_eq!(
        result.err(),
        Some(SubscribeError::DuplicateSubscription {
            node: "/room/public".to_string(),
            lane: "messageList".to_string(),
        })
    );
    // The existing mirror is untouched
    assert_eq!(first.sync_state(), SyncState::Opening);
}

#[test]
fn reject_policy_allows_reopening_after_close() {
    let config = ClientConfig {
        duplicate_policy: DuplicatePolicy::Reject,
    };
    let (transport, _log) = TestTransport::new();
    let mut client = Client::with_config(config, transport);
    let node = NodeUri::from("/room/public");
    let lane = LaneUri::from("messageList");

    let first = client.open_map(&node, &lane).unwrap();
    first.close();

    let second = client.open_map(&node, &lane).unwrap();
    assert_eq!(second.sync_state(), SyncState::Opening);

    client.deliver(
        &node,
        &lane,
        LinkEvent::Update {
            key: EntryKey::from("0"),
            payload: Payload::from("fresh"),
        },
    );
    assert_eq!(second.len(), 1);
    assert!(first.is_empty());
}

#[test]
fn replaced_mirror_stops_receiving_events() {
    let (transport, _log) = TestTransport::new();
    let mut client = Client::new(transport);
    let node = NodeUri::from("/room/public");
    let lane = LaneUri::from("messageList");

    let first = client.open_map(&node, &lane).unwrap();
    let second = client.open_map(&node, &lane).unwrap();

    client.deliver(
        &node,
        &lane,
        LinkEvent::Update {
            key: EntryKey::from("0"),
            payload: Payload::from("fresh"),
        },
    );

    assert!(first.is_empty());
    assert_eq!(second.len(), 1);
}
