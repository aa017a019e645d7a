//! The chat-room scenario: a map mirror of a message list lane,
//! synced from scratch and updated incrementally.

use lanelink_client::{Client, MirrorChange, MirrorChangeKind, MirrorKind, SyncState};
use lanelink_shared::{EntryKey, LaneUri, LinkEvent, NodeUri, Payload};
use lanelink_test::{ChangeLog, TestTransport};

const ALICE: &str = r#"{"userId":"alice","msg":"hi"}"#;
const BOB: &str = r#"{"userId":"bob","msg":"yo"}"#;

fn key(k: &str) -> EntryKey {
    EntryKey::from(k)
}

fn update(k: &str, payload: &str) -> LinkEvent {
    LinkEvent::Update {
        key: key(k),
        payload: Payload::from(payload),
    }
}

fn remove(k: &str) -> LinkEvent {
    LinkEvent::Remove { key: key(k) }
}

#[test]
fn message_list_syncs_in_order() {
    let (transport, _log) = TestTransport::new();
    let mut client = Client::new(transport);
    let node = NodeUri::from("/room/public");
    let lane = LaneUri::from("messageList");

    let messages = client.open_map(&node, &lane).unwrap();
    assert_eq!(messages.kind(), MirrorKind::Map);
    assert_eq!(messages.sync_state(), SyncState::Opening);
    assert!(messages.sync_state().is_provisional());

    client.deliver(&node, &lane, LinkEvent::WillSync);
    client.deliver(&node, &lane, update("0", ALICE));
    client.deliver(&node, &lane, update("1", BOB));

    assert_eq!(messages.sync_state(), SyncState::Synced);
    let snapshot = messages.snapshot();
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot[0].0, key("0"));
    assert_eq!(snapshot[0].1.as_str(), Some(ALICE));
    assert_eq!(snapshot[1].0, key("1"));
    assert_eq!(snapshot[1].1.as_str(), Some(BOB));

    client.deliver(&node, &lane, remove("0"));
    let snapshot = messages.snapshot();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].0, key("1"));
    assert_eq!(snapshot[0].1.as_str(), Some(BOB));
}

#[test]
fn resync_drops_stale_entries() {
    let (transport, _log) = TestTransport::new();
    let mut client = Client::new(transport);
    let node = NodeUri::from("/room/public");
    let lane = LaneUri::from("messageList");

    let messages = client.open_map(&node, &lane).unwrap();
    let log = ChangeLog::new();
    log.attach(&messages);

    client.deliver(&node, &lane, update("0", ALICE));
    client.deliver(&node, &lane, update("1", BOB));

    // Reconnect: the remote replays from scratch
    client.deliver(&node, &lane, LinkEvent::WillSync);
    assert!(messages.is_empty());
    assert_eq!(messages.sync_state(), SyncState::Syncing);

    client.deliver(&node, &lane, update("1", BOB));
    let snapshot = messages.snapshot();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].0, key("1"));

    assert_eq!(
        log.take(),
        vec![
            MirrorChange::Upsert(key("0"), Payload::from(ALICE)),
            MirrorChange::Upsert(key("1"), Payload::from(BOB)),
            MirrorChange::Reset,
            MirrorChange::Upsert(key("1"), Payload::from(BOB)),
        ]
    );
}

#[test]
fn duplicate_update_is_a_pure_overwrite() {
    let (transport, _log) = TestTransport::new();
    let mut client = Client::new(transport);
    let node = NodeUri::from("/room/public");
    let lane = LaneUri::from("messageList");

    let messages = client.open_map(&node, &lane).unwrap();

    client.deliver(&node, &lane, update("0", "first"));
    client.deliver(&node, &lane, update("1", "other"));
    client.deliver(&node, &lane, update("0", "second"));

    let snapshot = messages.snapshot();
    assert_eq!(snapshot[0], (key("0"), Payload::from("second")));
    assert_eq!(snapshot[1], (key("1"), Payload::from("other")));
}

#[test]
fn empty_payload_update_and_absent_remove_are_silent() {
    let (transport, _log) = TestTransport::new();
    let mut client = Client::new(transport);
    let node = NodeUri::from("/room/public");
    let lane = LaneUri::from("messageList");

    let messages = client.open_map(&node, &lane).unwrap();
    let log = ChangeLog::new();
    log.attach(&messages);

    client.deliver(&node, &lane, update("0", ""));
    client.deliver(&node, &lane, remove("never-seen"));

    assert!(messages.is_empty());
    assert!(log.is_empty());
}

#[test]
fn scalar_lane_tracks_a_live_counter() {
    let (transport, _log) = TestTransport::new();
    let mut client = Client::new(transport);
    let node = NodeUri::from("/room/public");
    let lane = LaneUri::from("userCount");

    let count = client.open_scalar(&node, &lane).unwrap();
    assert_eq!(count.kind(), MirrorKind::Scalar);
    assert_eq!(count.value(), None);

    client.deliver(
        &node,
        &lane,
        LinkEvent::Set {
            payload: Payload::from("2"),
        },
    );
    client.deliver(
        &node,
        &lane,
        LinkEvent::Set {
            payload: Payload::from("3"),
        },
    );

    assert_eq!(count.value(), Some(Payload::from("3")));
    assert_eq!(count.sync_state(), SyncState::Synced);
}

#[test]
fn commands_are_sent_in_call_order() {
    let (transport, log) = TestTransport::new();
    let mut client = Client::new(transport);
    let node = NodeUri::from("/room/public");
    let lane = LaneUri::from("postMessage");

    client.command(&node, &lane, Payload::from(ALICE));
    client.command(&node, &lane, Payload::from(BOB));

    let ops = log.borrow();
    let payloads: Vec<String> = ops
        .iter()
        .filter_map(|op| match op {
            lanelink_test::TransportOp::Command(c) => {
                c.payload().as_str().map(|s| s.to_string())
            }
            _ => None,
        })
        .collect();
    assert_eq!(payloads, vec![ALICE.to_string(), BOB.to_string()]);
}

#[test]
fn failed_link_request_is_reported_asynchronously() {
    let (transport, log) = TestTransport::failing();
    let mut client = Client::new(transport);
    let node = NodeUri::from("/room/public");
    let lane = LaneUri::from("messageList");

    // The failed link request never surfaces synchronously
    let messages = client.open_map(&node, &lane).unwrap();
    assert_eq!(messages.sync_state(), SyncState::Opening);
    assert_eq!(log.borrow().len(), 1);

    // The transport driver follows up with an unlink for the lane
    let changes = ChangeLog::new();
    changes.attach(&messages);
    client.deliver(&node, &lane, LinkEvent::WillUnlink);

    assert_eq!(changes.count_of(MirrorChangeKind::Disconnected), 1);
    assert_eq!(messages.sync_state(), SyncState::Closed);
}

#[test]
fn command_failure_is_swallowed() {
    let (transport, log) = TestTransport::failing();
    let mut client = Client::new(transport);
    let node = NodeUri::from("/room/public");
    let lane = LaneUri::from("postMessage");

    // Must not panic or surface an error
    client.command(&node, &lane, Payload::from("hello"));
    assert_eq!(log.borrow().len(), 1);
}
