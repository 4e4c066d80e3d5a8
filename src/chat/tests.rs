use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Local};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tungstenite::protocol::Message as WsMessage;

use super::ChatRouter;
use crate::broker::Bus;
use crate::client::Connection;
use crate::pair::PairKey;
use crate::persistence::Recorder;
use crate::registry::Registry;
use crate::utils::ChatError;

/// Keeps `(pair, message)` of every record call in memory.
#[derive(Default)]
struct MemoryRecorder {
    records: Mutex<Vec<(PairKey, String)>>,
}

impl MemoryRecorder {
    fn records(&self) -> Vec<(String, String)> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .map(|(pair, message)| (pair.to_string(), message.clone()))
            .collect()
    }

    fn recorded_pairs(&self) -> Vec<PairKey> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .map(|(pair, _)| pair.clone())
            .collect()
    }
}

#[async_trait]
impl Recorder for MemoryRecorder {
    async fn record(
        &self,
        pair: &PairKey,
        _at: DateTime<Local>,
        message: &str,
    ) -> Result<(), ChatError> {
        self.records
            .lock()
            .unwrap()
            .push((pair.clone(), message.to_string()));
        Ok(())
    }

    async fn history(&self, pair: &PairKey) -> Result<Vec<String>, ChatError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|(p, _)| p == pair)
            .map(|(_, m)| m.clone())
            .collect())
    }
}

struct BrokenDisk;

#[async_trait]
impl Recorder for BrokenDisk {
    async fn record(&self, _: &PairKey, _: DateTime<Local>, _: &str) -> Result<(), ChatError> {
        Err(ChatError::Io(std::io::Error::other("no space left on device")))
    }

    async fn history(&self, _: &PairKey) -> Result<Vec<String>, ChatError> {
        Ok(Vec::new())
    }
}

fn router_with(recorder: Arc<dyn Recorder>) -> ChatRouter {
    ChatRouter::new(Arc::new(Bus::new()), Arc::new(Registry::new()), recorder)
}

async fn join(
    router: &ChatRouter,
    sender: &str,
    peer: &str,
) -> (Connection, UnboundedReceiver<WsMessage>) {
    let (tx, rx) = mpsc::unbounded_channel::<WsMessage>();
    let connection = router
        .join(sender, peer, async move { Ok::<_, ChatError>(Connection::new(tx)) })
        .await
        .unwrap();
    (connection, rx)
}

fn received(rx: &mut UnboundedReceiver<WsMessage>) -> Vec<String> {
    let mut out = Vec::new();
    while let Ok(msg) = rx.try_recv() {
        out.push(msg.to_text().unwrap().to_string());
    }
    out
}

#[tokio::test]
async fn test_alice_and_bob_share_a_conversation() {
    let recorder = Arc::new(MemoryRecorder::default());
    let router = router_with(recorder.clone());

    let (c1, mut rx1) = join(&router, "alice", "bob").await;
    let (_c2, mut rx2) = join(&router, "bob", "alice").await;
    assert_eq!(router.registry().connection_count("alice", "bob"), 2);

    let fanout = router.relay("alice", "bob", "hi").await;
    assert_eq!(fanout.delivered, 2);
    assert_eq!(received(&mut rx1), vec!["alice: hi"]);
    assert_eq!(received(&mut rx2), vec!["alice: hi"]);
    assert_eq!(
        recorder.records(),
        vec![("alice-bob".to_string(), "alice: hi".to_string())]
    );

    router.leave("alice", "bob", &c1);
    router.registry().broadcast_private("alice", "bob", "bob: bye");
    assert!(received(&mut rx1).is_empty());
    assert_eq!(received(&mut rx2), vec!["bob: bye"]);
}

#[tokio::test]
async fn test_repeated_joins_record_each_message_once() {
    let recorder = Arc::new(MemoryRecorder::default());
    let router = router_with(recorder.clone());

    for round in 0..5 {
        let (sender, peer) = if round % 2 == 0 { ("alice", "bob") } else { ("bob", "alice") };
        let (conn, _rx) = join(&router, sender, peer).await;
        router.leave(sender, peer, &conn);
    }
    let (_conn, _rx) = join(&router, "alice", "bob").await;

    router.relay("alice", "bob", "hi").await;
    router.relay("bob", "alice", "hey").await;

    assert_eq!(router.bus().subscriber_count(&PairKey::new("alice", "bob").topic()), 1);
    assert_eq!(
        recorder.history(&PairKey::new("alice", "bob")).await.unwrap(),
        vec!["alice: hi", "bob: hey"]
    );
}

#[tokio::test]
async fn test_pairs_never_cross_deliver() {
    let recorder = Arc::new(MemoryRecorder::default());
    let router = router_with(recorder.clone());

    let (_ab, mut ab_rx) = join(&router, "alice", "bob").await;
    let (_cd, mut cd_rx) = join(&router, "carol", "dave").await;

    router.relay("carol", "dave", "psst").await;

    assert!(received(&mut ab_rx).is_empty());
    assert_eq!(received(&mut cd_rx), vec!["carol: psst"]);
    assert_eq!(
        recorder.records(),
        vec![("carol-dave".to_string(), "carol: psst".to_string())]
    );
}

#[tokio::test]
async fn test_storage_failure_does_not_block_delivery() {
    let router = router_with(Arc::new(BrokenDisk));
    let (_c1, mut rx1) = join(&router, "alice", "bob").await;
    let (_c2, mut rx2) = join(&router, "bob", "alice").await;

    let fanout = router.relay("bob", "alice", "are you there?").await;

    assert_eq!(fanout.delivered, 2);
    assert_eq!(received(&mut rx1), vec!["bob: are you there?"]);
    assert_eq!(received(&mut rx2), vec!["bob: are you there?"]);
}

#[tokio::test]
async fn test_relay_without_connections_still_records() {
    let recorder = Arc::new(MemoryRecorder::default());
    let router = router_with(recorder.clone());
    let (conn, _rx) = join(&router, "alice", "bob").await;
    router.leave("alice", "bob", &conn);

    let fanout = router.relay("alice", "bob", "anyone?").await;

    assert!(fanout.is_empty());
    assert_eq!(router.registry().pair_count(), 0);
    assert_eq!(recorder.records().len(), 1);
}

#[tokio::test]
async fn test_hyphenated_pairs_keep_separate_record_handlers() {
    let recorder = Arc::new(MemoryRecorder::default());
    let router = router_with(recorder.clone());

    let (_left, _left_rx) = join(&router, "a", "b-c").await;
    let (_right, mut right_rx) = join(&router, "a-b", "c").await;
    assert_eq!(router.bus().topic_count(), 2);
    assert_eq!(router.registry().pair_count(), 2);

    router.relay("a-b", "c", "hello").await;

    assert_eq!(received(&mut right_rx), vec!["a-b: hello"]);
    let pairs = recorder.recorded_pairs();
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].members(), ("a-b", "c"));
}
