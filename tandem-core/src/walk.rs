use crate::tree::Tree;
use futures::Stream;
use std::sync::Arc;
use tokio::sync::mpsc::{self, Receiver, Sender};
use tracing::trace;

/// Sends the in-order values of `tree` into `tx`, then closes the channel
/// by dropping the sender.
pub async fn walk(tree: Arc<Tree>, tx: Sender<i64>) {
    for value in tree.iter() {
        if tx.send(value).await.is_err() {
            trace!("Walk receiver dropped, stopping early");
            return;
        }
    }
}

/// Spawns a walker task and returns the receiving end of its channel.
///
/// The channel holds a single value so the producer runs at most one step
/// ahead of the consumer.
pub fn spawn_walk(tree: Arc<Tree>) -> Receiver<i64> {
    let (tx, rx) = mpsc::channel(1);
    tokio::spawn(walk(tree, tx));
    rx
}

pub fn walk_stream(tree: Arc<Tree>) -> impl Stream<Item = i64> {
    futures::stream::unfold(spawn_walk(tree), |mut rx| async move {
        rx.recv().await.map(|value| (value, rx))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    async fn drain(mut rx: Receiver<i64>) -> Vec<i64> {
        let mut values = Vec::new();
        while let Some(value) = rx.recv().await {
            values.push(value);
        }
        values
    }

    #[tokio::test]
    async fn test_walk_emits_in_order_and_closes() {
        let tree = Arc::new(Tree::shuffled(1));

        let values = drain(spawn_walk(tree.clone())).await;

        assert_eq!(values, (1..=10).collect::<Vec<_>>());
        assert_eq!(values.len(), tree.len());
    }

    #[tokio::test]
    async fn test_walk_is_restartable() {
        let tree = Arc::new(Tree::from_values([8, 3, 10, 1, 6, 14]).unwrap());

        let first = drain(spawn_walk(tree.clone())).await;
        let second = drain(spawn_walk(tree)).await;

        assert_eq!(first, vec![1, 3, 6, 8, 10, 14]);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_walk_single_node() {
        let values = drain(spawn_walk(Arc::new(Tree::leaf(42)))).await;
        assert_eq!(values, vec![42]);
    }

    #[tokio::test]
    async fn test_walk_stops_when_receiver_dropped() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);

        // Must return instead of blocking forever on a closed channel
        walk(Arc::new(Tree::shuffled(2)), tx).await;
    }

    #[tokio::test]
    async fn test_walk_stream_collects() {
        let values: Vec<i64> = walk_stream(Arc::new(Tree::shuffled(5))).collect().await;
        assert_eq!(values, (1..=10).map(|i| i * 5).collect::<Vec<_>>());
    }
}
