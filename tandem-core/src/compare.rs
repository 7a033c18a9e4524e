use crate::tree::Tree;
use crate::walk::spawn_walk;
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::debug;

/// Walks both trees concurrently and reports whether they hold the same
/// in-order sequence.
///
/// Values are merged from whichever walker is ready. Each side keeps a
/// buffer of values not yet paired with the other side, plus a read count,
/// so the trees are only reported equal once both walkers have closed with
/// the same number of values and every pair matched.
pub async fn same(a: Arc<Tree>, b: Arc<Tree>) -> bool {
    let mut left = spawn_walk(a);
    let mut right = spawn_walk(b);

    let mut left_pending: VecDeque<i64> = VecDeque::new();
    let mut right_pending: VecDeque<i64> = VecDeque::new();
    let (mut left_open, mut right_open) = (true, true);
    let (mut left_read, mut right_read) = (0usize, 0usize);

    while left_open || right_open {
        tokio::select! {
            value = left.recv(), if left_open => match value {
                Some(value) => {
                    left_read += 1;
                    left_pending.push_back(value);
                }
                None => left_open = false,
            },
            value = right.recv(), if right_open => match value {
                Some(value) => {
                    right_read += 1;
                    right_pending.push_back(value);
                }
                None => right_open = false,
            },
        }

        while let (Some(&l), Some(&r)) = (left_pending.front(), right_pending.front()) {
            if l != r {
                debug!("Trees differ: {} != {}", l, r);
                return false;
            }
            left_pending.pop_front();
            right_pending.pop_front();
        }

        // A closed side can never catch up with a longer sequence
        if (!left_open && right_read > left_read) || (!right_open && left_read > right_read) {
            debug!("Trees differ in length: {} vs {} values so far", left_read, right_read);
            return false;
        }
    }

    left_read == right_read
}

/// Drains the first walker and, for each value, peeks at the second walker
/// without waiting.
///
/// When the second walker has nothing ready (or has already finished) the
/// value is treated as matching. This makes the result depend on how fast
/// the two walkers run: unequal trees can be reported equal, and a lagging
/// second walker can pair values out of step. Use [`same`] when the answer
/// matters.
pub async fn same_best_effort(a: Arc<Tree>, b: Arc<Tree>) -> bool {
    let mut left = spawn_walk(a);
    let mut right = spawn_walk(b);

    while let Some(l) = left.recv().await {
        if let Ok(r) = right.try_recv()
            && l != r
        {
            return false;
        }
    }
    true
}
