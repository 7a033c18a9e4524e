// Tests for walking and comparing trees through the public API

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use tandem_core::{Tree, same, spawn_walk};

async fn walked(tree: Arc<Tree>) -> Vec<i64> {
    let mut rx = spawn_walk(tree);
    let mut values = Vec::new();
    while let Some(v) = rx.recv().await {
        values.push(v);
    }
    values
}

fn random_tree(rng: &mut SmallRng, size: usize) -> Tree {
    let values: Vec<i64> = (0..size).map(|_| rng.gen_range(-50..50)).collect();
    Tree::from_values(values).unwrap()
}

// ============================================================================
// Walker
// ============================================================================

#[tokio::test]
async fn test_walk_length_matches_node_count() {
    let mut rng = SmallRng::seed_from_u64(1);
    for size in 1..40 {
        let tree = Arc::new(random_tree(&mut rng, size));
        let values = walked(tree.clone()).await;

        assert_eq!(values.len(), size);
        assert_eq!(values, tree.values());
    }
}

#[tokio::test]
async fn test_walk_of_search_tree_is_sorted() {
    let mut rng = SmallRng::seed_from_u64(2);
    for _ in 0..20 {
        let values = walked(Arc::new(random_tree(&mut rng, 25))).await;
        let mut sorted = values.clone();
        sorted.sort();
        assert_eq!(values, sorted);
    }
}

// ============================================================================
// Comparator
// ============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_same_is_reflexive() {
    let mut rng = SmallRng::seed_from_u64(3);
    for size in 1..30 {
        let tree = Arc::new(random_tree(&mut rng, size));
        assert!(same(tree.clone(), tree).await);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_same_agrees_with_sequence_equality() {
    let mut rng = SmallRng::seed_from_u64(4);
    for _ in 0..100 {
        let (a_size, b_size) = (rng.gen_range(1..8), rng.gen_range(1..8));
        let a = random_tree(&mut rng, a_size);
        let b = random_tree(&mut rng, b_size);
        let expected = a.values() == b.values();

        assert_eq!(same(Arc::new(a), Arc::new(b)).await, expected);
    }
}

#[tokio::test]
async fn test_shuffled_trees_by_multiplier() {
    for k in 1..=5 {
        assert!(same(Arc::new(Tree::shuffled(k)), Arc::new(Tree::shuffled(k))).await);
        assert!(!same(Arc::new(Tree::shuffled(k)), Arc::new(Tree::shuffled(k + 1))).await);
    }
}
