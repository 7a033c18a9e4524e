pub mod compare;
pub mod counter;
pub mod tree;
pub mod walk;

pub use compare::{same, same_best_effort};
pub use counter::SafeCounter;
pub use tree::Tree;
pub use walk::{spawn_walk, walk, walk_stream};
