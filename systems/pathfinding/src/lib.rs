#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Connectivity engine for Maze Sculptor.
//!
//! Every routine here reads the grid through a borrowed
//! [`GridView`](maze_sculptor_core::GridView) and never mutates the caller's
//! model. The placement validator clones the model before trying a
//! hypothetical wall.

pub mod aggregate;
pub mod distance;
pub mod reachability;
pub mod search;
pub mod validator;

pub use aggregate::{can_reach_nucleus, find_all_paths, max_distance};
pub use distance::DistanceField;
pub use reachability::reachable_from;
pub use search::{find_path, ShortestPathSearch};
pub use validator::{would_block, would_block_all_paths};
