#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Analytics system that keeps spawn routes and summary statistics current.

use maze_sculptor_core::{Event, PathSet, StatsReport};
use maze_sculptor_system_pathfinding::{find_all_paths, max_distance};
use maze_sculptor_world::GridModel;
use tracing::debug;

/// Pure analytics system that recomputes routes after layout changes.
#[derive(Debug, Default)]
pub struct Analytics {
    last_report: Option<StatsReport>,
    paths: PathSet,
}

impl Analytics {
    /// Creates a new analytics system that has not published anything yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the last report published by the system, if any.
    #[must_use]
    pub fn last_report(&self) -> Option<&StatsReport> {
        self.last_report.as_ref()
    }

    /// Routes computed by the most recent recompute, in spawn order.
    #[must_use]
    pub fn paths(&self) -> &PathSet {
        &self.paths
    }

    /// Consumes one batch of world events and publishes a fresh report.
    ///
    /// Any number of layout changes within `events` trigger a single
    /// recompute against `grid`, which must already reflect the batch.
    /// Batches without layout changes leave the cached state untouched.
    pub fn handle(&mut self, events: &[Event], grid: &GridModel, out: &mut Vec<Event>) {
        let changes = events.iter().filter(|event| event.is_layout_change()).count();
        if changes == 0 {
            return;
        }

        debug!(changes, "layout changed; recomputing routes");
        self.refresh(grid, out);
    }

    /// Recomputes routes unconditionally and publishes the resulting report.
    pub fn refresh(&mut self, grid: &GridModel, out: &mut Vec<Event>) {
        self.paths = find_all_paths(grid.view(), grid.spawns(), grid.nucleus());

        let report = StatsReport::new(
            max_distance(&self.paths),
            count(grid.spawns().len()),
            count(self.paths.len()),
        );
        debug!(
            max_distance = report.max_distance,
            connected = report.connected_spawns,
            spawns = report.spawn_count,
            "analytics updated"
        );

        self.last_report = Some(report);
        out.push(Event::AnalyticsUpdated { report });
    }
}

fn count(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}
