//! Spawn-to-nucleus path aggregation.

use maze_sculptor_core::{GridView, PathSet, Position};

use crate::search::ShortestPathSearch;

/// Searches a route from every spawn to the nucleus.
///
/// Spawns are searched in list order. Spawns without a route contribute no
/// entry. The set is empty when the nucleus is absent or there are no spawns.
#[must_use]
pub fn find_all_paths(
    grid: GridView<'_>,
    spawns: &[Position],
    nucleus: Option<Position>,
) -> PathSet {
    let Some(nucleus) = nucleus else {
        return PathSet::new();
    };

    let mut search = ShortestPathSearch::new();
    spawns
        .iter()
        .filter_map(|spawn| search.find(grid, *spawn, nucleus))
        .collect()
}

/// Longest route in the set measured in steps, or 0 for an empty set.
#[must_use]
pub fn max_distance(paths: &PathSet) -> u32 {
    paths.iter().map(|path| path.steps()).max().unwrap_or(0)
}

/// Reports whether at least one spawn has a route to the nucleus.
#[must_use]
pub fn can_reach_nucleus(grid: GridView<'_>, spawns: &[Position], nucleus: Option<Position>) -> bool {
    let Some(nucleus) = nucleus else {
        return false;
    };

    let mut search = ShortestPathSearch::new();
    spawns
        .iter()
        .any(|spawn| search.find(grid, *spawn, nucleus).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_sculptor_core::{CellState, Path};

    #[test]
    fn missing_nucleus_or_spawns_yield_empty_set() {
        let cells = vec![CellState::Empty; 9];
        let grid = GridView::new(&cells, 3);
        let spawns = [Position::new(0, 0)];

        assert!(find_all_paths(grid, &spawns, None).is_empty());
        assert!(find_all_paths(grid, &[], Some(Position::new(2, 2))).is_empty());
        assert!(!can_reach_nucleus(grid, &spawns, None));
        assert!(!can_reach_nucleus(grid, &[], Some(Position::new(2, 2))));
    }

    #[test]
    fn unreachable_spawns_are_dropped() {
        // S # N
        // # . .
        // S . .
        let mut cells = vec![CellState::Empty; 9];
        cells[1] = CellState::Wall;
        cells[3] = CellState::Wall;
        let grid = GridView::new(&cells, 3);
        let spawns = [Position::new(0, 0), Position::new(0, 2)];

        let paths = find_all_paths(grid, &spawns, Some(Position::new(2, 0)));

        assert_eq!(paths.len(), 1);
        let only = paths.iter().next().expect("one path");
        assert_eq!(only.source(), Some(Position::new(0, 2)));
        assert_eq!(max_distance(&paths), 4);
        assert!(can_reach_nucleus(grid, &spawns, Some(Position::new(2, 0))));
    }

    #[test]
    fn paths_follow_spawn_order() {
        let cells = vec![CellState::Empty; 25];
        let grid = GridView::new(&cells, 5);
        let spawns = [Position::new(4, 4), Position::new(0, 0), Position::new(2, 0)];

        let paths = find_all_paths(grid, &spawns, Some(Position::new(2, 2)));

        let sources: Vec<_> = paths.iter().filter_map(Path::source).collect();
        assert_eq!(sources, spawns.to_vec());
        assert_eq!(max_distance(&paths), 4);
    }

    #[test]
    fn max_distance_of_empty_set_is_zero() {
        assert_eq!(max_distance(&PathSet::new()), 0);
    }

    #[test]
    fn max_distance_counts_steps_not_cells() {
        let paths: PathSet = [
            Path::from_cells(vec![Position::new(0, 0)]),
            Path::from_cells(vec![
                Position::new(0, 0),
                Position::new(1, 0),
                Position::new(2, 0),
            ]),
        ]
        .into_iter()
        .collect();

        assert_eq!(max_distance(&paths), 2);
    }
}
