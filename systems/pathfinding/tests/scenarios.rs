use maze_sculptor_core::{CellState, Position};
use maze_sculptor_system_pathfinding::{
    can_reach_nucleus, find_all_paths, find_path, max_distance, would_block_all_paths,
};
use maze_sculptor_world::GridModel;

fn place(grid: &mut GridModel, cells: &[(u32, u32)], state: CellState) {
    for &(x, y) in cells {
        let _ = grid
            .set_cell(Position::new(x, y), state)
            .expect("in bounds");
    }
}

#[test]
fn open_five_by_five_route_spans_nine_cells() {
    let mut grid = GridModel::new(5).expect("valid side");
    place(&mut grid, &[(0, 0)], CellState::Spawn);
    place(&mut grid, &[(4, 4)], CellState::Nucleus);

    let path = find_path(grid.view(), Position::new(0, 0), Position::new(4, 4))
        .expect("open grid is connected");
    let paths = find_all_paths(grid.view(), grid.spawns(), grid.nucleus());

    assert_eq!(path.len(), 9);
    assert_eq!(paths.len(), 1);
    assert_eq!(max_distance(&paths), 8);
}

#[test]
fn walling_the_only_corridor_cell_blocks_all_paths() {
    // S . N
    // # # #
    // . . .
    let mut grid = GridModel::new(3).expect("valid side");
    place(&mut grid, &[(0, 0)], CellState::Spawn);
    place(&mut grid, &[(2, 0)], CellState::Nucleus);
    place(&mut grid, &[(0, 1), (1, 1), (2, 1)], CellState::Wall);

    assert!(would_block_all_paths(
        &grid,
        grid.spawns(),
        grid.nucleus(),
        Position::new(1, 0)
    ));
}

#[test]
fn stranding_one_spawn_is_allowed_while_another_connects() {
    // S . . . .
    // # # . . .
    // S . . . N
    // # # . . .
    //
    // The lower spawn only leaves its pocket through (1, 2); the upper spawn
    // has a route that avoids that cell.
    let mut grid = GridModel::new(5).expect("valid side");
    place(&mut grid, &[(0, 0), (0, 2)], CellState::Spawn);
    place(&mut grid, &[(4, 2)], CellState::Nucleus);
    place(&mut grid, &[(0, 1), (1, 1), (0, 3), (1, 3)], CellState::Wall);

    let candidate = Position::new(1, 2);
    assert!(!would_block_all_paths(
        &grid,
        grid.spawns(),
        grid.nucleus(),
        candidate
    ));

    // Committing the wall leaves exactly one reachable spawn.
    place(&mut grid, &[(1, 2)], CellState::Wall);
    let paths = find_all_paths(grid.view(), grid.spawns(), grid.nucleus());
    assert_eq!(paths.len(), 1);
    assert_eq!(
        paths.iter().next().and_then(|path| path.source()),
        Some(Position::new(0, 0))
    );
}

#[test]
fn absent_nucleus_is_vacuous_everywhere() {
    let mut grid = GridModel::new(4).expect("valid side");
    place(&mut grid, &[(0, 0), (3, 3)], CellState::Spawn);

    let paths = find_all_paths(grid.view(), grid.spawns(), grid.nucleus());

    assert!(paths.is_empty());
    assert_eq!(max_distance(&paths), 0);
    assert!(!can_reach_nucleus(grid.view(), grid.spawns(), grid.nucleus()));
    for y in 0..4 {
        for x in 0..4 {
            assert!(!would_block_all_paths(
                &grid,
                grid.spawns(),
                grid.nucleus(),
                Position::new(x, y)
            ));
        }
    }
}

#[test]
fn default_layout_routes_every_corner() {
    let grid = GridModel::with_default_layout(12).expect("valid side");

    let paths = find_all_paths(grid.view(), grid.spawns(), grid.nucleus());

    assert_eq!(paths.len(), 4);
    // The top-left corner is farthest from the centre cell (6, 6).
    assert_eq!(max_distance(&paths), 12);
}
