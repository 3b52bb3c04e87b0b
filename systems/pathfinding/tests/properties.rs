use maze_sculptor_core::{CellState, Position};
use maze_sculptor_system_pathfinding::{
    find_all_paths, find_path, max_distance, reachable_from, would_block_all_paths, DistanceField,
};
use maze_sculptor_world::GridModel;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const SEEDS: u64 = 64;

fn random_position(rng: &mut ChaCha8Rng, side: u32) -> Position {
    Position::new(rng.gen_range(0..side), rng.gen_range(0..side))
}

fn random_grid(rng: &mut ChaCha8Rng) -> GridModel {
    let side = rng.gen_range(2..=9);
    let mut grid = GridModel::new(side).expect("valid side");

    for y in 0..side {
        for x in 0..side {
            if rng.gen_bool(0.3) {
                let _ = grid
                    .set_cell(Position::new(x, y), CellState::Wall)
                    .expect("in bounds");
            }
        }
    }

    let nucleus = random_position(rng, side);
    let _ = grid
        .set_cell(nucleus, CellState::Nucleus)
        .expect("in bounds");

    for _ in 0..rng.gen_range(1..=4) {
        let spawn = random_position(rng, side);
        if grid.cell_at(spawn) != Ok(CellState::Nucleus) {
            let _ = grid.set_cell(spawn, CellState::Spawn).expect("in bounds");
        }
    }

    grid
}

#[test]
fn open_grid_paths_achieve_manhattan_distance() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    for _ in 0..SEEDS {
        let side = rng.gen_range(1..=10);
        let grid = GridModel::new(side).expect("valid side");
        let start = random_position(&mut rng, side);
        let end = random_position(&mut rng, side);

        let path = find_path(grid.view(), start, end).expect("open grid is connected");

        assert_eq!(path.steps(), start.manhattan_distance(end));
    }
}

#[test]
fn found_paths_are_adjacent_wall_free_and_optimal() {
    for seed in 0..SEEDS {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let grid = random_grid(&mut rng);
        let view = grid.view();
        let nucleus = grid.nucleus().expect("nucleus placed");
        let mut field = DistanceField::new();
        field.rebuild(view, Some(nucleus));
        let reachable = reachable_from(view, nucleus);

        for spawn in grid.spawns() {
            let path = find_path(view, *spawn, nucleus);
            assert_eq!(path.is_some(), reachable.contains(spawn), "seed {seed}");

            let Some(path) = path else {
                assert_eq!(field.distance(*spawn), None, "seed {seed}");
                continue;
            };

            assert_eq!(path.source(), Some(*spawn));
            assert_eq!(path.target(), Some(nucleus));
            assert_eq!(Some(path.steps()), field.distance(*spawn), "seed {seed}");
            for pair in path.cells().windows(2) {
                assert!(pair[0].is_adjacent_to(pair[1]), "seed {seed}");
            }
            for cell in path.cells() {
                assert_ne!(grid.cell_at(*cell), Ok(CellState::Wall), "seed {seed}");
            }
        }
    }
}

#[test]
fn repeated_searches_return_identical_paths() {
    for seed in 0..SEEDS {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let grid = random_grid(&mut rng);
        let nucleus = grid.nucleus();

        let first = find_all_paths(grid.view(), grid.spawns(), nucleus);
        let second = find_all_paths(grid.view(), grid.spawns(), nucleus);

        assert_eq!(first, second, "seed {seed}");
    }
}

#[test]
fn aggregated_paths_are_exactly_the_successful_searches() {
    for seed in 0..SEEDS {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let grid = random_grid(&mut rng);
        let view = grid.view();
        let nucleus = grid.nucleus().expect("nucleus placed");

        let paths = find_all_paths(view, grid.spawns(), Some(nucleus));
        let individual: Vec<_> = grid
            .spawns()
            .iter()
            .filter_map(|spawn| find_path(view, *spawn, nucleus))
            .collect();

        assert!(paths.len() <= grid.spawns().len());
        assert_eq!(paths.clone().into_vec(), individual, "seed {seed}");

        let expected_max = individual.iter().map(|path| path.len() - 1).max().unwrap_or(0);
        assert_eq!(max_distance(&paths) as usize, expected_max, "seed {seed}");
    }
}

#[test]
fn validator_agrees_with_hypothetical_connectivity() {
    for seed in 0..SEEDS {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let grid = random_grid(&mut rng);
        let nucleus = grid.nucleus().expect("nucleus placed");
        let spawns = grid.spawns().to_vec();

        for (candidate, state) in grid.view().iter() {
            let verdict = would_block_all_paths(&grid, &spawns, Some(nucleus), candidate);

            if state != CellState::Empty || spawns.is_empty() {
                assert!(!verdict, "seed {seed} candidate {candidate}");
                continue;
            }

            let mut hypothetical = grid.clone();
            let _ = hypothetical
                .set_cell(candidate, CellState::Wall)
                .expect("in bounds");
            let reachable = reachable_from(hypothetical.view(), nucleus);
            let any_connected = spawns.iter().any(|spawn| reachable.contains(spawn));

            assert_eq!(verdict, !any_connected, "seed {seed} candidate {candidate}");
        }
    }
}
