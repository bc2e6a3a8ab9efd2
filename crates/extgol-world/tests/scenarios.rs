//! Whole-game scenarios driven through the public API.

use extgol_core::{BoardConfig, CellConfig, CellType, Coord, Error, GameConfig, GameId, Mood};
use extgol_world::{Board, Game, IMMUNITY_EXHAUSTED};
use std::collections::BTreeSet;

fn coords(points: &[(i32, i32)]) -> BTreeSet<Coord> {
    points.iter().map(|&(x, y)| Coord::new(x, y)).collect()
}

fn game_with(width: i32, height: i32, defaults: CellConfig) -> Game {
    let board = Board::populated(GameId::new(), width, height, &defaults).unwrap();
    Game::from_board(board)
}

fn basic_game(width: i32, height: i32) -> Game {
    game_with(width, height, CellConfig::default())
}

#[test]
fn test_glider_seed_on_three_by_three() {
    let mut game = basic_game(3, 3);
    let seed = [
        Coord::new(1, 0),
        Coord::new(2, 1),
        Coord::new(0, 2),
        Coord::new(1, 2),
        Coord::new(2, 2),
    ];
    game.board_mut().set_alive_at(&seed).unwrap();

    let generation = game.step().unwrap();

    // The glider's next frame, clipped to the board: (1, 3) falls off the edge
    let expected = coords(&[(0, 1), (2, 1), (1, 2), (2, 2)]);
    assert_eq!(generation.alive, expected);
    assert_eq!(game.board().alive_coords(), expected);
}

#[test]
fn test_isolated_cell_dies() {
    let mut game = basic_game(3, 3);
    game.board_mut().set_alive_at(&[Coord::new(1, 1)]).unwrap();

    let generation = game.step().unwrap();
    assert!(generation.alive.is_empty());
    assert_eq!(generation.stats.deaths, 1);
}

#[test]
fn test_loner_pair_survives() {
    let defaults = CellConfig {
        default_type: CellType::Loner,
        ..Default::default()
    };
    let mut game = game_with(2, 1, defaults);
    game.board_mut()
        .set_alive_at(&[Coord::new(0, 0), Coord::new(1, 0)])
        .unwrap();
    game.step().unwrap();
    assert_eq!(game.board().alive_count(), 2);

    // The same pair of basic cells starves
    let mut game = basic_game(2, 1);
    game.board_mut()
        .set_alive_at(&[Coord::new(0, 0), Coord::new(1, 0)])
        .unwrap();
    game.step().unwrap();
    assert_eq!(game.board().alive_count(), 0);
}

#[test]
fn test_social_crowd_survives() {
    let defaults = CellConfig {
        default_type: CellType::Social,
        ..Default::default()
    };
    let mut game = game_with(3, 3, defaults);
    let all: Vec<Coord> = game.board().tiles().iter().map(|t| t.coord()).collect();
    game.board_mut().set_alive_at(&all).unwrap();

    game.step().unwrap();
    assert_eq!(game.board().alive_count(), 9);
}

#[test]
fn test_highlander_lifecycle() {
    let defaults = CellConfig {
        default_type: CellType::Highlander,
        ..Default::default()
    };
    let mut game = game_with(1, 1, defaults);
    let origin = Coord::new(0, 0);
    game.board_mut().set_alive_at(&[origin]).unwrap();

    for expected in 1..=3 {
        let generation = game.step().unwrap();
        assert!(generation.is_alive(origin));
        assert_eq!(generation.stats.reprieves, 1);
        let cell = game.board().cell_at(origin).unwrap().unwrap();
        assert_eq!(cell.skipped_gen(), expected);
    }

    let generation = game.step().unwrap();
    assert!(!generation.is_alive(origin));
    assert_eq!(generation.stats.exhausted, 1);
    assert_eq!(
        game.board().cell_at(origin).unwrap().unwrap().skipped_gen(),
        IMMUNITY_EXHAUSTED
    );

    // Revived by hand, it no longer gets a reprieve
    game.board_mut()
        .cell_at_mut(origin)
        .unwrap()
        .unwrap()
        .set_alive(true);
    let generation = game.step().unwrap();
    assert!(!generation.is_alive(origin));
    assert_eq!(generation.stats.reprieves, 0);
    assert_eq!(
        game.board().cell_at(origin).unwrap().unwrap().skipped_gen(),
        IMMUNITY_EXHAUSTED
    );
}

#[test]
fn test_vampire_spreads_one_ring_per_step() {
    // A block of four keeps every cell alive, so contagion is visible
    let mut game = basic_game(4, 4);
    let block = [Coord::new(1, 1), Coord::new(2, 1), Coord::new(1, 2), Coord::new(2, 2)];
    game.board_mut().set_alive_at(&block).unwrap();
    game.board_mut()
        .cell_at_mut(Coord::new(1, 1))
        .unwrap()
        .unwrap()
        .set_mood(Mood::Vampire);

    let generation = game.step().unwrap();
    assert_eq!(generation.stats.interactions, 3);

    let vampire = game.board().cell_at(Coord::new(1, 1)).unwrap().unwrap();
    assert_eq!(vampire.life_points(), 3);
    for &c in &block[1..] {
        let cell = game.board().cell_at(c).unwrap().unwrap();
        assert_eq!(cell.mood(), Mood::Vampire, "cell {}", c);
        assert_eq!(cell.life_points(), -1, "cell {}", c);
    }

    // Everyone is a vampire now: no more exchanges
    let generation = game.step().unwrap();
    assert_eq!(generation.stats.interactions, 0);
}

#[test]
fn test_history_grows_once_per_step() {
    let config = GameConfig {
        board: BoardConfig {
            width: 6,
            height: 5,
        },
        seed: 1234,
        alive_density: 0.4,
        ..Default::default()
    };
    let mut game = Game::new(&config).unwrap();
    let steps = 6;
    game.evolve(steps).unwrap();

    for cell in game.board().cells() {
        let history = cell.generations();
        assert_eq!(history.len(), steps);
        assert!(history.windows(2).all(|w| w[0] < w[1]));
    }

    for generation in game.generations() {
        assert_eq!(generation.members.len(), 30);
    }
}

#[test]
fn test_failed_step_leaves_board_untouched() {
    let mut board = Board::new(GameId::new(), 3, 1).unwrap();
    board.place_cell(Coord::new(0, 0)).unwrap().set_alive(true);
    board.place_cell(Coord::new(1, 0)).unwrap().set_alive(true);
    let mut game = Game::from_board(board);

    let before = game.board().alive_coords();
    assert!(matches!(game.step(), Err(Error::InconsistentBoard(_))));
    assert_eq!(game.board().alive_coords(), before);
    assert!(game.generations().is_empty());
    assert!(game.board().cells().all(|c| c.generations().is_empty()));

    // Completing the board makes it steppable
    game.board_mut().place_cell(Coord::new(2, 0)).unwrap();
    assert_eq!(game.step().unwrap().index, 1);
}
