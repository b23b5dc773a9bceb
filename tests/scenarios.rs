use slither_engine::game::{
    Board, CollisionType, Direction, EngineError, Position, SimulationEngine, StepOutcome,
};

fn p(x: i32, y: i32) -> Position {
    Position::new(x, y)
}

fn engine_with(board: Board) -> SimulationEngine {
    let mut engine = SimulationEngine::seeded(2024);
    engine.load(board);
    engine
}

#[test]
fn plain_move_drops_the_tail() {
    let board = Board::from_parts(
        10,
        vec![p(5, 5), p(5, 6), p(5, 7)],
        vec![p(1, 1), p(8, 8)],
        Some(p(2, 7)),
        Direction::Up,
    )
    .unwrap();
    let mut engine = engine_with(board);

    let result = engine.step().unwrap();

    assert_eq!(result.outcome, StepOutcome::Moved);
    assert_eq!(result.snapshot.snake, vec![p(5, 4), p(5, 5), p(5, 6)]);
    assert!(!result.snapshot.game_over);
}

#[test]
fn growth_item_lengthens_and_respawns() {
    let board = Board::from_parts(
        10,
        vec![p(5, 5), p(5, 6), p(5, 7)],
        vec![p(5, 4), p(8, 8)],
        Some(p(2, 7)),
        Direction::Up,
    )
    .unwrap();
    let mut engine = engine_with(board);

    let snap = engine.step().unwrap().snapshot;

    assert_eq!(snap.snake, vec![p(5, 4), p(5, 5), p(5, 6), p(5, 7)]);
    assert_eq!(snap.greens.len(), 2);
    assert!(snap.greens.contains(&p(8, 8)));
    assert!(!snap.greens.contains(&p(5, 4)));
    assert!(snap.greens.iter().all(|g| !snap.snake.contains(g)));
}

#[test]
fn shrink_item_on_single_segment_ends_game() {
    let board = Board::from_parts(10, vec![p(0, 0)], vec![p(4, 4), p(6, 6)], Some(p(0, 1)), Direction::Down).unwrap();
    let mut engine = engine_with(board);

    let result = engine.step().unwrap();

    assert_eq!(result.outcome, StepOutcome::Starved);
    assert!(result.snapshot.game_over);
}

#[test]
fn leaving_the_grid_ends_game_without_moving() {
    let board = Board::from_parts(10, vec![p(0, 0), p(0, 1)], vec![p(4, 4), p(6, 6)], Some(p(3, 3)), Direction::Up).unwrap();
    let mut engine = engine_with(board);

    let result = engine.step().unwrap();

    assert_eq!(result.outcome, StepOutcome::Collided(CollisionType::Wall));
    assert!(result.snapshot.game_over);
    assert_eq!(result.snapshot.snake, vec![p(0, 0), p(0, 1)]);
}

#[test]
fn game_over_is_terminal() {
    let board = Board::from_parts(10, vec![p(0, 0), p(0, 1)], vec![], None, Direction::Left).unwrap();
    let mut engine = engine_with(board);
    engine.step().unwrap();
    let over = engine.snapshot().unwrap();

    for dir in Direction::ALL {
        assert!(!engine.set_direction(dir).unwrap());
        let result = engine.step().unwrap();
        assert_eq!(result.outcome, StepOutcome::Halted);
        assert_eq!(result.snapshot, over);
    }
}

#[test]
fn restart_replaces_the_board() {
    let mut engine = SimulationEngine::seeded(5);
    engine.initialize(6).unwrap();
    while !engine.step().unwrap().snapshot.game_over {}

    let fresh = engine.initialize(6).unwrap();
    assert!(!fresh.game_over);
    assert_eq!(fresh.len(), 3);
}

#[test]
fn contract_violations_are_errors() {
    let mut engine = SimulationEngine::seeded(1);
    assert_eq!(engine.step().unwrap_err(), EngineError::NotInitialized);
    assert_eq!(
        engine.set_direction(Direction::Up).unwrap_err(),
        EngineError::NotInitialized
    );
    assert_eq!(
        engine.initialize(2).unwrap_err(),
        EngineError::GridTooSmall { grid_size: 2 }
    );
    assert!(engine.initialize(3).is_ok());
}

#[test]
fn snapshot_is_detached_from_the_engine() {
    let mut engine = SimulationEngine::seeded(9);
    let mut snap = engine.initialize(10).unwrap();
    snap.snake.clear();
    snap.game_over = true;

    let current = engine.snapshot().unwrap();
    assert_eq!(current.len(), 3);
    assert!(!current.game_over);
}
