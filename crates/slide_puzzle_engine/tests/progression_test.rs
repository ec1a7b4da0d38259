//! Tests for the level progression state machine.

use slide_puzzle_engine::{
    Board, EngineError, EngineOptions, HostEvent, Level, LevelProgression, ManualTickScheduler,
    Phase, RecordingHost, TickOutcome, check_session,
};

struct Harness {
    engine: LevelProgression,
    clock: ManualTickScheduler,
    host: RecordingHost,
}

impl Harness {
    fn new(options: EngineOptions) -> Self {
        let clock = ManualTickScheduler::new();
        let host = RecordingHost::new();
        let engine = LevelProgression::new(Box::new(clock.clone()), Box::new(host.clone()), options);
        Self { engine, clock, host }
    }

    fn seeded() -> Self {
        Self::new(EngineOptions {
            seed: Some(2024),
            ..EngineOptions::default()
        })
    }

    fn tick(&mut self, times: u32) {
        for _ in 0..times {
            let epoch = self.clock.active_epoch().expect("clock should be running");
            self.engine.tick(epoch);
        }
    }
}

/// Solved layout with the last tile and the gap swapped.
fn one_move_from_solved(size: usize) -> Board {
    let mut tiles = Board::solved(size).tiles().to_vec();
    let len = tiles.len();
    tiles.swap(len - 1, len - 2);
    Board::from_tiles(size, tiles).unwrap()
}

#[test]
fn test_winning_level_one_at_full_time() {
    let mut h = Harness::seeded();
    h.engine
        .start_with_board(Level::One, one_move_from_solved(3))
        .unwrap();

    assert!(h.engine.move_tile(8));

    let state = h.engine.state();
    assert_eq!(state.level_scores[&1], 350);
    assert_eq!(state.total_score, 350);
    assert_eq!(state.current_level, Level::Two);
    assert_eq!(state.size, 4);
    assert_eq!(state.time_remaining, 420);
    assert!(state.timer_running);
    assert_eq!(state.phase, Phase::Playing);
}

#[test]
fn test_win_score_uses_time_tier() {
    let mut h = Harness::seeded();
    h.engine
        .start_with_board(Level::One, one_move_from_solved(3))
        .unwrap();
    // 120 of 240 seconds left: ratio 0.5 → 200.
    h.tick(120);

    h.engine.move_tile(8);
    assert_eq!(h.engine.session().level_scores().get(Level::One), 250);
}

#[test]
fn test_timeout_partial_score() {
    let mut h = Harness::seeded();
    let board = Board::from_tiles(3, vec![1, 2, 3, 4, 0, 8, 6, 5, 7]).unwrap();
    h.engine.start_with_board(Level::One, board).unwrap();

    h.tick(239);
    assert_eq!(h.engine.session().phase(), Phase::Playing);
    h.tick(1);

    let state = h.engine.state();
    assert_eq!(state.phase, Phase::TimedOut);
    assert_eq!(state.time_remaining, 0);
    assert!(!state.timer_running);
    assert_eq!(state.level_scores[&1], 633);
    assert_eq!(state.current_level, Level::One);
    assert!(state.message.contains("Base: 133 + Bonus: 500"));
    assert!(h.host.game_overs().is_empty());
    assert_eq!(h.clock.live_schedules(), 0);
}

#[test]
fn test_timeout_replaces_running_bonus() {
    let mut h = Harness::seeded();
    let board = Board::from_tiles(3, vec![1, 2, 0, 4, 5, 3, 6, 7, 8]).unwrap();
    h.engine.start_with_board(Level::One, board).unwrap();
    assert!(h.engine.move_tile(5));
    assert_eq!(h.engine.session().level_scores().get(Level::One), 125);

    h.tick(240);

    // Five cells in place: floor(300 * 5 / 9) + 5 * 125.
    assert_eq!(h.engine.session().level_scores().get(Level::One), 166 + 625);
}

#[test]
fn test_moves_ignored_after_timeout() {
    let mut h = Harness::seeded();
    h.engine.start_game(Level::One, true);
    h.tick(240);
    let before = h.engine.session().board().clone();

    for index in 0..9 {
        assert!(!h.engine.move_tile(index));
    }
    assert_eq!(h.engine.session().board(), &before);
}

#[test]
fn test_level_three_win_ends_session() {
    let mut h = Harness::seeded();
    h.engine
        .start_with_board(Level::Three, one_move_from_solved(5))
        .unwrap();

    assert!(h.engine.move_tile(24));

    let state = h.engine.state();
    assert_eq!(state.phase, Phase::Won);
    assert_eq!(state.current_level, Level::Three);
    assert!(!state.timer_running);
    assert_eq!(state.level_scores[&3], 350);
    assert_eq!(h.host.game_overs(), vec![350]);
    assert!(!h.engine.move_tile(23));
}

#[test]
fn test_final_completion_bonus_is_optional() {
    let mut h = Harness::new(EngineOptions {
        seed: Some(3),
        final_completion_bonus: 500,
        ..EngineOptions::default()
    });
    h.engine
        .start_with_board(Level::Three, one_move_from_solved(5))
        .unwrap();
    h.engine.move_tile(24);

    assert_eq!(h.engine.session().level_scores().get(Level::Three), 850);
    assert_eq!(h.host.game_overs(), vec![850]);
}

#[test]
fn test_huge_final_bonus_caps_total_score() {
    let mut h = Harness::new(EngineOptions {
        seed: Some(3),
        final_completion_bonus: u32::MAX,
        ..EngineOptions::default()
    });
    h.engine
        .start_with_board(Level::Three, one_move_from_solved(5))
        .unwrap();
    assert!(h.engine.move_tile(24));

    let state = h.engine.state();
    assert_eq!(state.phase, Phase::Won);
    assert_eq!(state.level_scores[&3], u32::MAX);
    assert_eq!(state.total_score, u32::MAX);
    assert_eq!(h.host.game_overs(), vec![u32::MAX]);
}

#[test]
fn test_level_three_timeout_ends_session() {
    let mut h = Harness::seeded();
    h.engine
        .start_with_board(Level::One, one_move_from_solved(3))
        .unwrap();
    h.engine.move_tile(8);
    h.engine.start_game(Level::Three, true);

    h.tick(600);

    let state = h.engine.state();
    assert_eq!(state.phase, Phase::TimedOut);
    assert_eq!(h.host.game_overs(), vec![state.total_score]);
    assert!(state.total_score >= 350);
    assert!(state.message.contains("Level 3 (Expert)"));
}

#[test]
fn test_full_run_through_three_levels() {
    let mut h = Harness::seeded();
    for level in [Level::One, Level::Two, Level::Three] {
        let size = level.config().size();
        h.engine
            .start_with_board(level, one_move_from_solved(size))
            .unwrap();
        assert!(h.engine.move_tile(size * size - 1));
    }

    let state = h.engine.state();
    assert_eq!(state.total_score, 1050);
    assert_eq!(h.host.game_overs(), vec![1050]);
}

#[test]
fn test_restart_never_leaves_two_clocks() {
    let mut h = Harness::seeded();
    for _ in 0..5 {
        h.engine.start_game(Level::Two, true);
        h.tick(3);
    }
    assert_eq!(h.clock.live_schedules(), 1);
    assert_eq!(h.clock.schedules_created(), 5);
    assert_eq!(h.engine.session().time_remaining(), 417);
}

#[test]
fn test_stale_epoch_cannot_double_decrement() {
    let mut h = Harness::seeded();
    h.engine.start_game(Level::One, true);
    let old = h.clock.active_epoch().unwrap();
    h.engine.start_game(Level::One, true);
    let new = h.clock.active_epoch().unwrap();

    assert_eq!(h.engine.tick(old), TickOutcome::Stale);
    assert_eq!(h.engine.tick(new), TickOutcome::Ticked(239));
}

#[test]
fn test_every_accepted_move_sends_haptic_feedback() {
    let mut h = Harness::seeded();
    let board = Board::from_tiles(3, vec![1, 2, 3, 4, 0, 5, 6, 7, 8]).unwrap();
    h.engine.start_with_board(Level::One, board).unwrap();

    assert!(h.engine.move_tile(5));
    assert!(!h.engine.move_tile(0));
    assert!(h.engine.move_tile(4));

    assert_eq!(
        h.host.events(),
        vec![
            HostEvent::Ready,
            HostEvent::HapticFeedback,
            HostEvent::HapticFeedback
        ]
    );
}

#[test]
fn test_level_change_resets_clock_and_board() {
    let mut h = Harness::seeded();
    h.engine.start_game(Level::One, true);
    h.tick(10);

    h.engine.start_game(Level::Three, false);

    let state = h.engine.state();
    assert_eq!(state.current_level, Level::Three);
    assert_eq!(state.size, 5);
    assert_eq!(state.time_remaining, 600);
    assert!(check_session(h.engine.session()).is_ok());
}

#[test]
fn test_start_with_board_rejects_wrong_size() {
    let mut h = Harness::seeded();
    let err = h
        .engine
        .start_with_board(Level::Two, Board::solved(3))
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidBoard(_)));
    assert_eq!(h.engine.session().phase(), Phase::Idle);
}

#[test]
fn test_snapshot_serializes_for_presentation() {
    let mut h = Harness::seeded();
    h.engine.start_game(Level::One, true);

    let json = serde_json::to_value(h.engine.state()).unwrap();
    assert_eq!(json["current_level"], 1);
    assert_eq!(json["phase"], "playing");
    assert_eq!(json["board"].as_array().unwrap().len(), 9);
    assert_eq!(json["level_scores"]["3"], 0);
}
