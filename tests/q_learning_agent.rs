//! Q-learning agent behaviour: move selection, credit assignment, exploration

use qtoe::{
    Position,
    ports::Agent,
    q_learning::{QLearningAgent, QLearningConfig},
    tictactoe::{Board, GameEngine, GameStatus, Player},
};

fn greedy() -> QLearningConfig {
    QLearningConfig {
        epsilon: 0.0,
        ..QLearningConfig::default()
    }
}

#[test]
fn greedy_play_on_empty_table_is_first_empty_cell() {
    let boards = [
        Board::new(3),
        Board::from_string("X.. ... ...").unwrap(),
        Board::from_string("XO. X.. ...").unwrap(),
        Board::from_string("XOXO ..X. .... ....").unwrap(),
    ];
    let expected = [
        Position::new(0, 0),
        Position::new(0, 1),
        Position::new(0, 2),
        Position::new(1, 0),
    ];

    for seed in [1, 2, 3] {
        let mut agent = QLearningAgent::new(greedy()).unwrap().with_seed(seed);
        for (board, want) in boards.iter().zip(expected) {
            assert_eq!(agent.choose_move(board), Some(want));
        }
        assert_eq!(agent.history().len(), boards.len());
    }
}

/// Agent plays X; O answers from `replies`. Returns the agent's (state, action)
/// pairs in play order.
fn play_scripted_episode(
    agent: &mut QLearningAgent,
    replies: &[Position],
) -> Vec<(qtoe::StateKey, Position)> {
    let mut engine = GameEngine::new(3).unwrap();
    let mut replies = replies.iter();
    agent.begin_episode();
    while engine.status() == GameStatus::Ongoing {
        match engine.next_player() {
            Some(Player::X) => {
                let pos = agent.choose_move(engine.board()).unwrap();
                engine.play(Player::X, pos).unwrap();
            }
            Some(Player::O) => {
                let pos = *replies.next().expect("enough scripted replies");
                engine.play(Player::O, pos).unwrap();
            }
            None => break,
        }
    }
    assert_eq!(engine.winner(), Some(Player::X));
    agent.history().steps().to_vec()
}

#[test]
fn repeated_winning_trajectory_converges_monotonically() {
    let mut agent = QLearningAgent::new(greedy()).unwrap();
    let replies = [Position::new(1, 0), Position::new(1, 1)];

    let first = play_scripted_episode(&mut agent, &replies);
    assert_eq!(
        first.iter().map(|(_, a)| *a).collect::<Vec<_>>(),
        vec![Position::new(0, 0), Position::new(0, 1), Position::new(0, 2)]
    );
    agent.update_from_result(1.0);

    let mut previous: Vec<f64> = first.iter().map(|(s, a)| agent.q_value(s, *a)).collect();
    assert!(previous.iter().all(|&v| v > 0.0));

    for _ in 0..30 {
        let trajectory = play_scripted_episode(&mut agent, &replies);
        assert_eq!(trajectory, first);
        agent.update_from_result(1.0);

        let current: Vec<f64> = first.iter().map(|(s, a)| agent.q_value(s, *a)).collect();
        for (old, new) in previous.iter().zip(&current) {
            assert!(new >= old, "value decreased from {old} to {new}");
            assert!(*new > 0.0 && *new <= 1.0);
        }
        previous = current;
    }

    // Last move approaches the reward, earlier ones approach γ times their successor
    assert!((previous[2] - 1.0).abs() < 0.01);
    assert!(previous[1] < previous[2]);
    assert!(previous[0] < previous[1]);
}

#[test]
fn first_update_matches_backward_chain() {
    let config = QLearningConfig {
        learning_rate: 0.5,
        discount_factor: 0.8,
        epsilon: 0.0,
        ..QLearningConfig::default()
    };
    let mut agent = QLearningAgent::new(config).unwrap();
    let steps = play_scripted_episode(&mut agent, &[Position::new(2, 0), Position::new(2, 1)]);
    agent.update_from_result(-1.0);

    // newest: 0.5 * (-1) = -0.5; then 0.5 * 0.8 * -0.5 = -0.2; then 0.5 * 0.8 * -0.2 = -0.08
    let values: Vec<f64> = steps.iter().map(|(s, a)| agent.q_value(s, *a)).collect();
    assert!((values[2] + 0.5).abs() < 1e-12);
    assert!((values[1] + 0.2).abs() < 1e-12);
    assert!((values[0] + 0.08).abs() < 1e-12);
    assert!(agent.history().is_empty());
    assert_eq!(agent.value_table_size(), Some(3));
    assert_eq!(agent.q_table().state_count(), 3);
}

#[test]
fn exploration_only_picks_empty_cells() {
    let config = QLearningConfig {
        epsilon: 1.0,
        ..QLearningConfig::default()
    };
    let mut agent = QLearningAgent::new(config).unwrap().with_seed(5);
    let board = Board::from_string("XOX .O. X..").unwrap();
    for _ in 0..50 {
        let pos = agent.choose_move(&board).unwrap();
        assert!(board.is_empty(pos));
    }
}

#[test]
fn full_board_has_no_action() {
    let mut agent = QLearningAgent::new(QLearningConfig::default()).unwrap();
    let board = Board::from_string("XOXXOOOXX").unwrap();
    assert_eq!(agent.choose_move(&board), None);
    assert!(agent.history().is_empty());
}
