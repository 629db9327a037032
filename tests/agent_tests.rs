//! Agent behavior tests against real galaxies.

use std::sync::Arc;
use std::time::{Duration, Instant};

use konquest::{
    decision_pipe, Action, Agent, AlphaBetaAgent, GameRng, MinimaxAgent, OwnerId, Planet,
    PlanetInfo, RandomAgent, RolloutAgent, Universe,
};

fn planet(name: &str, position: (i32, i32), owner: OwnerId, ships: u32) -> Planet {
    Planet::new(
        Arc::new(PlanetInfo::new(name, position, 10, 100)),
        owner,
        ships,
    )
}

/// Run a decision to completion (for self-terminating agents).
fn decide_sync(agent: &dyn Agent, state: &Universe, seed: u64) -> Option<Action> {
    let (mut yielder, receiver) = decision_pipe();
    let mut rng = GameRng::new(seed);
    agent.decide(state.clone(), &mut rng, &mut yielder);
    drop(yielder);
    receiver.collect(None).action
}

/// Run a decision under a deadline on a worker thread (for anytime agents).
fn decide_with_budget(agent: Arc<dyn Agent>, state: &Universe, budget: Duration) -> Option<Action> {
    let (mut yielder, receiver) = decision_pipe();
    let snapshot = state.clone();
    let handle = std::thread::spawn(move || {
        let mut rng = GameRng::new(77);
        agent.decide(snapshot, &mut rng, &mut yielder);
    });
    let decision = receiver.collect(Some(Instant::now() + budget));
    receiver.cancel();
    handle.join().unwrap();
    decision.action
}

fn assert_legal(state: &Universe, action: Action) {
    let mut state = state.clone();
    assert!(
        state.successors().iter().any(|(a, _)| *a == action),
        "{action} must be in the legal set"
    );
}

// =============================================================================
// Legality across the roster
// =============================================================================

#[test]
fn test_all_agents_yield_legal_actions() {
    let state = Universe::big_bang(&["alice", "bob"], 3, 42).initialize();

    let action = decide_sync(&RandomAgent, &state, 1).expect("random yields");
    assert_legal(&state, action);

    let action = decide_sync(&MinimaxAgent::new(2), &state, 2).expect("minimax yields");
    assert_legal(&state, action);

    let action = decide_sync(&AlphaBetaAgent::new(1, 2), &state, 3).expect("alpha-beta yields");
    assert_legal(&state, action);

    let action = decide_with_budget(Arc::new(RolloutAgent), &state, Duration::from_millis(400))
        .expect("rollout yields within budget");
    assert_legal(&state, action);
}

#[test]
fn test_agents_tolerate_branching_factor_one() {
    // Red cannot launch anything: fortify is the entire action set.
    let state = Universe::custom(
        vec![
            planet("A", (0, 0), OwnerId::Red, 1),
            planet("B", (3, 2), OwnerId::Blue, 10),
        ],
        &["alice", "bob"],
        8,
        42,
    );

    for action in [
        decide_sync(&RandomAgent, &state, 1),
        decide_sync(&MinimaxAgent::default(), &state, 2),
        decide_sync(&AlphaBetaAgent::new(1, 3), &state, 3),
        decide_with_budget(Arc::new(RolloutAgent), &state, Duration::from_millis(300)),
    ] {
        assert!(action.expect("always yields something").is_fortify());
    }
}

// =============================================================================
// Decision quality on forced positions
// =============================================================================

/// Blue's lone planet next door holds 1.00 ship at production 0.40: it
/// can never reach the 2-ship launch threshold in time, so every reply
/// is a forced fortify. A 4- or 8-ship wave arrives at the end of the
/// second round against at most 1.80 defenders and wins the game
/// outright; a depth-4 search sees the terminal state and must attack.
fn forced_kill_position() -> Universe {
    Universe::custom(
        vec![
            planet("A", (0, 0), OwnerId::Red, 10),
            Planet::new(
                Arc::new(PlanetInfo::new("B", (1, 0), 10, 40)),
                OwnerId::Blue,
                1,
            ),
        ],
        &["alice", "bob"],
        40,
        42,
    )
}

#[test]
fn test_minimax_finishes_off_a_beaten_opponent() {
    let state = forced_kill_position();
    let action = decide_sync(&MinimaxAgent::new(4), &state, 5).expect("minimax yields");
    assert!(!action.is_fortify(), "must press the attack, got {action}");
    assert!(action.ships >= 4, "2 ships cannot break the defense");
    assert_eq!(action.destination_index(), 1);
}

#[test]
fn test_alpha_beta_finishes_off_a_beaten_opponent() {
    let state = forced_kill_position();
    let action = decide_sync(&AlphaBetaAgent::new(1, 4), &state, 5).expect("alpha-beta yields");
    assert!(!action.is_fortify(), "must press the attack, got {action}");
    assert!(action.ships >= 4, "2 ships cannot break the defense");
    assert_eq!(action.destination_index(), 1);
}

// =============================================================================
// Contract details
// =============================================================================

#[test]
fn test_decide_does_not_depend_on_previous_calls() {
    // Two decisions from the same snapshot and seed are identical; no
    // internal result persists between invocations.
    let state = Universe::big_bang(&["alice", "bob"], 2, 11).initialize();
    let agent = MinimaxAgent::new(3);
    let first = decide_sync(&agent, &state, 9);
    let second = decide_sync(&agent, &state, 9);
    assert_eq!(first, second);
}

#[test]
fn test_agent_info_names() {
    assert_eq!(RandomAgent.info().name, "Random");
    assert_eq!(MinimaxAgent::default().info().name, "Minimax-simple");
    assert_eq!(AlphaBetaAgent::default().info().name, "ID-AlphaBeta");
    assert_eq!(RolloutAgent.info().name, "Rollout");
}

#[test]
fn test_rollout_survives_terminal_heavy_positions() {
    // One round left: every playout is terminal almost immediately.
    let state = Universe::custom(
        vec![
            planet("A", (0, 0), OwnerId::Red, 10),
            planet("B", (3, 2), OwnerId::Blue, 10),
        ],
        &["alice", "bob"],
        1,
        42,
    );
    let action = decide_with_budget(Arc::new(RolloutAgent), &state, Duration::from_millis(200))
        .expect("rollout yields");
    assert_legal(&state, action);
}
