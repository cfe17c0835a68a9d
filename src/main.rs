//! Peggle headless demo
//!
//! Plays one turn-based game on a preloaded level and prints the final
//! snapshot as JSON. Pass a path to a JSON `GameConfig` as the first argument
//! to override the defaults.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use peggle::GameConfig;
    use peggle::game::{Boundary, GameEngine};
    use peggle::model::{IdAllocator, preloaded_levels};

    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| GameConfig::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(config) => config,
            Err(e) => {
                log::error!("Failed to load config from {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => GameConfig::default(),
    };

    let mut ids = IdAllocator::new(config.id_seed);
    let levels = preloaded_levels(config.board_width, config.board_height, &mut ids);
    let Some(level) = levels.into_iter().next() else {
        log::error!("No preloaded levels");
        std::process::exit(1);
    };

    log::info!("Peggle (native) playing level {}", level.name);

    let boundary = Boundary::new(config.board_width, config.board_height);
    let mut engine = GameEngine::with_config(config, level.board, boundary);

    // Aim every shot at the remaining point pegs from the top center
    let source = peggle::physics::Position::new(config.board_width / 2.0, 60.0);
    let tick_budget = 60 * 60 * 5;

    for _ in 0..tick_budget {
        let state = engine.snapshot();
        if !state.is_ongoing() {
            break;
        }

        if !state.is_ball_in_play() && state.remaining_balls() > 0 {
            let target = state
                .board()
                .point_pegs()
                .next()
                .map(|peg| peg.center)
                .unwrap_or(source);
            engine.launch_ball(source, target);
        }

        engine.refresh(config.max_delta_time);
    }

    let state = engine.snapshot();
    let outcome = if state.is_won() {
        "won"
    } else if state.is_lost() {
        "lost"
    } else {
        "unfinished"
    };
    log::info!(
        "Game {} with {} balls left and {} pegs on the board",
        outcome,
        state.remaining_balls(),
        state.pegs().len()
    );

    match serde_json::to_string_pretty(state) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Hosts embed the library directly on wasm
}
