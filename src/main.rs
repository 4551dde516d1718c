//! Flappy Ultimate entry point
//!
//! Native builds run headless autopilot demo sessions and print the results.
//! Demo runs are never recorded, so no leaderboard is kept. The browser build starts through `platform::web::WebGame` instead.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use flappy_ultimate::audio::Silent;
    use flappy_ultimate::persistence::{MemoryStore, Persistence};
    use flappy_ultimate::rank::rank_for;
    use flappy_ultimate::sim::{Difficulty, GamePhase, SimConfig};
    use flappy_ultimate::{Game, Settings, platform};

    /// Give up on a session after this many frames (about five minutes at 60 fps)
    const MAX_FRAMES: u64 = 18_000;

    env_logger::init();
    log::info!("Flappy Ultimate (native) starting...");
    log::info!("Native mode runs the autopilot - serve the wasm build for the playable version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or_else(|| platform::now_ms() as u64);
    log::info!("Seed {seed}");

    let mut game = Game::new(
        seed,
        SimConfig::default(),
        Persistence::new(MemoryStore::new()),
        Silent,
    );
    game.set_idle_mode(true);

    for difficulty in Difficulty::ALL {
        game.apply_settings(&Settings {
            difficulty,
            ..Default::default()
        });
        game.start();
        while game.phase() == GamePhase::Playing && game.state().frame_count < MAX_FRAMES {
            game.update();
        }
        if game.phase() == GamePhase::Playing {
            log::info!("{} run stopped at the frame cap", difficulty.name());
        }
        let state = game.state();
        println!(
            "{:<10} score {:>4}  coins {:>4}  best streak {:>3}  frames {:>6}  rank {}",
            difficulty.name(),
            state.score,
            state.coins,
            state.best_streak,
            state.frame_count,
            rank_for(state.score).name,
        );
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is WebGame, this is just to satisfy the compiler
}
