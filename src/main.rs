//! Starship Troopers entry point
//!
//! Headless demo run: plays a seeded game with a simple autopilot, then
//! submits the final score to an in-memory ledger and prints the resulting
//! leaderboard. Useful for eyeballing balance and for reproducing runs by
//! seed.
//!
//! Environment:
//! - `SEED`: run seed (default 42)
//! - `MAX_TICKS`: tick cap in case the autopilot never dies (default 36000)

use starship_troopers::consts::*;
use starship_troopers::leaderboard::{Address, Leaderboard, LedgerClient, MemoryLedger};
use starship_troopers::sim::{GamePhase, GameState, TickInput, tick};

fn env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Chase the lowest enemy's column and hold fire. Dumb on purpose; it dies
/// eventually, which is what the demo needs.
fn autopilot(state: &GameState) -> TickInput {
    let target = state
        .enemies
        .iter()
        .max_by(|a, b| a.rect.pos.y.total_cmp(&b.rect.pos.y))
        .map(|e| e.rect.center().x);

    let here = state.player.rect.center().x;
    let (left, right) = match target {
        Some(x) if x < here - PLAYER_SPEED => (true, false),
        Some(x) if x > here + PLAYER_SPEED => (false, true),
        _ => (false, false),
    };
    TickInput {
        left,
        right,
        up: false,
        down: false,
        shoot: true,
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let seed = env_u64("SEED", 42);
    let max_ticks = env_u64("MAX_TICKS", 36_000);

    let mut state = GameState::new(seed);
    state.start_game();
    while state.phase == GamePhase::Playing && state.time_ticks < max_ticks {
        let input = autopilot(&state);
        tick(&mut state, &input);
    }
    log::info!(
        "run finished: score {} level {} after {} ticks",
        state.score,
        state.level,
        state.time_ticks
    );

    if !state.submit_eligible {
        log::warn!("run hit the tick cap without ending; nothing to submit");
        return Ok(());
    }

    // Seed a small field of rivals so the demo board has context
    let ledger = MemoryLedger::new();
    for (n, score) in [(2u8, 700u64), (3, 1500), (4, 300)] {
        ledger
            .submit_score(
                &Address::parse(&format!("0x{:040x}", n))?,
                score,
                1,
                &Address::zero(),
            )
            .await?;
    }

    let mut board = Leaderboard::new(ledger);
    board
        .connect(Address::parse(&format!("0x{:040x}", 1u8))?)
        .await;

    if board.can_submit_score(state.score) {
        board.submit_score(state.score, state.level).await?;
    } else {
        log::info!("score {} does not beat the recorded best", state.score);
    }
    board.load_game_stats().await;

    println!("{}", serde_json::to_string_pretty(board.entries())?);
    println!("{}", serde_json::to_string_pretty(board.game_stats())?);
    Ok(())
}
