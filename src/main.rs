//! Self-play demo from the starting position.
//!
//! Run with:
//! `RUST_LOG=debug PLY_CHESS_DEPTH=3 cargo run --release`
//!
//! White is always the minimax computer. `PLY_CHESS_OPPONENT=random` hands
//! black to the random engine instead. `PLY_CHESS_OPENING="e2e4 e7e5"` plays
//! fixed coordinate moves first, `PLY_CHESS_MOVETIME_MS` caps each search and
//! `PLY_CHESS_MAX_PLIES` ends the demo early.

use std::str::FromStr;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use ply_chess::engines::engine_random::RandomEngine;
use ply_chess::engines::engine_trait::{Engine, SearchParams};
use ply_chess::game::game::{Game, MoveApplied};
use ply_chess::game::player::{GameConfig, PlayerKind};
use ply_chess::search::iterative_deepening::SearchConfig;
use ply_chess::utils::algebraic::{parse_coordinate_move, square_to_algebraic};
use ply_chess::utils::render_position::render_position;

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(name, value = %raw, "ignoring unparsable setting");
            default
        }),
        Err(_) => default,
    }
}

fn print_move(ply: usize, applied: &MoveApplied) {
    println!(
        "{ply}. {} {}{}",
        applied.record.mover(),
        square_to_algebraic(applied.record.from),
        square_to_algebraic(applied.record.to)
    );
}

fn main() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let search = SearchConfig {
        max_depth: env_or("PLY_CHESS_DEPTH", SearchConfig::default().max_depth).max(1),
        ..SearchConfig::default()
    };
    let movetime_ms = std::env::var("PLY_CHESS_MOVETIME_MS")
        .ok()
        .and_then(|raw| raw.trim().parse::<u64>().ok());
    let max_plies: usize = env_or("PLY_CHESS_MAX_PLIES", 80);
    let opening = std::env::var("PLY_CHESS_OPENING").unwrap_or_default();

    // The random opponent is driven from here, so the controller sees a human.
    let mut random_opponent = std::env::var("PLY_CHESS_OPPONENT")
        .is_ok_and(|kind| kind.trim().eq_ignore_ascii_case("random"))
        .then(RandomEngine::new);
    let dark = match random_opponent {
        Some(_) => PlayerKind::Human,
        None => PlayerKind::Computer(search),
    };

    let mut game = Game::new(GameConfig {
        players: [PlayerKind::Computer(search), dark],
        ..GameConfig::default()
    });
    if let Some(engine) = &random_opponent {
        info!(opponent = engine.name(), "black plays random moves");
    }

    let mut ply = 0;
    for text in opening.split([' ', ',']).filter(|text| !text.is_empty()) {
        let (from, to) = parse_coordinate_move(text)?;
        let applied = game.make_move(from, to).map_err(|err| err.to_string())?;
        ply += 1;
        print_move(ply, &applied);
    }
    println!("{}", render_position(game.position()));

    while ply < max_plies && !game.status().is_over() {
        let applied = if game.computer_should_move() {
            game.play_computer_move(movetime_ms).map_err(|err| err.to_string())?
        } else if let Some(engine) = random_opponent.as_mut() {
            let side = game.side_to_move();
            let result = engine
                .choose_move(game.position(), side, &SearchParams::default())
                .map_err(|err| err.to_string())?;
            let Some(mv) = result.best_move else {
                break;
            };
            game.make_move(mv.from, mv.to).map_err(|err| err.to_string())?
        } else {
            break;
        };
        ply += 1;
        print_move(ply, &applied);
        println!("{}", render_position(game.position()));
    }

    let moves: Vec<String> = game
        .history()
        .applied_moves()
        .iter()
        .map(|record| format!("{}{}", square_to_algebraic(record.from), square_to_algebraic(record.to)))
        .collect();
    println!("moves: {}", moves.join(" "));
    println!("result: {}", game.status());
    Ok(())
}
