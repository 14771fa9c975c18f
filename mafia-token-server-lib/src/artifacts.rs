//! Training artifacts: the final per-player token sequences as JSON, plus
//! informational text renderings. Pure functions of the terminal state;
//! file names are seed-qualified so multiple games can share a directory.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use mafia_token_lib::GameId;
use mafia_token_lib::Seat;
use mafia_token_lib::Token;
use mafia_token_lib::tokens::render;
use mafia_token_engine_lib::TurnServer;
use serde::Serialize;

use crate::error::ServerError;

/// Structure a token stream for human eyes: one section per phase, one line
/// per turn.
pub fn render_readable(tokens: &[Token]) -> String {
    let mut out = String::new();
    let mut line = Vec::new();

    let mut flush_line = |out: &mut String, line: &mut Vec<Token>| {
        if !line.is_empty() {
            out.push_str(&render(line));
            out.push('\n');
            line.clear();
        }
    };

    for &token in tokens {
        if token.is_phase() {
            flush_line(&mut out, &mut line);
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&format!("=== {} ===\n", token.name()));
        } else if matches!(
            token,
            Token::DayPhaseStart
                | Token::NightPhaseStart
                | Token::VotingPhaseStart
                | Token::RevotePhase
                | Token::EliminateAllVote
        ) {
            flush_line(&mut out, &mut line);
            out.push_str(&format!("--- {} ---\n", token.name()));
        } else if matches!(token, Token::RedTeamWon | Token::BlackTeamWon) {
            flush_line(&mut out, &mut line);
            out.push_str(&format!("=== {} ===\n", token.name()));
        } else {
            line.push(token);
            if token == Token::EndTurn {
                flush_line(&mut out, &mut line);
            }
        }
    }
    flush_line(&mut out, &mut line);
    out
}

#[derive(Serialize)]
struct PlayerMetadata {
    player_id: usize,
    seed: u16,
    game_result: String,
    game_id: GameId,
    description: String,
}

#[derive(Serialize)]
struct PlayerArtifact {
    metadata: PlayerMetadata,
    token_sequence: Vec<u16>,
    sequence_length: usize,
}

#[derive(Serialize)]
struct CombinedMetadata {
    seed: u16,
    game_result: String,
    game_id: GameId,
    num_players: usize,
}

#[derive(Serialize)]
struct CombinedEntry {
    token_sequence: Vec<u16>,
    sequence_length: usize,
}

#[derive(Serialize)]
struct CombinedArtifact {
    metadata: CombinedMetadata,
    players: BTreeMap<String, CombinedEntry>,
}

/// Write the per-player and combined training files, returning their paths.
pub fn write_training_artifacts(
    dir: &Path,
    session: &TurnServer,
    game_id: GameId,
) -> Result<Vec<PathBuf>, ServerError> {
    fs::create_dir_all(dir)?;

    let game = session.game();
    let seed = game.seed();
    let game_result = game
        .result()
        .map_or_else(|| "UNDECIDED".to_string(), |t| t.name().trim_matches(['<', '>']).to_string());

    let mut paths = Vec::new();
    let mut combined_players = BTreeMap::new();

    for seat in Seat::all() {
        let sequence = game.sequence(seat);
        let token_sequence: Vec<u16> = sequence.iter().map(|t| t.id()).collect();

        let artifact = PlayerArtifact {
            metadata: PlayerMetadata {
                player_id: seat.0,
                seed,
                game_result: game_result.clone(),
                game_id,
                description: format!(
                    "Complete game token sequence for player {} from seed {seed}",
                    seat.0
                ),
            },
            sequence_length: token_sequence.len(),
            token_sequence: token_sequence.clone(),
        };

        let json_path = dir.join(format!("player_{}_tokens_seed_{seed}.json", seat.0));
        fs::write(&json_path, serde_json::to_vec_pretty(&artifact)?)?;
        paths.push(json_path);

        // Informational rendering only; the JSON files are the artifacts.
        let txt_path = dir.join(format!("player_{}_readable_seed_{seed}.txt", seat.0));
        fs::write(&txt_path, render_readable(sequence))?;
        paths.push(txt_path);

        combined_players.insert(
            seat.0.to_string(),
            CombinedEntry {
                sequence_length: token_sequence.len(),
                token_sequence,
            },
        );
    }

    let combined = CombinedArtifact {
        metadata: CombinedMetadata {
            seed,
            game_result,
            game_id,
            num_players: combined_players.len(),
        },
        players: combined_players,
    };
    let combined_path = dir.join(format!("all_players_seed_{seed}.json"));
    fs::write(&combined_path, serde_json::to_vec_pretty(&combined)?)?;
    paths.push(combined_path);

    Ok(paths)
}
