//! Structured actions and their token codec.
//!
//! Every action encodes to a fixed token template and decodes back to the
//! same value. Multi-action day submissions are parsed by verb arity with
//! [`parse_turn`].

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::Seat;
use crate::Team;
use crate::Token;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CodecError {
    #[error("unknown token id {0}")]
    UnknownToken(u16),
    #[error("empty action sequence")]
    Empty,
    #[error("token {0} cannot start an action")]
    NotAVerb(&'static str),
    #[error("verb {verb} is missing its arguments")]
    MissingArguments { verb: &'static str },
    #[error("verb {verb} expected a player argument, got {got}")]
    ExpectedPlayer { verb: &'static str, got: &'static str },
    #[error("verb {verb} expected a color argument, got {got}")]
    ExpectedColor { verb: &'static str, got: &'static str },
    #[error("trailing tokens after a complete action")]
    TrailingTokens,
}

/// A structured player action.
///
/// The serde representation matches the wire contract: a `"type"` tag in
/// `SCREAMING_SNAKE_CASE` plus the action's fields.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    EndTurn,
    Nominate { target: Seat },
    Vote { target: Seat },
    Kill { target: Seat },
    SheriffCheck { target: Seat },
    DonCheck { target: Seat },
    ClaimSheriff,
    DenySheriff,
    ClaimSheriffCheck { target: Seat, color: Team },
    Say { target: Seat, color: Team },
    VoteEliminateAll,
    VoteKeepAll,
}

impl Action {
    /// The verb token that introduces this action.
    pub fn verb(&self) -> Token {
        match self {
            Action::EndTurn => Token::EndTurn,
            Action::Nominate { .. } => Token::Nominate,
            Action::Vote { .. } => Token::Vote,
            Action::Kill { .. } => Token::Kill,
            Action::SheriffCheck { .. } => Token::SheriffCheck,
            Action::DonCheck { .. } => Token::DonCheck,
            Action::ClaimSheriff => Token::ClaimSheriff,
            Action::DenySheriff => Token::DenySheriff,
            Action::ClaimSheriffCheck { .. } => Token::ClaimSheriffCheck,
            Action::Say { .. } => Token::Say,
            Action::VoteEliminateAll => Token::VoteEliminateAll,
            Action::VoteKeepAll => Token::VoteKeepAll,
        }
    }

    /// Bare verb name without brackets, used as the `valid_actions` key.
    pub fn kind(&self) -> &'static str {
        let name = self.verb().name();
        &name[1..name.len() - 1]
    }

    /// True for the public day declarations (everything a day turn may
    /// contain except the nomination).
    pub fn is_declaration(&self) -> bool {
        matches!(
            self,
            Action::Say { .. }
                | Action::ClaimSheriff
                | Action::DenySheriff
                | Action::ClaimSheriffCheck { .. }
        )
    }

    pub fn encode(&self) -> Vec<Token> {
        match *self {
            Action::EndTurn => vec![Token::EndTurn],
            Action::Nominate { target } => vec![Token::Nominate, Token::for_seat(target)],
            Action::Vote { target } => vec![Token::Vote, Token::for_seat(target)],
            Action::Kill { target } => vec![Token::Kill, Token::for_seat(target)],
            Action::SheriffCheck { target } => {
                vec![Token::SheriffCheck, Token::for_seat(target)]
            }
            Action::DonCheck { target } => vec![Token::DonCheck, Token::for_seat(target)],
            Action::ClaimSheriff => vec![Token::ClaimSheriff],
            Action::DenySheriff => vec![Token::DenySheriff],
            Action::ClaimSheriffCheck { target, color } => vec![
                Token::ClaimSheriffCheck,
                Token::for_seat(target),
                Token::for_color(color),
            ],
            Action::Say { target, color } => {
                vec![Token::Say, Token::for_seat(target), Token::for_color(color)]
            }
            Action::VoteEliminateAll => vec![Token::VoteEliminateAll],
            Action::VoteKeepAll => vec![Token::VoteKeepAll],
        }
    }

    /// Decode exactly one action from the full slice.
    pub fn decode(tokens: &[Token]) -> Result<Action, CodecError> {
        let (action, used) = Self::decode_prefix(tokens)?;
        if used != tokens.len() {
            return Err(CodecError::TrailingTokens);
        }
        Ok(action)
    }

    /// Decode one action from the front of the slice, returning it together
    /// with the number of tokens consumed.
    pub fn decode_prefix(tokens: &[Token]) -> Result<(Action, usize), CodecError> {
        let verb = *tokens.first().ok_or(CodecError::Empty)?;

        let player_arg = |at: usize| -> Result<Seat, CodecError> {
            let token = *tokens.get(at).ok_or(CodecError::MissingArguments {
                verb: verb.name(),
            })?;
            token.seat().ok_or(CodecError::ExpectedPlayer {
                verb: verb.name(),
                got: token.name(),
            })
        };
        let color_arg = |at: usize| -> Result<Team, CodecError> {
            let token = *tokens.get(at).ok_or(CodecError::MissingArguments {
                verb: verb.name(),
            })?;
            token.color().ok_or(CodecError::ExpectedColor {
                verb: verb.name(),
                got: token.name(),
            })
        };

        Ok(match verb {
            Token::EndTurn => (Action::EndTurn, 1),
            Token::ClaimSheriff => (Action::ClaimSheriff, 1),
            Token::DenySheriff => (Action::DenySheriff, 1),
            Token::VoteEliminateAll => (Action::VoteEliminateAll, 1),
            Token::VoteKeepAll => (Action::VoteKeepAll, 1),
            Token::Nominate => (Action::Nominate { target: player_arg(1)? }, 2),
            Token::Vote => (Action::Vote { target: player_arg(1)? }, 2),
            Token::Kill => (Action::Kill { target: player_arg(1)? }, 2),
            Token::SheriffCheck => (Action::SheriffCheck { target: player_arg(1)? }, 2),
            Token::DonCheck => (Action::DonCheck { target: player_arg(1)? }, 2),
            Token::Say => (
                Action::Say { target: player_arg(1)?, color: color_arg(2)? },
                3,
            ),
            Token::ClaimSheriffCheck => (
                Action::ClaimSheriffCheck { target: player_arg(1)?, color: color_arg(2)? },
                3,
            ),
            other => return Err(CodecError::NotAVerb(other.name())),
        })
    }
}

/// Parse a submitted turn into its atomic actions.
///
/// The split is purely syntactic: phase rules (End-Turn placement, quotas,
/// duplicates) are enforced by the engine afterwards.
pub fn parse_turn(tokens: &[Token]) -> Result<Vec<Action>, CodecError> {
    if tokens.is_empty() {
        return Err(CodecError::Empty);
    }

    let mut actions = Vec::new();
    let mut rest = tokens;
    while !rest.is_empty() {
        let (action, used) = Action::decode_prefix(rest)?;
        actions.push(action);
        rest = &rest[used..];
    }
    Ok(actions)
}

/// Convert raw wire token IDs into vocabulary tokens.
pub fn tokens_from_ids(ids: &[u16]) -> Result<Vec<Token>, CodecError> {
    ids.iter()
        .map(|&id| Token::try_from(id).map_err(CodecError::UnknownToken))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_valid_actions() -> Vec<Action> {
        let mut actions = vec![
            Action::EndTurn,
            Action::ClaimSheriff,
            Action::DenySheriff,
            Action::VoteEliminateAll,
            Action::VoteKeepAll,
        ];
        for seat in Seat::all() {
            actions.push(Action::Nominate { target: seat });
            actions.push(Action::Vote { target: seat });
            actions.push(Action::Kill { target: seat });
            actions.push(Action::SheriffCheck { target: seat });
            actions.push(Action::DonCheck { target: seat });
            for color in [Team::Red, Team::Black] {
                actions.push(Action::Say { target: seat, color });
                actions.push(Action::ClaimSheriffCheck { target: seat, color });
            }
        }
        actions
    }

    #[test]
    fn test_round_trip() {
        for action in all_valid_actions() {
            assert_eq!(Action::decode(&action.encode()), Ok(action));
        }
    }

    #[test]
    fn test_decode_rejects_malformed() {
        assert_eq!(Action::decode(&[]), Err(CodecError::Empty));
        assert!(matches!(
            Action::decode(&[Token::Nominate]),
            Err(CodecError::MissingArguments { .. })
        ));
        assert!(matches!(
            Action::decode(&[Token::Say, Token::Player1]),
            Err(CodecError::MissingArguments { .. })
        ));
        assert!(matches!(
            Action::decode(&[Token::Vote, Token::Red]),
            Err(CodecError::ExpectedPlayer { .. })
        ));
        assert!(matches!(
            Action::decode(&[Token::Say, Token::Player1, Token::Player2]),
            Err(CodecError::ExpectedColor { .. })
        ));
        assert!(matches!(
            Action::decode(&[Token::Killed]),
            Err(CodecError::NotAVerb(_))
        ));
        assert_eq!(
            Action::decode(&[Token::EndTurn, Token::EndTurn]),
            Err(CodecError::TrailingTokens)
        );
    }

    #[test]
    fn test_parse_turn_splits_by_arity() {
        let tokens = vec![
            Token::Say,
            Token::Player1,
            Token::Red,
            Token::Nominate,
            Token::Player3,
            Token::EndTurn,
        ];
        assert_eq!(
            parse_turn(&tokens),
            Ok(vec![
                Action::Say { target: Seat(1), color: Team::Red },
                Action::Nominate { target: Seat(3) },
                Action::EndTurn,
            ])
        );
    }

    #[test]
    fn test_tokens_from_ids() {
        assert_eq!(
            tokens_from_ids(&[5, 14, 23]),
            Ok(vec![Token::Say, Token::Player1, Token::Red])
        );
        assert_eq!(tokens_from_ids(&[999]), Err(CodecError::UnknownToken(999)));
    }

    #[test]
    fn test_wire_tag_names() {
        let json = serde_json::to_value(Action::ClaimSheriffCheck {
            target: Seat(4),
            color: Team::Black,
        })
        .unwrap();
        assert_eq!(json["type"], "CLAIM_SHERIFF_CHECK");
        assert_eq!(Action::VoteEliminateAll.kind(), "VOTE_ELIMINATE_ALL");
    }
}
