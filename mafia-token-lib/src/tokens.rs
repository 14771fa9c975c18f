//! The closed token vocabulary.
//!
//! Token IDs are stable and load-bearing: trained models consume the raw
//! integers, so the numbering must never change. Seed tokens live in a
//! disjoint numeric range ([`SEED_TOKEN_BASE`]) and are deliberately not part
//! of the enum: they exist only inside the server for reproducibility and
//! must never reach a client or a stored sequence.

use serde::Deserialize;
use serde::Serialize;

use crate::Role;
use crate::SEAT_COUNT;
use crate::Seat;
use crate::Team;

/// Total number of tokens in the vocabulary.
pub const VOCAB_SIZE: usize = 58;

/// First raw ID of the server-internal seed token range (1000..=1999).
pub const SEED_TOKEN_BASE: u16 = 1000;

/// Encode a seed as its server-internal token ID.
pub fn seed_token(seed: u16) -> u16 {
    SEED_TOKEN_BASE + seed % 1000
}

/// True if the raw ID falls in the seed token range.
pub fn is_seed_token(id: u16) -> bool {
    (SEED_TOKEN_BASE..SEED_TOKEN_BASE + 1000).contains(&id)
}

/// A single vocabulary token.
#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize,
)]
#[repr(u16)]
pub enum Token {
    // Verbs
    EndTurn = 0,
    Nominate = 1,
    ClaimSheriff = 2,
    ClaimSheriffCheck = 3,
    DenySheriff = 4,
    Say = 5,
    Vote = 6,
    VoteEliminateAll = 7,
    VoteKeepAll = 8,
    Kill = 9,
    SheriffCheck = 10,
    DonCheck = 11,
    YourPosition = 12,

    // Players
    Player0 = 13,
    Player1 = 14,
    Player2 = 15,
    Player3 = 16,
    Player4 = 17,
    Player5 = 18,
    Player6 = 19,
    Player7 = 20,
    Player8 = 21,
    Player9 = 22,

    // Colors
    Red = 23,
    Black = 24,

    // Roles
    Citizen = 25,
    Sheriff = 26,
    Mafia = 27,
    Don = 28,

    // System tokens, generated by the environment
    CheckResult = 29,
    NotSheriff = 30,
    MafiaTeam = 31,
    YourRole = 32,
    NominatedList = 33,
    VoteRevealed = 34,
    Eliminated = 35,
    Killed = 36,
    TieResult = 37,
    StartingPlayer = 38,
    GameStart = 39,
    RedTeamWon = 40,
    BlackTeamWon = 41,

    // Phases
    Day1 = 42,
    Day2 = 43,
    Day3 = 44,
    Day4 = 45,
    Day5 = 46,
    Night1 = 47,
    Night2 = 48,
    Night3 = 49,
    Night4 = 50,

    // Phase transition markers
    VotingPhaseStart = 51,
    NightPhaseStart = 52,
    DayPhaseStart = 53,

    // Ephemeral turn signals, injected at observation time and never stored
    YourTurn = 54,
    NextTurn = 55,

    RevotePhase = 56,
    EliminateAllVote = 57,
}

/// Every token in ID order; `ALL[id]` has discriminant `id`.
pub const ALL: [Token; VOCAB_SIZE] = [
    Token::EndTurn,
    Token::Nominate,
    Token::ClaimSheriff,
    Token::ClaimSheriffCheck,
    Token::DenySheriff,
    Token::Say,
    Token::Vote,
    Token::VoteEliminateAll,
    Token::VoteKeepAll,
    Token::Kill,
    Token::SheriffCheck,
    Token::DonCheck,
    Token::YourPosition,
    Token::Player0,
    Token::Player1,
    Token::Player2,
    Token::Player3,
    Token::Player4,
    Token::Player5,
    Token::Player6,
    Token::Player7,
    Token::Player8,
    Token::Player9,
    Token::Red,
    Token::Black,
    Token::Citizen,
    Token::Sheriff,
    Token::Mafia,
    Token::Don,
    Token::CheckResult,
    Token::NotSheriff,
    Token::MafiaTeam,
    Token::YourRole,
    Token::NominatedList,
    Token::VoteRevealed,
    Token::Eliminated,
    Token::Killed,
    Token::TieResult,
    Token::StartingPlayer,
    Token::GameStart,
    Token::RedTeamWon,
    Token::BlackTeamWon,
    Token::Day1,
    Token::Day2,
    Token::Day3,
    Token::Day4,
    Token::Day5,
    Token::Night1,
    Token::Night2,
    Token::Night3,
    Token::Night4,
    Token::VotingPhaseStart,
    Token::NightPhaseStart,
    Token::DayPhaseStart,
    Token::YourTurn,
    Token::NextTurn,
    Token::RevotePhase,
    Token::EliminateAllVote,
];

impl Token {
    pub fn id(self) -> u16 {
        self as u16
    }

    /// The player token for a seat.
    pub fn for_seat(seat: Seat) -> Token {
        ALL[Token::Player0 as usize + seat.0 % SEAT_COUNT]
    }

    /// The seat a player token refers to.
    pub fn seat(self) -> Option<Seat> {
        let id = self.id();
        if (Token::Player0.id()..=Token::Player9.id()).contains(&id) {
            Some(Seat((id - Token::Player0.id()) as usize))
        } else {
            None
        }
    }

    /// The day phase token for a day-cycle index (1..=5).
    pub fn day(day: u8) -> Token {
        debug_assert!((1..=5).contains(&day));
        ALL[Token::Day1 as usize + (day as usize - 1).min(4)]
    }

    /// The night phase token for a day-cycle index (1..=4).
    pub fn night(day: u8) -> Token {
        debug_assert!((1..=4).contains(&day));
        ALL[Token::Night1 as usize + (day as usize - 1).min(3)]
    }

    pub fn for_color(color: Team) -> Token {
        match color {
            Team::Red => Token::Red,
            Team::Black => Token::Black,
        }
    }

    pub fn color(self) -> Option<Team> {
        match self {
            Token::Red => Some(Team::Red),
            Token::Black => Some(Team::Black),
            _ => None,
        }
    }

    pub fn for_role(role: Role) -> Token {
        match role {
            Role::Citizen => Token::Citizen,
            Role::Sheriff => Token::Sheriff,
            Role::Mafia => Token::Mafia,
            Role::Don => Token::Don,
        }
    }

    /// The winner token for a team.
    pub fn for_winner(team: Team) -> Token {
        match team {
            Team::Red => Token::RedTeamWon,
            Team::Black => Token::BlackTeamWon,
        }
    }

    pub fn is_verb(self) -> bool {
        self.id() <= Token::YourPosition.id()
    }

    pub fn is_player(self) -> bool {
        self.seat().is_some()
    }

    pub fn is_color(self) -> bool {
        matches!(self, Token::Red | Token::Black)
    }

    pub fn is_role(self) -> bool {
        matches!(
            self,
            Token::Citizen | Token::Sheriff | Token::Mafia | Token::Don
        )
    }

    pub fn is_phase(self) -> bool {
        (Token::Day1.id()..=Token::Night4.id()).contains(&self.id())
    }

    /// True for the observation-only turn signals that must never be stored.
    pub fn is_ephemeral(self) -> bool {
        matches!(self, Token::YourTurn | Token::NextTurn)
    }

    /// The canonical `<NAME>` rendering.
    pub fn name(self) -> &'static str {
        match self {
            Token::EndTurn => "<END_TURN>",
            Token::Nominate => "<NOMINATE>",
            Token::ClaimSheriff => "<CLAIM_SHERIFF>",
            Token::ClaimSheriffCheck => "<CLAIM_SHERIFF_CHECK>",
            Token::DenySheriff => "<DENY_SHERIFF>",
            Token::Say => "<SAY>",
            Token::Vote => "<VOTE>",
            Token::VoteEliminateAll => "<VOTE_ELIMINATE_ALL>",
            Token::VoteKeepAll => "<VOTE_KEEP_ALL>",
            Token::Kill => "<KILL>",
            Token::SheriffCheck => "<SHERIFF_CHECK>",
            Token::DonCheck => "<DON_CHECK>",
            Token::YourPosition => "<YOUR_POSITION>",
            Token::Player0 => "<PLAYER_0>",
            Token::Player1 => "<PLAYER_1>",
            Token::Player2 => "<PLAYER_2>",
            Token::Player3 => "<PLAYER_3>",
            Token::Player4 => "<PLAYER_4>",
            Token::Player5 => "<PLAYER_5>",
            Token::Player6 => "<PLAYER_6>",
            Token::Player7 => "<PLAYER_7>",
            Token::Player8 => "<PLAYER_8>",
            Token::Player9 => "<PLAYER_9>",
            Token::Red => "<RED>",
            Token::Black => "<BLACK>",
            Token::Citizen => "<CITIZEN>",
            Token::Sheriff => "<SHERIFF>",
            Token::Mafia => "<MAFIA>",
            Token::Don => "<DON>",
            Token::CheckResult => "<CHECK_RESULT>",
            Token::NotSheriff => "<NOT_SHERIFF>",
            Token::MafiaTeam => "<MAFIA_TEAM>",
            Token::YourRole => "<YOUR_ROLE>",
            Token::NominatedList => "<NOMINATED_LIST>",
            Token::VoteRevealed => "<VOTE_REVEALED>",
            Token::Eliminated => "<ELIMINATED>",
            Token::Killed => "<KILLED>",
            Token::TieResult => "<TIE_RESULT>",
            Token::StartingPlayer => "<STARTING_PLAYER>",
            Token::GameStart => "<GAME_START>",
            Token::RedTeamWon => "<RED_TEAM_WON>",
            Token::BlackTeamWon => "<BLACK_TEAM_WON>",
            Token::Day1 => "<DAY_1>",
            Token::Day2 => "<DAY_2>",
            Token::Day3 => "<DAY_3>",
            Token::Day4 => "<DAY_4>",
            Token::Day5 => "<DAY_5>",
            Token::Night1 => "<NIGHT_1>",
            Token::Night2 => "<NIGHT_2>",
            Token::Night3 => "<NIGHT_3>",
            Token::Night4 => "<NIGHT_4>",
            Token::VotingPhaseStart => "<VOTING_PHASE_START>",
            Token::NightPhaseStart => "<NIGHT_PHASE_START>",
            Token::DayPhaseStart => "<DAY_PHASE_START>",
            Token::YourTurn => "<YOUR_TURN>",
            Token::NextTurn => "<NEXT_TURN>",
            Token::RevotePhase => "<REVOTE_PHASE>",
            Token::EliminateAllVote => "<ELIMINATE_ALL_VOTE>",
        }
    }

    /// Look a token up by its `<NAME>` or bare `NAME` rendering.
    pub fn from_name(name: &str) -> Option<Token> {
        let bracketed;
        let name = if name.starts_with('<') {
            name
        } else {
            bracketed = format!("<{name}>");
            &bracketed
        };
        ALL.into_iter().find(|token| token.name() == name)
    }
}

impl TryFrom<u16> for Token {
    type Error = u16;

    fn try_from(id: u16) -> Result<Self, Self::Error> {
        ALL.get(id as usize).copied().ok_or(id)
    }
}

/// Render a token sequence as space-separated `<NAME>`s.
pub fn render(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|token| token.name())
        .collect::<Vec<_>>()
        .join(" ")
}
