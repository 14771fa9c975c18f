//! Core state and rules for one token game.
//!
//! `Game` is a single owned aggregate; players refer to each other by seat
//! index only. All mutation goes through [`Game::apply_action`], which
//! validates the full submission before touching any state: a rejected
//! action leaves the game byte-identical.

use mafia_token_lib::Action;
use mafia_token_lib::DonCheckNote;
use mafia_token_lib::Role;
use mafia_token_lib::SEAT_COUNT;
use mafia_token_lib::Seat;
use mafia_token_lib::SheriffCheckNote;
use mafia_token_lib::Team;
use mafia_token_lib::Token;
use mafia_token_lib::action::parse_turn;
use serde::Deserialize;
use serde::Serialize;

use crate::arrangement::arrangement_for_seed;
use crate::chronicle::Chronicle;
use crate::error::EngineError;
use crate::phase::MAX_DAYS;
use crate::phase::Phase;
use crate::seats::SeatSet;
use crate::votes;

/// Most atomic actions (excluding End-Turn) a single day turn may hold.
pub const MAX_DAY_ATOMS: usize = 7;

/// Life state of a player. `MarkedForNightKill` is a player shot this night:
/// they still act in the remaining night sub-phases (the kill resolves at
/// dawn) and are owed a death speech at the next day start.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum LifeState {
    Alive,
    MarkedForNightKill,
    Dead,
}

impl LifeState {
    pub fn is_alive(self) -> bool {
        self == LifeState::Alive
    }
}

/// One seat's state, including its private memory.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct PlayerState {
    pub role: Role,
    pub life: LifeState,
    /// Fellow Black-team seats (excluding self); empty for Red players.
    pub mafia_team: Vec<Seat>,
    pub sheriff_checks: Vec<SheriffCheckNote>,
    pub don_checks: Vec<DonCheckNote>,
}

/// Bookkeeping for the day turn currently being built.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
struct TurnLedger {
    /// Atoms already performed this turn, in order.
    atoms: Vec<Action>,
    /// Whether `<PLAYER_k>` already opens this turn in the sequences
    /// (either as a transition cue or with the first atom).
    prefix_emitted: bool,
}

impl TurnLedger {
    fn reset(&mut self) {
        self.atoms.clear();
        self.prefix_emitted = false;
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Game {
    seed: u16,
    players: Vec<PlayerState>,
    phase: Phase,
    active: Seat,
    /// First normal actor of the current day; rotates each dawn.
    day_opener: Seat,
    /// Alive players' End-Turns this day phase; speeches do not count.
    day_turns_done: usize,
    turn_ledger: TurnLedger,
    nominations: Vec<Seat>,
    /// Cast votes of the current round (rounds 0 and 1), in rotation order.
    ballot: Vec<(Seat, Seat)>,
    /// Cast eliminate-all votes of round 2, in rotation order.
    eliminate_ballot: Vec<(Seat, bool)>,
    tied: Vec<Seat>,
    /// Dead seat currently holding a death-speech slot.
    speech: Option<Seat>,
    winner: Option<Team>,
    chronicle: Chronicle,
}

impl Game {
    /// Initialize a game from a seed. The seed selects one of the 2,520 role
    /// arrangements; it is kept server-side and never enters any sequence.
    pub fn new(seed: u16) -> Self {
        let roles = arrangement_for_seed(seed);

        let black_seats: Vec<Seat> = Seat::all()
            .filter(|seat| roles[seat.0].team() == Team::Black)
            .collect();

        let players: Vec<PlayerState> = Seat::all()
            .map(|seat| PlayerState {
                role: roles[seat.0],
                life: LifeState::Alive,
                mafia_team: if roles[seat.0].team() == Team::Black {
                    black_seats
                        .iter()
                        .copied()
                        .filter(|&other| other != seat)
                        .collect()
                } else {
                    Vec::new()
                },
                sheriff_checks: Vec::new(),
                don_checks: Vec::new(),
            })
            .collect();

        let openings = Seat::all()
            .map(|seat| {
                let player = &players[seat.0];
                let mut opening = vec![
                    Token::GameStart,
                    Token::for_seat(seat),
                    Token::YourRole,
                    Token::for_role(player.role),
                ];
                if !player.mafia_team.is_empty() {
                    opening.push(Token::MafiaTeam);
                    opening.extend(player.mafia_team.iter().map(|&s| Token::for_seat(s)));
                }
                opening.push(Token::Day1);
                opening.push(Token::DayPhaseStart);
                opening
            })
            .collect();

        tracing::info!(seed, ?black_seats, "game initialized");

        Game {
            seed,
            players,
            phase: Phase::Day { day: 1 },
            active: Seat(0),
            day_opener: Seat(0),
            day_turns_done: 0,
            turn_ledger: TurnLedger::default(),
            nominations: Vec::new(),
            ballot: Vec::new(),
            eliminate_ballot: Vec::new(),
            tied: Vec::new(),
            speech: None,
            winner: None,
            chronicle: Chronicle::new(openings),
        }
    }

    pub fn seed(&self) -> u16 {
        self.seed
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn active_seat(&self) -> Seat {
        self.active
    }

    pub fn winner(&self) -> Option<Team> {
        self.winner
    }

    /// The winner token once the game is over.
    pub fn result(&self) -> Option<Token> {
        self.winner.map(Token::for_winner)
    }

    pub fn player(&self, seat: Seat) -> &PlayerState {
        &self.players[seat.0]
    }

    pub fn nominations(&self) -> &[Seat] {
        &self.nominations
    }

    pub fn tied(&self) -> &[Seat] {
        &self.tied
    }

    /// The seat currently holding a death-speech slot, if any.
    pub fn speech_holder(&self) -> Option<Seat> {
        self.speech
    }

    /// Atoms performed so far in the active player's current day turn.
    pub fn turn_atoms(&self) -> &[Action] {
        &self.turn_ledger.atoms
    }

    pub fn sequence(&self, seat: Seat) -> &[Token] {
        self.chronicle.seq(seat)
    }

    pub fn sequences(&self) -> &[Vec<Token>] {
        self.chronicle.seqs()
    }

    pub fn alive_seats(&self) -> SeatSet {
        Seat::all()
            .filter(|&seat| self.players[seat.0].life.is_alive())
            .collect()
    }

    fn alive_count(&self) -> usize {
        self.alive_seats().len()
    }

    fn team_counts(&self) -> (usize, usize) {
        let mut red = 0;
        let mut black = 0;
        for player in &self.players {
            if player.life.is_alive() {
                match player.role.team() {
                    Team::Red => red += 1,
                    Team::Black => black += 1,
                }
            }
        }
        (red, black)
    }

    /// Next alive seat strictly after `seat`, wrapping around the table.
    fn next_alive_after(&self, seat: Seat) -> Seat {
        let mut idx = seat.0;
        for _ in 0..SEAT_COUNT {
            idx = (idx + 1) % SEAT_COUNT;
            if self.players[idx].life.is_alive() {
                return Seat(idx);
            }
        }
        seat
    }

    fn first_alive(&self) -> Seat {
        self.next_alive_after(Seat(SEAT_COUNT - 1))
    }

    /// Who pulls the trigger tonight: the Don if still alive, otherwise the
    /// lowest-seated living Mafia.
    fn night_killer(&self) -> Option<Seat> {
        let mut killer = None;
        for seat in Seat::all() {
            let player = &self.players[seat.0];
            if !player.life.is_alive() {
                continue;
            }
            match player.role {
                Role::Don => return Some(seat),
                Role::Mafia if killer.is_none() => killer = Some(seat),
                _ => {}
            }
        }
        killer
    }

    fn seat_with_role(&self, role: Role) -> Option<Seat> {
        Seat::all().find(|&seat| self.players[seat.0].role == role)
    }

    /// Vote targets available to `voter` in the current round.
    pub fn vote_targets_for(&self, voter: Seat) -> Vec<Seat> {
        match self.phase {
            Phase::Voting { round: 0, .. } => {
                if self.nominations.is_empty() {
                    // Legacy fallback: with an empty ballot every other
                    // living player is a valid target.
                    self.alive_seats()
                        .iter()
                        .filter(|&seat| seat != voter)
                        .collect()
                } else {
                    self.nominations.clone()
                }
            }
            Phase::Voting { round: 1, .. } => self.tied.clone(),
            _ => Vec::new(),
        }
    }

    /// The player's observation: their stored sequence plus the ephemeral
    /// turn signals. Never mutates stored state.
    pub fn observation(&self, seat: Seat) -> Vec<Token> {
        let mut obs = self.chronicle.seq(seat).to_vec();
        if seat == self.active && self.winner.is_none() {
            if obs.last() != Some(&Token::for_seat(seat)) {
                obs.push(Token::for_seat(seat));
            }
            obs.push(Token::YourTurn);
        }
        obs.push(Token::NextTurn);
        obs
    }

    /// Apply one submitted token sequence for `seat`.
    ///
    /// Either the whole submission takes effect or the state is unchanged.
    #[tracing::instrument(
        skip_all,
        fields(phase = %self.phase, seat = seat.0),
    )]
    pub fn apply_action(&mut self, seat: Seat, tokens: &[Token]) -> Result<(), EngineError> {
        if self.winner.is_some() {
            return Err(EngineError::GameAlreadyOver);
        }
        if seat != self.active {
            return Err(EngineError::WrongPlayer { expected: self.active, got: seat });
        }

        let atoms = parse_turn(tokens)?;

        match self.phase {
            Phase::Day { .. } => self.apply_day_turn(seat, &atoms),
            Phase::Voting { round, .. } => self.apply_vote(seat, round, &atoms),
            Phase::NightKill { .. } | Phase::NightDon { .. } | Phase::NightSheriff { .. } => {
                self.apply_night_action(seat, &atoms)
            }
            Phase::GameOver { .. } => Err(EngineError::GameAlreadyOver),
        }
    }

    // ---- day phase ----

    fn apply_day_turn(&mut self, seat: Seat, atoms: &[Action]) -> Result<(), EngineError> {
        let ends_turn = atoms.last() == Some(&Action::EndTurn);
        if atoms[..atoms.len() - usize::from(ends_turn)]
            .iter()
            .any(|atom| *atom == Action::EndTurn)
        {
            return Err(EngineError::IllegalAction(
                "END_TURN must be the last action of a submission".to_string(),
            ));
        }

        let day_atoms = &atoms[..atoms.len() - usize::from(ends_turn)];
        if day_atoms.len() > 1 && !ends_turn {
            return Err(EngineError::IllegalAction(
                "multi-action sequences must end with END_TURN".to_string(),
            ));
        }

        let speaking = self.speech == Some(seat);
        let performed = self.turn_ledger.atoms.len();
        if performed + day_atoms.len() > MAX_DAY_ATOMS {
            return Err(EngineError::IllegalAction(format!(
                "a day turn may hold at most {MAX_DAY_ATOMS} actions"
            )));
        }

        let mut nominations_in_turn = self
            .turn_ledger
            .atoms
            .iter()
            .filter(|atom| matches!(atom, Action::Nominate { .. }))
            .count();

        for (idx, atom) in day_atoms.iter().enumerate() {
            if self.turn_ledger.atoms.contains(atom) || day_atoms[..idx].contains(atom) {
                return Err(EngineError::IllegalAction(format!(
                    "duplicate action this turn: {atom:?}"
                )));
            }
            self.check_day_atom(seat, *atom, speaking, &mut nominations_in_turn)?;
        }

        // Validated; mutate.
        for atom in day_atoms {
            if !self.turn_ledger.prefix_emitted {
                self.chronicle.push_all(&[Token::for_seat(seat)]);
                self.turn_ledger.prefix_emitted = true;
            }
            self.chronicle.push_all(&atom.encode());
            if let Action::Nominate { target } = atom {
                tracing::info!(nominator = seat.0, target = target.0, "nomination");
                self.nominations.push(*target);
            }
            self.turn_ledger.atoms.push(*atom);
        }

        if ends_turn {
            if !self.turn_ledger.prefix_emitted {
                // A bare END_TURN still identifies its speaker.
                self.chronicle.push_all(&[Token::for_seat(seat)]);
                self.turn_ledger.prefix_emitted = true;
            }
            self.chronicle.push_all(&[Token::EndTurn]);
            self.finish_day_turn(seat, speaking);
        }

        Ok(())
    }

    fn check_day_atom(
        &self,
        seat: Seat,
        atom: Action,
        speaking: bool,
        nominations_in_turn: &mut usize,
    ) -> Result<(), EngineError> {
        match atom {
            Action::Say { target, .. } | Action::ClaimSheriffCheck { target, .. } => {
                if target == seat {
                    return Err(EngineError::IllegalAction(
                        "declarations may not target yourself".to_string(),
                    ));
                }
                if !self.players[target.0].life.is_alive() {
                    return Err(EngineError::IllegalAction(format!(
                        "declaration target {target} is not alive"
                    )));
                }
            }
            Action::ClaimSheriff | Action::DenySheriff => {}
            Action::Nominate { target } => {
                if speaking {
                    return Err(EngineError::IllegalAction(
                        "a death speech may not nominate".to_string(),
                    ));
                }
                if *nominations_in_turn >= 1 {
                    return Err(EngineError::IllegalAction(
                        "only one nomination per day turn".to_string(),
                    ));
                }
                if target == seat {
                    return Err(EngineError::IllegalAction(
                        "you may not nominate yourself".to_string(),
                    ));
                }
                if !self.players[target.0].life.is_alive() {
                    return Err(EngineError::IllegalAction(format!(
                        "nomination target {target} is not alive"
                    )));
                }
                if self.nominations.contains(&target) {
                    return Err(EngineError::IllegalAction(format!(
                        "{target} is already nominated today"
                    )));
                }
                *nominations_in_turn += 1;
            }
            other => {
                return Err(EngineError::IllegalAction(format!(
                    "{} is not a day action",
                    other.kind()
                )));
            }
        }
        Ok(())
    }

    fn finish_day_turn(&mut self, seat: Seat, speaking: bool) {
        self.turn_ledger.reset();

        if speaking {
            // Death speech over; the normal rotation starts at the opener.
            self.speech = None;
            self.active = self.day_opener;
            self.emit_turn_cue(self.day_opener);
            return;
        }

        self.day_turns_done += 1;
        if self.day_turns_done >= self.alive_count() {
            self.enter_voting();
        } else {
            let next = self.next_alive_after(seat);
            self.active = next;
            self.emit_turn_cue(next);
        }
    }

    /// Public cue announcing whose turn is next. Only emitted between day
    /// turns; voting and night turns are self-identifying or private.
    fn emit_turn_cue(&mut self, next: Seat) {
        self.chronicle.push_all(&[Token::for_seat(next)]);
        self.turn_ledger.prefix_emitted = true;
    }

    fn enter_voting(&mut self) {
        let day = self.phase.day();
        tracing::info!(day, nominations = ?self.nominations, "day closed, voting opens");
        self.chronicle.push_all(&[Token::VotingPhaseStart]);
        self.phase = Phase::Voting { day, round: 0 };
        self.day_turns_done = 0;
        self.ballot.clear();
        self.eliminate_ballot.clear();
        self.active = self.first_alive();
        self.turn_ledger.reset();
    }

    // ---- voting phase ----

    fn apply_vote(&mut self, seat: Seat, round: u8, atoms: &[Action]) -> Result<(), EngineError> {
        if atoms.iter().any(|atom| *atom == Action::EndTurn) {
            return Err(EngineError::IllegalAction(
                "END_TURN is not legal during voting".to_string(),
            ));
        }
        let [atom] = atoms else {
            return Err(EngineError::IllegalAction(
                "voting takes exactly one action".to_string(),
            ));
        };

        match (*atom, round) {
            (Action::Vote { target }, 0 | 1) => {
                if !self.vote_targets_for(seat).contains(&target) {
                    return Err(EngineError::IllegalAction(format!(
                        "{target} is not on the ballot this round"
                    )));
                }
                self.ballot.push((seat, target));
            }
            (Action::VoteEliminateAll, 2) => self.eliminate_ballot.push((seat, true)),
            (Action::VoteKeepAll, 2) => self.eliminate_ballot.push((seat, false)),
            _ => {
                return Err(EngineError::IllegalAction(format!(
                    "{} is not a valid vote this round",
                    atom.kind()
                )));
            }
        }

        // The vote is visible only to the voter until the round completes.
        let mut private = vec![Token::for_seat(seat)];
        private.extend(atom.encode());
        private.push(Token::EndTurn);
        self.chronicle.push_to(seat, &private);

        let votes_cast = self.ballot.len() + self.eliminate_ballot.len();
        if votes_cast >= self.alive_count() {
            self.resolve_voting_round(round);
        } else {
            self.active = self.next_alive_after(seat);
        }
        Ok(())
    }

    /// Reveal the completed round's ledger to everyone, in rotation order.
    fn reveal_round_ledger(&mut self) {
        let mut revealed = Vec::new();
        for &(voter, target) in &self.ballot {
            revealed.push(Token::for_seat(voter));
            revealed.push(Token::Vote);
            revealed.push(Token::for_seat(target));
            revealed.push(Token::EndTurn);
        }
        for &(voter, eliminate) in &self.eliminate_ballot {
            revealed.push(Token::for_seat(voter));
            revealed.push(if eliminate {
                Token::VoteEliminateAll
            } else {
                Token::VoteKeepAll
            });
            revealed.push(Token::EndTurn);
        }
        self.chronicle.push_all(&revealed);
    }

    fn resolve_voting_round(&mut self, round: u8) {
        let day = self.phase.day();
        self.reveal_round_ledger();

        match round {
            0 | 1 => {
                let leaders = votes::leaders(&self.ballot);
                tracing::info!(day, round, ?leaders, "voting round resolved");
                self.ballot.clear();

                if let [eliminated] = leaders[..] {
                    self.eliminate(eliminated);
                    self.nominations.clear();
                    self.tied.clear();
                    if !self.conclude_if_decided() {
                        self.enter_night();
                    }
                } else {
                    // Tie: the leaders go to another round.
                    self.tied = leaders;
                    self.chronicle.push_all(&[Token::RevotePhase]);
                    self.phase = Phase::Voting { day, round: round + 1 };
                    self.active = self.first_alive();
                }
            }
            _ => {
                let yes = self
                    .eliminate_ballot
                    .iter()
                    .filter(|&&(_, eliminate)| eliminate)
                    .count();
                let alive = self.alive_count();
                let carried = votes::strict_majority(yes, alive);
                tracing::info!(day, yes, alive, carried, "eliminate-all vote resolved");
                self.eliminate_ballot.clear();

                if carried {
                    self.chronicle.push_all(&[Token::EliminateAllVote]);
                    for seat in std::mem::take(&mut self.tied) {
                        self.eliminate(seat);
                    }
                }
                self.nominations.clear();
                self.tied.clear();
                if !self.conclude_if_decided() {
                    self.enter_night();
                }
            }
        }
    }

    /// Mark a voted-out player dead, publicly.
    fn eliminate(&mut self, seat: Seat) {
        tracing::info!(player = seat.0, "eliminated by vote");
        self.players[seat.0].life = LifeState::Dead;
        self.chronicle
            .push_all(&[Token::for_seat(seat), Token::Eliminated]);
    }

    // ---- night phases ----

    fn enter_night(&mut self) {
        let day = self.phase.day();
        if day >= MAX_DAYS {
            // Horizon policy: a game still open after the last day's voting
            // goes to the Black team.
            tracing::info!(day, "horizon reached with no winner");
            self.conclude(Team::Black);
            return;
        }

        self.chronicle
            .push_all(&[Token::night(day), Token::NightPhaseStart]);
        self.phase = Phase::NightKill { day };
        self.turn_ledger.reset();
        self.active = self
            .night_killer()
            .expect("black team alive when night starts");
    }

    fn apply_night_action(&mut self, seat: Seat, atoms: &[Action]) -> Result<(), EngineError> {
        let [atom, Action::EndTurn] = atoms[..] else {
            return Err(EngineError::IllegalAction(
                "night actions are a single action followed by END_TURN".to_string(),
            ));
        };

        match (self.phase, atom) {
            (Phase::NightKill { .. }, Action::Kill { target }) => {
                if target == seat || !self.players[target.0].life.is_alive() {
                    return Err(EngineError::IllegalAction(format!(
                        "{target} is not a valid kill target"
                    )));
                }
                tracing::info!(killer = seat.0, target = target.0, "night kill");
                self.players[target.0].life = LifeState::MarkedForNightKill;
                self.chronicle
                    .push_to(seat, &[Token::Kill, Token::for_seat(target), Token::EndTurn]);
                // The victim's identity is public within the night.
                self.chronicle
                    .push_all(&[Token::for_seat(target), Token::Killed]);
                self.advance_to_don_phase();
                Ok(())
            }
            (Phase::NightDon { day }, Action::DonCheck { target }) => {
                if target == seat || self.players[target.0].life == LifeState::Dead {
                    return Err(EngineError::IllegalAction(format!(
                        "{target} is not a valid check target"
                    )));
                }
                let is_sheriff = self.players[target.0].role == Role::Sheriff;
                tracing::debug!(target = target.0, is_sheriff, "don check");
                self.chronicle.push_to(
                    seat,
                    &[
                        Token::DonCheck,
                        Token::for_seat(target),
                        if is_sheriff { Token::Sheriff } else { Token::NotSheriff },
                        Token::EndTurn,
                    ],
                );
                self.players[seat.0]
                    .don_checks
                    .push(DonCheckNote { day, target, is_sheriff });
                self.advance_to_sheriff_phase();
                Ok(())
            }
            (Phase::NightSheriff { day }, Action::SheriffCheck { target }) => {
                if target == seat || self.players[target.0].life == LifeState::Dead {
                    return Err(EngineError::IllegalAction(format!(
                        "{target} is not a valid check target"
                    )));
                }
                // The check result derives from the target's role, the one
                // source of truth for colors.
                let color = self.players[target.0].role.team();
                tracing::debug!(target = target.0, ?color, "sheriff check");
                self.chronicle.push_to(
                    seat,
                    &[
                        Token::SheriffCheck,
                        Token::for_seat(target),
                        Token::for_color(color),
                        Token::EndTurn,
                    ],
                );
                self.players[seat.0]
                    .sheriff_checks
                    .push(SheriffCheckNote { day, target, color });
                self.finish_night();
                Ok(())
            }
            (_, other) => Err(EngineError::IllegalAction(format!(
                "{} is not the action of this night phase",
                other.kind()
            ))),
        }
    }

    fn advance_to_don_phase(&mut self) {
        let day = self.phase.day();
        self.phase = Phase::NightDon { day };
        // A don shot this very night would be a self-target; marked players
        // still act, only the long dead are skipped.
        match self.seat_with_role(Role::Don) {
            Some(don) if self.players[don.0].life != LifeState::Dead => self.active = don,
            _ => self.advance_to_sheriff_phase(),
        }
    }

    fn advance_to_sheriff_phase(&mut self) {
        let day = self.phase.day();
        self.phase = Phase::NightSheriff { day };
        match self.seat_with_role(Role::Sheriff) {
            Some(sheriff) if self.players[sheriff.0].life != LifeState::Dead => {
                self.active = sheriff;
            }
            _ => self.finish_night(),
        }
    }

    /// End-of-night bookkeeping: resolve the kill, check the win conditions,
    /// and open the next day with its death speech, if owed.
    fn finish_night(&mut self) {
        let day = self.phase.day();

        let mut owed_speech = None;
        for seat in Seat::all() {
            if self.players[seat.0].life == LifeState::MarkedForNightKill {
                self.players[seat.0].life = LifeState::Dead;
                owed_speech = Some(seat);
            }
        }

        if self.conclude_if_decided() {
            return;
        }

        let new_day = day + 1;
        self.day_opener = self.next_alive_after(self.day_opener);
        self.phase = Phase::Day { day: new_day };
        self.day_turns_done = 0;
        self.turn_ledger.reset();
        self.chronicle
            .push_all(&[Token::day(new_day), Token::DayPhaseStart]);

        if let Some(seat) = owed_speech {
            // The night's victim opens the day with their death speech.
            self.speech = Some(seat);
            self.active = seat;
        } else {
            self.active = self.day_opener;
        }
        tracing::info!(
            day = new_day,
            opener = self.day_opener.0,
            speech = ?self.speech,
            "dawn"
        );
    }

    // ---- termination ----

    fn conclude_if_decided(&mut self) -> bool {
        let (red, black) = self.team_counts();
        if black == 0 {
            self.conclude(Team::Red);
            true
        } else if black >= red {
            self.conclude(Team::Black);
            true
        } else {
            false
        }
    }

    fn conclude(&mut self, winner: Team) {
        tracing::info!(?winner, "game over");
        self.winner = Some(winner);
        self.chronicle.push_all(&[Token::for_winner(winner)]);
        self.phase = Phase::GameOver { day: self.phase.day(), winner };
    }

    /// Re-validate the aggregate's invariants, e.g. after restoring a
    /// persisted snapshot.
    pub fn verify_integrity(&self) -> Result<(), EngineError> {
        if self.players.len() != SEAT_COUNT {
            return Err(EngineError::DeserializationError(format!(
                "expected {SEAT_COUNT} players, found {}",
                self.players.len()
            )));
        }

        let count = |role: Role| self.players.iter().filter(|p| p.role == role).count();
        if count(Role::Don) != 1
            || count(Role::Mafia) != 2
            || count(Role::Sheriff) != 1
            || count(Role::Citizen) != 6
        {
            return Err(EngineError::DeserializationError(
                "role distribution must be 1 don, 2 mafia, 1 sheriff, 6 citizens".to_string(),
            ));
        }

        let black_seats: Vec<Seat> = Seat::all()
            .filter(|&seat| self.players[seat.0].role.team() == Team::Black)
            .collect();
        for &seat in &black_seats {
            let expected: Vec<Seat> = black_seats
                .iter()
                .copied()
                .filter(|&other| other != seat)
                .collect();
            if self.players[seat.0].mafia_team != expected {
                return Err(EngineError::DeserializationError(format!(
                    "mafia team memory of {seat} is not symmetric"
                )));
            }
        }

        for seq in self.chronicle.seqs() {
            if seq.iter().any(|token| token.is_ephemeral()) {
                return Err(EngineError::DeserializationError(
                    "stored sequences must not contain ephemeral tokens".to_string(),
                ));
            }
        }

        if self.winner.is_some() != self.phase.is_over() {
            return Err(EngineError::DeserializationError(
                "winner and phase disagree about the game being over".to_string(),
            ));
        }

        Ok(())
    }
}
