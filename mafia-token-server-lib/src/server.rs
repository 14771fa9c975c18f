//! The network turn server.
//!
//! Accepts up to ten clients, one per seat in connection order, then drives
//! the game: an ACTION_REQUEST goes to the active seat, the ACTION_RESPONSE
//! is decoded, encoded to tokens and applied, and events fan out. Each
//! client socket gets its own reader thread; all game mutation happens on
//! the drive loop's thread, so actions are totally ordered by acceptance.

use std::io;
use std::net::SocketAddr;
use std::net::TcpListener;
use std::net::TcpStream;
use std::net::ToSocketAddrs;
use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::mpsc::Receiver;
use std::thread;

use mafia_token_lib::Action;
use mafia_token_lib::GameId;
use mafia_token_lib::SEAT_COUNT;
use mafia_token_lib::Seat;
use mafia_token_lib::Team;
use mafia_token_lib::Token;
use mafia_token_lib::wire::EliminationCause;
use mafia_token_lib::wire::GameEvent;
use mafia_token_lib::wire::Message;
use mafia_token_engine_lib::EngineError;
use mafia_token_engine_lib::Phase;
use mafia_token_engine_lib::TurnServer;

use crate::artifacts;
use crate::error::ServerError;
use crate::framing;
use crate::protocol;

pub struct NetServerConfig {
    pub seed: u16,
    /// Root for training artifacts, written when the game ends.
    pub log_dir: Option<PathBuf>,
}

pub struct NetTokenServer {
    listener: TcpListener,
    config: NetServerConfig,
    session: Option<TurnServer>,
}

impl NetTokenServer {
    pub fn bind<A: ToSocketAddrs>(addr: A, config: NetServerConfig) -> io::Result<Self> {
        let listener = TcpListener::bind(addr)?;
        Ok(NetTokenServer { listener, config, session: None })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept one client per seat, play the game to its end, and return the
    /// winning team.
    pub fn run(mut self) -> Result<Team, ServerError> {
        let (writers, responses) = self.accept_clients()?;
        self.session = Some(TurnServer::initialize(self.config.seed));
        self.drive(&writers, &responses)
    }

    fn accept_clients(
        &self,
    ) -> Result<(Vec<TcpStream>, Receiver<(usize, Message)>), ServerError> {
        let (tx, rx) = mpsc::channel();
        let mut writers = Vec::with_capacity(SEAT_COUNT);

        for seat in 0..SEAT_COUNT {
            let (stream, addr) = self.listener.accept()?;
            tracing::info!(seat, %addr, "client connected");

            let mut reader = stream.try_clone()?;
            writers.push(stream);
            let tx = tx.clone();
            thread::spawn(move || {
                loop {
                    match framing::read_message(&mut reader) {
                        Ok(message) => {
                            if tx.send((seat, message)).is_err() {
                                break;
                            }
                        }
                        Err(err) => {
                            tracing::debug!(seat, %err, "client reader stopped");
                            break;
                        }
                    }
                }
            });
        }

        Ok((writers, rx))
    }

    fn drive(
        &mut self,
        writers: &[TcpStream],
        responses: &Receiver<(usize, Message)>,
    ) -> Result<Team, ServerError> {
        let game_id = GameId::new();
        tracing::info!(%game_id, seed = self.config.seed, "game starting");

        loop {
            let session = self.session.as_mut().ok_or(EngineError::GameNotInitialized)?;

            if let Some(winner) = session.game().winner() {
                broadcast(writers, &GameEvent::GameOver { winner });
                if let Some(dir) = &self.config.log_dir {
                    let files = artifacts::write_training_artifacts(dir, session, game_id)?;
                    tracing::info!(files = files.len(), "training artifacts written");
                }
                return Ok(winner);
            }

            let seat = session.game().active_seat();
            let request = Message::ActionRequest {
                player_id: seat.0,
                phase: session.game().phase().to_string(),
                valid_actions: protocol::build_valid_actions(&session.legal_actions()),
                observation: protocol::observation_payload(session, seat),
            };
            framing::write_message(&mut &writers[seat.0], &request)?;

            let action = loop {
                let (from, message) =
                    responses.recv().map_err(|_| ServerError::ClientsGone)?;
                match message {
                    Message::ActionResponse { player_id, action }
                        if from == seat.0 && player_id == seat.0 =>
                    {
                        break action;
                    }
                    _ => {
                        tracing::debug!(from, "message out of turn");
                        let _ = framing::write_message(
                            &mut &writers[from],
                            &Message::Error { message: "it is not your turn".to_string() },
                        );
                    }
                }
            };

            let mut tokens = action.encode();
            if session.game().phase().is_night() {
                // Night actions always terminate the actor's turn.
                tokens.push(Token::EndTurn);
            }

            let phase_before = session.game().phase();
            let alive_before: Vec<bool> = Seat::all()
                .map(|s| session.game().player(s).life.is_alive())
                .collect();

            if let Err(err) = session.apply_action(seat, &tokens) {
                // The client keeps its turn and may retry; the next loop
                // iteration re-issues the request against unchanged state.
                tracing::info!(seat = seat.0, %err, "action rejected");
                framing::write_message(
                    &mut &writers[seat.0],
                    &Message::Error { message: err.to_string() },
                )?;
                continue;
            }

            self.emit_events(writers, seat, action, phase_before, &alive_before)?;
        }
    }

    fn emit_events(
        &self,
        writers: &[TcpStream],
        actor: Seat,
        action: Action,
        phase_before: Phase,
        alive_before: &[bool],
    ) -> Result<(), ServerError> {
        let session = self.session.as_ref().ok_or(EngineError::GameNotInitialized)?;
        let game = session.game();

        // Check results go to the acting player only.
        match action {
            Action::SheriffCheck { .. } => {
                if let Some(note) = game.player(actor).sheriff_checks.last() {
                    framing::write_message(
                        &mut &writers[actor.0],
                        &Message::GameEvent {
                            event: GameEvent::SheriffCheckResult {
                                target: note.target,
                                color: note.color,
                            },
                        },
                    )?;
                }
            }
            Action::DonCheck { .. } => {
                if let Some(note) = game.player(actor).don_checks.last() {
                    framing::write_message(
                        &mut &writers[actor.0],
                        &Message::GameEvent {
                            event: GameEvent::DonCheckResult {
                                target: note.target,
                                is_sheriff: note.is_sheriff,
                            },
                        },
                    )?;
                }
            }
            _ => {}
        }

        for seat in Seat::all() {
            if alive_before[seat.0] && !game.player(seat).life.is_alive() {
                let cause = if phase_before.is_voting() {
                    EliminationCause::VotedOut
                } else {
                    EliminationCause::NightKill
                };
                broadcast(writers, &GameEvent::PlayerEliminated { player: seat, cause });
            }
        }

        let phase = game.phase();
        if phase != phase_before && !phase.is_over() {
            broadcast(writers, &GameEvent::PhaseChanged { phase: phase.to_string() });
        }

        Ok(())
    }
}

/// Best-effort event fan-out; a dead client only loses its own events.
fn broadcast(writers: &[TcpStream], event: &GameEvent) {
    let message = Message::GameEvent { event: event.clone() };
    for (seat, writer) in writers.iter().enumerate() {
        if let Err(err) = framing::write_message(&mut &*writer, &message) {
            tracing::warn!(seat, %err, "event delivery failed");
        }
    }
}
