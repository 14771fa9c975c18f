//! A minimal client for the framed transport, plus the random agent used by
//! replays and tests.

use std::io;
use std::net::TcpStream;
use std::net::ToSocketAddrs;

use mafia_token_lib::Action;
use mafia_token_lib::Team;
use mafia_token_lib::Token;
use mafia_token_lib::action::tokens_from_ids;
use mafia_token_lib::wire::GameEvent;
use mafia_token_lib::wire::Message;
use mafia_token_lib::wire::ValidActions;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

use crate::error::ServerError;
use crate::framing;

pub struct NetTokenClient {
    stream: TcpStream,
}

impl NetTokenClient {
    pub fn connect<A: ToSocketAddrs>(addr: A) -> io::Result<Self> {
        Ok(NetTokenClient { stream: TcpStream::connect(addr)? })
    }

    pub fn read_message(&mut self) -> Result<Message, ServerError> {
        framing::read_message(&mut self.stream)
    }

    pub fn send_action(&mut self, player_id: usize, action: Action) -> Result<(), ServerError> {
        framing::write_message(
            &mut self.stream,
            &Message::ActionResponse { player_id, action },
        )
    }
}

/// Pick one action uniformly from a `valid_actions` payload.
pub fn pick_random_action(valid: &ValidActions, rng: &mut StdRng) -> Option<Action> {
    let options: Vec<(&String, &Vec<u16>)> = valid
        .iter()
        .flat_map(|(kind, arg_lists)| arg_lists.iter().map(move |args| (kind, args)))
        .collect();
    let &(kind, args) = options.choose(rng)?;

    let verb = Token::from_name(kind)?;
    let mut tokens = vec![verb];
    tokens.extend(tokens_from_ids(args).ok()?);
    Action::decode(&tokens).ok()
}

/// Connect a seat and answer every request with a random legal action until
/// the game ends. Returns the winner announced by the server.
pub fn run_random_client<A: ToSocketAddrs>(
    addr: A,
    random_seed: u64,
) -> Result<Team, ServerError> {
    let mut client = NetTokenClient::connect(addr)?;
    let mut rng = StdRng::seed_from_u64(random_seed);

    loop {
        match client.read_message()? {
            Message::ActionRequest { player_id, valid_actions, .. } => {
                let action = pick_random_action(&valid_actions, &mut rng)
                    .ok_or(ServerError::NoLegalAction)?;
                client.send_action(player_id, action)?;
            }
            Message::GameEvent { event: GameEvent::GameOver { winner } } => {
                return Ok(winner);
            }
            Message::GameEvent { .. } => {}
            Message::Error { message } => {
                tracing::warn!(message, "server rejected an action");
            }
            Message::ActionResponse { .. } => {}
        }
    }
}
