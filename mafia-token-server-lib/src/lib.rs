//! Network transport, self-play driver, and training artifacts for the
//! token Mafia engine.

pub mod artifacts;
pub mod client;
mod error;
pub mod framing;
pub mod protocol;
pub mod selfplay;
pub mod server;

pub use error::ServerError;
pub use server::NetServerConfig;
pub use server::NetTokenServer;

#[cfg(test)]
mod tests {
    mod artifacts;
    mod framing;
    mod net;
    mod protocol;
    mod selfplay;
}
