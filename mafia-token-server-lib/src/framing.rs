//! Length-prefixed JSON framing.
//!
//! A frame is an 8-byte big-endian unsigned length followed by exactly that
//! many UTF-8 JSON bytes. Both directions of the transport use the same
//! framing.

use std::io::Read;
use std::io::Write;

use mafia_token_lib::wire::Message;

use crate::error::ServerError;

/// Upper bound on a single frame; anything larger is a protocol violation.
pub const MAX_FRAME_BYTES: u64 = 16 * 1024 * 1024;

pub fn write_message<W: Write>(writer: &mut W, message: &Message) -> Result<(), ServerError> {
    let body = serde_json::to_vec(message)?;
    writer.write_all(&(body.len() as u64).to_be_bytes())?;
    writer.write_all(&body)?;
    writer.flush()?;
    Ok(())
}

pub fn read_message<R: Read>(reader: &mut R) -> Result<Message, ServerError> {
    let mut header = [0u8; 8];
    reader.read_exact(&mut header)?;
    let len = u64::from_be_bytes(header);
    if len > MAX_FRAME_BYTES {
        return Err(ServerError::FrameTooLarge(len));
    }

    let mut body = vec![0u8; len as usize];
    reader.read_exact(&mut body)?;
    Ok(serde_json::from_slice(&body)?)
}
