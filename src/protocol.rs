// Turn protocol spoken with the game runner
//
// The runner drives the conversation: one setup message at game start,
// then one turn message per move request. We answer each turn message
// with the chosen action. Transport details stay behind the Transport
// trait; the shipped implementation is line-delimited JSON on stdio.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};
use thiserror::Error;

use crate::types::GameState;

/// Errors at the runner boundary
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("transport I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("malformed message: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("game runner closed the connection")]
    Disconnected,
}

/// Per-turn message: the end-of-game flag plus the current board state
///
/// The runner omits the state on the final (game over) message.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct TurnMessage {
    pub game_over: bool,
    #[serde(default)]
    pub state: Option<GameState>,
}

/// One message received from the game runner
///
/// Anything carrying a `game_over` field is a turn message, everything
/// else is the opaque setup payload.
#[derive(Serialize, Debug, Clone)]
#[serde(untagged)]
pub enum Message {
    Turn(TurnMessage),
    Setup(Value),
}

impl<'de> Deserialize<'de> for Message {
    // `#[serde(untagged)]` dispatches through serde's internal `Content`
    // buffer, which re-derives map keys generically and cannot parse our
    // `BTreeMap<u32, Fish>` fish keys (serde-rs/serde#1183). Deserializing
    // through `serde_json::Value` first keeps the same "game_over present
    // => Turn" rule while reusing serde_json's own map-key parsing.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        if value.get("game_over").is_some() {
            let turn = TurnMessage::deserialize(value).map_err(serde::de::Error::custom)?;
            Ok(Message::Turn(turn))
        } else {
            Ok(Message::Setup(value))
        }
    }
}

/// Reply sent for each turn message
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct MoveReply {
    /// Symbolic action name ("stay", "left", "right", "up", "down")
    pub action: String,
    /// Milliseconds the search spent on this turn, if measured
    pub search_time: Option<f64>,
}

/// Blocking message boundary with the game runner
pub trait Transport {
    fn receive(&mut self) -> Result<Message, ProtocolError>;
    fn send(&mut self, reply: &MoveReply) -> Result<(), ProtocolError>;
}

/// Line-delimited JSON transport over any reader/writer pair
pub struct JsonLinesTransport<R, W> {
    reader: R,
    writer: W,
    line: String,
}

impl<R: BufRead, W: Write> JsonLinesTransport<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        JsonLinesTransport {
            reader,
            writer,
            line: String::new(),
        }
    }
}

impl JsonLinesTransport<BufReader<Stdin>, Stdout> {
    /// Transport over the process stdio, the way the runner launches us
    pub fn stdio() -> Self {
        JsonLinesTransport::new(BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead, W: Write> Transport for JsonLinesTransport<R, W> {
    fn receive(&mut self) -> Result<Message, ProtocolError> {
        loop {
            self.line.clear();
            let read = self.reader.read_line(&mut self.line)?;
            if read == 0 {
                return Err(ProtocolError::Disconnected);
            }
            if self.line.trim().is_empty() {
                continue;
            }
            return Ok(serde_json::from_str(&self.line)?);
        }
    }

    fn send(&mut self, reply: &MoveReply) -> Result<(), ProtocolError> {
        let encoded = serde_json::to_string(reply)?;
        writeln!(self.writer, "{}", encoded)?;
        self.writer.flush()?;
        Ok(())
    }
}
