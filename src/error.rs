use std::fmt::Debug;

use crate::apdu::StatusWord;

/// Errors returned by [`crate::MultiversxClient`].
#[derive(Debug, thiserror::Error)]
pub enum MultiversxClientError<T: Debug> {
    /// The transport failed to carry the exchange.
    #[error("transport error: {0:?}")]
    Transport(T),

    /// The app answered with a status word other than OK.
    #[error("device error: command {command:#04x} returned status {status:?}")]
    Device { command: u8, status: StatusWord },

    /// The app answered OK but the payload does not parse.
    #[error("unexpected response for command {command:#04x} ({} bytes)", .data.len())]
    UnexpectedResult { command: u8, data: Vec<u8> },

    /// The derivation path cannot be encoded into a single APDU.
    #[error("derivation path of {0} segments does not fit the command payload")]
    PathTooDeep(usize),
}
