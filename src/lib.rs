#![doc = include_str!("../README.md")]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]

mod apdu;
mod client;
mod command;
mod error;
mod logging;
mod response;
mod transport_tcp;

#[cfg(feature = "asyncr")]
pub mod asyncr;

#[cfg(feature = "hid")]
mod transport_hid;

pub use apdu::{
    APDUCmdVec, Curve, StatusWord, CHAIN_CODE_LEN, CLA, MAX_APDU_SIZE, MAX_PATH_SEGMENTS,
};
pub use client::{MultiversxClient, Transport};
pub use error::MultiversxClientError;
pub use logging::LoggingTransport;
pub use response::{AddressResult, AppConfiguration};
pub use transport_tcp::TransportTcp;

pub use bitcoin;
#[cfg(feature = "hid")]
pub use ledger_transport_hid;
#[cfg(feature = "hid")]
pub use transport_hid::TransportHID;
