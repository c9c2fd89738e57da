//! Asynchronous variant of the client, behind the `asyncr` feature.

pub use client::{MultiversxClient, Transport};
pub use transport_tcp::TransportTcp;

mod client;
mod transport_tcp;
