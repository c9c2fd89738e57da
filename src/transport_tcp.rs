use std::convert::TryFrom;
use std::error::Error;
use std::io::{Read, Write};
use std::net::TcpStream;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Mutex;

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use ledger_apdu::APDUAnswer;

use crate::apdu::{APDUCmdVec, StatusWord};
use crate::client::Transport;

/// Transport to communicate with the Ledger Speculos simulator.
///
/// Speculos frames both directions with a 4-byte big-endian length. The
/// response length does not count the trailing status word.
#[derive(Debug)]
pub struct TransportTcp {
    connection: Mutex<TcpStream>,
}

impl TransportTcp {
    pub fn new(port: u16) -> Result<Self, Box<dyn Error>> {
        let addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)), port);
        let stream = TcpStream::connect(addr)?;
        Ok(Self {
            connection: Mutex::new(stream),
        })
    }
}

impl Transport for TransportTcp {
    type Error = Box<dyn Error>;
    fn exchange(&self, command: &APDUCmdVec) -> Result<(StatusWord, Vec<u8>), Self::Error> {
        if let Ok(mut stream) = self.connection.lock() {
            let payload = command.serialize();
            stream.write_u32::<BigEndian>(payload.len() as u32)?;
            stream.write_all(&payload)?;

            let len = stream.read_u32::<BigEndian>()?;
            let mut resp = vec![0u8; len as usize + 2];
            stream.read_exact(&mut resp)?;

            let answer = APDUAnswer::from_answer(resp).map_err(|_| "invalid answer")?;
            Ok((
                StatusWord::try_from(answer.retcode()).unwrap_or(StatusWord::Unknown),
                answer.data().to_vec(),
            ))
        } else {
            Err("unable to get lock".into())
        }
    }
}
