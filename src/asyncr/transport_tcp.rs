use std::convert::TryFrom;
use std::io;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use ledger_apdu::APDUAnswer;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::Mutex;

use super::Transport;
use crate::apdu::{APDUCmdVec, StatusWord};

/// Transport to communicate with the Ledger Speculos simulator.
///
/// Same framing as the blocking [`crate::TransportTcp`], a 4-byte big-endian
/// length in both directions.
#[derive(Debug)]
pub struct TransportTcp {
    connection: Mutex<TcpStream>,
}

impl TransportTcp {
    pub async fn new(port: u16) -> io::Result<Self> {
        let addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)), port);
        let stream = TcpStream::connect(addr).await?;
        Ok(Self {
            connection: Mutex::new(stream),
        })
    }
}

impl Transport for TransportTcp {
    type Error = io::Error;

    fn exchange(
        &self,
        command: &APDUCmdVec,
    ) -> impl std::future::Future<Output = Result<(StatusWord, Vec<u8>), Self::Error>> + Send {
        async move {
            let mut stream = self.connection.lock().await;
            let payload = command.serialize();
            stream.write_u32(payload.len() as u32).await?;
            stream.write_all(&payload).await?;

            let len = stream.read_u32().await?;
            let mut resp = vec![0u8; len as usize + 2];
            stream.read_exact(&mut resp).await?;

            let answer = APDUAnswer::from_answer(resp)
                .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "invalid answer"))?;
            Ok((
                StatusWord::try_from(answer.retcode()).unwrap_or(StatusWord::Unknown),
                answer.data().to_vec(),
            ))
        }
    }
}
