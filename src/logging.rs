use crate::apdu::{APDUCmdVec, StatusWord};
use crate::client::Transport;

/// Transport decorator tracing every exchange at debug level.
///
/// Wrap any transport to see the APDUs going over the wire:
///
/// ```rust,no_run
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use ledger_multiversx::{LoggingTransport, MultiversxClient, TransportTcp};
///
/// let client = MultiversxClient::new(LoggingTransport::new(TransportTcp::new(9999)?));
/// # Ok(())
/// # }
/// ```
pub struct LoggingTransport<T>(pub T);

impl<T> LoggingTransport<T> {
    pub fn new(transport: T) -> Self {
        Self(transport)
    }
}

impl<T: Transport> Transport for LoggingTransport<T> {
    type Error = T::Error;

    fn exchange(&self, command: &APDUCmdVec) -> Result<(StatusWord, Vec<u8>), Self::Error> {
        tracing::debug!(
            "\n--->\tcla {:02x} ins {:02x} p1 {:02x} p2 {:02x}\n\t({} bytes) {}",
            command.cla,
            command.ins,
            command.p1,
            command.p2,
            command.data.len(),
            hex::encode(&command.data),
        );
        let result = self.0.exchange(command);
        match &result {
            Ok((sw, data)) => tracing::debug!(
                "\n<---\t{:?}\n\t({} bytes) {}",
                sw,
                data.len(),
                hex::encode(data),
            ),
            Err(e) => tracing::debug!("\n<---\ttransport error {:?}", e),
        }
        result
    }
}

#[cfg(feature = "asyncr")]
impl<T: crate::asyncr::Transport + Sync> crate::asyncr::Transport for LoggingTransport<T> {
    type Error = T::Error;

    fn exchange(
        &self,
        command: &APDUCmdVec,
    ) -> impl std::future::Future<Output = Result<(StatusWord, Vec<u8>), Self::Error>> + Send {
        async move {
            tracing::debug!(
                "\n--->\tcla {:02x} ins {:02x} p1 {:02x} p2 {:02x}\n\t({} bytes) {}",
                command.cla,
                command.ins,
                command.p1,
                command.p2,
                command.data.len(),
                hex::encode(&command.data),
            );
            let result = self.0.exchange(command).await;
            match &result {
                Ok((sw, data)) => tracing::debug!(
                    "\n<---\t{:?}\n\t({} bytes) {}",
                    sw,
                    data.len(),
                    hex::encode(data),
                ),
                Err(e) => tracing::debug!("\n<---\ttransport error {:?}", e),
            }
            result
        }
    }
}
