use std::fmt::Debug;

use bitcoin::bip32::DerivationPath;

use crate::apdu::{APDUCmdVec, Curve, StatusWord, MAX_PATH_SEGMENTS};
use crate::command;
use crate::error::MultiversxClientError;
use crate::response::{self, AddressResult, AppConfiguration};

/// Communication layer between the client and the device.
///
/// An exchange sends one APDU and returns the status word split off from the
/// response payload. Implementations must serialize access to the device, at
/// most one exchange may be outstanding per session.
pub trait Transport {
    type Error: Debug;
    fn exchange(&self, command: &APDUCmdVec) -> Result<(StatusWord, Vec<u8>), Self::Error>;
}

/// Client for the MultiversX app on a Ledger device.
pub struct MultiversxClient<T: Transport> {
    transport: T,
}

impl<T: Transport> MultiversxClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    fn make_request(
        &self,
        req: &APDUCmdVec,
    ) -> Result<Vec<u8>, MultiversxClientError<T::Error>> {
        let (sw, data) = self
            .transport
            .exchange(req)
            .map_err(MultiversxClientError::Transport)?;
        if sw != StatusWord::OK {
            return Err(MultiversxClientError::Device {
                command: req.ins,
                status: sw,
            });
        }
        Ok(data)
    }

    /// Derives the account for `path` on the device and returns its public
    /// key and bech32 address, plus the chain code when `request_chain_code`
    /// is set. With `display` the device shows the address and waits for the
    /// user to confirm before answering.
    pub fn get_address(
        &self,
        path: &DerivationPath,
        display: bool,
        request_chain_code: bool,
        curve: Curve,
    ) -> Result<AddressResult, MultiversxClientError<T::Error>> {
        check_path_depth(path)?;
        let cmd = command::get_address(path, display, request_chain_code, curve);
        let data = self.make_request(&cmd)?;
        response::parse_address(&data, request_chain_code).ok_or(
            MultiversxClientError::UnexpectedResult {
                command: cmd.ins,
                data,
            },
        )
    }

    /// Signs `raw_tx` with the key at `path`, streaming the transaction to
    /// the device in as many APDUs as it takes. The device shows the
    /// transaction and waits for user confirmation before signing. Returns
    /// the signature hex encoded.
    pub fn sign_transaction(
        &self,
        path: &DerivationPath,
        raw_tx: &[u8],
        curve: Curve,
    ) -> Result<String, MultiversxClientError<T::Error>> {
        check_path_depth(path)?;
        if command::first_chunk_capacity(path) == 0 {
            // the path prefix alone would overflow the first APDU
            return Err(MultiversxClientError::PathTooDeep(path.len()));
        }

        let mut response = Vec::new();
        for chunk in command::sign_transaction(path, raw_tx, curve) {
            // only the answer to the final chunk carries the signature
            response = self.make_request(&chunk)?;
        }
        Ok(hex::encode(response))
    }

    /// Returns the version of the app running on the device.
    pub fn get_app_configuration(
        &self,
    ) -> Result<AppConfiguration, MultiversxClientError<T::Error>> {
        let cmd = command::get_app_configuration();
        let data = self.make_request(&cmd)?;
        response::parse_app_configuration(&data).ok_or(
            MultiversxClientError::UnexpectedResult {
                command: cmd.ins,
                data,
            },
        )
    }
}

/// The path segment count must fit the one-byte prefix of the encoding.
pub(crate) fn check_path_depth<E: Debug>(
    path: &DerivationPath,
) -> Result<(), MultiversxClientError<E>> {
    if path.len() > MAX_PATH_SEGMENTS {
        return Err(MultiversxClientError::PathTooDeep(path.len()));
    }
    Ok(())
}
