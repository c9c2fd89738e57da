use core::fmt::Debug;

use bitcoin::bip32::DerivationPath;

use crate::apdu::{APDUCmdVec, Curve, StatusWord};
use crate::client::check_path_depth;
use crate::command;
use crate::error::MultiversxClientError;
use crate::response::{self, AddressResult, AppConfiguration};

/// Asynchronous communication layer between the client and the device.
///
/// Same contract as the blocking [`crate::Transport`], implementations must
/// serialize access to the device.
pub trait Transport {
    type Error: Debug;
    fn exchange(
        &self,
        command: &APDUCmdVec,
    ) -> impl std::future::Future<Output = Result<(StatusWord, Vec<u8>), Self::Error>> + Send; // TODO use async fn once it can express the Send bound callers need
}

/// Asynchronous client for the MultiversX app on a Ledger device.
pub struct MultiversxClient<T: Transport> {
    transport: T,
}

impl<T: Transport> MultiversxClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    async fn make_request(
        &self,
        req: &APDUCmdVec,
    ) -> Result<Vec<u8>, MultiversxClientError<T::Error>> {
        let (sw, data) = self
            .transport
            .exchange(req)
            .await
            .map_err(MultiversxClientError::Transport)?;
        if sw != StatusWord::OK {
            return Err(MultiversxClientError::Device {
                command: req.ins,
                status: sw,
            });
        }
        Ok(data)
    }

    /// Returns the public key and bech32 address for `path`, plus the chain
    /// code when requested.
    pub async fn get_address(
        &self,
        path: &DerivationPath,
        display: bool,
        request_chain_code: bool,
        curve: Curve,
    ) -> Result<AddressResult, MultiversxClientError<T::Error>> {
        check_path_depth(path)?;
        let cmd = command::get_address(path, display, request_chain_code, curve);
        let data = self.make_request(&cmd).await?;
        response::parse_address(&data, request_chain_code).ok_or(
            MultiversxClientError::UnexpectedResult {
                command: cmd.ins,
                data,
            },
        )
    }

    /// Signs `raw_tx` with the key at `path` and returns the signature hex
    /// encoded.
    pub async fn sign_transaction(
        &self,
        path: &DerivationPath,
        raw_tx: &[u8],
        curve: Curve,
    ) -> Result<String, MultiversxClientError<T::Error>> {
        check_path_depth(path)?;
        if command::first_chunk_capacity(path) == 0 {
            return Err(MultiversxClientError::PathTooDeep(path.len()));
        }

        let mut response = Vec::new();
        for chunk in command::sign_transaction(path, raw_tx, curve) {
            response = self.make_request(&chunk).await?;
        }
        Ok(hex::encode(response))
    }

    /// Returns the version of the app running on the device.
    pub async fn get_app_configuration(
        &self,
    ) -> Result<AppConfiguration, MultiversxClientError<T::Error>> {
        let cmd = command::get_app_configuration();
        let data = self.make_request(&cmd).await?;
        response::parse_app_configuration(&data).ok_or(
            MultiversxClientError::UnexpectedResult {
                command: cmd.ins,
                data,
            },
        )
    }
}
