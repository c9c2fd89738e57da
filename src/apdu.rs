use core::convert::TryFrom;

use ledger_apdu::APDUCommand;

/// Class byte shared by every command of the MultiversX app.
pub const CLA: u8 = 0xE0;

/// Maximum data length of a single APDU. The app refuses anything larger,
/// which is why transactions are chunked.
pub const MAX_APDU_SIZE: usize = 150;

/// The path segment count must fit the one-byte prefix of the encoding.
pub const MAX_PATH_SEGMENTS: usize = 255;

/// The chain code has no length byte on the wire, its size is fixed.
pub const CHAIN_CODE_LEN: usize = 32;

pub type APDUCmdVec = APDUCommand<Vec<u8>>;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum CommandCode {
    GetAddress = 0x02,
    SignTransaction = 0x04,
    GetAppConfiguration = 0x06,
}

// GetAddress parameters
pub const P1_DISPLAY_ADDRESS: u8 = 0x01;
pub const P2_MASK_CHAIN_CODE: u8 = 0x01;

// SignTransaction parameters, the high bit of p1 marks "more blocks follow"
pub const P1_FIRST_CHUNK: u8 = 0x00;
pub const P1_SUBSEQUENT_CHUNK: u8 = 0x01;
pub const P1_MASK_MORE_BLOCKS: u8 = 0x80;

/// Elliptic-curve scheme the device derives and signs with.
///
/// The discriminant is the mask OR'd into p2. The original host binding
/// exposed this as a bare boolean defaulting to [`Curve::Secp256k1`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Curve {
    Secp256k1 = 0x40,
    Ed25519 = 0x80,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u16)]
pub enum StatusWord {
    /// Rejected by user
    Deny = 0x6985,
    /// Incorrect Data
    IncorrectData = 0x6A80,
    /// Not Supported
    NotSupported = 0x6A82,
    /// Wrong P1P2
    WrongP1P2 = 0x6A86,
    /// Wrong DataLength
    WrongDataLength = 0x6A87,
    /// Ins not supported
    InsNotSupported = 0x6D00,
    /// Cla not supported
    ClaNotSupported = 0x6E00,
    /// Success
    OK = 0x9000,
    /// Unknown
    Unknown,
}

impl TryFrom<u16> for StatusWord {
    type Error = ();

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0x6985 => Ok(StatusWord::Deny),
            0x6A80 => Ok(StatusWord::IncorrectData),
            0x6A82 => Ok(StatusWord::NotSupported),
            0x6A86 => Ok(StatusWord::WrongP1P2),
            0x6A87 => Ok(StatusWord::WrongDataLength),
            0x6D00 => Ok(StatusWord::InsNotSupported),
            0x6E00 => Ok(StatusWord::ClaNotSupported),
            0x9000 => Ok(StatusWord::OK),
            _ => Err(()),
        }
    }
}
