use std::fmt;

use crate::apdu::CHAIN_CODE_LEN;

/// Address material returned by the device for one derivation path.
///
/// Both keys are hex encoded; the bech32 address is carried as ASCII on the
/// wire and returned verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressResult {
    pub public_key: String,
    pub address: String,
    /// Present only when the chain code was requested.
    pub chain_code: Option<String>,
}

/// Version of the app running on the device.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AppConfiguration {
    pub major: u8,
    pub minor: u8,
    pub patch: u8,
}

impl fmt::Display for AppConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Parses the GetAddress response payload.
///
/// Layout: public key length, public key bytes, address length, address
/// bytes, then the chain code. The chain code has no length byte and is
/// present exactly when it was requested, so the caller must say whether to
/// expect it. Returns `None` when the payload does not match.
pub(crate) fn parse_address(data: &[u8], with_chain_code: bool) -> Option<AddressResult> {
    let pk_len = *data.first()? as usize;
    let pk = data.get(1..1 + pk_len)?;

    let addr_offset = 1 + pk_len;
    let addr_len = *data.get(addr_offset)? as usize;
    let addr = data.get(addr_offset + 1..addr_offset + 1 + addr_len)?;

    let chain_code = if with_chain_code {
        let cc_offset = addr_offset + 1 + addr_len;
        let cc = data.get(cc_offset..cc_offset + CHAIN_CODE_LEN)?;
        Some(hex::encode(cc))
    } else {
        None
    };

    Some(AddressResult {
        public_key: hex::encode(pk),
        address: core::str::from_utf8(addr).ok()?.to_string(),
        chain_code,
    })
}

/// Parses the GetAppConfiguration response payload. The version sits in
/// bytes 1 to 3, the leading byte carries flags this client does not use.
pub(crate) fn parse_app_configuration(data: &[u8]) -> Option<AppConfiguration> {
    match data {
        [_, major, minor, patch, ..] => Some(AppConfiguration {
            major: *major,
            minor: *minor,
            patch: *patch,
        }),
        _ => None,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn address_payload() -> Vec<u8> {
        let mut data = vec![0x04, 0xAA, 0xBB, 0xCC, 0xDD, 0x02, b'a', b'b'];
        data.extend_from_slice(&[0x11; CHAIN_CODE_LEN]);
        data
    }

    #[test]
    fn parse_address_with_chain_code() {
        let parsed = parse_address(&address_payload(), true).expect("test");
        assert_eq!(parsed.public_key, "aabbccdd");
        assert_eq!(parsed.address, "ab");
        assert_eq!(parsed.chain_code, Some("11".repeat(CHAIN_CODE_LEN)));
    }

    #[test]
    fn parse_address_without_chain_code() {
        // trailing bytes past the address are ignored when no chain code
        // was requested
        let parsed = parse_address(&address_payload(), false).expect("test");
        assert_eq!(parsed.public_key, "aabbccdd");
        assert_eq!(parsed.address, "ab");
        assert_eq!(parsed.chain_code, None);

        let exact = &address_payload()[..8];
        let parsed = parse_address(exact, false).expect("test");
        assert_eq!(parsed.address, "ab");
    }

    #[test]
    fn parse_address_rejects_short_chain_code() {
        let mut data = address_payload();
        data.pop();
        assert!(parse_address(&data, true).is_none());

        let exact = &address_payload()[..8];
        assert!(parse_address(exact, true).is_none());
    }

    #[test]
    fn parse_address_rejects_truncated_payload() {
        assert!(parse_address(&[], false).is_none());
        assert!(parse_address(&[0x04, 0xAA], false).is_none());
        assert!(parse_address(&[0x01, 0xAA], false).is_none());
        assert!(parse_address(&[0x01, 0xAA, 0x05, b'a'], false).is_none());
    }

    #[test]
    fn parse_address_rejects_invalid_utf8() {
        let data = [0x01, 0xAA, 0x02, 0xFF, 0xFE];
        assert!(parse_address(&data, false).is_none());
    }

    #[test]
    fn parse_version() {
        let parsed = parse_app_configuration(&[0x00, 1, 2, 3]).expect("test");
        assert_eq!((parsed.major, parsed.minor, parsed.patch), (1, 2, 3));
        assert_eq!(parsed.to_string(), "1.2.3");

        assert!(parse_app_configuration(&[0x00, 1, 2]).is_none());
    }
}
