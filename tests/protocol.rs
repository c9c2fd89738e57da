use std::cell::RefCell;

use bitcoin::bip32::DerivationPath;
use ledger_multiversx::{
    APDUCmdVec, Curve, LoggingTransport, MultiversxClient, MultiversxClientError, StatusWord,
    Transport, MAX_APDU_SIZE,
};

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "debug".into()),
        )
        .try_init()
        .ok();
}

/// Answers each exchange with the next scripted reply and records what was
/// sent, standing in for the device.
struct MockDevice {
    replies: RefCell<Vec<(StatusWord, Vec<u8>)>>,
    sent: RefCell<Vec<(u8, u8, u8, u8, Vec<u8>)>>,
}

impl MockDevice {
    fn new(mut replies: Vec<(StatusWord, Vec<u8>)>) -> Self {
        replies.reverse();
        Self {
            replies: RefCell::new(replies),
            sent: RefCell::new(Vec::new()),
        }
    }
}

impl Transport for &MockDevice {
    type Error = String;

    fn exchange(&self, command: &APDUCmdVec) -> Result<(StatusWord, Vec<u8>), Self::Error> {
        self.sent.borrow_mut().push((
            command.cla,
            command.ins,
            command.p1,
            command.p2,
            command.data.clone(),
        ));
        self.replies
            .borrow_mut()
            .pop()
            .ok_or_else(|| "no reply scripted".to_string())
    }
}

fn path() -> DerivationPath {
    "m/44'/508'/0'/0/0".parse().expect("test")
}

#[test]
fn sign_long_transaction() {
    init_logging();

    let tx = vec![0xC3; 400];
    let signature = vec![0x5A; 64];
    let device = MockDevice::new(vec![
        (StatusWord::OK, Vec::new()),
        (StatusWord::OK, Vec::new()),
        (StatusWord::OK, signature.clone()),
    ]);
    let client = MultiversxClient::new(&device);

    let result = client
        .sign_transaction(&path(), &tx, Curve::Ed25519)
        .expect("test");
    assert_eq!(result, hex::encode(&signature));

    let sent = device.sent.borrow();
    let p1s: Vec<u8> = sent.iter().map(|c| c.2).collect();
    assert_eq!(p1s, vec![0x80, 0x81, 0x01]);
    for (cla, ins, _, p2, data) in sent.iter() {
        assert_eq!((*cla, *ins, *p2), (0xE0, 0x04, 0x80));
        assert!(data.len() <= MAX_APDU_SIZE);
    }

    // first chunk carries the 21-byte path prefix, the rest is transaction
    let prefix_len = 1 + 4 * 5;
    let mut rebuilt = sent[0].4[prefix_len..].to_vec();
    for chunk in &sent[1..] {
        rebuilt.extend_from_slice(&chunk.4);
    }
    assert_eq!(rebuilt, tx);
}

#[test]
fn address_and_version() {
    init_logging();

    let public_key = vec![0x0F; 32];
    let address = format!("erd1{}", "q".repeat(58));
    let mut payload = vec![public_key.len() as u8];
    payload.extend_from_slice(&public_key);
    payload.push(address.len() as u8);
    payload.extend_from_slice(address.as_bytes());

    let device = MockDevice::new(vec![
        (StatusWord::OK, payload),
        (StatusWord::OK, vec![0x00, 1, 2, 3]),
    ]);
    let client = MultiversxClient::new(&device);

    let result = client
        .get_address(&path(), true, false, Curve::Ed25519)
        .expect("test");
    assert_eq!(result.public_key, hex::encode(&public_key));
    assert_eq!(result.address, address);
    assert_eq!(result.chain_code, None);

    let config = client.get_app_configuration().expect("test");
    assert_eq!(config.to_string(), "1.2.3");

    let sent = device.sent.borrow();
    assert_eq!(
        (sent[0].0, sent[0].1, sent[0].2, sent[0].3),
        (0xE0, 0x02, 0x01, 0x80)
    );
    assert_eq!(
        (sent[1].0, sent[1].1, sent[1].2, sent[1].3),
        (0xE0, 0x06, 0x00, 0x00)
    );
}

#[test]
fn user_rejection_surfaces_as_device_error() {
    let device = MockDevice::new(vec![(StatusWord::Deny, Vec::new())]);
    let client = MultiversxClient::new(&device);

    let err = client
        .get_address(&path(), true, false, Curve::Ed25519)
        .unwrap_err();
    assert!(matches!(
        err,
        MultiversxClientError::Device {
            command: 0x02,
            status: StatusWord::Deny,
        }
    ));
    let msg = err.to_string();
    assert!(msg.contains("0x02"), "{msg}");
    assert!(msg.contains("Deny"), "{msg}");
}

#[test]
fn logging_transport_is_transparent() {
    init_logging();

    let device = MockDevice::new(vec![(StatusWord::OK, vec![0x00, 9, 9, 9])]);
    let client = MultiversxClient::new(LoggingTransport::new(&device));

    let config = client.get_app_configuration().expect("test");
    assert_eq!(config.to_string(), "9.9.9");
    assert_eq!(device.sent.borrow().len(), 1);
}
