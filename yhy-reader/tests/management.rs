//! Reader management commands

mod common;

use common::MockReader;
use yhy_protocol::{command, DeviceStatus};
use yhy_hal::UartConfig;
use yhy_reader::{Led, ReaderConfig, ReaderError, Session};

#[test]
fn test_firmware_version() {
    let mock = MockReader::new().answer(command::READ_FW_VERSION, 0, b"V2.1");
    let mut session = Session::new(mock);

    assert_eq!(session.firmware_version(), Ok(b"V2.1".to_vec()));
}

#[test]
fn test_beep_led_antenna_payloads() {
    let mock = MockReader::new()
        .answer(command::BEEP, 0, &[])
        .answer(command::LED, 0, &[])
        .answer(command::ANTENNA_POWER, 0, &[]);
    let mut session = Session::new(mock);

    session.beep(20).unwrap();
    session.set_led(Led::Both).unwrap();
    session.set_antenna(false).unwrap();

    let requests = session.into_inner().requests();
    assert_eq!(requests[0].command, command::BEEP);
    assert_eq!(requests[0].payload, vec![20]);
    assert_eq!(requests[1].command, command::LED);
    assert_eq!(requests[1].payload, vec![0x03]);
    assert_eq!(requests[2].command, command::ANTENNA_POWER);
    assert_eq!(requests[2].payload, vec![0x00]);
}

#[test]
fn test_node_number_roundtrip() {
    let mock = MockReader::new()
        .answer(command::SET_NODE_NUMBER, 0, &[])
        .answer(command::READ_NODE_NUMBER, 0, &[0x02, 0x01]);
    let mut session = Session::new(mock);

    session.set_node_number(0x0102).unwrap();
    assert_eq!(session.read_node_number(), Ok(0x0102));

    let requests = session.into_inner().requests();
    assert_eq!(requests[0].payload, vec![0x02, 0x01]);
}

#[test]
fn test_node_number_malformed() {
    let mock = MockReader::new().answer(command::READ_NODE_NUMBER, 0, &[0x01]);
    let mut session = Session::new(mock);

    assert_eq!(
        session.read_node_number(),
        Err(ReaderError::MalformedResponse {
            command: command::READ_NODE_NUMBER
        })
    );
}

#[test]
fn test_device_error_status() {
    let mock = MockReader::new().answer(command::LED, 11, &[]);
    let mut session = Session::new(mock);

    let err = session.set_led(Led::Red).unwrap_err();
    assert_eq!(err, ReaderError::Device(DeviceStatus::UndefinedCommand));
    assert_eq!(err.device_status(), Some(DeviceStatus::UndefinedCommand));
}

#[test]
fn test_apply_default_config() {
    let mock = MockReader::new()
        .answer(command::ANTENNA_POWER, 0, &[])
        .answer(command::LED, 0, &[]);
    let mut session = Session::new(mock);

    session.apply_config(&ReaderConfig::default()).unwrap();

    let requests = session.into_inner().requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].command, command::ANTENNA_POWER);
    assert_eq!(requests[0].payload, vec![0x01]);
    assert_eq!(requests[1].command, command::LED);
    assert_eq!(requests[1].payload, vec![0x00]);
}

#[test]
fn test_apply_config_leaves_line_settings_to_the_port() {
    let config = ReaderConfig {
        uart: UartConfig {
            baudrate: 9600,
            ..UartConfig::default()
        },
        ..ReaderConfig::default()
    };
    let mock = MockReader::new()
        .answer(command::ANTENNA_POWER, 0, &[])
        .answer(command::LED, 0, &[]);
    let mut session = Session::new(mock);

    session.apply_config(&config).unwrap();

    assert_eq!(
        session.into_inner().commands(),
        vec![command::ANTENNA_POWER, command::LED]
    );
}

#[test]
fn test_apply_full_config() {
    let config = ReaderConfig {
        antenna_on_start: true,
        led: Led::Blue,
        startup_beep: Some(5),
        node_number: Some(7),
        ..ReaderConfig::default()
    };
    let mock = MockReader::new()
        .answer(command::SET_NODE_NUMBER, 0, &[])
        .answer(command::ANTENNA_POWER, 0, &[])
        .answer(command::LED, 0, &[])
        .answer(command::BEEP, 0, &[]);
    let mut session = Session::new(mock);

    session.apply_config(&config).unwrap();

    assert_eq!(
        session.into_inner().commands(),
        vec![
            command::SET_NODE_NUMBER,
            command::ANTENNA_POWER,
            command::LED,
            command::BEEP
        ]
    );
}

#[test]
fn test_apply_config_stops_at_first_error() {
    let mock = MockReader::new()
        .answer(command::ANTENNA_POWER, 10, &[])
        .answer(command::LED, 0, &[]);
    let mut session = Session::new(mock);

    assert_eq!(
        session.apply_config(&ReaderConfig::default()),
        Err(ReaderError::Device(DeviceStatus::General))
    );
    assert_eq!(
        session.into_inner().commands(),
        vec![command::ANTENNA_POWER]
    );
}
