//! End-to-end flows across the crate stack: typed packets through the
//! frame codec, a byte transport, and the packet queue.

use std::io::Cursor;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use hex_literal::hex;

use xbeewire::addr::Addr64;
use xbeewire::frame::{FrameConfig, FrameError, FrameReader, FrameWriter, OperatingMode};
use xbeewire::packet::common::AtCommand;
use xbeewire::packet::{ApiPacket, AtCmd, Packet};
use xbeewire::queue::PacketQueue;

#[test]
fn transmit_path_produces_documented_wire_bytes() {
    let mut writer = FrameWriter::new(Vec::new());

    let ni = AtCommand::query(0x01, AtCmd::new("NI").unwrap());
    writer.write_frame(&ni.to_frame()).unwrap();

    let status_query = AtCommand::query(0x17, AtCmd::new("AI").unwrap());
    writer.write_frame(&status_query.to_frame()).unwrap();

    let wire = writer.into_inner();
    assert_eq!(&wire[..8], hex!("7E 0004 08 01 4E49 5F"));
    assert_eq!(&wire[8..11], hex!("7E 0004"));
}

#[test]
fn receive_path_decodes_frames_into_typed_packets() {
    // Noise, a modem status, more noise, then a receive packet.
    let mut stream = Vec::new();
    stream.extend_from_slice(&hex!("AB CD"));
    stream.extend_from_slice(&hex!("7E 0002 8A 06 6F"));
    stream.extend_from_slice(&hex!("11 13"));
    stream.extend_from_slice(&hex!(
        "7E 0012 90 0013A20040522BAA 7D84 01 527844617461 0D"
    ));

    let mut reader = FrameReader::new(Cursor::new(stream));
    let queue = PacketQueue::new();

    for _ in 0..2 {
        let frame = reader.read_frame().unwrap();
        queue.push(ApiPacket::decode(&frame).unwrap());
    }
    assert!(matches!(
        reader.read_frame(),
        Err(FrameError::ConnectionClosed)
    ));

    // Filtered pop takes the data packet even though modem status is older.
    let data = queue.pop_data_packet(Duration::ZERO).unwrap();
    assert_eq!(
        data.source_addr64(),
        Some(Addr64::new(0x0013_A200_4052_2BAA))
    );
    match data {
        ApiPacket::Receive(receive) => assert_eq!(receive.data, b"RxData"),
        other => panic!("wrong packet: {other:?}"),
    }

    assert!(matches!(
        queue.pop_first(Duration::ZERO).unwrap(),
        ApiPacket::ModemStatus(_)
    ));
    assert!(queue.is_empty());
}

#[test]
fn escaped_mode_round_trips_special_bytes() {
    let config = FrameConfig {
        mode: OperatingMode::ApiEscape,
        ..FrameConfig::default()
    };

    // Payload holding every byte that needs escaping.
    let packet = ApiPacket::from_frame_data(&hex!("FF 11 13 7D 7E")).unwrap();

    let mut writer = FrameWriter::with_config(Vec::new(), config.clone());
    writer.write_frame(&packet.to_frame()).unwrap();
    let wire = writer.into_inner();

    // Only the leading delimiter may appear unescaped.
    assert_eq!(wire[0], 0x7E);
    assert!(!wire[1..].contains(&0x7E));

    let mut reader = FrameReader::with_config(Cursor::new(wire), config);
    let frame = reader.read_frame().unwrap();
    assert_eq!(ApiPacket::decode(&frame).unwrap(), packet);
}

#[test]
fn consumer_blocks_until_the_reader_thread_delivers() {
    let queue = Arc::new(PacketQueue::new());
    let producer = Arc::clone(&queue);

    let reader_thread = thread::spawn(move || {
        let stream = hex!("7E 0005 88 01 4E49 00 DF").to_vec();
        let mut reader = FrameReader::new(Cursor::new(stream));
        thread::sleep(Duration::from_millis(30));
        let frame = reader.read_frame().unwrap();
        producer.push(ApiPacket::decode(&frame).unwrap());
    });

    let packet = queue
        .pop_first_matching(
            |p| matches!(p, ApiPacket::AtCommandResponse(_)),
            Duration::from_secs(5),
        )
        .unwrap();
    match packet {
        ApiPacket::AtCommandResponse(response) => {
            assert_eq!(response.cmd, AtCmd::new("NI").unwrap());
            assert!(response.is_ok());
        }
        other => panic!("wrong packet: {other:?}"),
    }
    reader_thread.join().unwrap();
}
