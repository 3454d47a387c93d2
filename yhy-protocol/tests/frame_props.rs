//! Property tests for the frame codec

use proptest::prelude::*;
use yhy_protocol::frame::{RESERVED, SENTINEL, STUFF_BYTE};
use yhy_protocol::{decode, encode, Frame, FrameError, FrameParser, HEADER};

/// Bytes with plenty of sentinels mixed in
fn wire_byte() -> impl Strategy<Value = u8> {
    prop_oneof![Just(SENTINEL), Just(0x00), any::<u8>()]
}

/// Bytes that are never stuffed
fn plain_byte() -> impl Strategy<Value = u8> {
    any::<u8>().prop_filter("sentinel", |b| *b != SENTINEL)
}

proptest! {
    #[test]
    fn roundtrip(command in any::<u16>(), payload in prop::collection::vec(wire_byte(), 0..96)) {
        let encoded = encode(command, &payload).unwrap();
        let frame = decode(&encoded).unwrap();

        prop_assert_eq!(frame, Frame { reserved: RESERVED, command, payload });
    }

    #[test]
    fn roundtrip_in_arbitrary_chunks(
        command in any::<u16>(),
        payload in prop::collection::vec(wire_byte(), 0..64),
        chunk in 1usize..8,
    ) {
        let encoded = encode(command, &payload).unwrap();
        let mut parser = FrameParser::new();
        let mut decoded = None;

        for piece in encoded.chunks(chunk) {
            if let Some(frame) = parser.feed_bytes(piece).unwrap() {
                decoded = Some(frame);
            }
        }

        let frame = decoded.unwrap();
        prop_assert_eq!(frame.command, command);
        prop_assert_eq!(frame.payload, payload);
    }

    #[test]
    fn success_frame_rejects_any_bit_flip(
        command in prop_oneof![any::<u16>(), Just(0x00AA), Just(0xAA26), Just(0xAAAA)],
        data in prop::collection::vec(wire_byte(), 0..32),
        index in any::<prop::sample::Index>(),
        bit in 0u8..8,
    ) {
        let mut payload = vec![0x00];
        payload.extend_from_slice(&data);
        let mut encoded = encode(command, &payload).unwrap();
        let last = encoded.len() - 1;

        // Stuffed body runs from after the length field to before the
        // checksum. The status byte follows reserved and the stuffed command.
        let sentinels = command.to_le_bytes().iter().filter(|&&b| b == SENTINEL).count();
        let status_pos = 4 + 2 + 2 + sentinels;
        let candidates: Vec<usize> = (4..last).filter(|&i| i != status_pos).collect();
        let pos = candidates[index.index(candidates.len())];

        let original = encoded[pos];
        let flipped = original ^ (1 << bit);
        encoded[pos] = flipped;

        let stuffing = original == SENTINEL || encoded[pos - 1] == SENTINEL;
        let new_pair = flipped == SENTINEL && encoded[pos + 1] == STUFF_BYTE;

        if stuffing || new_pair {
            // The frame end moves by one byte, so it can never be taken whole
            let mut parser = FrameParser::new();
            let before_checksum = parser.feed_bytes(&encoded[..last]);
            let at_checksum = parser.feed(encoded[last]);
            prop_assert!(!(before_checksum == Ok(None) && matches!(at_checksum, Ok(Some(_)))));
        } else {
            prop_assert_eq!(decode(&encoded), Err(FrameError::InvalidChecksum));
        }
    }

    #[test]
    fn error_frame_tolerates_bit_flips(
        status in plain_byte().prop_filter("success", |s| *s != 0),
        data in prop::collection::vec(plain_byte(), 1..32),
        index in any::<prop::sample::Index>(),
        bit in 0u8..8,
    ) {
        let mut payload = vec![status];
        payload.extend_from_slice(&data);
        let mut encoded = encode(0x0026, &payload).unwrap();

        // Corrupt one of the data bytes after the status
        let pos = 9 + index.index(data.len());
        let flipped = encoded[pos] ^ (1 << bit);
        prop_assume!(flipped != SENTINEL);
        encoded[pos] = flipped;

        let frame = decode(&encoded).unwrap();
        prop_assert_eq!(frame.status(), Some(status));
        prop_assert_eq!(frame.payload.len(), payload.len());
        prop_assert_ne!(frame.payload, payload);
    }

    #[test]
    fn resync_after_junk(
        junk in prop::collection::vec(any::<u8>(), 0..64),
        command in any::<u16>(),
        payload in prop::collection::vec(wire_byte(), 0..32),
    ) {
        prop_assume!(!junk.windows(2).any(|w| w == HEADER));

        let mut stream = junk.clone();
        stream.extend_from_slice(&encode(command, &payload).unwrap());

        let frame = decode(&stream).unwrap();
        prop_assert_eq!(frame.command, command);
        prop_assert_eq!(frame.payload, payload);
    }
}

#[test]
fn straddled_escape_between_chunks() {
    let encoded = encode(0x9520, &[0x00, 0x04, SENTINEL, 0x11, 0x22]).unwrap();
    // Position just after the stuffed sentinel in the data
    let split = 4 + 4 + 3;
    assert_eq!(encoded[split - 1], SENTINEL);
    assert_eq!(encoded[split], 0x00);

    let mut parser = FrameParser::new();
    assert_eq!(parser.feed_bytes(&encoded[..split]), Ok(None));
    let frame = parser.feed_bytes(&encoded[split..]).unwrap().unwrap();

    assert_eq!(frame.payload, vec![0x00, 0x04, SENTINEL, 0x11, 0x22]);
}
