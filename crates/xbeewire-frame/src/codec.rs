use bytes::{Buf, BufMut, Bytes, BytesMut};
use tracing::debug;

use crate::checksum;
use crate::error::{FrameError, Result};
use crate::escape::{self, SpecialByte, ESCAPE_XOR};
use crate::mode::OperatingMode;

/// Start-of-frame delimiter.
pub const FRAME_DELIMITER: u8 = 0x7E;

/// Default maximum frame data size (type byte + payload): 2 KiB.
///
/// Real modules top out far below this; the cap keeps a corrupted length
/// field from buffering unbounded garbage.
pub const DEFAULT_MAX_FRAME_SIZE: usize = 2048;

/// A complete API frame: one type byte plus its payload.
///
/// The length field and checksum are wire artifacts, computed on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Frame type byte.
    pub frame_type: u8,
    /// Everything between the type byte and the checksum.
    pub payload: Bytes,
}

impl Frame {
    /// Create a new frame.
    pub fn new(frame_type: u8, payload: impl Into<Bytes>) -> Self {
        Self {
            frame_type,
            payload: payload.into(),
        }
    }

    /// Value of the length field: frame data size (type byte + payload).
    pub fn api_length(&self) -> usize {
        1 + self.payload.len()
    }

    /// Checksum over the frame data.
    pub fn checksum(&self) -> u8 {
        checksum::compute(self.frame_type, &self.payload)
    }
}

/// Encode a frame into the wire format.
///
/// Wire format (before escaping):
/// ```text
/// ┌───────────┬─────────┬────────┬─────────┬──────────┐
/// │ 0x7E      │ Length  │ Type   │ Payload │ Checksum │
/// │ delimiter │ (2B BE) │ (1B)   │         │ (1B)     │
/// └───────────┴─────────┴────────┴─────────┴──────────┘
/// ```
/// The length counts the frame data (type + payload). In escaped mode every
/// byte after the delimiter goes through control-byte escaping; the leading
/// delimiter itself is never escaped.
pub fn encode_frame(frame: &Frame, mode: OperatingMode, dst: &mut BytesMut) -> Result<()> {
    if !mode.is_api() {
        return Err(FrameError::UnsupportedOperatingMode(mode));
    }

    let length = frame.api_length();
    if length > u16::MAX as usize {
        return Err(FrameError::PayloadTooLarge {
            size: length,
            max: u16::MAX as usize,
        });
    }

    let mut data = Vec::with_capacity(length + 3);
    data.extend_from_slice(&(length as u16).to_be_bytes());
    data.push(frame.frame_type);
    data.extend_from_slice(&frame.payload);
    data.push(frame.checksum());

    dst.reserve(1 + data.len() * 2);
    dst.put_u8(FRAME_DELIMITER);
    if mode.escapes() {
        escape::escape_into(&data, dst);
    } else {
        dst.put_slice(&data);
    }
    Ok(())
}

/// Decode one frame from a buffer.
///
/// Returns `Ok(None)` when the buffer does not yet hold a complete frame;
/// nothing but noise ahead of the first delimiter is consumed in that case,
/// so the caller can append more bytes and retry. On a decode error the
/// offending bytes are consumed and the next call resynchronizes at the
/// following delimiter.
pub fn decode_frame(
    src: &mut BytesMut,
    mode: OperatingMode,
    max_frame_size: usize,
) -> Result<Option<Frame>> {
    if !mode.is_api() {
        return Err(FrameError::UnsupportedOperatingMode(mode));
    }

    loop {
        // Everything ahead of the first delimiter is line noise.
        match src.iter().position(|&b| b == FRAME_DELIMITER) {
            None => {
                if !src.is_empty() {
                    debug!(discarded = src.len(), "no frame delimiter in buffer");
                    src.clear();
                }
                return Ok(None);
            }
            Some(0) => {}
            Some(pos) => {
                debug!(discarded = pos, "skipping to frame delimiter");
                src.advance(pos);
            }
        }

        match scan_frame(&src[..], mode.escapes(), max_frame_size) {
            Scan::NeedMore => return Ok(None),
            Scan::Restart { at } => {
                debug!(discarded = at, "frame cut short by a new delimiter");
                src.advance(at);
            }
            Scan::Fail { consumed, err } => {
                src.advance(consumed);
                return Err(err);
            }
            Scan::Done { consumed, frame } => {
                src.advance(consumed);
                return Ok(Some(frame));
            }
        }
    }
}

/// Outcome of scanning one frame candidate.
enum Scan {
    /// Buffer ran out mid-frame; consume nothing and wait for more bytes.
    NeedMore,
    /// A raw delimiter appeared inside the frame (escaped mode only);
    /// drop `at` bytes and scan again from the new delimiter.
    Restart { at: usize },
    /// The frame is malformed; drop `consumed` bytes and report the error.
    Fail { consumed: usize, err: FrameError },
    /// A complete valid frame spanning `consumed` wire bytes.
    Done { consumed: usize, frame: Frame },
}

/// Scans one frame from `buf`, which must start with the delimiter.
fn scan_frame(buf: &[u8], escaped: bool, max_frame_size: usize) -> Scan {
    let mut cursor = WireCursor::new(&buf[1..], escaped);

    let mut header = [0u8; 2];
    for slot in &mut header {
        match cursor.next() {
            None => return Scan::NeedMore,
            Some(WireByte::Delimiter(pos)) => return Scan::Restart { at: 1 + pos },
            Some(WireByte::Byte(b)) => *slot = b,
        }
    }
    let length = u16::from_be_bytes(header) as usize;

    if length == 0 {
        return Scan::Fail {
            consumed: 1 + cursor.consumed(),
            err: FrameError::EmptyFrame,
        };
    }
    if length > max_frame_size {
        return Scan::Fail {
            consumed: 1 + cursor.consumed(),
            err: FrameError::PayloadTooLarge {
                size: length,
                max: max_frame_size,
            },
        };
    }

    let mut data = Vec::with_capacity(length);
    while data.len() < length {
        match cursor.next() {
            None => return Scan::NeedMore,
            Some(WireByte::Delimiter(pos)) => return Scan::Restart { at: 1 + pos },
            Some(WireByte::Byte(b)) => data.push(b),
        }
    }

    let received = match cursor.next() {
        None => return Scan::NeedMore,
        Some(WireByte::Delimiter(pos)) => return Scan::Restart { at: 1 + pos },
        Some(WireByte::Byte(b)) => b,
    };

    let frame_type = data[0];
    let computed = checksum::compute(frame_type, &data[1..]);
    let consumed = 1 + cursor.consumed();
    if computed != received {
        return Scan::Fail {
            consumed,
            err: FrameError::ChecksumMismatch {
                expected: received,
                computed,
            },
        };
    }

    let payload = Bytes::from(data.split_off(1));
    Scan::Done {
        consumed,
        frame: Frame {
            frame_type,
            payload,
        },
    }
}

/// One logical frame byte at a time over plain or escaped wire bytes.
struct WireCursor<'a> {
    buf: &'a [u8],
    pos: usize,
    unescape: bool,
}

enum WireByte {
    /// A logical frame byte, already unescaped.
    Byte(u8),
    /// A raw delimiter where frame bytes were expected; holds its offset.
    Delimiter(usize),
}

impl<'a> WireCursor<'a> {
    fn new(buf: &'a [u8], unescape: bool) -> Self {
        Self {
            buf,
            pos: 0,
            unescape,
        }
    }

    /// Next logical byte. `None` means the buffer ran out mid-frame, which
    /// includes ending on a lone escape introducer.
    fn next(&mut self) -> Option<WireByte> {
        let byte = *self.buf.get(self.pos)?;
        if self.unescape {
            if byte == FRAME_DELIMITER {
                return Some(WireByte::Delimiter(self.pos));
            }
            if byte == SpecialByte::Escape as u8 {
                let escaped = *self.buf.get(self.pos + 1)?;
                self.pos += 2;
                return Some(WireByte::Byte(escaped ^ ESCAPE_XOR));
            }
        }
        self.pos += 1;
        Some(WireByte::Byte(byte))
    }

    /// Wire bytes consumed so far.
    fn consumed(&self) -> usize {
        self.pos
    }
}

/// Configuration for the frame codec.
#[derive(Debug, Clone)]
pub struct FrameConfig {
    /// Operating mode of the link. Default: API without escapes.
    pub mode: OperatingMode,
    /// Maximum frame data size in bytes. Default: 2 KiB.
    pub max_frame_size: usize,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            mode: OperatingMode::Api,
            max_frame_size: DEFAULT_MAX_FRAME_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;

    fn ni_frame() -> Frame {
        // AT command frame querying the node identifier ("NI").
        Frame::new(0x08, Bytes::from_static(&[0x01, b'N', b'I']))
    }

    #[test]
    fn encode_at_command_example() {
        let mut buf = BytesMut::new();
        encode_frame(&ni_frame(), OperatingMode::Api, &mut buf).unwrap();
        assert_eq!(buf.as_ref(), hex!("7E 00 04 08 01 4E 49 5F"));
    }

    #[test]
    fn decode_at_command_example() {
        let mut buf = BytesMut::from(&hex!("7E 00 04 08 01 4E 49 5F")[..]);
        let frame = decode_frame(&mut buf, OperatingMode::Api, DEFAULT_MAX_FRAME_SIZE)
            .unwrap()
            .unwrap();
        assert_eq!(frame.frame_type, 0x08);
        assert_eq!(frame.payload.as_ref(), &hex!("01 4E 49"));
        assert!(buf.is_empty());
    }

    #[test]
    fn escaped_mode_escapes_control_bytes() {
        // Type 0x23 with payload 0x11 (XON): documented escaping example.
        let frame = Frame::new(0x23, Bytes::from_static(&[0x11]));
        let mut buf = BytesMut::new();
        encode_frame(&frame, OperatingMode::ApiEscape, &mut buf).unwrap();
        assert_eq!(buf.as_ref(), hex!("7E 00 02 23 7D 31 CB"));

        let decoded = decode_frame(&mut buf, OperatingMode::ApiEscape, DEFAULT_MAX_FRAME_SIZE)
            .unwrap()
            .unwrap();
        assert_eq!(decoded, frame);
    }

    #[test]
    fn leading_delimiter_is_never_escaped() {
        let frame = Frame::new(0x7E, Bytes::from_static(&hex!("7D 7E")));
        let mut buf = BytesMut::new();
        encode_frame(&frame, OperatingMode::ApiEscape, &mut buf).unwrap();
        assert_eq!(buf[0], FRAME_DELIMITER);
        // Every later special byte rides behind an introducer.
        assert_eq!(&buf[1..5], &hex!("00 03 7D 5E"));
    }

    #[test]
    fn at_mode_is_rejected() {
        let mut buf = BytesMut::new();
        let err = encode_frame(&ni_frame(), OperatingMode::At, &mut buf).unwrap_err();
        assert!(matches!(err, FrameError::UnsupportedOperatingMode(_)));

        let mut src = BytesMut::from(&hex!("7E 00 04 08 01 4E 49 5F")[..]);
        let err = decode_frame(&mut src, OperatingMode::At, DEFAULT_MAX_FRAME_SIZE).unwrap_err();
        assert!(matches!(err, FrameError::UnsupportedOperatingMode(_)));
    }

    #[test]
    fn noise_before_delimiter_is_skipped() {
        let mut buf = BytesMut::from(&hex!("AA BB CC 7E 00 04 08 01 4E 49 5F")[..]);
        let frame = decode_frame(&mut buf, OperatingMode::Api, DEFAULT_MAX_FRAME_SIZE)
            .unwrap()
            .unwrap();
        assert_eq!(frame.frame_type, 0x08);
    }

    #[test]
    fn buffer_without_delimiter_is_discarded() {
        let mut buf = BytesMut::from(&hex!("AA BB CC DD")[..]);
        let result = decode_frame(&mut buf, OperatingMode::Api, DEFAULT_MAX_FRAME_SIZE).unwrap();
        assert!(result.is_none());
        assert!(buf.is_empty());
    }

    #[test]
    fn incomplete_frame_consumes_nothing() {
        let wire = hex!("7E 00 04 08 01 4E 49 5F");
        for cut in 1..wire.len() {
            let mut buf = BytesMut::from(&wire[..cut]);
            let result =
                decode_frame(&mut buf, OperatingMode::Api, DEFAULT_MAX_FRAME_SIZE).unwrap();
            assert!(result.is_none(), "cut at {cut}");
            assert_eq!(buf.len(), cut, "cut at {cut}");
        }
    }

    #[test]
    fn frame_arriving_in_two_chunks() {
        let wire = hex!("7E 00 04 08 01 4E 49 5F");
        let mut buf = BytesMut::from(&wire[..5]);
        assert!(decode_frame(&mut buf, OperatingMode::Api, DEFAULT_MAX_FRAME_SIZE)
            .unwrap()
            .is_none());
        buf.extend_from_slice(&wire[5..]);
        let frame = decode_frame(&mut buf, OperatingMode::Api, DEFAULT_MAX_FRAME_SIZE)
            .unwrap()
            .unwrap();
        assert_eq!(frame.frame_type, 0x08);
    }

    #[test]
    fn trailing_lone_escape_waits_for_more() {
        // Escaped frame cut right after the introducer.
        let mut buf = BytesMut::from(&hex!("7E 00 02 23 7D")[..]);
        let result =
            decode_frame(&mut buf, OperatingMode::ApiEscape, DEFAULT_MAX_FRAME_SIZE).unwrap();
        assert!(result.is_none());
        assert_eq!(buf.len(), 5);

        buf.extend_from_slice(&hex!("31 CB"));
        let frame = decode_frame(&mut buf, OperatingMode::ApiEscape, DEFAULT_MAX_FRAME_SIZE)
            .unwrap()
            .unwrap();
        assert_eq!(frame.payload.as_ref(), &[0x11]);
    }

    #[test]
    fn checksum_mismatch_reports_both_values_and_resyncs() {
        let mut buf = BytesMut::from(&hex!("7E 00 04 08 01 4E 49 00 7E 00 04 08 01 4E 49 5F")[..]);
        let err = decode_frame(&mut buf, OperatingMode::Api, DEFAULT_MAX_FRAME_SIZE).unwrap_err();
        match err {
            FrameError::ChecksumMismatch { expected, computed } => {
                assert_eq!(expected, 0x00);
                assert_eq!(computed, 0x5F);
            }
            other => panic!("unexpected error: {other}"),
        }

        let frame = decode_frame(&mut buf, OperatingMode::Api, DEFAULT_MAX_FRAME_SIZE)
            .unwrap()
            .unwrap();
        assert_eq!(frame.frame_type, 0x08);
        assert!(buf.is_empty());
    }

    #[test]
    fn new_delimiter_mid_frame_restarts_in_escaped_mode() {
        // Frame claims 16 data bytes but a raw delimiter (new frame) arrives first.
        let mut buf = BytesMut::from(&hex!("7E 00 10 08 01 7E 00 04 08 01 4E 49 5F")[..]);
        let frame = decode_frame(&mut buf, OperatingMode::ApiEscape, DEFAULT_MAX_FRAME_SIZE)
            .unwrap()
            .unwrap();
        assert_eq!(frame.frame_type, 0x08);
        assert_eq!(frame.payload.as_ref(), &hex!("01 4E 49"));
    }

    #[test]
    fn zero_length_field_is_rejected() {
        let mut buf = BytesMut::from(&hex!("7E 00 00 FF")[..]);
        let err = decode_frame(&mut buf, OperatingMode::Api, DEFAULT_MAX_FRAME_SIZE).unwrap_err();
        assert!(matches!(err, FrameError::EmptyFrame));
    }

    #[test]
    fn oversized_length_field_is_rejected() {
        let mut buf = BytesMut::from(&hex!("7E FF FF 08")[..]);
        let err = decode_frame(&mut buf, OperatingMode::Api, DEFAULT_MAX_FRAME_SIZE).unwrap_err();
        assert!(matches!(
            err,
            FrameError::PayloadTooLarge { size: 0xFFFF, .. }
        ));
    }

    #[test]
    fn back_to_back_frames_decode_in_order() {
        let mut buf = BytesMut::new();
        encode_frame(&ni_frame(), OperatingMode::Api, &mut buf).unwrap();
        encode_frame(
            &Frame::new(0x8A, Bytes::from_static(&[0x02])),
            OperatingMode::Api,
            &mut buf,
        )
        .unwrap();

        let f1 = decode_frame(&mut buf, OperatingMode::Api, DEFAULT_MAX_FRAME_SIZE)
            .unwrap()
            .unwrap();
        let f2 = decode_frame(&mut buf, OperatingMode::Api, DEFAULT_MAX_FRAME_SIZE)
            .unwrap()
            .unwrap();
        assert_eq!(f1.frame_type, 0x08);
        assert_eq!(f2.frame_type, 0x8A);
        assert!(buf.is_empty());
    }

    #[test]
    fn empty_payload_frame_round_trips() {
        let frame = Frame::new(0x8A, Bytes::new());
        let mut buf = BytesMut::new();
        encode_frame(&frame, OperatingMode::Api, &mut buf).unwrap();
        assert_eq!(buf.as_ref(), hex!("7E 00 01 8A 75"));

        let decoded = decode_frame(&mut buf, OperatingMode::Api, DEFAULT_MAX_FRAME_SIZE)
            .unwrap()
            .unwrap();
        assert_eq!(decoded, frame);
    }

    #[test]
    fn delimiter_inside_payload_is_data_in_unescaped_mode() {
        let frame = Frame::new(0x2D, Bytes::from_static(&hex!("7E 11 13")));
        let mut buf = BytesMut::new();
        encode_frame(&frame, OperatingMode::Api, &mut buf).unwrap();

        let decoded = decode_frame(&mut buf, OperatingMode::Api, DEFAULT_MAX_FRAME_SIZE)
            .unwrap()
            .unwrap();
        assert_eq!(decoded, frame);
    }

    mod properties {
        use proptest::prelude::*;

        use super::*;

        fn arb_frame() -> impl Strategy<Value = Frame> {
            (
                any::<u8>(),
                proptest::collection::vec(any::<u8>(), 0..300),
            )
                .prop_map(|(frame_type, payload)| Frame::new(frame_type, payload))
        }

        fn arb_mode() -> impl Strategy<Value = OperatingMode> {
            prop_oneof![Just(OperatingMode::Api), Just(OperatingMode::ApiEscape)]
        }

        proptest! {
            #[test]
            fn any_frame_round_trips(frame in arb_frame(), mode in arb_mode()) {
                let mut buf = BytesMut::new();
                encode_frame(&frame, mode, &mut buf).unwrap();
                let decoded = decode_frame(&mut buf, mode, DEFAULT_MAX_FRAME_SIZE)
                    .unwrap()
                    .unwrap();
                prop_assert_eq!(decoded, frame);
                prop_assert!(buf.is_empty());
            }

            #[test]
            fn delimiter_free_noise_never_hides_a_frame(
                frame in arb_frame(),
                noise in proptest::collection::vec(
                    any::<u8>().prop_filter("not the delimiter", |&b| b != FRAME_DELIMITER),
                    0..64,
                ),
            ) {
                let mut buf = BytesMut::from(noise.as_slice());
                encode_frame(&frame, OperatingMode::Api, &mut buf).unwrap();
                let decoded = decode_frame(&mut buf, OperatingMode::Api, DEFAULT_MAX_FRAME_SIZE)
                    .unwrap()
                    .unwrap();
                prop_assert_eq!(decoded, frame);
            }

            #[test]
            fn truncation_is_never_an_error_in_escaped_mode(
                frame in arb_frame(),
                cut_fraction in 0.0f64..=1.0,
            ) {
                let mut full = BytesMut::new();
                encode_frame(&frame, OperatingMode::ApiEscape, &mut full).unwrap();
                let cut = ((full.len() - 1) as f64 * cut_fraction) as usize + 1;
                let mut buf = BytesMut::from(&full[..cut]);
                let result = decode_frame(
                    &mut buf,
                    OperatingMode::ApiEscape,
                    DEFAULT_MAX_FRAME_SIZE,
                );
                if cut == full.len() {
                    prop_assert!(result.unwrap().is_some());
                } else {
                    prop_assert!(result.unwrap().is_none());
                }
            }
        }
    }
}
