//! API frame checksum.
//!
//! The checksum covers the frame data (type byte plus payload): sum every
//! byte, keep the low 8 bits, subtract from `0xFF`. A frame verifies when
//! frame data plus checksum sums to `0xFF` in the low byte, which is the
//! same thing as the recomputed checksum matching the received one.

/// Computes the checksum for frame data.
pub fn compute(frame_type: u8, payload: &[u8]) -> u8 {
    let sum = payload
        .iter()
        .fold(frame_type, |acc, &byte| acc.wrapping_add(byte));
    0xFF - sum
}

/// Verifies a received checksum against frame data.
pub fn verify(frame_type: u8, payload: &[u8], received: u8) -> bool {
    compute(frame_type, payload) == received
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn at_command_ni_example() {
        // AT command frame querying the node identifier.
        assert_eq!(compute(0x08, &[0x01, b'N', b'I']), 0x5F);
    }

    #[test]
    fn empty_payload() {
        assert_eq!(compute(0x8A, &[]), 0xFF - 0x8A);
    }

    #[test]
    fn sum_wraps_at_a_byte() {
        assert_eq!(compute(0xFF, &[0xFF, 0xFF, 0x02]), 0xFF - 0xFF);
    }

    #[test]
    fn verify_rejects_off_by_one() {
        assert!(verify(0x08, &[0x01, b'N', b'I'], 0x5F));
        assert!(!verify(0x08, &[0x01, b'N', b'I'], 0x5E));
    }

    proptest! {
        #[test]
        fn computed_checksum_always_verifies(
            frame_type in any::<u8>(),
            payload in proptest::collection::vec(any::<u8>(), 0..256),
        ) {
            let ck = compute(frame_type, &payload);
            prop_assert!(verify(frame_type, &payload, ck));
        }

        #[test]
        fn flipping_a_payload_byte_breaks_verification(
            frame_type in any::<u8>(),
            mut payload in proptest::collection::vec(any::<u8>(), 1..256),
            idx in any::<prop::sample::Index>(),
            delta in 1u8..=255,
        ) {
            let ck = compute(frame_type, &payload);
            let i = idx.index(payload.len());
            payload[i] = payload[i].wrapping_add(delta);
            prop_assert!(!verify(frame_type, &payload, ck));
        }
    }
}
