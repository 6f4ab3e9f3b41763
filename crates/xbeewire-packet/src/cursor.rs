//! Sequential field reader used by the packet parsers.

use std::net::{Ipv4Addr, Ipv6Addr};

use xbeewire_addr::{Addr16, Addr64};

use crate::error::{PacketError, Result};
use crate::types::{ApiFrameType, AtCmd};

/// Walks a frame payload field by field.
///
/// Every read is bounds-checked and a shortfall reports
/// [`PacketError::IncompleteFrame`] with the running byte requirement, so
/// the per-packet parsers stay free of index arithmetic.
pub(crate) struct FieldCursor<'a> {
    frame_type: ApiFrameType,
    buf: &'a [u8],
    pos: usize,
}

impl<'a> FieldCursor<'a> {
    pub fn new(frame_type: ApiFrameType, buf: &'a [u8]) -> Self {
        Self {
            frame_type,
            buf,
            pos: 0,
        }
    }

    /// Takes the next `n` bytes.
    pub fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if self.pos + n > self.buf.len() {
            return Err(PacketError::IncompleteFrame {
                frame_type: self.frame_type,
                minimum: self.pos + n,
                actual: self.buf.len(),
            });
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    pub fn u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn u16_be(&mut self) -> Result<u16> {
        let bytes = self.take(2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    pub fn addr16(&mut self) -> Result<Addr16> {
        Ok(Addr16::new(self.u16_be()?))
    }

    pub fn addr64(&mut self) -> Result<Addr64> {
        let bytes = self.take(8)?;
        let mut arr = [0u8; 8];
        arr.copy_from_slice(bytes);
        Ok(Addr64::new(u64::from_be_bytes(arr)))
    }

    pub fn at_cmd(&mut self) -> Result<AtCmd> {
        let bytes = self.take(2)?;
        Ok(AtCmd::from_bytes([bytes[0], bytes[1]]))
    }

    pub fn ipv4(&mut self) -> Result<Ipv4Addr> {
        let bytes = self.take(4)?;
        Ok(Ipv4Addr::new(bytes[0], bytes[1], bytes[2], bytes[3]))
    }

    /// IPv4 address carried in an 8-byte field with a zero upper half, the
    /// layout Wi-Fi modules use.
    pub fn ipv4_padded(&mut self) -> Result<Ipv4Addr> {
        let bytes = self.take(8)?;
        Ok(Ipv4Addr::new(bytes[4], bytes[5], bytes[6], bytes[7]))
    }

    pub fn ipv6(&mut self) -> Result<Ipv6Addr> {
        let bytes = self.take(16)?;
        let mut arr = [0u8; 16];
        arr.copy_from_slice(bytes);
        Ok(Ipv6Addr::from(arr))
    }

    /// Takes everything left in the payload.
    pub fn rest(&mut self) -> &'a [u8] {
        let slice = &self.buf[self.pos..];
        self.pos = self.buf.len();
        slice
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Takes everything left, requiring at least one byte.
    pub fn rest_nonempty(&mut self) -> Result<&'a [u8]> {
        if self.remaining() == 0 {
            return Err(PacketError::IncompleteFrame {
                frame_type: self.frame_type,
                minimum: self.pos + 1,
                actual: self.buf.len(),
            });
        }
        Ok(self.rest())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_fields_in_order() {
        let buf = [0x01, 0x02, 0x03, 0xAA, 0xBB];
        let mut cursor = FieldCursor::new(ApiFrameType::Receive, &buf);
        assert_eq!(cursor.u8().unwrap(), 0x01);
        assert_eq!(cursor.u16_be().unwrap(), 0x0203);
        assert_eq!(cursor.rest(), &[0xAA, 0xBB]);
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn shortfall_reports_running_minimum() {
        let buf = [0x01, 0x02];
        let mut cursor = FieldCursor::new(ApiFrameType::Receive, &buf);
        cursor.u8().unwrap();
        let err = cursor.addr64().unwrap_err();
        match err {
            PacketError::IncompleteFrame {
                minimum, actual, ..
            } => {
                assert_eq!(minimum, 9);
                assert_eq!(actual, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn padded_ipv4_uses_low_four_bytes() {
        let buf = [0, 0, 0, 0, 192, 168, 1, 20];
        let mut cursor = FieldCursor::new(ApiFrameType::RemoteAtCommandWifi, &buf);
        assert_eq!(
            cursor.ipv4_padded().unwrap(),
            std::net::Ipv4Addr::new(192, 168, 1, 20)
        );
    }
}
