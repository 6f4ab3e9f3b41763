//! Bluetooth packets reported by modules with a BLE radio.

use xbeewire_addr::hexutil::encode_upper;

use crate::cursor::FieldCursor;
use crate::error::Result;
use crate::packet::Packet;
use crate::tlv::Tlv;
use crate::types::ApiFrameType;

/// One BLE advertisement heard during a GAP scan.
///
/// The advertisement body is a stream of TLVs covering the whole trailing
/// range; a TLV running past the payload fails the packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GapScanResponse {
    /// MAC address of the advertising device.
    pub ble_addr: [u8; 6],
    /// Raw address type byte: public or random.
    pub addr_type: u8,
    /// Raw advertisement flags byte; bit 0 marks a connectable device.
    pub advert_flags: u8,
    /// Signal strength of the advertisement, as a signed dBm value.
    pub rssi: u8,
    /// Reserved byte, kept verbatim.
    pub reserved: u8,
    /// Decoded advertisement structures.
    pub advertisement: Vec<Tlv>,
}

impl GapScanResponse {
    /// Signal strength in dBm.
    pub fn rssi_dbm(&self) -> i8 {
        self.rssi as i8
    }

    /// True when the advertiser accepts connections.
    pub fn is_connectable(&self) -> bool {
        self.advert_flags & 0x01 != 0
    }

    /// First advertisement structure of the given TLV type, if present.
    pub fn find(&self, tlv_type: u8) -> Option<&Tlv> {
        self.advertisement.iter().find(|t| t.tlv_type == tlv_type)
    }
}

impl Packet for GapScanResponse {
    const FRAME_TYPE: ApiFrameType = ApiFrameType::GapScanResponse;

    fn decode_payload(payload: &[u8]) -> Result<Self> {
        let mut cursor = FieldCursor::new(Self::FRAME_TYPE, payload);
        let mut ble_addr = [0u8; 6];
        ble_addr.copy_from_slice(cursor.take(6)?);
        let addr_type = cursor.u8()?;
        let advert_flags = cursor.u8()?;
        let rssi = cursor.u8()?;
        let reserved = cursor.u8()?;
        let advertisement = Tlv::decode_all(cursor.rest())?;
        Ok(Self {
            ble_addr,
            addr_type,
            advert_flags,
            rssi,
            reserved,
            advertisement,
        })
    }

    fn encode_payload(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(10);
        out.extend_from_slice(&self.ble_addr);
        out.push(self.addr_type);
        out.push(self.advert_flags);
        out.push(self.rssi);
        out.push(self.reserved);
        out.extend_from_slice(&Tlv::encode_all(&self.advertisement));
        out
    }

    fn describe(&self) -> Vec<(&'static str, String)> {
        let mac = self
            .ble_addr
            .iter()
            .map(|b| format!("{b:02X}"))
            .collect::<Vec<_>>()
            .join(":");
        vec![
            ("address", mac),
            ("RSSI", format!("{} dBm", self.rssi_dbm())),
            ("connectable", self.is_connectable().to_string()),
            ("advertisement", format!("{} TLVs", self.advertisement.len())),
        ]
    }
}
