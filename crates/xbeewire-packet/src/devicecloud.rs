//! Device Cloud packets: file uploads and device request/response plumbing
//! for modules provisioned against Remote Manager.

use xbeewire_addr::hexutil::encode_upper;

use crate::cursor::FieldCursor;
use crate::error::{PacketError, Result};
use crate::packet::Packet;
use crate::types::ApiFrameType;

fn check_len(field: &'static str, value: &[u8]) -> Result<()> {
    if value.len() > u8::MAX as usize {
        return Err(PacketError::InvalidFieldValue {
            field,
            reason: format!("{} bytes exceed the 255-byte length prefix", value.len()),
        });
    }
    Ok(())
}

/// Upload a file to Device Cloud storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendDataRequest {
    /// Correlates the send data response; zero suppresses it.
    pub frame_id: u8,
    /// Destination path; at most 255 bytes.
    pub path: Vec<u8>,
    /// MIME content type; at most 255 bytes.
    pub content_type: Vec<u8>,
    /// Reserved transport byte, zero on current firmware.
    pub transport: u8,
    /// Raw options byte: overwrite, archive, append.
    pub options: u8,
    pub data: Vec<u8>,
}

impl SendDataRequest {
    /// Fails when `path` or `content_type` exceeds the 255-byte prefix.
    pub fn new(
        frame_id: u8,
        path: impl Into<Vec<u8>>,
        content_type: impl Into<Vec<u8>>,
        options: u8,
        data: impl Into<Vec<u8>>,
    ) -> Result<Self> {
        let path = path.into();
        let content_type = content_type.into();
        check_len("path", &path)?;
        check_len("content type", &content_type)?;
        Ok(Self {
            frame_id,
            path,
            content_type,
            transport: 0,
            options,
            data: data.into(),
        })
    }
}

impl Packet for SendDataRequest {
    const FRAME_TYPE: ApiFrameType = ApiFrameType::SendDataRequest;

    fn decode_payload(payload: &[u8]) -> Result<Self> {
        let mut cursor = FieldCursor::new(Self::FRAME_TYPE, payload);
        let frame_id = cursor.u8()?;
        let path_len = cursor.u8()? as usize;
        let path = cursor.take(path_len)?.to_vec();
        let content_len = cursor.u8()? as usize;
        let content_type = cursor.take(content_len)?.to_vec();
        let transport = cursor.u8()?;
        let options = cursor.u8()?;
        let data = cursor.rest().to_vec();
        Ok(Self {
            frame_id,
            path,
            content_type,
            transport,
            options,
            data,
        })
    }

    fn encode_payload(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(6 + self.path.len() + self.content_type.len() + self.data.len());
        out.push(self.frame_id);
        out.push(self.path.len() as u8);
        out.extend_from_slice(&self.path);
        out.push(self.content_type.len() as u8);
        out.extend_from_slice(&self.content_type);
        out.push(self.transport);
        out.push(self.options);
        out.extend_from_slice(&self.data);
        out
    }

    fn needs_frame_id(&self) -> bool {
        true
    }

    fn frame_id(&self) -> Option<u8> {
        Some(self.frame_id)
    }

    fn describe(&self) -> Vec<(&'static str, String)> {
        vec![
            ("frame ID", format!("{:#04x}", self.frame_id)),
            ("path", String::from_utf8_lossy(&self.path).into_owned()),
            ("content type", String::from_utf8_lossy(&self.content_type).into_owned()),
            ("options", format!("{:#04x}", self.options)),
            ("data", encode_upper(&self.data)),
        ]
    }
}

/// Outcome of a [`SendDataRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendDataResponse {
    /// Frame ID of the request this answers.
    pub frame_id: u8,
    /// Raw status byte; zero means success.
    pub status: u8,
}

impl SendDataResponse {
    pub fn new(frame_id: u8, status: u8) -> Self {
        Self { frame_id, status }
    }

    /// True when the upload was accepted.
    pub fn is_success(&self) -> bool {
        self.status == 0
    }
}

impl Packet for SendDataResponse {
    const FRAME_TYPE: ApiFrameType = ApiFrameType::SendDataResponse;

    fn decode_payload(payload: &[u8]) -> Result<Self> {
        let mut cursor = FieldCursor::new(Self::FRAME_TYPE, payload);
        Ok(Self {
            frame_id: cursor.u8()?,
            status: cursor.u8()?,
        })
    }

    fn encode_payload(&self) -> Vec<u8> {
        vec![self.frame_id, self.status]
    }

    fn needs_frame_id(&self) -> bool {
        true
    }

    fn frame_id(&self) -> Option<u8> {
        Some(self.frame_id)
    }

    fn describe(&self) -> Vec<(&'static str, String)> {
        vec![
            ("frame ID", format!("{:#04x}", self.frame_id)),
            ("status", format!("{:#04x}", self.status)),
        ]
    }
}

/// Request pushed from Device Cloud to the module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceRequest {
    /// Identifies the request in the matching [`DeviceResponse`].
    pub request_id: u8,
    /// Reserved transport byte.
    pub transport: u8,
    /// Reserved flags byte.
    pub flags: u8,
    /// Request target; at most 255 bytes.
    pub target: Vec<u8>,
    pub data: Vec<u8>,
}

impl DeviceRequest {
    /// Fails when `target` exceeds the 255-byte prefix.
    pub fn new(request_id: u8, target: impl Into<Vec<u8>>, data: impl Into<Vec<u8>>) -> Result<Self> {
        let target = target.into();
        check_len("target", &target)?;
        Ok(Self {
            request_id,
            transport: 0,
            flags: 0,
            target,
            data: data.into(),
        })
    }
}

impl Packet for DeviceRequest {
    const FRAME_TYPE: ApiFrameType = ApiFrameType::DeviceRequest;

    fn decode_payload(payload: &[u8]) -> Result<Self> {
        let mut cursor = FieldCursor::new(Self::FRAME_TYPE, payload);
        let request_id = cursor.u8()?;
        let transport = cursor.u8()?;
        let flags = cursor.u8()?;
        let target_len = cursor.u8()? as usize;
        let target = cursor.take(target_len)?.to_vec();
        let data = cursor.rest().to_vec();
        Ok(Self {
            request_id,
            transport,
            flags,
            target,
            data,
        })
    }

    fn encode_payload(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(4 + self.target.len() + self.data.len());
        out.push(self.request_id);
        out.push(self.transport);
        out.push(self.flags);
        out.push(self.target.len() as u8);
        out.extend_from_slice(&self.target);
        out.extend_from_slice(&self.data);
        out
    }

    fn describe(&self) -> Vec<(&'static str, String)> {
        vec![
            ("request ID", format!("{:#04x}", self.request_id)),
            ("target", String::from_utf8_lossy(&self.target).into_owned()),
            ("data", encode_upper(&self.data)),
        ]
    }
}

/// Answer to a [`DeviceRequest`], sent back up to Device Cloud.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceResponse {
    /// Correlates the device response status; zero suppresses it.
    pub frame_id: u8,
    /// Request ID being answered.
    pub request_id: u8,
    pub data: Vec<u8>,
}

impl DeviceResponse {
    pub fn new(frame_id: u8, request_id: u8, data: impl Into<Vec<u8>>) -> Self {
        Self {
            frame_id,
            request_id,
            data: data.into(),
        }
    }
}

impl Packet for DeviceResponse {
    const FRAME_TYPE: ApiFrameType = ApiFrameType::DeviceResponse;

    fn decode_payload(payload: &[u8]) -> Result<Self> {
        let mut cursor = FieldCursor::new(Self::FRAME_TYPE, payload);
        let frame_id = cursor.u8()?;
        let request_id = cursor.u8()?;
        // Reserved byte between the request ID and the data.
        let _ = cursor.u8()?;
        let data = cursor.rest().to_vec();
        Ok(Self {
            frame_id,
            request_id,
            data,
        })
    }

    fn encode_payload(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(3 + self.data.len());
        out.push(self.frame_id);
        out.push(self.request_id);
        out.push(0);
        out.extend_from_slice(&self.data);
        out
    }

    fn needs_frame_id(&self) -> bool {
        true
    }

    fn frame_id(&self) -> Option<u8> {
        Some(self.frame_id)
    }

    fn describe(&self) -> Vec<(&'static str, String)> {
        vec![
            ("frame ID", format!("{:#04x}", self.frame_id)),
            ("request ID", format!("{:#04x}", self.request_id)),
            ("data", encode_upper(&self.data)),
        ]
    }
}

/// Delivery status for a [`DeviceResponse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceResponseStatus {
    /// Frame ID of the response this answers.
    pub frame_id: u8,
    /// Raw status byte; zero means success.
    pub status: u8,
}

impl DeviceResponseStatus {
    pub fn new(frame_id: u8, status: u8) -> Self {
        Self { frame_id, status }
    }

    /// True when the response reached Device Cloud.
    pub fn is_success(&self) -> bool {
        self.status == 0
    }
}

impl Packet for DeviceResponseStatus {
    const FRAME_TYPE: ApiFrameType = ApiFrameType::DeviceResponseStatus;

    fn decode_payload(payload: &[u8]) -> Result<Self> {
        let mut cursor = FieldCursor::new(Self::FRAME_TYPE, payload);
        Ok(Self {
            frame_id: cursor.u8()?,
            status: cursor.u8()?,
        })
    }

    fn encode_payload(&self) -> Vec<u8> {
        vec![self.frame_id, self.status]
    }

    fn needs_frame_id(&self) -> bool {
        true
    }

    fn frame_id(&self) -> Option<u8> {
        Some(self.frame_id)
    }

    fn describe(&self) -> Vec<(&'static str, String)> {
        vec![
            ("frame ID", format!("{:#04x}", self.frame_id)),
            ("status", format!("{:#04x}", self.status)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn send_data_request_round_trips() {
        let packet =
            SendDataRequest::new(0x01, *b"/test.txt", *b"text/plain", 0x00, *b"payload").unwrap();
        let payload = packet.encode_payload();
        assert_eq!(payload[1], 9);
        assert_eq!(&payload[2..11], b"/test.txt");
        assert_eq!(payload[11], 10);
        assert_eq!(SendDataRequest::decode_payload(&payload).unwrap(), packet);
    }

    #[test]
    fn send_data_request_rejects_long_path() {
        let err = SendDataRequest::new(1, vec![b'a'; 256], *b"text/plain", 0, Vec::new());
        assert!(matches!(
            err,
            Err(PacketError::InvalidFieldValue { field: "path", .. })
        ));
    }

    #[test]
    fn device_request_parses_target() {
        let mut payload = vec![0x2A, 0x00, 0x00, 0x06];
        payload.extend_from_slice(b"myapp!");
        payload.extend_from_slice(b"{}");
        let packet = DeviceRequest::decode_payload(&payload).unwrap();
        assert_eq!(packet.request_id, 0x2A);
        assert_eq!(packet.target, b"myapp!");
        assert_eq!(packet.data, b"{}");
        assert_eq!(packet.encode_payload(), payload);
    }

    #[test]
    fn device_request_target_overrun_is_incomplete() {
        // Declared target length runs past the payload.
        let err = DeviceRequest::decode_payload(&[0x01, 0x00, 0x00, 0x0A, b'x']).unwrap_err();
        assert!(matches!(err, PacketError::IncompleteFrame { .. }));
    }

    #[test]
    fn device_response_reserved_byte_is_fixed() {
        let packet = DeviceResponse::new(0x10, 0x2A, *b"ok");
        let payload = packet.encode_payload();
        assert_eq!(payload[2], 0);
        let back = DeviceResponse::decode_payload(&payload).unwrap();
        assert_eq!(back, packet);
    }

    #[test]
    fn status_packets_report_success() {
        assert!(SendDataResponse::new(1, 0).is_success());
        assert!(!DeviceResponseStatus::new(1, 0x30).is_success());
    }
}
