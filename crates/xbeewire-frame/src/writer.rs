use std::io::{ErrorKind, Write};

use bytes::{Bytes, BytesMut};

use crate::codec::{encode_frame, Frame, FrameConfig};
use crate::error::{FrameError, Result};
use crate::mode::OperatingMode;

const INITIAL_BUFFER_CAPACITY: usize = 4 * 1024;

/// Writes complete API frames to any `Write` stream.
pub struct FrameWriter<T> {
    inner: T,
    buf: BytesMut,
    config: FrameConfig,
}

impl<T: Write> FrameWriter<T> {
    /// Create a new frame writer with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, FrameConfig::default())
    }

    /// Create a new frame writer with explicit configuration.
    pub fn with_config(inner: T, config: FrameConfig) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            config,
        }
    }

    /// Write a complete frame (blocking), then flush.
    pub fn write_frame(&mut self, frame: &Frame) -> Result<()> {
        if frame.api_length() > self.config.max_frame_size {
            return Err(FrameError::PayloadTooLarge {
                size: frame.api_length(),
                max: self.config.max_frame_size,
            });
        }

        self.buf.clear();
        encode_frame(frame, self.config.mode, &mut self.buf)?;

        let mut offset = 0usize;
        while offset < self.buf.len() {
            match self.inner.write(&self.buf[offset..]) {
                Ok(0) => return Err(FrameError::ConnectionClosed),
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(FrameError::Io(err)),
            }
        }

        self.flush()
    }

    /// Build and send a frame from a type byte and payload.
    pub fn send(&mut self, frame_type: u8, payload: &[u8]) -> Result<()> {
        let frame = Frame::new(frame_type, Bytes::copy_from_slice(payload));
        self.write_frame(&frame)
    }

    /// Flush the underlying stream.
    pub fn flush(&mut self) -> Result<()> {
        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(FrameError::Io(err)),
            }
        }
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the writer and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Current operating mode.
    pub fn mode(&self) -> OperatingMode {
        self.config.mode
    }

    /// Switch operating mode for subsequent frames (after an `AP` change).
    pub fn set_mode(&mut self, mode: OperatingMode) {
        self.config.mode = mode;
    }

    /// Current frame writer configuration.
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use hex_literal::hex;

    use super::*;

    #[test]
    fn write_single_frame() {
        let mut writer = FrameWriter::new(Cursor::new(Vec::<u8>::new()));
        writer.send(0x08, &[0x01, b'N', b'I']).unwrap();

        let wire = writer.into_inner().into_inner();
        assert_eq!(wire, hex!("7E 00 04 08 01 4E 49 5F"));
    }

    #[test]
    fn escaped_mode_writes_escapes() {
        let cfg = FrameConfig {
            mode: OperatingMode::ApiEscape,
            ..FrameConfig::default()
        };
        let mut writer = FrameWriter::with_config(Cursor::new(Vec::<u8>::new()), cfg);
        writer.send(0x23, &[0x11]).unwrap();

        let wire = writer.into_inner().into_inner();
        assert_eq!(wire, hex!("7E 00 02 23 7D 31 CB"));
    }

    #[test]
    fn at_mode_is_rejected() {
        let cfg = FrameConfig {
            mode: OperatingMode::At,
            ..FrameConfig::default()
        };
        let mut writer = FrameWriter::with_config(Cursor::new(Vec::<u8>::new()), cfg);
        let err = writer.send(0x08, &[0x01]).unwrap_err();
        assert!(matches!(err, FrameError::UnsupportedOperatingMode(_)));
    }

    #[test]
    fn oversized_frame_rejected_before_writing() {
        let cfg = FrameConfig {
            max_frame_size: 4,
            ..FrameConfig::default()
        };
        let mut writer = FrameWriter::with_config(Cursor::new(Vec::<u8>::new()), cfg);
        let err = writer.send(0x10, &hex!("01 02 03 04 05")).unwrap_err();
        assert!(matches!(err, FrameError::PayloadTooLarge { size: 6, max: 4 }));
        assert!(writer.into_inner().into_inner().is_empty());
    }

    #[test]
    fn flush_is_called_after_write() {
        let sink = FlushTrackingWriter::default();
        let flag = Arc::clone(&sink.flushed);
        let mut writer = FrameWriter::new(sink);

        writer.send(0x8A, &[0x00]).unwrap();
        assert!(flag.load(Ordering::SeqCst));
    }

    #[test]
    fn short_writes_are_completed() {
        let mut writer = FrameWriter::new(OneByteWriter { data: Vec::new() });
        writer.send(0x08, &[0x01, b'N', b'I']).unwrap();

        let data = writer.into_inner().data;
        assert_eq!(data, hex!("7E 00 04 08 01 4E 49 5F"));
    }

    #[test]
    fn interrupted_write_and_flush_retry() {
        let mut writer = FrameWriter::new(InterruptedWriteThenFlush {
            wrote_once: false,
            flush_interrupted: false,
            data: Vec::new(),
        });
        writer.send(0x8A, &[0x06]).unwrap();
        assert!(!writer.into_inner().data.is_empty());
    }

    #[test]
    fn zero_write_is_connection_closed() {
        let mut writer = FrameWriter::new(ZeroWriter);
        let err = writer.send(0x08, &[0x01]).unwrap_err();
        assert!(matches!(err, FrameError::ConnectionClosed));
    }

    #[test]
    fn written_bytes_read_back() {
        let mut writer = FrameWriter::new(Cursor::new(Vec::<u8>::new()));
        writer.send(0x2D, &hex!("00 01 AB")).unwrap();

        let wire = writer.into_inner().into_inner();
        let mut reader = crate::reader::FrameReader::new(Cursor::new(wire));
        let frame = reader.read_frame().unwrap();
        assert_eq!(frame.frame_type, 0x2D);
        assert_eq!(frame.payload.as_ref(), &hex!("00 01 AB"));
    }

    #[derive(Default)]
    struct FlushTrackingWriter {
        flushed: Arc<AtomicBool>,
        data: Vec<u8>,
    }

    impl Write for FlushTrackingWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.data.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            self.flushed.store(true, Ordering::SeqCst);
            Ok(())
        }
    }

    struct OneByteWriter {
        data: Vec<u8>,
    }

    impl Write for OneByteWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if buf.is_empty() {
                return Ok(0);
            }
            self.data.push(buf[0]);
            Ok(1)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    struct InterruptedWriteThenFlush {
        wrote_once: bool,
        flush_interrupted: bool,
        data: Vec<u8>,
    }

    impl Write for InterruptedWriteThenFlush {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if !self.wrote_once {
                self.wrote_once = true;
                return Err(std::io::Error::from(ErrorKind::Interrupted));
            }
            self.data.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            if !self.flush_interrupted {
                self.flush_interrupted = true;
                return Err(std::io::Error::from(ErrorKind::Interrupted));
            }
            Ok(())
        }
    }

    struct ZeroWriter;

    impl Write for ZeroWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Ok(0)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }
}
