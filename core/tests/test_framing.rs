// Message framing suite: length-prefix encoding, clean end of stream vs
// truncation, chunked delivery, and sink failure reporting.

mod common;

#[cfg(test)]
mod tests {
    use std::io::{Cursor, ErrorKind};

    use dbin_core::{
        config::CodecConfig,
        framing::{encode_length_prefix, read_length_prefix, read_message, write_message, FrameError, FramePart},
        types::StreamError,
    };

    use crate::common::{BrokenSink, ChunkedReader, FailingReader, ShortSink};

    fn cfg() -> CodecConfig {
        CodecConfig::default()
    }

    fn frame_err<T: std::fmt::Debug>(res: Result<T, StreamError>) -> FrameError {
        match res {
            Err(StreamError::Frame(e)) => e,
            other => panic!("expected frame error, got {:?}", other),
        }
    }

// ## 1. Reading

    #[test]
    fn single_message_then_end_of_stream() {
        let mut src = Cursor::new(vec![0x00u8, 0x00, 0x00, 0x01, 0x61]);

        let msg = read_message(&mut src, &cfg()).unwrap().unwrap();
        assert_eq!(&msg[..], b"a");

        assert!(read_message(&mut src, &cfg()).unwrap().is_none());
        // Still at end on repeated calls.
        assert!(read_message(&mut src, &cfg()).unwrap().is_none());
    }

    #[test]
    fn nothing_after_header_is_end_of_stream() {
        let mut src = Cursor::new(Vec::<u8>::new());
        assert!(read_message(&mut src, &cfg()).unwrap().is_none());
    }

    #[test]
    fn three_length_bytes_is_truncated_length() {
        let mut src = ChunkedReader::new([[0x00u8, 0x00, 0x00]]);
        let err = frame_err(read_message(&mut src, &cfg()));
        assert_eq!(err, FrameError::TruncatedLength { actual: 3 });
        assert!(err.is_truncation());
    }

    #[test]
    fn one_length_byte_is_truncated_length() {
        let mut src = Cursor::new(vec![0x00u8]);
        assert_eq!(frame_err(read_message(&mut src, &cfg())), FrameError::TruncatedLength { actual: 1 });
    }

    #[test]
    fn length_without_any_body_is_end_of_stream() {
        let mut src = Cursor::new(vec![0x00u8, 0x00, 0x00, 0x01]);
        assert!(read_message(&mut src, &cfg()).unwrap().is_none());
    }

    #[test]
    fn partial_body_is_truncated_message() {
        let mut src = Cursor::new(vec![0x00u8, 0x00, 0x00, 0x04, 0xAB, 0xCD]);
        assert_eq!(
            frame_err(read_message(&mut src, &cfg())),
            FrameError::TruncatedMessage { expected: 4, actual: 2 }
        );
    }

    #[test]
    fn zero_length_message_needs_no_body() {
        // Trailing byte belongs to the next record, not this one.
        let mut src = Cursor::new(vec![0x00u8, 0x00, 0x00, 0x00, 0xAB]);
        let msg = read_message(&mut src, &cfg()).unwrap().unwrap();
        assert!(msg.is_empty());
        assert_eq!(src.position(), 4);
    }

    #[test]
    fn length_split_across_reads() {
        let mut src = ChunkedReader::new([[0x00u8, 0x00], [0x00, 0x00]]);
        let msg = read_message(&mut src, &cfg()).unwrap().unwrap();
        assert!(msg.is_empty());
    }

    #[test]
    fn body_split_across_reads() {
        let mut src = ChunkedReader::new([
            vec![0x00u8, 0x00, 0x00, 0x04],
            vec![0xAB, 0xCD],
            vec![0xAB, 0xFE],
        ]);
        let msg = read_message(&mut src, &cfg()).unwrap().unwrap();
        assert_eq!(&msg[..], &[0xAB, 0xCD, 0xAB, 0xFE]);
    }

    #[test]
    fn small_read_chunk_size_reads_large_message() {
        let body: Vec<u8> = (0..10_000u32).map(|i| (i % 251) as u8).collect();
        let mut wire = (body.len() as u32).to_be_bytes().to_vec();
        wire.extend_from_slice(&body);

        let config = CodecConfig::default().with_read_chunk_size(64);
        let msg = read_message(&mut Cursor::new(wire), &config).unwrap().unwrap();
        assert_eq!(&msg[..], &body[..]);
    }

    #[test]
    fn oversized_length_is_rejected_before_reading_body() {
        let config = CodecConfig::default().with_max_message_len(16);
        let mut src = Cursor::new(vec![0x00u8, 0x00, 0x00, 0x11, 0x00]);
        assert_eq!(
            frame_err(read_message(&mut src, &config)),
            FrameError::MessageTooLarge { len: 17, max: 16 }
        );
        assert_eq!(src.position(), 4);
    }

    #[test]
    fn huge_corrupt_length_reports_truncation() {
        let mut src = Cursor::new(vec![0xFFu8, 0xFF, 0xFF, 0xFF, 0x01, 0x02]);
        assert_eq!(
            frame_err(read_message(&mut src, &cfg())),
            FrameError::TruncatedMessage { expected: u32::MAX, actual: 2 }
        );
    }

    #[test]
    fn source_error_is_surfaced() {
        let mut src = FailingReader::new(&[0x00, 0x00]);
        match read_message(&mut src, &cfg()) {
            Err(StreamError::Source(e)) => assert_eq!(e.kind(), ErrorKind::ConnectionReset),
            other => panic!("expected source error, got {:?}", other),
        }
    }

    #[test]
    fn length_prefix_is_big_endian() {
        let mut src = Cursor::new(vec![0x01u8, 0x02, 0x03, 0x04]);
        assert_eq!(read_length_prefix(&mut src).unwrap(), Some(0x0102_0304));
    }

// ## 2. Writing

    #[test]
    fn write_layout() {
        let mut out = Vec::<u8>::new();
        write_message(&mut out, b"pouille", &cfg()).unwrap();
        write_message(&mut out, b"", &cfg()).unwrap();

        assert_eq!(
            out,
            vec![
                0x00, 0x00, 0x00, 0x07, b'p', b'o', b'u', b'i', b'l', b'l', b'e',
                0x00, 0x00, 0x00, 0x00,
            ]
        );
    }

    #[test]
    fn short_sink_on_length() {
        let mut sink = ShortSink::with_capacity(2);
        let err = frame_err(write_message(&mut sink, b"abc", &cfg()));
        assert_eq!(err, FrameError::ShortWrite { part: FramePart::Length, expected: 4, written: 2 });
    }

    #[test]
    fn short_sink_on_body() {
        let mut sink = ShortSink::with_capacity(5);
        let err = frame_err(write_message(&mut sink, b"abc", &cfg()));
        assert_eq!(err, FrameError::ShortWrite { part: FramePart::Body, expected: 3, written: 1 });
        assert!(err.to_string().contains("incomplete message write"));
    }

    #[test]
    fn broken_sink_is_surfaced() {
        match write_message(&mut BrokenSink, b"abc", &cfg()) {
            Err(StreamError::Sink(e)) => assert_eq!(e.kind(), ErrorKind::BrokenPipe),
            other => panic!("expected sink error, got {:?}", other),
        }
    }

    #[test]
    fn write_respects_max_message_len() {
        let config = CodecConfig::default().with_max_message_len(2);
        let mut out = Vec::<u8>::new();
        assert_eq!(
            frame_err(write_message(&mut out, b"abc", &config)),
            FrameError::MessageTooLarge { len: 3, max: 2 }
        );
        assert!(out.is_empty());
    }

    #[test]
    fn length_prefix_encoding() {
        assert_eq!(encode_length_prefix(7, &cfg()).unwrap(), [0, 0, 0, 7]);
        assert_eq!(encode_length_prefix(0x0102_0304, &cfg()).unwrap(), [1, 2, 3, 4]);
    }
}
