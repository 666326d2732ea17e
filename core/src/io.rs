//! Collaborator-side adapters: turn a path, a buffer or an existing
//! reader/writer into the `Read`/`Write` a `StreamReader`/`StreamWriter`
//! consumes. The codec itself never opens anything.

use std::io::{self, Cursor, Read, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::config::CodecConfig;
use crate::stream::{StreamReader, StreamWriter};
use crate::types::StreamError;

/// Canonical input abstraction
pub enum InputSource {
    Reader(Box<dyn Read + Send>),
    File(PathBuf),
    Memory(Vec<u8>),
}

/// Canonical output abstraction
pub enum OutputSink {
    Writer(Box<dyn Write + Send>),
    File(PathBuf),
    /// In-memory buffer, readable through the returned [`SharedBuffer`].
    Memory,
}

/// Normalize input source into a boxed reader
pub fn open_input(src: InputSource) -> io::Result<Box<dyn Read + Send>> {
    let reader: Box<dyn Read + Send> = match src {
        InputSource::Reader(r) => r,
        InputSource::File(p) => Box::new(io::BufReader::new(std::fs::File::open(p)?)),
        InputSource::Memory(b) => Box::new(Cursor::new(b)),
    };
    Ok(reader)
}

/// Normalize output sink into a boxed writer. `Memory` also returns the
/// buffer handle so the caller can inspect what was written.
pub fn open_output(sink: OutputSink) -> io::Result<(Box<dyn Write + Send>, Option<SharedBuffer>)> {
    match sink {
        OutputSink::Writer(w) => Ok((w, None)),
        OutputSink::File(p) => Ok((Box::new(io::BufWriter::new(std::fs::File::create(p)?)), None)),
        OutputSink::Memory => {
            let buf = SharedBuffer::default();
            Ok((Box::new(buf.clone()), Some(buf)))
        }
    }
}

/// Open a `StreamReader` over any input source.
pub fn open_reader(src: InputSource, config: CodecConfig) -> Result<StreamReader<Box<dyn Read + Send>>, StreamError> {
    let reader = open_input(src).map_err(StreamError::Source)?;
    Ok(StreamReader::with_config(reader, config))
}

/// Open a `StreamWriter` over any output sink.
pub fn open_writer(
    sink: OutputSink,
    config: CodecConfig,
) -> Result<(StreamWriter<Box<dyn Write + Send>>, Option<SharedBuffer>), StreamError> {
    let (writer, buf) = open_output(sink).map_err(StreamError::Sink)?;
    Ok((StreamWriter::with_config(writer, config), buf))
}

/// Cloneable in-memory sink.
#[derive(Clone, Default, Debug)]
pub struct SharedBuffer {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    /// Copy of everything written so far.
    pub fn contents(&self) -> Vec<u8> {
        match self.buf.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .buf
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "shared buffer poisoned"))?;
        guard.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
