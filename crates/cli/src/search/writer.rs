//! Output formatting and the output file.
//!
//! Responsibilities:
//! - Format each result chunk for the output mode and append it to the sink.
//! - Own the output file: truncate-open once, flush on finish, flush on drop.
//!
//! Does NOT handle:
//! - Counting bytes or lines for the summary (see stats.rs).
//! - Dequoting export output (the export strategy does that before writing).
//!
//! Invariants:
//! - Chunks are appended in the order given; nothing is ever rewritten.
//! - csv and xml chunks are written verbatim.
//! - The sink is flushed on every exit path, including errors.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use splunk_search_client::OutputMode;
use tracing::{debug, warn};

use crate::error::SearchError;

/// Formats result chunks for one output mode and appends them to `W`.
#[derive(Debug)]
pub struct OutputWriter<W: Write> {
    sink: W,
    destination: PathBuf,
    mode: OutputMode,
    json_linebreaks: bool,
    chunks_written: u64,
    json_calls: u64,
}

impl<W: Write> OutputWriter<W> {
    /// `destination` names the sink in error reports and the run summary.
    pub fn new(
        sink: W,
        destination: impl Into<PathBuf>,
        mode: OutputMode,
        json_linebreaks: bool,
    ) -> Self {
        Self {
            sink,
            destination: destination.into(),
            mode,
            json_linebreaks,
            chunks_written: 0,
            json_calls: 0,
        }
    }

    /// Append one chunk, formatted for the output mode.
    pub fn write_chunk(&mut self, chunk: &[u8]) -> Result<(), SearchError> {
        let result = match self.mode {
            OutputMode::Json => {
                self.json_calls += 1;
                if self.json_linebreaks {
                    write_json_linebroken(&mut self.sink, chunk)
                } else {
                    self.sink.write_all(chunk)
                }
            }
            OutputMode::Csv | OutputMode::Xml => self.sink.write_all(chunk),
        };
        result.map_err(|source| self.io_error(source))?;
        self.chunks_written += 1;
        Ok(())
    }

    /// Flush buffered output to the sink.
    pub fn flush(&mut self) -> Result<(), SearchError> {
        self.sink.flush().map_err(|source| self.io_error(source))
    }

    /// Chunks appended so far.
    pub fn chunks_written(&self) -> u64 {
        self.chunks_written
    }

    /// Chunks that went through the json formatter.
    pub fn json_calls(&self) -> u64 {
        self.json_calls
    }

    /// Give back the sink.
    pub fn into_inner(self) -> W {
        self.sink
    }

    fn io_error(&self, source: io::Error) -> SearchError {
        SearchError::OutputIo {
            path: self.destination.clone(),
            source,
        }
    }
}

/// Write `chunk` with a newline before every `{` after its first byte.
fn write_json_linebroken<W: Write>(sink: &mut W, chunk: &[u8]) -> io::Result<()> {
    let Some((first, rest)) = chunk.split_first() else {
        return Ok(());
    };
    sink.write_all(std::slice::from_ref(first))?;

    let mut start = 0;
    for (i, &b) in rest.iter().enumerate() {
        if b == b'{' {
            sink.write_all(&rest[start..i])?;
            sink.write_all(b"\n")?;
            start = i;
        }
    }
    sink.write_all(&rest[start..])
}

/// The output file, opened (and truncated) once before the run starts.
#[derive(Debug)]
pub struct OutputSink {
    inner: Option<BufWriter<File>>,
    path: PathBuf,
}

impl OutputSink {
    /// Create or truncate `path` for writing.
    pub fn create(path: &Path) -> Result<Self, SearchError> {
        debug!("Opening output file {}", path.display());
        let file = File::create(path).map_err(|source| SearchError::OutputIo {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            inner: Some(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Flush and close the file.
    pub fn finish(mut self) -> Result<(), SearchError> {
        match self.inner.take() {
            Some(mut writer) => writer.flush().map_err(|source| SearchError::OutputIo {
                path: self.path.clone(),
                source,
            }),
            None => Ok(()),
        }
    }

    fn writer(&mut self) -> io::Result<&mut BufWriter<File>> {
        self.inner
            .as_mut()
            .ok_or_else(|| io::Error::other("output file already closed"))
    }
}

impl Write for OutputSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer()?.flush()
    }
}

impl Drop for OutputSink {
    fn drop(&mut self) {
        if let Some(mut writer) = self.inner.take()
            && let Err(e) = writer.flush()
        {
            warn!(
                "Failed to flush output file {}: {}",
                self.path.display(),
                e
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn written(mode: OutputMode, json_linebreaks: bool, chunks: &[&[u8]]) -> Vec<u8> {
        let mut writer = OutputWriter::new(Vec::new(), "memory", mode, json_linebreaks);
        for chunk in chunks {
            writer.write_chunk(chunk).unwrap();
        }
        writer.into_inner()
    }

    #[test]
    fn test_csv_and_xml_are_verbatim() {
        let chunks: &[&[u8]] = &[b"a,b\n", b"{c,d}\n"];
        assert_eq!(written(OutputMode::Csv, true, chunks), b"a,b\n{c,d}\n");
        assert_eq!(
            written(OutputMode::Xml, true, &[b"<r>{x}</r>"]),
            b"<r>{x}</r>"
        );
    }

    #[test]
    fn test_json_without_linebreaks_is_verbatim() {
        let out = written(OutputMode::Json, false, &[br#"{"a":1}{"a":2}"#]);
        assert_eq!(out, br#"{"a":1}{"a":2}"#);
    }

    #[test]
    fn test_json_linebreaks_before_each_brace_after_first_byte() {
        let out = written(OutputMode::Json, true, &[br#"{"a":1}{"a":2}{"a":3}"#]);
        assert_eq!(out, b"{\"a\":1}\n{\"a\":2}\n{\"a\":3}");
    }

    #[test]
    fn test_json_linebreaks_apply_per_chunk() {
        let out = written(OutputMode::Json, true, &[br#"{"a":1}"#, br#"{"a":2}"#]);
        assert_eq!(out, b"{\"a\":1}{\"a\":2}");

        let out = written(OutputMode::Json, true, &[b"x{y", b"{"]);
        assert_eq!(out, b"x\n{y{");
    }

    #[test]
    fn test_counters_are_per_writer() {
        let mut json = OutputWriter::new(Vec::new(), "memory", OutputMode::Json, false);
        json.write_chunk(b"{}").unwrap();
        json.write_chunk(b"{}").unwrap();
        assert_eq!(json.json_calls(), 2);
        assert_eq!(json.chunks_written(), 2);

        let mut csv = OutputWriter::new(Vec::new(), "memory", OutputMode::Csv, false);
        csv.write_chunk(b"a\n").unwrap();
        assert_eq!(csv.json_calls(), 0);
        assert_eq!(csv.chunks_written(), 1);
    }

    #[test]
    fn test_sink_truncates_and_flushes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.dat");
        std::fs::write(&path, "stale content that must go").unwrap();

        let mut sink = OutputSink::create(&path).unwrap();
        sink.write_all(b"fresh").unwrap();
        sink.finish().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "fresh");
    }

    #[test]
    fn test_sink_flushes_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.dat");
        {
            let mut sink = OutputSink::create(&path).unwrap();
            sink.write_all(b"partial").unwrap();
        }
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "partial");
    }

    #[test]
    fn test_sink_open_failure_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.dat");
        let err = OutputSink::create(&path).unwrap_err();
        match err {
            SearchError::OutputIo { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_write_failure_is_output_io() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::other("disk full"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let mut writer = OutputWriter::new(Broken, "/out.dat", OutputMode::Csv, false);
        let err = writer.write_chunk(b"a").unwrap_err();
        assert!(matches!(err, SearchError::OutputIo { .. }));
        assert_eq!(writer.chunks_written(), 0);
    }
}
