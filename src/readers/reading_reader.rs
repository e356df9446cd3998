use crate::config::Settings;
use crate::error::{ProcessingError, Result};
use crate::models::Reading;
use crate::utils::constants::{DEFAULT_BUFFER_SIZE, DEFAULT_DELIMITER};
use csv::{DeserializeRecordsIntoIter, ReaderBuilder, Trim};
use memmap2::Mmap;
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;
use tracing::debug;

/// Positional row layout: station id, date, temperature.
type RawReading = (i64, f64, f64);

pub struct ReadingReader {
    has_headers: bool,
    delimiter: u8,
    use_mmap: bool,
    buffer_size: usize,
}

impl ReadingReader {
    pub fn new() -> Self {
        Self {
            has_headers: true,
            delimiter: DEFAULT_DELIMITER,
            use_mmap: false,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            has_headers: settings.has_headers,
            delimiter: settings.delimiter_byte(),
            use_mmap: settings.use_mmap,
            buffer_size: settings.buffer_size,
        }
    }

    pub fn with_has_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_mmap(mut self, use_mmap: bool) -> Self {
        self.use_mmap = use_mmap;
        self
    }

    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    /// Load every reading into memory. Worth it only when the same data is
    /// queried more than once.
    pub fn read_readings(&self, path: &Path) -> Result<Vec<Reading>> {
        self.stream_readings(path)?.collect()
    }

    /// Stream readings one row at a time (memory efficient for large files).
    pub fn stream_readings(&self, path: &Path) -> Result<ReadingIterator<Box<dyn Read>>> {
        if path.is_dir() {
            return Err(ProcessingError::InvalidFormat(format!(
                "Expected a readings file, found directory: {}",
                path.display()
            )));
        }

        let file = File::open(path)?;
        debug!(path = %path.display(), mmap = self.use_mmap, "opening readings file");

        let source: Box<dyn Read> = if self.use_mmap {
            // SAFETY: the map is read-only and the file is not modified while it is open.
            let mmap = unsafe { Mmap::map(&file)? };
            Box::new(Cursor::new(mmap))
        } else {
            Box::new(file)
        };

        Ok(self.stream_reader(source))
    }

    /// Stream readings from any byte source, e.g. stdin or an in-memory buffer.
    pub fn stream_reader<R: Read>(&self, reader: R) -> ReadingIterator<R> {
        let rows = ReaderBuilder::new()
            .has_headers(self.has_headers)
            .delimiter(self.delimiter)
            .trim(Trim::All)
            .buffer_capacity(self.buffer_size)
            .from_reader(reader)
            .into_deserialize::<RawReading>();

        ReadingIterator { rows, yielded: 0 }
    }
}

impl Default for ReadingReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator for streaming readings; each item is one parsed row.
pub struct ReadingIterator<R> {
    rows: DeserializeRecordsIntoIter<R, RawReading>,
    yielded: usize,
}

impl<R> ReadingIterator<R> {
    /// Rows successfully parsed so far.
    pub fn yielded(&self) -> usize {
        self.yielded
    }
}

impl<R: Read> Iterator for ReadingIterator<R> {
    type Item = Result<Reading>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.rows.next()?;
        Some(match row {
            Ok(raw) => {
                self.yielded += 1;
                Ok(Reading::from(raw))
            }
            Err(e) => Err(ProcessingError::from(e)),
        })
    }
}
