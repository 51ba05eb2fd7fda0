//! Newline-separated text ingestion and serialization of samples.
//!
//! One decimal value per line. Surrounding whitespace is ignored on read;
//! writes use the shortest representation that parses back to the same value.

use crate::sample::{Sample, Signal};
use core::fmt;
use core::num::ParseFloatError;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::string::String;

/// Errors raised while reading a sample.
#[derive(Debug)]
pub enum LoadError {
    /// The underlying reader or file failed.
    Io(io::Error),
    /// A line did not parse as a decimal number.
    Parse {
        /// 1-based line number.
        line: usize,
        /// Offending line, whitespace trimmed.
        content: String,
        /// Parser error.
        source: ParseFloatError,
        /// Values read before the offending line.
        partial: Sample,
    },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(err) => write!(f, "I/O error while reading sample: {err}"),
            LoadError::Parse {
                line,
                content,
                source,
                ..
            } => write!(f, "Line {line}: cannot parse `{content}` as a number: {source}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(err) => Some(err),
            LoadError::Parse { source, .. } => Some(source),
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(value: io::Error) -> Self {
        LoadError::Io(value)
    }
}

/// Read one value per line until end of input.
///
/// ```
/// use dsp_rs::io::{read_sample, LoadError};
///
/// let s = read_sample(" 1.0\n2.5 \n".as_bytes()).unwrap();
/// assert_eq!(s.as_slice(), &[1.0, 2.5]);
///
/// match read_sample("1.0\n2.5\nbad\n".as_bytes()) {
///     Err(LoadError::Parse { line, partial, .. }) => {
///         assert_eq!(line, 3);
///         assert_eq!(partial.as_slice(), &[1.0, 2.5]);
///     }
///     other => panic!("unexpected {other:?}"),
/// }
/// ```
pub fn read_sample<R: BufRead>(reader: R) -> Result<Sample, LoadError> {
    let mut sample = Sample::default();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let content = line.trim();
        match content.parse::<f64>() {
            Ok(value) => sample.push(Signal(value)),
            Err(source) => {
                return Err(LoadError::Parse {
                    line: index + 1,
                    content: content.into(),
                    source,
                    partial: sample,
                })
            }
        }
    }
    Ok(sample)
}

/// Read a sample from a file, see [`read_sample`].
pub fn load_sample<P: AsRef<Path>>(path: P) -> Result<Sample, LoadError> {
    let file = File::open(path)?;
    read_sample(BufReader::new(file))
}

/// Write one value per line.
pub fn write_sample<W: Write>(mut writer: W, sample: &Sample) -> io::Result<()> {
    for value in sample.iter() {
        writeln!(writer, "{value}")?;
    }
    writer.flush()
}

/// Write a sample to a file, creating or truncating it.
pub fn save_sample<P: AsRef<Path>>(path: P, sample: &Sample) -> io::Result<()> {
    let file = File::create(path)?;
    write_sample(BufWriter::new(file), sample)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use std::string::ToString;
    use std::vec::Vec;

    #[test]
    fn parse_failure_reports_line_and_partial() {
        let err = read_sample("1.0\n2.5\nbad\n4.0\n".as_bytes()).unwrap_err();
        match err {
            LoadError::Parse {
                line,
                ref content,
                ref partial,
                ..
            } => {
                assert_eq!(line, 3);
                assert_eq!(content, "bad");
                assert_eq!(partial.as_slice(), &[1.0, 2.5]);
            }
            LoadError::Io(_) => panic!("expected a parse failure"),
        }
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().starts_with("Line 3"));
    }

    #[test]
    fn blank_line_is_a_parse_failure() {
        let err = read_sample("1.0\n\n2.0".as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::Parse { line: 2, .. }));
    }

    #[test]
    fn empty_input_is_an_empty_sample() {
        assert!(read_sample("".as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn write_then_read_is_lossless() {
        let mut rng = rand::rng();
        let sample: Sample = (0..100).map(|_| rng.random_range(-1e6..1e6)).collect();
        let mut buffer = Vec::new();
        write_sample(&mut buffer, &sample).unwrap();
        assert_eq!(read_sample(buffer.as_slice()).unwrap(), sample);
    }

    #[test]
    fn save_then_load_roundtrips_through_a_file() {
        let path = std::env::temp_dir().join(std::format!("dsp-rs-io-{}.dat", std::process::id()));
        let sample = Sample::new(std::vec![0.5, -1.25, 3.0]);
        save_sample(&path, &sample).unwrap();
        let loaded = load_sample(&path);
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded.unwrap(), sample);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_sample("/nonexistent/dsp-rs/sample.dat").unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }
}
