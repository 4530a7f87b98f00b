//! Delimited-text loader with delimiter detection.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::{Result, VeritableError};

use super::source::SourceMetadata;

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Loader configuration.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Quote character.
    pub quote: u8,
    /// Maximum data rows to read after the header (None = all).
    pub max_rows: Option<usize>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            quote: b'"',
            max_rows: None,
        }
    }
}

impl LoaderConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fix the delimiter instead of auto-detecting.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Cap the number of data rows read.
    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = Some(max_rows);
        self
    }
}

/// Reads delimited text files into raw header-plus-rows grids.
///
/// Rows come back exactly as the file has them: ragged rows are not padded,
/// so the registry's shape check surfaces them as shape errors instead of
/// the loader papering over them.
#[derive(Debug, Default)]
pub struct Loader {
    config: LoaderConfig,
}

impl Loader {
    /// Create a loader with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a loader with custom configuration.
    pub fn with_config(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// Load a file: the full grid (first row = header) plus source metadata.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<(Vec<Vec<String>>, SourceMetadata)> {
        let path = path.as_ref();

        let mut file = File::open(path).map_err(|e| VeritableError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(|e| VeritableError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(&contents)?,
        };

        let rows = self.read_grid(&contents, delimiter)?;

        let format = match delimiter {
            b'\t' => "tsv",
            b',' => "csv",
            b';' => "csv-semicolon",
            b'|' => "psv",
            _ => "delimited",
        }
        .to_string();

        let metadata = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            contents.len() as u64,
            format,
        );

        Ok((rows, metadata))
    }

    fn read_grid(&self, bytes: &[u8], delimiter: u8) -> Result<Vec<Vec<String>>> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let mut rows = Vec::new();
        for (i, record) in reader.records().enumerate() {
            // The cap counts data rows; the header row is always kept
            if let Some(max) = self.config.max_rows {
                if i > max {
                    break;
                }
            }
            let record = record?;
            rows.push(record.iter().map(|s| s.to_string()).collect());
        }

        if rows.is_empty() {
            return Err(VeritableError::EmptyData("no rows found".to_string()));
        }

        Ok(rows)
    }
}

/// Detect the delimiter by analyzing the first few lines.
///
/// A delimiter that appears the same number of times on every sampled line
/// wins; tab gets a slight edge since it rarely occurs inside actual data.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let lines: Vec<String> = BufReader::new(bytes)
        .lines()
        .take(10)
        .map_while(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(VeritableError::EmptyData("no lines to analyze".to_string()));
    }

    let mut best = b',';
    let mut best_score = 0usize;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_outside_quotes(line, delim))
            .collect();

        let first = counts[0];
        if first == 0 {
            continue;
        }

        let consistent = counts.iter().all(|&c| c == first);
        let score = if consistent {
            first * 1000 + usize::from(delim == b'\t') * 100
        } else {
            first
        };

        if score > best_score {
            best_score = score;
            best = delim;
        }
    }

    Ok(best)
}

/// Count delimiter occurrences in a line, skipping quoted sections.
fn count_outside_quotes(line: &str, delimiter: u8) -> usize {
    let delim = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_delimiter_csv() {
        assert_eq!(detect_delimiter(b"a,b,c\n1,2,3\n4,5,6").unwrap(), b',');
    }

    #[test]
    fn test_detect_delimiter_tsv() {
        assert_eq!(detect_delimiter(b"a\tb\tc\n1\t2\t3").unwrap(), b'\t');
    }

    #[test]
    fn test_detect_delimiter_respects_quotes() {
        assert_eq!(
            detect_delimiter(b"a;b\n\"x;1,2\";y\n\"z;3\";w").unwrap(),
            b';'
        );
    }

    #[test]
    fn test_read_grid_keeps_header_and_rows() {
        let loader = Loader::new();
        let rows = loader
            .read_grid(b"Name,Age\nRuth,30\nDavid,45", b',')
            .unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], vec!["Name", "Age"]);
        assert_eq!(rows[2], vec!["David", "45"]);
    }

    #[test]
    fn test_ragged_rows_not_padded() {
        let loader = Loader::new();
        let rows = loader.read_grid(b"a,b\n1\n2,3,4", b',').unwrap();
        assert_eq!(rows[1], vec!["1"]);
        assert_eq!(rows[2], vec!["2", "3", "4"]);
    }

    #[test]
    fn test_max_rows_caps_data_rows() {
        let loader = Loader::with_config(LoaderConfig::new().with_max_rows(1));
        let rows = loader.read_grid(b"h\n1\n2\n3", b',').unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_empty_input_rejected() {
        let loader = Loader::new();
        assert!(matches!(
            loader.read_grid(b"", b','),
            Err(VeritableError::EmptyData(_))
        ));
    }
}
