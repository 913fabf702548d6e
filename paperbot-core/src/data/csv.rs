//! CSV bar ingest and curve export.
//!
//! The expected schema mirrors a daily OHLCV export:
//! `date,open,high,low,close,adj_close,volume` with ISO dates. Network
//! retrieval is out of scope; files come from whatever produced them.

use crate::domain::Bar;
use std::io;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CsvError {
    #[error("csv error in '{path}': {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("io error writing '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("'{path}' contains no bars")]
    Empty { path: String },
}

/// Load bars from a CSV file, sorted by date ascending.
pub fn load_bars(path: impl AsRef<Path>) -> Result<Vec<Bar>, CsvError> {
    let path = path.as_ref();
    let display = path.display().to_string();
    let wrap = |source: csv::Error| CsvError::Csv {
        path: display.clone(),
        source,
    };

    let mut reader = csv::Reader::from_path(path).map_err(wrap)?;
    let mut bars = Vec::new();
    for record in reader.deserialize::<Bar>() {
        bars.push(record.map_err(wrap)?);
    }
    if bars.is_empty() {
        return Err(CsvError::Empty { path: display });
    }
    bars.sort_by_key(|b| b.date);
    Ok(bars)
}

/// Write a value curve as `index,value` rows.
pub fn write_curve(path: impl AsRef<Path>, header: &str, curve: &[f64]) -> Result<(), CsvError> {
    let path = path.as_ref();
    let display = path.display().to_string();
    let wrap = |source: csv::Error| CsvError::Csv {
        path: display.clone(),
        source,
    };

    let mut writer = csv::Writer::from_path(path).map_err(wrap)?;
    writer.write_record(["index", header]).map_err(wrap)?;
    for (i, value) in curve.iter().enumerate() {
        writer
            .write_record([i.to_string(), value.to_string()])
            .map_err(wrap)?;
    }
    writer.flush().map_err(|source| CsvError::Io {
        path: display.clone(),
        source,
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_bars_parses_and_sorts() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "date,open,high,low,close,adj_close,volume").unwrap();
        writeln!(file, "2024-01-03,101,102,100,101.5,101.5,2000").unwrap();
        writeln!(file, "2024-01-02,100,101,99,100.5,100.5,1000").unwrap();

        let bars = load_bars(file.path()).unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].close, 100.5);
        assert_eq!(bars[1].volume, 2000);
    }

    #[test]
    fn load_bars_rejects_empty_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "date,open,high,low,close,adj_close,volume").unwrap();
        let err = load_bars(file.path()).unwrap_err();
        assert!(matches!(err, CsvError::Empty { .. }));
    }

    #[test]
    fn load_bars_reports_missing_file() {
        let err = load_bars("/nonexistent/bars.csv").unwrap_err();
        assert!(matches!(err, CsvError::Csv { .. }));
    }

    #[test]
    fn write_curve_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("equity.csv");
        write_curve(&path, "equity", &[10_000.0, 10_050.5]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("index,equity"));
        assert!(content.contains("1,10050.5"));
    }
}
