// ranger_sim/src/io/mod.rs

//! Readers for the plain-text world and sensor logs.
//!
//! Both formats are whitespace separated, one record per line. Blank lines
//! and lines starting with `#` are ignored.

mod sensor;
mod world;

pub use sensor::{parse_sensor_data, read_sensor_data};
pub use world::{parse_world, read_world};

use crate::error::DataError;
use std::path::Path;
use std::str::FromStr;

fn read_to_string(path: &Path) -> Result<String, DataError> {
    std::fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Non-empty, non-comment lines with their 1-based line numbers.
fn records(text: &str) -> impl Iterator<Item = (usize, Vec<&str>)> {
    text.lines().enumerate().filter_map(|(i, line)| {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            None
        } else {
            Some((i + 1, line.split_whitespace().collect()))
        }
    })
}

fn field<T: FromStr>(fields: &[&str], index: usize, name: &str, line: usize) -> Result<T, DataError> {
    let raw = fields
        .get(index)
        .ok_or_else(|| DataError::parse(line, format!("missing {name}")))?;
    raw.parse()
        .map_err(|_| DataError::parse(line, format!("invalid {name} '{raw}'")))
}

/// A float field that must be finite; `NaN` and `inf` parse but are rejected.
fn number(fields: &[&str], index: usize, name: &str, line: usize) -> Result<f64, DataError> {
    let value: f64 = field(fields, index, name, line)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DataError::parse(line, format!("non-finite {name} {value}")))
    }
}

fn expect_fields(fields: &[&str], count: usize, line: usize) -> Result<(), DataError> {
    if fields.len() == count {
        Ok(())
    } else {
        Err(DataError::parse(
            line,
            format!("expected {count} fields, found {}", fields.len()),
        ))
    }
}
