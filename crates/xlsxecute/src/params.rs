//! Parameter files and command-line overrides
//!
//! A parameter maps a `Sheet.Cell` location to the value that should be
//! stored there before the model is calculated. Parameters come from an
//! optional CSV or JSON file and are then overlaid by `--param` overrides.

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Value written into a parameter cell
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Stored as a text cell, never type-sniffed
    Text(String),
    Number(f64),
    Boolean(bool),
}

impl ParamValue {
    /// Create a text value
    pub fn text<S: Into<String>>(s: S) -> Self {
        ParamValue::Text(s.into())
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Text(s) => write!(f, "{s:?}"),
            ParamValue::Number(n) => write!(f, "{n}"),
            ParamValue::Boolean(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Text(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Text(s)
    }
}

impl From<f64> for ParamValue {
    fn from(n: f64) -> Self {
        ParamValue::Number(n)
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        ParamValue::Boolean(b)
    }
}

/// Supported parameter file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterFormat {
    /// `Sheet.Cell,value` rows without a header
    Csv,
    /// Flat `{"Sheet.Cell": value}` object
    Json,
}

impl ParameterFormat {
    /// Pick the format from the file extension (case-insensitive)
    pub fn from_path(path: &Path) -> Result<Self> {
        let name = path.to_string_lossy().to_lowercase();
        if name.ends_with(".csv") {
            Ok(ParameterFormat::Csv)
        } else if name.ends_with(".json") {
            Ok(ParameterFormat::Json)
        } else {
            Err(Error::UnsupportedFormat(path.to_path_buf()))
        }
    }
}

/// The merged parameter set for one run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameters {
    values: BTreeMap<String, ParamValue>,
}

impl Parameters {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Load parameters from an optional file.
    ///
    /// `None` yields an empty set. The format is chosen by extension.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::new());
        };

        let format = ParameterFormat::from_path(path)?;
        let file = File::open(path)?;

        match format {
            ParameterFormat::Csv => Self::read_csv(file, path),
            ParameterFormat::Json => Self::read_json(file, path),
        }
    }

    /// Read `Sheet.Cell,value` rows. Extra columns are ignored and every value
    /// is kept as text.
    ///
    /// `origin` is only used in error messages.
    pub fn read_csv<R: Read>(reader: R, origin: &Path) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut params = Self::new();
        for result in csv_reader.records() {
            let record = result.map_err(|e| Error::InvalidParameterFile {
                path: origin.to_path_buf(),
                message: e.to_string(),
            })?;

            match (record.get(0), record.get(1)) {
                (Some(location), Some(value)) => {
                    params.insert(location, ParamValue::text(value));
                }
                _ => {
                    return Err(Error::InvalidParameterRow {
                        path: origin.to_path_buf(),
                        line: record.position().map(|p| p.line()).unwrap_or(0),
                    });
                }
            }
        }

        Ok(params)
    }

    /// Read a flat JSON object of locations to string, number or boolean values.
    ///
    /// `origin` is only used in error messages.
    pub fn read_json<R: Read>(reader: R, origin: &Path) -> Result<Self> {
        let values: BTreeMap<String, ParamValue> =
            serde_json::from_reader(reader).map_err(|e| Error::InvalidParameterFile {
                path: origin.to_path_buf(),
                message: e.to_string(),
            })?;
        Ok(Self { values })
    }

    /// Set a parameter, replacing any previous value at the same location
    pub fn insert<K: Into<String>, V: Into<ParamValue>>(
        &mut self,
        location: K,
        value: V,
    ) -> Option<ParamValue> {
        self.values.insert(location.into(), value.into())
    }

    /// Get the value for a location key
    pub fn get(&self, location: &str) -> Option<&ParamValue> {
        self.values.get(location)
    }

    /// Apply overrides in order; later overrides win
    pub fn apply<'a, I>(&mut self, overrides: I)
    where
        I: IntoIterator<Item = &'a Override>,
    {
        for o in overrides {
            self.insert(o.location.clone(), ParamValue::text(o.value.clone()));
        }
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if there are no parameters
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over `(location, value)` pairs in location order
    pub fn iter(&self) -> btree_map::Iter<'_, String, ParamValue> {
        self.values.iter()
    }
}

impl<'a> IntoIterator for &'a Parameters {
    type Item = (&'a String, &'a ParamValue);
    type IntoIter = btree_map::Iter<'a, String, ParamValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for Parameters {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut params = Self::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

/// A `sheet.cell=value` override from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Override {
    pub location: String,
    pub value: String,
}

impl Override {
    /// Parse an override. Locations never contain `=`, so everything after the
    /// location's `=` is the value: `"Sheet.A1=a=b"` sets `Sheet.A1` to `"a=b"`.
    pub fn parse(s: &str) -> Result<Self> {
        let (location, value) = s
            .split_once('=')
            .ok_or_else(|| Error::InvalidOverrideFormat(s.to_string()))?;
        Ok(Self {
            location: location.to_string(),
            value: value.to_string(),
        })
    }
}

impl FromStr for Override {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Overlay raw `sheet.cell=value` strings onto file parameters.
///
/// Every override is parsed before any is applied.
pub fn merge<S: AsRef<str>>(mut params: Parameters, overrides: &[S]) -> Result<Parameters> {
    let parsed = overrides
        .iter()
        .map(|s| Override::parse(s.as_ref()))
        .collect::<Result<Vec<_>>>()?;
    params.apply(&parsed);
    Ok(params)
}
