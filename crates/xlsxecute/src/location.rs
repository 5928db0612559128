//! Parameter locations (`Sheet.Cell`) and A1 cell references

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u32 = 16_384;

/// A cell reference (e.g., "A1", "$B$2")
///
/// Rows and columns are 0-based internally. `$` markers are accepted on parse
/// and dropped, since a parameter always targets one concrete cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellRef {
    /// Row index (0-based internally, 1-based in display)
    pub row: u32,
    /// Column index (0-based, A=0, B=1, ..., XFD=16383)
    pub col: u32,
}

impl CellRef {
    /// Create a new cell reference from 0-based indices
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Parse a cell reference from A1-style notation
    ///
    /// # Examples
    /// ```
    /// use xlsxecute::CellRef;
    ///
    /// let cell = CellRef::parse("C3").unwrap();
    /// assert_eq!((cell.row, cell.col), (2, 2));
    ///
    /// let cell = CellRef::parse("$AA$10").unwrap();
    /// assert_eq!((cell.row, cell.col), (9, 26));
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let reference = s.trim();
        if reference.is_empty() {
            return Err(Error::cell_out_of_range(s, "empty reference"));
        }

        let bytes = reference.as_bytes();
        let mut pos = 0;

        if bytes.get(pos) == Some(&b'$') {
            pos += 1;
        }

        let col_start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_alphabetic() {
            pos += 1;
        }
        if pos == col_start {
            return Err(Error::cell_out_of_range(s, "no column letters"));
        }
        let col = Self::letters_to_column(&reference[col_start..pos])
            .ok_or_else(|| Error::cell_out_of_range(s, "column beyond XFD"))?;

        if bytes.get(pos) == Some(&b'$') {
            pos += 1;
        }

        let row_str = &reference[pos..];
        if row_str.is_empty() {
            return Err(Error::cell_out_of_range(s, "no row number"));
        }
        if !row_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::cell_out_of_range(s, "invalid row number"));
        }
        let row: u32 = row_str
            .parse()
            .map_err(|_| Error::cell_out_of_range(s, format!("row beyond {MAX_ROWS}")))?;

        if row == 0 {
            return Err(Error::cell_out_of_range(s, "row number must be >= 1"));
        }
        if row > MAX_ROWS {
            return Err(Error::cell_out_of_range(s, format!("row beyond {MAX_ROWS}")));
        }

        Ok(Self { row: row - 1, col })
    }

    /// Convert column letters to index (A = 0, Z = 25, AA = 26, etc.)
    ///
    /// Returns `None` past the last Excel column.
    pub fn letters_to_column(letters: &str) -> Option<u32> {
        if letters.is_empty() {
            return None;
        }

        let mut col: u32 = 0;
        for c in letters.chars() {
            if !c.is_ascii_alphabetic() {
                return None;
            }
            col = col * 26 + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
            if col > MAX_COLS {
                return None;
            }
        }

        Some(col - 1)
    }

    /// Convert column index to letters (0 = A, 25 = Z, 26 = AA, etc.)
    pub fn column_to_letters(col: u32) -> String {
        let mut result = String::new();
        let mut n = col + 1;

        while n > 0 {
            n -= 1;
            let c = ((n % 26) as u8 + b'A') as char;
            result.insert(0, c);
            n /= 26;
        }

        result
    }

    /// 1-based `(column, row)` pair, the coordinate order the workbook layer uses
    pub fn one_based(&self) -> (u32, u32) {
        (self.col + 1, self.row + 1)
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::column_to_letters(self.col), self.row + 1)
    }
}

impl FromStr for CellRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Target of a parameter: a sheet name and a cell on that sheet
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CellLocation {
    pub sheet: String,
    pub cell: CellRef,
}

impl CellLocation {
    /// Parse a `Sheet.Cell` key.
    ///
    /// The key must contain exactly one dot, so sheet names containing dots
    /// cannot be addressed.
    pub fn parse(key: &str) -> Result<Self> {
        let mut parts = key.split('.');
        let (sheet, cell) = match (parts.next(), parts.next(), parts.next()) {
            (Some(sheet), Some(cell), None) => (sheet, cell),
            _ => return Err(Error::InvalidLocation(key.to_string())),
        };
        if sheet.is_empty() {
            return Err(Error::InvalidLocation(key.to_string()));
        }

        Ok(Self {
            sheet: sheet.to_string(),
            cell: CellRef::parse(cell)?,
        })
    }
}

impl fmt::Display for CellLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}!{}", self.sheet, self.cell)
    }
}

impl FromStr for CellLocation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
