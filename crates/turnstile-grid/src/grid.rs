//! Token matrix: parse, row access, replacement, render.

use std::error::Error;
use std::fmt;

/// Errors from grid construction and access.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// The text source's line count does not match the configured rows.
    RowCountMismatch {
        /// Configured row count.
        expected: usize,
        /// Lines actually present in the source.
        actual: usize,
    },
    /// A row index past the end of the grid.
    RowOutOfBounds {
        /// The requested row.
        row: usize,
        /// Number of rows in the grid.
        rows: usize,
    },
    /// A column index past the end of a row.
    ColOutOfBounds {
        /// The row being addressed.
        row: usize,
        /// The requested column.
        col: usize,
        /// Token count of that row.
        len: usize,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RowCountMismatch { expected, actual } => {
                write!(f, "expected {expected} source lines, found {actual}")
            }
            Self::RowOutOfBounds { row, rows } => {
                write!(f, "row {row} out of bounds (grid has {rows} rows)")
            }
            Self::ColOutOfBounds { row, col, len } => {
                write!(f, "column {col} out of bounds in row {row} ({len} tokens)")
            }
        }
    }
}

impl Error for GridError {}

/// A `rows × cols` matrix of string tokens.
///
/// Tokens are replaced, never deleted, so every row keeps a stable
/// token count for the lifetime of a run. Short source rows are padded
/// with empty tokens up to `cols` at construction; rows longer than
/// `cols` keep their extra tokens.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenGrid {
    rows: Vec<Vec<String>>,
    cols: usize,
}

impl TokenGrid {
    /// Build a grid from already-tokenized rows, padding short rows
    /// with empty tokens up to `cols`.
    pub fn from_rows(mut rows: Vec<Vec<String>>, cols: usize) -> Self {
        for row in &mut rows {
            while row.len() < cols {
                row.push(String::new());
            }
        }
        Self { rows, cols }
    }

    /// Parse a line-oriented, whitespace-delimited source into a grid.
    ///
    /// `rows` and `cols` come from out-of-band configuration, not from
    /// the text itself. A source whose line count differs from `rows`
    /// is rejected outright; a line with fewer than `cols` tokens is
    /// padded with empty tokens (malformed data keeps the run
    /// available), and a line with more keeps its extras.
    pub fn from_text(text: &str, rows: usize, cols: usize) -> Result<Self, GridError> {
        let lines: Vec<&str> = text.lines().collect();
        if lines.len() != rows {
            return Err(GridError::RowCountMismatch {
                expected: rows,
                actual: lines.len(),
            });
        }
        let tokenized = lines
            .into_iter()
            .map(|line| line.split_whitespace().map(str::to_owned).collect())
            .collect();
        Ok(Self::from_rows(tokenized, cols))
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    /// Configured column count (individual rows may hold more tokens).
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Read-only view of one row's tokens.
    pub fn row(&self, row: usize) -> Result<&[String], GridError> {
        self.rows
            .get(row)
            .map(Vec::as_slice)
            .ok_or(GridError::RowOutOfBounds {
                row,
                rows: self.rows.len(),
            })
    }

    /// Mutable view of one row's tokens.
    ///
    /// The slice is length-preserving by construction: tokens can be
    /// replaced but never added or removed through it.
    pub fn row_mut(&mut self, row: usize) -> Result<&mut [String], GridError> {
        let rows = self.rows.len();
        self.rows
            .get_mut(row)
            .map(Vec::as_mut_slice)
            .ok_or(GridError::RowOutOfBounds { row, rows })
    }

    /// One row's tokens joined with no separator, the text the
    /// palindrome scan runs over.
    pub fn joined_row(&self, row: usize) -> Result<String, GridError> {
        Ok(self.row(row)?.concat())
    }

    /// Replace a single token.
    pub fn replace_token(
        &mut self,
        row: usize,
        col: usize,
        value: impl Into<String>,
    ) -> Result<(), GridError> {
        let tokens = self.row_mut(row)?;
        let len = tokens.len();
        let slot = tokens
            .get_mut(col)
            .ok_or(GridError::ColOutOfBounds { row, col, len })?;
        *slot = value.into();
        Ok(())
    }

    /// Render the grid as space-joined lines, one per row.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for row in &self.rows {
            out.push_str(&row.join(" "));
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_3x3() -> TokenGrid {
        TokenGrid::from_text("ana bob x\naa bb cc\none two three\n", 3, 3).unwrap()
    }

    #[test]
    fn from_text_parses_whitespace_tokens() {
        let grid = grid_3x3();
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.cols(), 3);
        assert_eq!(grid.row(0).unwrap(), ["ana", "bob", "x"]);
    }

    #[test]
    fn from_text_rejects_wrong_line_count() {
        let err = TokenGrid::from_text("a b\nc d\n", 3, 2).unwrap_err();
        assert_eq!(
            err,
            GridError::RowCountMismatch {
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn short_rows_pad_with_empty_tokens() {
        let grid = TokenGrid::from_text("a\nb c d\n", 2, 3).unwrap();
        assert_eq!(grid.row(0).unwrap(), ["a", "", ""]);
        assert_eq!(grid.row(1).unwrap(), ["b", "c", "d"]);
    }

    #[test]
    fn long_rows_keep_extra_tokens() {
        let grid = TokenGrid::from_text("a b c d\n", 1, 2).unwrap();
        assert_eq!(grid.row(0).unwrap().len(), 4);
    }

    #[test]
    fn joined_row_concatenates_without_separator() {
        let grid = grid_3x3();
        assert_eq!(grid.joined_row(0).unwrap(), "anabobx");
    }

    #[test]
    fn replace_token_swaps_in_place() {
        let mut grid = grid_3x3();
        grid.replace_token(0, 1, "7").unwrap();
        assert_eq!(grid.row(0).unwrap(), ["ana", "7", "x"]);
    }

    #[test]
    fn out_of_bounds_access_is_an_error() {
        let mut grid = grid_3x3();
        assert!(matches!(
            grid.row(9),
            Err(GridError::RowOutOfBounds { row: 9, rows: 3 })
        ));
        assert!(matches!(
            grid.replace_token(0, 9, "z"),
            Err(GridError::ColOutOfBounds { col: 9, .. })
        ));
    }

    #[test]
    fn render_round_trips_canonical_text() {
        let text = "ana bob x\naa bb cc\none two three\n";
        let grid = TokenGrid::from_text(text, 3, 3).unwrap();
        assert_eq!(grid.render(), text);
    }

    #[test]
    fn zero_row_grid_renders_empty() {
        let grid = TokenGrid::from_text("", 0, 4).unwrap();
        assert_eq!(grid.rows(), 0);
        assert_eq!(grid.render(), "");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn arb_token() -> impl Strategy<Value = String> {
            "[a-z0-9]{1,6}"
        }

        proptest! {
            #[test]
            fn parse_then_render_round_trips(
                rows in prop::collection::vec(
                    prop::collection::vec(arb_token(), 1..5),
                    0..6,
                ),
            ) {
                let cols = rows.iter().map(Vec::len).max().unwrap_or(0);
                let text: String = rows
                    .iter()
                    .map(|r| {
                        let mut padded = r.clone();
                        padded.resize(cols, String::new());
                        let mut line = padded.join(" ");
                        line.push('\n');
                        line
                    })
                    .collect();
                let grid = TokenGrid::from_text(&text, rows.len(), cols).unwrap();
                prop_assert_eq!(grid.render(), text);
            }

            #[test]
            fn replace_preserves_row_length(
                col in 0usize..3,
                value in arb_token(),
            ) {
                let mut grid = TokenGrid::from_text("a b c\n", 1, 3).unwrap();
                grid.replace_token(0, col, value).unwrap();
                prop_assert_eq!(grid.row(0).unwrap().len(), 3);
            }
        }
    }
}
