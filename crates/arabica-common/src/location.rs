use serde::Serialize;

/// A position in emitted text. Row and column are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct TextLocation {
    pub row: u32,
    pub column: u32,
}

impl TextLocation {
    /// Create a location from a 1-based row and column.
    pub fn new(row: u32, column: u32) -> Self {
        debug_assert!(row >= 1 && column >= 1, "text locations are 1-based");
        Self { row, column }
    }
}

/// One entry of the correlation table between original bytecode lines and
/// emitted text coordinates.
///
/// The printer appends entries in emission order, and only appends when the
/// candidate original line is strictly greater than the last recorded one,
/// so within one declaration `original_line` is strictly increasing. External
/// debugging tools consume the list to map emitted text back to the lines
/// recorded in the class file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LineNumberPosition {
    /// Source line from the bytecode's debug table.
    pub original_line: u32,
    /// Row in the emitted text where the corresponding node begins (1-based).
    pub row: u32,
    /// Column in the emitted text where the corresponding node begins (1-based).
    pub column: u32,
}

impl LineNumberPosition {
    pub fn new(original_line: u32, location: TextLocation) -> Self {
        Self {
            original_line,
            row: location.row,
            column: location.column,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_ordering_is_row_major() {
        let a = TextLocation::new(1, 9);
        let b = TextLocation::new(2, 1);
        assert!(a < b);
        assert!(TextLocation::new(2, 1) < TextLocation::new(2, 2));
    }

    #[test]
    fn position_captures_location() {
        let pos = LineNumberPosition::new(42, TextLocation::new(7, 5));
        assert_eq!(pos.original_line, 42);
        assert_eq!(pos.row, 7);
        assert_eq!(pos.column, 5);
    }
}
