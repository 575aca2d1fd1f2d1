//! Bytecode offset to source line conversion.
//!
//! Class files record debug information as a sparse list of
//! (bytecode offset, source line) pairs per method body. The printer needs a
//! dense, total lookup over that table, so the sparse entries are expanded
//! once per declaration into a forward-filled array: every offset inherits
//! the most recently seen known line, and offsets before the first entry stay
//! unknown. Methods without a table get the no-op converter, which answers
//! unknown for everything.

/// A sparse line-number table as read from a method's debug attribute.
///
/// Entries map a bytecode offset to the source line the following
/// instructions were compiled from. `max_offset` is the largest offset the
/// method body can produce; it bounds the dense expansion and saturates
/// lookups past the end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineNumberTable {
    entries: Vec<(u32, u32)>,
    max_offset: u32,
}

impl LineNumberTable {
    /// Build a table from sparse (offset, line) entries.
    ///
    /// Entries need not be sorted; they are sorted by offset here. Offsets
    /// beyond `max_offset` are a builder bug and rejected by assertion.
    pub fn new(mut entries: Vec<(u32, u32)>, max_offset: u32) -> Self {
        entries.sort_by_key(|&(offset, _)| offset);
        assert!(
            entries.last().map_or(true, |&(offset, _)| offset <= max_offset),
            "line table entry offset exceeds max_offset"
        );
        Self {
            entries,
            max_offset,
        }
    }

    pub fn entries(&self) -> &[(u32, u32)] {
        &self.entries
    }

    pub fn max_offset(&self) -> u32 {
        self.max_offset
    }
}

/// Total, pure mapping from a bytecode offset to a source line.
///
/// Built once per method/constructor declaration. Queries never fail:
/// offsets past the table clamp to the last covered offset, and offsets the
/// table says nothing about answer `None`.
#[derive(Debug, Clone)]
pub enum OffsetToLineConverter {
    /// Dense forward-filled array covering `[0, max_offset]`.
    Table(Vec<Option<u32>>),
    /// Always answers unknown. Installed for declarations without a debug
    /// table (interfaces, synthetic members).
    Noop,
}

impl OffsetToLineConverter {
    /// Expand a sparse table into a dense forward-filled converter.
    pub fn from_table(table: &LineNumberTable) -> Self {
        let mut dense = vec![None; table.max_offset() as usize + 1];
        let mut current = None;
        let mut next = table.entries().iter().peekable();

        for (offset, slot) in dense.iter_mut().enumerate() {
            while let Some(&&(entry_offset, line)) = next.peek() {
                if entry_offset as usize > offset {
                    break;
                }
                current = Some(line);
                next.next();
            }
            *slot = current;
        }

        Self::Table(dense)
    }

    /// The converter that answers unknown for every offset.
    pub fn noop() -> Self {
        Self::Noop
    }

    /// Look up the source line for a bytecode offset.
    ///
    /// Offsets past the table's last covered offset clamp to it rather than
    /// failing: bytecode offsets can legitimately exceed the last recorded
    /// entry. `None` means the table has no line for that offset.
    pub fn line_for_offset(&self, offset: u32) -> Option<u32> {
        match self {
            Self::Table(dense) => {
                let index = (offset as usize).min(dense.len() - 1);
                dense[index]
            }
            Self::Noop => None,
        }
    }
}
