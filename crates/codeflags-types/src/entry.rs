//! Atomic code-list entries.
//!
//! A code-list cell is exploded into one `AtomicEntry` per comma-delimited
//! segment. Each entry is either a range (`250.1-250.3`) or a pattern
//! (`250.x`, `I10`).

use crate::well_known::RANGE_SEPARATOR;
use crate::CodeType;

/// Kind of an atomic entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EntryKind {
    /// Inclusive `low-high` range.
    Range,
    /// Discrete or wildcard code.
    Pattern,
}

impl EntryKind {
    /// Classifies a whitespace-stripped segment.
    ///
    /// A segment is a range iff it contains a hyphen.
    ///
    /// # Examples
    ///
    /// ```
    /// use codeflags_types::EntryKind;
    ///
    /// assert_eq!(EntryKind::of("170-182"), EntryKind::Range);
    /// assert_eq!(EntryKind::of("250.x"), EntryKind::Pattern);
    /// assert_eq!(EntryKind::of(""), EntryKind::Pattern);
    /// ```
    pub fn of(raw: &str) -> Self {
        if raw.contains(RANGE_SEPARATOR) {
            Self::Range
        } else {
            Self::Pattern
        }
    }

    /// Returns the upper-case label used in audit tables.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Range => "RANGE",
            Self::Pattern => "PATTERN",
        }
    }
}

/// One classified segment of a code-list cell.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AtomicEntry {
    /// Data row the entry came from.
    pub row: usize,
    /// Index of the segment within its cell.
    pub position: usize,
    /// The cell exactly as read, before whitespace removal.
    pub code_orig: String,
    /// The segment with all whitespace removed.
    pub raw: String,
    /// Range or pattern.
    pub kind: EntryKind,
    /// Code type of the owning row, normalized.
    pub code_type: CodeType,
    /// Category of the owning row.
    pub category: String,
    /// Matching expression; set for patterns only.
    pub expression: Option<String>,
}

impl AtomicEntry {
    /// Returns true if this entry is a range.
    pub fn is_range(&self) -> bool {
        self.kind == EntryKind::Range
    }

    /// Returns true if this entry is a pattern.
    pub fn is_pattern(&self) -> bool {
        self.kind == EntryKind::Pattern
    }

    /// Returns true if the segment was empty (e.g. from a doubled comma).
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the raw range text for range entries.
    pub fn range_text(&self) -> Option<&str> {
        self.is_range().then_some(self.raw.as_str())
    }
}
