// Mapping Entry
//
// One decoded segment of the `mappings` field.

use std::fmt;

/// Position in an original source file that a generated position maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MappedSource {
    /// Index into the map's `sources` list.
    pub index: u32,
    /// Line number (0-indexed).
    pub line: u32,
    /// Column number (0-indexed).
    pub column: u32,
}

impl MappedSource {
    pub fn new(index: u32, line: u32, column: u32) -> Self {
        Self {
            index,
            line,
            column,
        }
    }
}

/// Immutable record of one mapping.
///
/// An entry is either unmapped (a generated position with no original
/// location), mapped, or mapped and named. A name can only be attached to a
/// mapped entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MappingEntry {
    generated_line: u32,
    generated_column: u32,
    source: Option<MappedSource>,
    name_index: Option<u32>,
}

impl MappingEntry {
    pub fn unmapped(generated_line: u32, generated_column: u32) -> Self {
        Self {
            generated_line,
            generated_column,
            source: None,
            name_index: None,
        }
    }

    pub fn mapped(generated_line: u32, generated_column: u32, source: MappedSource) -> Self {
        Self {
            generated_line,
            generated_column,
            source: Some(source),
            name_index: None,
        }
    }

    pub fn named(
        generated_line: u32,
        generated_column: u32,
        source: MappedSource,
        name_index: u32,
    ) -> Self {
        Self {
            generated_line,
            generated_column,
            source: Some(source),
            name_index: Some(name_index),
        }
    }

    pub fn generated_line(&self) -> u32 {
        self.generated_line
    }

    pub fn generated_column(&self) -> u32 {
        self.generated_column
    }

    pub fn source(&self) -> Option<MappedSource> {
        self.source
    }

    pub fn source_index(&self) -> Option<u32> {
        self.source.map(|s| s.index)
    }

    pub fn source_line(&self) -> Option<u32> {
        self.source.map(|s| s.line)
    }

    pub fn source_column(&self) -> Option<u32> {
        self.source.map(|s| s.column)
    }

    /// Index into the map's `names` list.
    pub fn name_index(&self) -> Option<u32> {
        self.name_index
    }

    pub fn is_mapped(&self) -> bool {
        self.source.is_some()
    }

    pub fn is_named(&self) -> bool {
        self.name_index.is_some()
    }
}

impl fmt::Display for MappingEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.generated_line, self.generated_column)?;
        if let Some(source) = self.source {
            write!(f, " -> #{}:{}:{}", source.index, source.line, source.column)?;
        }
        if let Some(name) = self.name_index {
            write!(f, " (name #{})", name)?;
        }
        Ok(())
    }
}
