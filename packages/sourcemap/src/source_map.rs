//! Source Map Module
//!
//! The decoded, immutable aggregate and its positional lookups.

use crate::file_system::{AbsoluteFsPath, ReadonlyFileSystem};
use crate::mapping::{MappingEntry, MappingList};
use crate::resolver::{CanonicalUrl, SourceResolver};

/// A decoded version 3 source map.
///
/// Immutable once built, so it can be shared read-only across threads.
#[derive(Debug, Clone)]
pub struct SourceMap {
    out_file: Option<String>,
    mappings: MappingList,
    source_index_to_mappings: Vec<Option<MappingList>>,
    names: Vec<String>,
    source_resolver: SourceResolver,
}

impl SourceMap {
    pub(crate) fn new(
        out_file: Option<String>,
        mappings: MappingList,
        source_index_to_mappings: Vec<Option<MappingList>>,
        names: Vec<String>,
        source_resolver: SourceResolver,
    ) -> Self {
        debug_assert_eq!(source_index_to_mappings.len(), source_resolver.len());
        SourceMap {
            out_file,
            mappings,
            source_index_to_mappings,
            names,
            source_resolver,
        }
    }

    /// Declared output file name.
    pub fn out_file(&self) -> Option<&str> {
        self.out_file.as_deref()
    }

    /// All entries, ordered by generated position.
    pub fn generated_mappings(&self) -> &MappingList {
        &self.mappings
    }

    pub fn source_resolver(&self) -> &SourceResolver {
        &self.source_resolver
    }

    pub fn sources_count(&self) -> usize {
        self.source_index_to_mappings.len()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn name_of(&self, entry: &MappingEntry) -> Option<&str> {
        self.names
            .get(entry.name_index()? as usize)
            .map(String::as_str)
    }

    /// Entries of one source ordered by original position; `None` when no
    /// entry references that source.
    pub fn mappings_for_source(&self, source_index: usize) -> Option<&MappingList> {
        self.source_index_to_mappings.get(source_index)?.as_ref()
    }

    pub fn source_index_to_mappings(&self) -> &[Option<MappingList>] {
        &self.source_index_to_mappings
    }

    /// Index of the last entry at or before the generated position, i.e. the
    /// mapping in effect there. Positions before the first entry clamp to 0.
    pub fn find_entry_index(&self, generated_line: u32, generated_column: u32) -> usize {
        let target = (generated_line, generated_column);
        self.mappings
            .entries()
            .partition_point(|entry| (entry.generated_line(), entry.generated_column()) <= target)
            .saturating_sub(1)
    }

    /// Entry form of [`SourceMap::find_entry_index`].
    pub fn entry_at(&self, generated_line: u32, generated_column: u32) -> Option<&MappingEntry> {
        self.mappings
            .get_by_index(self.find_entry_index(generated_line, generated_column))
    }

    /// First entry, in original-position order, on `source_line` of the
    /// source named by `source_urls` or `source_file`.
    pub fn find_first_entry_in_source_line(
        &self,
        source_urls: &[CanonicalUrl],
        source_line: u32,
        source_file: Option<&AbsoluteFsPath>,
        fs: &dyn ReadonlyFileSystem,
    ) -> Option<&MappingEntry> {
        let mappings = self
            .source_resolver
            .find_mappings(source_urls, self, source_file, fs)?;
        let index = mappings.first_index_in_line(source_line)?;
        mappings.get_by_index(index)
    }

    /// Visit every entry on `source_line` of a source in original-position
    /// order. Returns false when the source or the line is unknown.
    pub fn process_source_mappings_in_line<F>(
        &self,
        source_urls: &[CanonicalUrl],
        source_line: u32,
        source_file: Option<&AbsoluteFsPath>,
        fs: &dyn ReadonlyFileSystem,
        visit: F,
    ) -> bool
    where
        F: FnMut(&MappingEntry) -> bool,
    {
        self.source_resolver
            .find_mappings(source_urls, self, source_file, fs)
            .is_some_and(|mappings| mappings.process_mappings_in_line(source_line, visit))
    }
}
