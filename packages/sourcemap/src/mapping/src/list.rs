// Mapping List
//
// Sorted mapping entries plus the ordering they are sorted by.

use std::cmp::Ordering;

use super::entry::MappingEntry;
use crate::document::LineOffsets;

/// Which coordinates a [`MappingList`] is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MappingOrder {
    /// Generated `(line, column)`.
    Generated,
    /// Original `(line, column)`. Only mapped entries are ever ordered this way.
    Source,
}

impl MappingOrder {
    pub fn line(self, entry: &MappingEntry) -> u32 {
        match self {
            MappingOrder::Generated => entry.generated_line(),
            MappingOrder::Source => entry.source_line().unwrap_or_default(),
        }
    }

    pub fn column(self, entry: &MappingEntry) -> u32 {
        match self {
            MappingOrder::Generated => entry.generated_column(),
            MappingOrder::Source => entry.source_column().unwrap_or_default(),
        }
    }

    pub fn key(self, entry: &MappingEntry) -> (u32, u32) {
        (self.line(entry), self.column(entry))
    }

    pub fn compare(self, a: &MappingEntry, b: &MappingEntry) -> Ordering {
        self.key(a).cmp(&self.key(b))
    }
}

/// Ordered, indexable collection of mapping entries.
///
/// The backing vector is always sorted by the list's own [`MappingOrder`];
/// every query below relies on that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingList {
    entries: Vec<MappingEntry>,
    order: MappingOrder,
}

impl MappingList {
    /// Wrap entries that are already sorted by `order`.
    pub fn new(entries: Vec<MappingEntry>, order: MappingOrder) -> Self {
        debug_assert!(entries
            .windows(2)
            .all(|pair| order.compare(&pair[0], &pair[1]) != Ordering::Greater));
        Self { entries, order }
    }

    /// Entries in decode order, which is ascending generated position.
    pub fn by_generated(entries: Vec<MappingEntry>) -> Self {
        Self::new(entries, MappingOrder::Generated)
    }

    /// Sort mapped entries by original position. The sort is stable, so
    /// entries sharing an original position keep their generated order.
    pub fn by_source(mut entries: Vec<MappingEntry>) -> Self {
        entries.retain(MappingEntry::is_mapped);
        entries.sort_by(|a, b| MappingOrder::Source.compare(a, b));
        Self {
            entries,
            order: MappingOrder::Source,
        }
    }

    pub fn order(&self) -> MappingOrder {
        self.order
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get_by_index(&self, index: usize) -> Option<&MappingEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MappingEntry> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }

    fn line(&self, entry: &MappingEntry) -> u32 {
        self.order.line(entry)
    }

    fn column(&self, entry: &MappingEntry) -> u32 {
        self.order.column(entry)
    }

    /// Walk back over entries sharing the key of `index`.
    fn first_with_same_key(&self, mut index: usize) -> usize {
        let key = self.order.key(&self.entries[index]);
        while index > 0 && self.order.key(&self.entries[index - 1]) == key {
            index -= 1;
        }
        index
    }

    /// Index of the entry covering `(line, column)`.
    ///
    /// An exact key hit returns the first entry with that key. Otherwise an
    /// entry on the same line covers the column when it starts at or before
    /// it and is either immediately followed by a later column or is the last
    /// entry on the line. A covering entry is returned as found, so among
    /// entries sharing its key that is the last one.
    pub fn index_of(&self, line: u32, column: u32) -> Option<usize> {
        let first = self.entries.first()?;
        let last = self.entries.last()?;
        if self.line(first) > line || self.line(last) < line {
            return None;
        }

        let mut low = 0usize;
        let mut high = self.entries.len() - 1;
        while low <= high {
            let middle = low + (high - low) / 2;
            let mapping = &self.entries[middle];
            let mapping_line = self.line(mapping);

            match line.cmp(&mapping_line) {
                Ordering::Equal => {
                    let mapping_column = self.column(mapping);
                    match column.cmp(&mapping_column) {
                        Ordering::Equal => return Some(self.first_with_same_key(middle)),
                        Ordering::Less => {
                            if middle == 0 {
                                return None;
                            }
                            let previous = &self.entries[middle - 1];
                            if self.line(previous) == line && self.column(previous) <= column {
                                return Some(middle - 1);
                            }
                            high = middle - 1;
                        }
                        Ordering::Greater => {
                            if self.get_next_on_same_line(middle, false).is_none() {
                                return Some(middle);
                            }
                            low = middle + 1;
                        }
                    }
                }
                Ordering::Greater => low = middle + 1,
                Ordering::Less => {
                    if middle == 0 {
                        return None;
                    }
                    high = middle - 1;
                }
            }
        }
        None
    }

    pub fn get(&self, line: u32, column: u32) -> Option<&MappingEntry> {
        self.index_of(line, column).map(|index| &self.entries[index])
    }

    pub fn get_next(&self, index: usize) -> Option<&MappingEntry> {
        self.entries.get(index.checked_add(1)?)
    }

    /// The entry after `index` if it is on the same line.
    ///
    /// With `skip_if_column_equal`, entries that share the column of `index`
    /// are stepped over first; several generated segments can point at one
    /// original position.
    pub fn get_next_on_same_line(
        &self,
        index: usize,
        skip_if_column_equal: bool,
    ) -> Option<&MappingEntry> {
        let original = self.entries.get(index)?;
        let line = self.line(original);
        let column = self.column(original);

        let mut next_index = index + 1;
        let mut next = self.entries.get(next_index)?;
        if self.line(next) != line {
            return None;
        }

        if skip_if_column_equal {
            while self.column(next) == column {
                next_index += 1;
                next = self.entries.get(next_index)?;
                if self.line(next) != line {
                    return None;
                }
            }
        }
        Some(next)
    }

    /// Offset in the document where the text covered by `entry` ends: the
    /// start of the next mapping on the same line, or the end of the line.
    pub fn end_offset(
        &self,
        entry: &MappingEntry,
        line_start_offset: usize,
        document: &dyn LineOffsets,
    ) -> usize {
        let key = self.order.key(entry);
        let upper = self
            .entries
            .partition_point(|candidate| self.order.key(candidate) <= key);

        let next = upper
            .checked_sub(1)
            .filter(|&index| self.order.key(&self.entries[index]) == key)
            .and_then(|index| self.get_next_on_same_line(index, false));

        match next {
            Some(next) => line_start_offset + self.column(next) as usize,
            None => document.line_end_offset(self.line(entry)),
        }
    }

    /// Index of the first entry on `line`.
    pub fn first_index_in_line(&self, line: u32) -> Option<usize> {
        let index = self
            .entries
            .partition_point(|candidate| self.line(candidate) < line);
        self.entries
            .get(index)
            .filter(|entry| self.line(entry) == line)
            .map(|_| index)
    }

    /// Visit the entries on `line` in list order until `visit` returns false.
    ///
    /// Returns whether the line has any entries at all.
    pub fn process_mappings_in_line<F>(&self, line: u32, mut visit: F) -> bool
    where
        F: FnMut(&MappingEntry) -> bool,
    {
        let Some(first) = self.first_index_in_line(line) else {
            return false;
        };

        for entry in self.entries[first..]
            .iter()
            .take_while(|entry| self.line(entry) == line)
        {
            if !visit(entry) {
                break;
            }
        }
        true
    }
}

impl<'a> IntoIterator for &'a MappingList {
    type Item = &'a MappingEntry;
    type IntoIter = std::slice::Iter<'a, MappingEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
