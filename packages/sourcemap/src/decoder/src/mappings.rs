// Mappings Decoder
//
// Folds the VLQ token stream of the `mappings` field into entries. Every
// field except the generated line is a delta against a running value that
// persists across segments and lines; only the generated column resets, on
// `;`.

use smallvec::SmallVec;

use super::errors::DecodeError;
use crate::mapping::{MappedSource, MappingEntry, MappingOrder};
use crate::vlq::{self, VlqCursor};

/// Largest number of fields in one segment.
const MAX_SEGMENT_FIELDS: usize = 5;

/// Decoded entries in generated order plus, per source index, the entries
/// that reference it (still in generated order).
#[derive(Debug, Clone, Default)]
pub struct DecodedMappings {
    pub entries: Vec<MappingEntry>,
    pub by_source: Vec<Vec<MappingEntry>>,
    /// Segments were not in ascending generated order and had to be sorted.
    pub reordered: bool,
}

/// Running values carried from one segment to the next.
#[derive(Debug, Default)]
struct Accumulator {
    generated_line: u32,
    generated_column: i64,
    source_index: i64,
    source_line: i64,
    source_column: i64,
    name_index: i64,
}

fn to_u32(value: i64, field: &str, line: u32) -> Result<u32, DecodeError> {
    u32::try_from(value).map_err(|_| {
        DecodeError::malformed(format!(
            "{} {} out of range on generated line {}",
            field, value, line
        ))
    })
}

fn read_segment(cursor: &mut VlqCursor<'_>, line: u32) -> Result<SmallVec<[i32; 5]>, DecodeError> {
    let mut fields = SmallVec::new();
    loop {
        fields.push(vlq::decode(cursor)?);
        if cursor.at_separator() {
            return Ok(fields);
        }
        if fields.len() == MAX_SEGMENT_FIELDS {
            return Err(DecodeError::malformed(format!(
                "segment with more than {} fields on generated line {}",
                MAX_SEGMENT_FIELDS, line
            )));
        }
    }
}

/// Decode a non-empty `mappings` value.
pub fn decode_mappings(
    text: &str,
    sources_count: usize,
    names_count: usize,
) -> Result<DecodedMappings, DecodeError> {
    let mut decoded = DecodedMappings {
        entries: Vec::new(),
        by_source: vec![Vec::new(); sources_count],
        reordered: false,
    };
    let mut acc = Accumulator::default();
    let mut in_order = true;
    let mut cursor = VlqCursor::new(text);

    'segments: while cursor.has_next() {
        if cursor.peek() == Some(b',') {
            cursor.next_byte();
        } else {
            while cursor.peek() == Some(b';') {
                acc.generated_line += 1;
                acc.generated_column = 0;
                cursor.next_byte();
                if !cursor.has_next() {
                    break 'segments;
                }
            }
        }

        let line = acc.generated_line;
        let fields = read_segment(&mut cursor, line)?;

        acc.generated_column += fields[0] as i64;
        let column = to_u32(acc.generated_column, "generated column", line)?;

        let entry = match fields.len() {
            1 => MappingEntry::unmapped(line, column),
            4 | 5 => {
                acc.source_index += fields[1] as i64;
                acc.source_line += fields[2] as i64;
                acc.source_column += fields[3] as i64;

                let index = to_u32(acc.source_index, "source index", line)?;
                if index as usize >= sources_count {
                    return Err(DecodeError::malformed(format!(
                        "source index {} out of range ({} sources) on generated line {}",
                        index, sources_count, line
                    )));
                }
                let source = MappedSource::new(
                    index,
                    to_u32(acc.source_line, "source line", line)?,
                    to_u32(acc.source_column, "source column", line)?,
                );

                if fields.len() == 5 {
                    acc.name_index += fields[4] as i64;
                    let name = to_u32(acc.name_index, "name index", line)?;
                    if name as usize >= names_count {
                        return Err(DecodeError::malformed(format!(
                            "name index {} out of range ({} names) on generated line {}",
                            name, names_count, line
                        )));
                    }
                    MappingEntry::named(line, column, source, name)
                } else {
                    MappingEntry::mapped(line, column, source)
                }
            }
            count => {
                return Err(DecodeError::malformed(format!(
                    "segment with {} fields on generated line {}",
                    count, line
                )))
            }
        };

        if let Some(previous) = decoded.entries.last() {
            in_order &= MappingOrder::Generated.compare(previous, &entry).is_le();
        }
        if let Some(index) = entry.source_index() {
            decoded.by_source[index as usize].push(entry);
        }
        decoded.entries.push(entry);
    }

    if !in_order {
        decoded.reordered = true;
        decoded
            .entries
            .sort_by(|a, b| MappingOrder::Generated.compare(a, b));
    }
    Ok(decoded)
}
