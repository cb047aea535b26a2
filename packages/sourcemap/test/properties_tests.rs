use proptest::prelude::*;
use source_map_lookup::vlq::{self, encode_vlq, VlqCursor};
use source_map_lookup::{decode, MappedSource, MappingEntry, MappingOrder, SourceMap};

const SOURCES: u32 = 3;
const NAMES: u32 = 4;

fn segment() -> impl Strategy<Value = MappingEntry> {
    (
        0u32..20,
        0u32..120,
        prop::option::of((0..SOURCES, 0u32..60, 0u32..80, prop::option::of(0..NAMES))),
    )
        .prop_map(|(line, column, mapped)| match mapped {
            None => MappingEntry::unmapped(line, column),
            Some((index, src_line, src_column, None)) => {
                MappingEntry::mapped(line, column, MappedSource::new(index, src_line, src_column))
            }
            Some((index, src_line, src_column, Some(name))) => MappingEntry::named(
                line,
                column,
                MappedSource::new(index, src_line, src_column),
                name,
            ),
        })
}

fn sorted_segments() -> impl Strategy<Value = Vec<MappingEntry>> {
    prop::collection::vec(segment(), 1..80).prop_map(|mut entries| {
        entries.sort_by(|a, b| MappingOrder::Generated.compare(a, b));
        entries
    })
}

fn delta(value: u32, previous: &mut i64) -> String {
    let encoded = encode_vlq((value as i64 - *previous) as i32);
    *previous = value as i64;
    encoded
}

/// Encode entries (in generated order) as a `mappings` string.
fn encode_mappings(entries: &[MappingEntry]) -> String {
    let mut out = String::new();
    let mut line = 0;
    let mut first_in_line = true;
    let (mut column, mut index, mut src_line, mut src_column, mut name) = (0, 0, 0, 0, 0);

    for entry in entries {
        while line < entry.generated_line() {
            out.push(';');
            line += 1;
            column = 0;
            first_in_line = true;
        }
        if !first_in_line {
            out.push(',');
        }
        first_in_line = false;

        out.push_str(&delta(entry.generated_column(), &mut column));
        if let Some(source) = entry.source() {
            out.push_str(&delta(source.index, &mut index));
            out.push_str(&delta(source.line, &mut src_line));
            out.push_str(&delta(source.column, &mut src_column));
            if let Some(name_index) = entry.name_index() {
                out.push_str(&delta(name_index, &mut name));
            }
        }
    }
    out
}

fn decode_entries(entries: &[MappingEntry]) -> SourceMap {
    let text = serde_json::json!({
        "version": 3,
        "sources": ["a.ts", "b.ts", "c.ts"],
        "names": ["w", "x", "y", "z"],
        "mappings": encode_mappings(entries),
    })
    .to_string();
    decode(&text).unwrap().expect("at least one segment")
}

proptest! {
    #[test]
    fn vlq_round_trips_any_i32(value in any::<i32>()) {
        let encoded = encode_vlq(value);
        let mut cursor = VlqCursor::new(&encoded);
        prop_assert_eq!(vlq::decode(&mut cursor), Ok(value));
        prop_assert!(!cursor.has_next());
    }

    #[test]
    fn decoded_entries_match_encoded(entries in sorted_segments()) {
        let map = decode_entries(&entries);
        prop_assert_eq!(map.generated_mappings().entries(), entries.as_slice());
    }

    #[test]
    fn lists_are_sorted_by_their_order(entries in sorted_segments()) {
        let map = decode_entries(&entries);
        let generated = map.generated_mappings();
        prop_assert!(generated
            .entries()
            .windows(2)
            .all(|pair| MappingOrder::Generated.compare(&pair[0], &pair[1]).is_le()));

        for (index, list) in map.source_index_to_mappings().iter().enumerate() {
            let Some(list) = list else { continue };
            prop_assert!(!list.is_empty());
            prop_assert!(list.iter().all(|e| e.source_index() == Some(index as u32)));
            prop_assert!(list
                .entries()
                .windows(2)
                .all(|pair| MappingOrder::Source.compare(&pair[0], &pair[1]).is_le()));
        }
    }

    #[test]
    fn reverse_lists_partition_mapped_entries(entries in sorted_segments()) {
        let map = decode_entries(&entries);
        let mapped = entries.iter().filter(|e| e.is_mapped()).count();
        let in_lists: usize = map
            .source_index_to_mappings()
            .iter()
            .flatten()
            .map(|list| list.len())
            .sum();
        prop_assert_eq!(in_lists, mapped);
    }

    #[test]
    fn source_fields_are_all_or_nothing(entries in sorted_segments()) {
        let map = decode_entries(&entries);
        for entry in map.generated_mappings() {
            let fields = [entry.source_index(), entry.source_line(), entry.source_column()];
            prop_assert!(fields.iter().all(Option::is_some) || fields.iter().all(Option::is_none));
            if entry.is_named() {
                prop_assert!(entry.is_mapped());
            }
        }
    }

    #[test]
    fn get_finds_every_entry_key(entries in sorted_segments()) {
        let map = decode_entries(&entries);
        let lists = std::iter::once(map.generated_mappings())
            .chain(map.source_index_to_mappings().iter().flatten());
        for list in lists {
            let order = list.order();
            for entry in list {
                let (line, column) = order.key(entry);
                let found = list.get(line, column);
                prop_assert_eq!(found.map(|e| order.key(e)), Some((line, column)));
            }
        }
    }

    #[test]
    fn find_entry_index_brackets_position(
        entries in sorted_segments(),
        line in 0u32..22,
        column in 0u32..130,
    ) {
        let map = decode_entries(&entries);
        let list = map.generated_mappings().entries();
        let index = map.find_entry_index(line, column);
        let key = |e: &MappingEntry| (e.generated_line(), e.generated_column());
        let target = (line, column);

        prop_assert!(index < list.len());
        if key(&list[index]) <= target {
            prop_assert!(list.get(index + 1).map_or(true, |next| key(next) > target));
        } else {
            prop_assert_eq!(index, 0);
        }
    }

    #[test]
    fn decoding_is_deterministic(entries in sorted_segments()) {
        let first = decode_entries(&entries);
        let second = decode_entries(&entries);
        prop_assert_eq!(first.generated_mappings(), second.generated_mappings());
        prop_assert_eq!(first.source_index_to_mappings(), second.source_index_to_mappings());
    }
}
