use source_map_lookup::decoder::SourceMapDecoder;
use source_map_lookup::file_system::testing::MockFileSystem;
use source_map_lookup::file_system::{AbsoluteFsPath, LocalFileSystem, ReadonlyFileSystem};
use source_map_lookup::{CanonicalUrl, SourceMap};

const BASE: &str = "http://localhost:4200/main.js.map";

fn decode_with(fs: &dyn ReadonlyFileSystem, base: Option<&str>, sources: &[&str]) -> SourceMap {
    let text = serde_json::json!({
        "version": 3,
        "sources": sources,
        "mappings": "AAAA;AACA",
    })
    .to_string();
    let mut decoder = SourceMapDecoder::new(fs);
    if let Some(base) = base {
        decoder = decoder.with_base_url(CanonicalUrl::parse(base), true);
    }
    decoder.decode(&text).unwrap().expect("map should not be empty")
}

fn find_file(map: &SourceMap, fs: &dyn ReadonlyFileSystem, file: &str) -> Option<usize> {
    let file = AbsoluteFsPath::new(file);
    map.source_resolver()
        .find_mappings(&[], map, Some(&file), fs)
        .map(|mappings| mappings.len())
}

#[test]
fn should_find_mappings_by_url() {
    let fs = MockFileSystem::new_posix();
    let map = decode_with(&fs, None, &["webpack:///src/app.ts"]);
    let urls = [
        CanonicalUrl::parse("webpack:///src/other.ts"),
        CanonicalUrl::parse("webpack:///src/app.ts?v=2"),
    ];
    let mappings = map.source_resolver().find_mappings(&urls, &map, None, &fs);
    assert_eq!(mappings.map(|m| m.len()), Some(2));
}

#[test]
fn should_find_sources_declared_with_query() {
    let fs = MockFileSystem::new_posix();
    let map = decode_with(&fs, None, &["webpack:///./src/App.vue?5a74"]);
    let resolver = map.source_resolver();
    let exact = CanonicalUrl::parse("webpack:///./src/App.vue?5a74");
    let bare = CanonicalUrl::parse("webpack:///./src/App.vue");

    assert_eq!(resolver.canonicalized_sources(), &[exact.clone()]);
    assert_eq!(resolver.source_index(&exact), Some(0));
    assert_eq!(resolver.source_index(&bare), Some(0));

    let by_exact = resolver.find_mappings(&[exact.clone()], &map, None, &fs);
    assert_eq!(by_exact.map(|m| m.len()), Some(2));
    let by_bare = resolver.find_mappings(&[bare], &map, None, &fs);
    assert_eq!(by_bare.map(|m| m.len()), Some(2));

    assert!(map
        .find_first_entry_in_source_line(&[exact], 0, None, &fs)
        .is_some());
}

#[test]
fn should_resolve_relative_sources_against_remote_base() {
    let fs = MockFileSystem::new_posix();
    let map = decode_with(&fs, Some(BASE), &["src/app.ts"]);
    let url = CanonicalUrl::parse("http://localhost:4200/src/app.ts");
    assert_eq!(map.source_resolver().canonicalized_sources(), &[url.clone()]);
    assert!(map
        .source_resolver()
        .find_mappings(&[url], &map, None, &fs)
        .is_some());
}

#[test]
fn should_find_build_machine_paths_by_local_file() {
    let fs = MockFileSystem::new_posix().init_with_files(vec![("/build/app.ts", "")]);
    let map = decode_with(&fs, Some(BASE), &["/build/app.ts"]);

    assert_eq!(
        map.source_resolver().canonicalized_sources(),
        &[CanonicalUrl::local_file("/build/app.ts")]
    );
    assert_eq!(find_file(&map, &fs, "/build/app.ts"), Some(2));
}

#[test]
fn should_find_mappings_through_symlinked_path() {
    let fs = MockFileSystem::new_posix()
        .init_with_files(vec![("/build/real/app.ts", "")])
        .with_symlink("/build/link", "/build/real");
    let map = decode_with(&fs, Some(BASE), &["/build/real/app.ts"]);

    assert_eq!(find_file(&map, &fs, "/build/link/app.ts"), Some(2));
}

#[test]
fn should_find_symlinked_source_by_its_real_path() {
    let fs = MockFileSystem::new_posix()
        .init_with_files(vec![("/build/real/app.ts", "")])
        .with_symlink("/build/link", "/build/real");
    let map = decode_with(&fs, Some(BASE), &["/build/link/app.ts"]);

    assert_eq!(find_file(&map, &fs, "/build/real/app.ts"), Some(2));
}

#[test]
fn should_scan_case_insensitively_on_case_insensitive_file_systems() {
    let fs = MockFileSystem::new_case_insensitive();
    let map = decode_with(&fs, None, &["/Work/App.ts"]);
    assert_eq!(find_file(&map, &fs, "/work/app.ts"), Some(2));

    let posix = MockFileSystem::new_posix();
    let map = decode_with(&posix, None, &["/Work/App.ts"]);
    assert_eq!(find_file(&map, &posix, "/work/app.ts"), None);
}

#[test]
fn should_return_none_for_unknown_sources() {
    let fs = MockFileSystem::new_posix();
    let map = decode_with(&fs, None, &["a.ts"]);
    let urls = [CanonicalUrl::parse("http://elsewhere/a.ts")];
    assert!(map
        .source_resolver()
        .find_mappings(&urls, &map, None, &fs)
        .is_none());
    assert_eq!(find_file(&map, &fs, "/nowhere/a.ts"), None);
}

#[test]
fn should_map_entries_back_to_their_sources() {
    let fs = MockFileSystem::new_posix().init_with_files(vec![("/build/app.ts", "")]);
    let map = decode_with(&fs, Some(BASE), &["/build/app.ts"]);
    let entry = map.generated_mappings().entries()[0];
    let resolver = map.source_resolver();

    assert_eq!(resolver.raw_source(&entry), Some("/build/app.ts"));
    assert_eq!(resolver.local_file_path(&entry), Some("/build/app.ts"));
    assert_eq!(resolver.source_url(&entry), Some(&CanonicalUrl::local_file("/build/app.ts")));
}

mod local_file_system_tests {
    use super::*;
    use std::fs;

    #[test]
    fn should_register_existing_absolute_paths() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("src").join("app.ts");
        fs::create_dir_all(source.parent().unwrap()).unwrap();
        fs::write(&source, "export const a = 1;\n").unwrap();

        let file = AbsoluteFsPath::from_path(&source);
        let local = LocalFileSystem::new();
        let map = decode_with(&local, Some(BASE), &[file.as_str()]);

        assert!(map.source_resolver().canonicalized_sources()[0].is_local_file());
        assert_eq!(find_file(&map, &local, file.as_str()), Some(2));
    }

    #[cfg(unix)]
    #[test]
    fn should_follow_real_symlinks() {
        let dir = tempfile::tempdir().unwrap();
        let real_dir = dir.path().join("real");
        fs::create_dir_all(&real_dir).unwrap();
        fs::write(real_dir.join("app.ts"), "").unwrap();
        std::os::unix::fs::symlink(&real_dir, dir.path().join("link")).unwrap();

        let local = LocalFileSystem::new();
        let real_file = local
            .realpath(&AbsoluteFsPath::from_path(real_dir.join("app.ts")))
            .unwrap();
        let map = decode_with(&local, Some(BASE), &[real_file.as_str()]);

        let linked = AbsoluteFsPath::from_path(dir.path().join("link").join("app.ts"));
        assert_eq!(find_file(&map, &local, linked.as_str()), Some(2));
    }
}
