// File System Tests
//
// Tests for path cleaning and the file system implementations.

#[cfg(test)]
mod tests {
    use crate::file_system::testing::MockFileSystem;
    use crate::file_system::*;

    mod clean_path_tests {
        use super::*;

        #[test]
        fn should_collapse_dot_segments() {
            assert_eq!(clean_path("/a/./b//c/../d"), "/a/b/d");
            assert_eq!(clean_path("src/./lib/../main.ts"), "src/main.ts");
        }

        #[test]
        fn should_not_climb_above_root() {
            assert_eq!(clean_path("/../a"), "/a");
            assert_eq!(clean_path("C:\\x\\..\\..\\y"), "C:/y");
        }

        #[test]
        fn should_keep_leading_parent_segments_of_relative_paths() {
            assert_eq!(clean_path("../x/./y"), "../x/y");
            assert_eq!(clean_path("a/../../b"), "../b");
        }

        #[test]
        fn should_detect_absolute_paths() {
            assert!(is_absolute_path("/usr/src/app.ts"));
            assert!(is_absolute_path("C:\\work\\app.ts"));
            assert!(is_absolute_path("d:/work"));
            assert!(!is_absolute_path("app.ts"));
            assert!(!is_absolute_path("webpack:///app.ts"));
        }
    }

    mod mock_file_system_tests {
        use super::*;

        fn fs() -> MockFileSystem {
            MockFileSystem::new_posix()
                .init_with_files(vec![("/real/src/app.ts", "let a = 1;")])
                .with_symlink("/link", "/real")
        }

        #[test]
        fn should_report_files_and_implicit_directories() {
            let fs = fs();
            assert!(fs.exists(&AbsoluteFsPath::new("/real/src/app.ts")));
            assert!(fs.exists(&AbsoluteFsPath::new("/real/src")));
            assert!(fs.is_file(&AbsoluteFsPath::new("/real/src/app.ts")));
            assert!(!fs.is_file(&AbsoluteFsPath::new("/real/src")));
            assert!(!fs.exists(&AbsoluteFsPath::new("/real/lib/app.ts")));
        }

        #[test]
        fn should_follow_symlinks_in_prefixes() {
            let fs = fs();
            let through_link = AbsoluteFsPath::new("/link/src/app.ts");
            assert!(fs.exists(&through_link));
            assert_eq!(fs.read_file(&through_link).unwrap(), "let a = 1;");
            assert_eq!(
                fs.realpath(&through_link).unwrap(),
                AbsoluteFsPath::new("/real/src/app.ts")
            );
        }

        #[test]
        fn should_fail_realpath_for_missing_files() {
            assert!(fs().realpath(&AbsoluteFsPath::new("/nope.ts")).is_err());
        }

        #[test]
        fn should_match_case_insensitively_when_configured() {
            let fs = MockFileSystem::new_case_insensitive()
                .init_with_files(vec![("/Work/App.ts", "")]);
            assert!(!fs.is_case_sensitive());
            assert!(fs.exists(&AbsoluteFsPath::new("/work/app.ts")));
        }

        #[test]
        fn should_compute_dirname() {
            let fs = fs();
            assert_eq!(fs.dirname("/real/src/app.ts"), "/real/src");
            assert_eq!(fs.dirname("/app.ts"), "/");
            assert_eq!(fs.dirname("app.ts"), ".");
        }
    }

    mod local_file_system_tests {
        use super::*;
        use std::fs;

        #[test]
        fn should_probe_real_files() {
            let dir = tempfile::tempdir().unwrap();
            let file = dir.path().join("bundle.js");
            fs::write(&file, "void 0;").unwrap();

            let local = LocalFileSystem::new();
            let path = AbsoluteFsPath::from_path(&file);
            assert!(local.exists(&path));
            assert!(local.is_file(&path));
            assert_eq!(local.read_file(&path).unwrap(), "void 0;");
            assert!(local.realpath(&path).is_ok());

            let missing = AbsoluteFsPath::from_path(dir.path().join("missing.js"));
            assert!(!local.exists(&missing));
            assert!(local.realpath(&missing).is_err());
        }
    }
}
