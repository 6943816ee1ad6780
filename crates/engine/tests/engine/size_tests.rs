use super::*;
use super::fixtures::MockFilesystem;

#[test]
fn sums_regular_files_across_nesting() {
    let mut fs_mock = MockFilesystem::new();
    fs_mock
        .add_dir("/data", &["a.txt", "sub"])
        .add_file("/data/a.txt", 100)
        .add_dir("/data/sub", &["b.txt", "c.txt"])
        .add_file("/data/sub/b.txt", 25)
        .add_file("/data/sub/c.txt", 5);

    let computation = directory_size_bytes(&fs_mock, Path::new("/data"));
    assert_eq!(computation.size_bytes, 130);
    assert!(computation.warnings.is_empty());
}

#[test]
fn skips_dotfiles_and_denylisted_entries() {
    let mut fs_mock = MockFilesystem::new();
    fs_mock
        .add_dir("/data", &[".DS_Store", "DerivedData", "kept.bin"])
        .add_file("/data/.DS_Store", 9_000)
        .add_dir("/data/DerivedData", &["huge.o"])
        .add_file("/data/DerivedData/huge.o", 1_000_000)
        .add_file("/data/kept.bin", 7);

    let computation = directory_size_bytes(&fs_mock, Path::new("/data"));
    assert_eq!(computation.size_bytes, 7);
}

#[test]
fn depth_ceiling_stops_recursion_with_a_warning() {
    let mut fs_mock = MockFilesystem::new();
    let mut current = String::from("/deep");
    // 13 nested levels, one 5-byte file per level. Levels past the
    // ceiling contribute nothing.
    for level in 0..13 {
        let child_dir = format!("{current}/d{level}");
        let file = format!("{current}/f.bin");
        fs_mock.add_dir(current.as_str(), &[format!("d{level}").as_str(), "f.bin"]);
        fs_mock.add_file(file.as_str(), 5);
        current = child_dir;
    }

    let computation = directory_size_bytes(&fs_mock, Path::new("/deep"));
    // Depths 0..=10 are read; the directory at depth 11 is cut off.
    assert_eq!(computation.size_bytes, 55);
    assert!(
        computation
            .warnings
            .iter()
            .any(|warning| warning.code == ScanWarningCode::SizeDepthLimited)
    );
}

#[test]
fn revisited_path_is_skipped_once_with_a_warning() {
    let mut fs_mock = MockFilesystem::new();
    fs_mock
        .add_dir("/loop", &["f.bin"])
        .add_file("/loop/f.bin", 11);

    let mut visited = HashSet::new();
    visited.insert(normalize_path_key("/loop"));
    let mut computation = SizeComputation::default();
    accumulate_directory_size(&fs_mock, Path::new("/loop"), 0, &mut visited, &mut computation);
    accumulate_directory_size(&fs_mock, Path::new("/loop"), 0, &mut visited, &mut computation);

    assert_eq!(computation.size_bytes, 0);
    let cycle_warnings = computation
        .warnings
        .iter()
        .filter(|warning| warning.code == ScanWarningCode::SizeCycleSkipped)
        .count();
    assert_eq!(cycle_warnings, 1);
}

#[cfg(unix)]
#[test]
fn symlink_loop_terminates_on_the_real_filesystem() {
    let dir = super::fixtures::unique_temp_dir("symloop");
    fs::write(dir.join("f.bin"), b"abc").unwrap();
    std::os::unix::fs::symlink(&dir, dir.join("back")).unwrap();

    let computation = directory_size_bytes(&NativeFilesystem, dir.as_path());
    // The loop unrolls as ever-longer paths until the depth ceiling,
    // counting the 3-byte file once per level.
    assert_eq!(computation.size_bytes, 33);
    assert!(
        computation
            .warnings
            .iter()
            .any(|warning| warning.code == ScanWarningCode::SizeDepthLimited)
    );

    fs::remove_file(dir.join("back")).unwrap();
    fs::remove_dir_all(&dir).unwrap();
}
