use super::*;
use super::fixtures::MockFilesystem;

const INFO_PLIST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<plist version="1.0">
<dict>
    <key>CFBundleShortVersionString</key>
    <string>1.2.3</string>
    <key>CFBundleVersion</key>
    <string>456</string>
</dict>
</plist>"#;

fn applications_root() -> MockFilesystem {
    let mut fs_mock = MockFilesystem::new();
    fs_mock.add_dir(
        "/Applications",
        &["Zeta.app", "alpha.app", "Beta.app", "notes.txt", "Fake.app"],
    );
    for bundle in ["Zeta.app", "alpha.app", "Beta.app"] {
        fs_mock.add_dir(format!("/Applications/{bundle}").as_str(), &[]);
    }
    // A regular file with a bundle-looking name.
    fs_mock.add_file("/Applications/Fake.app", 12);
    fs_mock
}

#[test]
fn finds_bundles_and_sorts_case_insensitively() {
    let fs_mock = applications_root();
    let apps = discover_applications(&fs_mock, &[PathBuf::from("/Applications")]);
    let names: Vec<&str> = apps.iter().map(|app| app.name.as_str()).collect();
    assert_eq!(names, vec!["alpha", "Beta", "Zeta"]);
}

#[test]
fn regular_files_named_like_bundles_are_ignored() {
    let fs_mock = applications_root();
    let apps = discover_applications(&fs_mock, &[PathBuf::from("/Applications")]);
    assert!(apps.iter().all(|app| app.name != "Fake"));
}

#[test]
fn version_comes_from_the_bundle_plist() {
    let mut fs_mock = applications_root();
    fs_mock.set_file_text(
        "/Applications/alpha.app/Contents/Info.plist",
        INFO_PLIST,
    );

    let apps = discover_applications(&fs_mock, &[PathBuf::from("/Applications")]);
    let alpha = apps.iter().find(|app| app.name == "alpha").unwrap();
    assert_eq!(alpha.version.as_deref(), Some("1.2.3"));
    let beta = apps.iter().find(|app| app.name == "Beta").unwrap();
    assert_eq!(beta.version, None);
}

#[test]
fn short_version_falls_back_to_bundle_version() {
    let content = r#"<dict>
    <key>CFBundleVersion</key>
    <string>999</string>
</dict>"#;
    let mut fs_mock = MockFilesystem::new();
    fs_mock.set_file_text("/Applications/X.app/Contents/Info.plist", content);
    let version = resolve_bundle_version(&fs_mock, Path::new("/Applications/X.app"));
    assert_eq!(version.as_deref(), Some("999"));
}

#[test]
fn plist_value_tolerates_whitespace_between_tags() {
    let content = "<key>CFBundleShortVersionString</key>\n        <string> 7.0 </string>";
    assert_eq!(
        plist_value(content, "CFBundleShortVersionString").as_deref(),
        Some("7.0")
    );
    assert_eq!(plist_value(content, "CFBundleVersion"), None);
}

#[test]
fn platform_size_query_wins_over_the_walker() {
    let mut fs_mock = applications_root();
    fs_mock.set_subtree_size("/Applications/alpha.app", 4_096);
    fs_mock.add_dir("/Applications/alpha.app", &["big.bin"]);
    fs_mock.add_file("/Applications/alpha.app/big.bin", 1);

    let apps = discover_applications(&fs_mock, &[PathBuf::from("/Applications")]);
    let alpha = apps.iter().find(|app| app.name == "alpha").unwrap();
    assert_eq!(alpha.size_bytes, 4_096);
}

#[test]
fn repeated_roots_deduplicate_by_path() {
    let fs_mock = applications_root();
    let root = PathBuf::from("/Applications");
    let apps = discover_applications(&fs_mock, &[root.clone(), root]);
    assert_eq!(apps.len(), 3);
}

#[test]
fn unreadable_root_contributes_nothing() {
    let mut fs_mock = applications_root();
    fs_mock.deny("/Applications");
    let apps = discover_applications(&fs_mock, &[PathBuf::from("/Applications")]);
    assert!(apps.is_empty());
}

#[test]
fn default_roots_start_with_the_global_directory() {
    let roots = default_application_roots();
    assert_eq!(roots[0], PathBuf::from("/Applications"));
}
