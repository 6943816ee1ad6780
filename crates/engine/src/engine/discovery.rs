use super::*;

const BUNDLE_SUFFIX: &str = ".app";

/// The global applications directory, then the per-user one.
pub fn default_application_roots() -> Vec<PathBuf> {
    let mut roots = vec![PathBuf::from("/Applications")];
    if let Some(home) = home_dir() {
        roots.push(home.join("Applications"));
    }
    roots
}

/// Scans every root in sequence for application bundles and returns
/// the catalog sorted by name. An unreadable root contributes nothing;
/// it never fails the scan.
pub fn discover_applications(port: &dyn FilesystemPort, roots: &[PathBuf]) -> Vec<ApplicationDto> {
    let mut items = Vec::new();
    let mut seen = HashSet::new();
    for root in roots {
        scan_application_root(port, root.as_path(), &mut seen, &mut items);
    }
    items.sort_by(|left, right| compare_app_names(left.name.as_str(), right.name.as_str()));
    items
}

fn scan_application_root(
    port: &dyn FilesystemPort,
    root: &Path,
    seen: &mut HashSet<String>,
    items: &mut Vec<ApplicationDto>,
) {
    if !port.check_access(root) {
        tracing::debug!(event = "discovery_root_unreadable", root = %root.display());
        return;
    }
    for entry in port.read_directory(root) {
        if !entry.to_lowercase().ends_with(BUNDLE_SUFFIX) {
            continue;
        }
        let path = root.join(entry.as_str());
        // A regular file incidentally named *.app is not a bundle.
        if !port.stat(path.as_path()).is_directory {
            continue;
        }
        let path_key = normalize_path_key(path.to_string_lossy().as_ref());
        if !seen.insert(path_key) {
            continue;
        }
        let name = entry[..entry.len() - BUNDLE_SUFFIX.len()].to_string();
        let size_bytes = port
            .query_subtree_size(path.as_path())
            .unwrap_or_else(|| directory_size_bytes(port, path.as_path()).size_bytes);
        let version = resolve_bundle_version(port, path.as_path());
        let icon = port.query_icon(path.as_path(), name.as_str());
        items.push(ApplicationDto {
            name,
            path: path.to_string_lossy().to_string(),
            version,
            size_bytes,
            icon,
        });
    }
}

/// Best-effort version lookup; a missing or unparsable Info.plist
/// degrades to `None`.
pub(super) fn resolve_bundle_version(port: &dyn FilesystemPort, bundle: &Path) -> Option<String> {
    let plist = bundle.join("Contents").join("Info.plist");
    let content = port.read_file_text(plist.as_path())?;
    plist_value(content.as_str(), "CFBundleShortVersionString")
        .or_else(|| plist_value(content.as_str(), "CFBundleVersion"))
}

pub(super) fn plist_value(content: &str, key: &str) -> Option<String> {
    let pattern = format!(
        r"<key>{}</key>\s*<string>([^<]+)</string>",
        regex::escape(key)
    );
    let regex = regex::Regex::new(pattern.as_str()).ok()?;
    regex
        .captures(content)
        .and_then(|captures| captures.get(1))
        .map(|value| value.as_str().trim().to_string())
}

/// Case-insensitive-leading comparison with a case-sensitive tie
/// break. Stable and total, so repeated scans of the same input agree:
/// `alpha`, `Beta`, `Zeta`.
pub(super) fn compare_app_names(left: &str, right: &str) -> Ordering {
    left.to_lowercase()
        .cmp(&right.to_lowercase())
        .then_with(|| left.cmp(right))
}
