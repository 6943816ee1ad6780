use super::*;

/// Result of a stat query. Zeroed when the path cannot be inspected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathStat {
    pub size_bytes: u64,
    pub is_directory: bool,
}

/// The only boundary between the resolution engine and the real
/// filesystem. None of the methods raise; failures collapse into
/// `false`, an empty listing or a zeroed stat, and the engine reports
/// skipped work through scan warnings instead.
pub trait FilesystemPort {
    /// True iff the path exists and is readable.
    fn check_access(&self, path: &Path) -> bool;

    /// Immediate child names only. Empty on failure.
    fn read_directory(&self, path: &Path) -> Vec<String>;

    fn stat(&self, path: &Path) -> PathStat;

    /// Whole-subtree size through the platform's own allocation
    /// accounting. `None` sends the caller to the guarded walker.
    fn query_subtree_size(&self, _path: &Path) -> Option<u64> {
        None
    }

    /// Best-effort bundle icon as a `data:image/png` URL.
    fn query_icon(&self, _app_path: &Path, _app_name: &str) -> Option<String> {
        None
    }

    /// Best-effort text read, used for Info.plist metadata.
    fn read_file_text(&self, _path: &Path) -> Option<String> {
        None
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NativeFilesystem;

impl FilesystemPort for NativeFilesystem {
    fn check_access(&self, path: &Path) -> bool {
        // Existence alone is not enough: a candidate the scan cannot
        // read must be omitted, not reported with a zero size.
        let Ok(meta) = fs::metadata(path) else {
            return false;
        };
        if meta.is_dir() {
            fs::read_dir(path).is_ok()
        } else {
            fs::File::open(path).is_ok()
        }
    }

    fn read_directory(&self, path: &Path) -> Vec<String> {
        let Ok(entries) = fs::read_dir(path) else {
            return Vec::new();
        };
        entries
            .flatten()
            .filter_map(|entry| entry.file_name().to_str().map(ToString::to_string))
            .collect()
    }

    fn stat(&self, path: &Path) -> PathStat {
        match fs::metadata(path) {
            Ok(meta) => PathStat {
                size_bytes: meta.len(),
                is_directory: meta.is_dir(),
            },
            Err(_) => PathStat::default(),
        }
    }

    fn query_subtree_size(&self, path: &Path) -> Option<u64> {
        du_size_bytes(path).or_else(|| walkdir_size_bytes(path))
    }

    fn query_icon(&self, app_path: &Path, app_name: &str) -> Option<String> {
        extract_bundle_icon(app_path, app_name)
    }

    fn read_file_text(&self, path: &Path) -> Option<String> {
        fs::read_to_string(path).ok()
    }
}

/// `du -sk` reports allocated kilobytes and follows the platform's own
/// handling of hard links and sparse files.
fn du_size_bytes(path: &Path) -> Option<u64> {
    let output = Command::new("du").arg("-sk").arg(path).output().ok()?;
    if !output.status.success() {
        tracing::debug!(
            event = "du_size_query_failed",
            path = %path.display(),
            status = %output.status
        );
        return None;
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    let kilobytes = stdout.split_whitespace().next()?.parse::<u64>().ok()?;
    Some(kilobytes.saturating_mul(1024))
}

fn walkdir_size_bytes(path: &Path) -> Option<u64> {
    let mut total = 0u64;
    for entry in walkdir::WalkDir::new(path)
        .follow_links(false)
        .into_iter()
        .flatten()
    {
        let Ok(meta) = entry.metadata() else {
            continue;
        };
        if meta.is_file() {
            total = total.saturating_add(meta.len());
        }
    }
    Some(total)
}
