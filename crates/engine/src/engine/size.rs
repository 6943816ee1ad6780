use super::*;

/// Past this depth a subtree stops counting. Symlink cycles resolve to
/// ever-longer paths, so the ceiling is what guarantees termination on
/// pathological trees.
pub(super) const SIZE_MAX_DEPTH: usize = 10;
const SIZE_WARNING_LIMIT: usize = 24;

/// Build-tool scratch directories that are both huge and irrelevant.
const SIZE_ENTRY_DENYLIST: [&str; 2] = ["XCContentsDir", "DerivedData"];

#[derive(Debug, Clone, Default)]
pub(super) struct SizeComputation {
    pub(super) size_bytes: u64,
    pub(super) warnings: Vec<ScanWarningDto>,
}

/// Total apparent size of every regular file reachable under `path`,
/// over the port only. Always terminates: a visited set drops repeated
/// paths and `SIZE_MAX_DEPTH` bounds symlink-induced recursion, each
/// contributing zero instead of failing.
pub(super) fn directory_size_bytes(port: &dyn FilesystemPort, path: &Path) -> SizeComputation {
    let mut computation = SizeComputation::default();
    let mut visited = HashSet::new();
    accumulate_directory_size(port, path, 0, &mut visited, &mut computation);
    computation
}

pub(super) fn accumulate_directory_size(
    port: &dyn FilesystemPort,
    path: &Path,
    depth: usize,
    visited: &mut HashSet<String>,
    computation: &mut SizeComputation,
) {
    if depth > SIZE_MAX_DEPTH {
        push_size_warning(
            &mut computation.warnings,
            ScanWarningCode::SizeDepthLimited,
            path,
        );
        return;
    }
    let key = normalize_path_key(path.to_string_lossy().as_ref());
    if !visited.insert(key) {
        push_size_warning(
            &mut computation.warnings,
            ScanWarningCode::SizeCycleSkipped,
            path,
        );
        return;
    }

    for entry in port.read_directory(path) {
        if skip_size_entry(entry.as_str()) {
            continue;
        }
        let entry_path = path.join(entry.as_str());
        let stat = port.stat(entry_path.as_path());
        if stat.is_directory {
            accumulate_directory_size(port, entry_path.as_path(), depth + 1, visited, computation);
        } else {
            computation.size_bytes = computation.size_bytes.saturating_add(stat.size_bytes);
        }
    }
}

fn skip_size_entry(entry_name: &str) -> bool {
    entry_name.starts_with('.') || SIZE_ENTRY_DENYLIST.contains(&entry_name)
}

fn push_size_warning(warnings: &mut Vec<ScanWarningDto>, code: ScanWarningCode, path: &Path) {
    if warnings.len() >= SIZE_WARNING_LIMIT {
        return;
    }
    let path_value = path.to_string_lossy().to_string();
    if warnings
        .iter()
        .any(|warning| warning.code == code && warning.path == path_value)
    {
        return;
    }
    warnings.push(ScanWarningDto {
        code,
        path: path_value,
        detail: None,
    });
}
