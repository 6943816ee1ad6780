use super::*;

/// Substring patterns identifying this tool's own installed files; the
/// resolver must never offer itself for deletion.
const SELF_FILE_PATTERNS: [&str; 5] = [
    "com.appsweep.app",
    "com.opensource.appsweep",
    "appsweep.app",
    "/appsweep/",
    "appsweep-",
];

/// App-extension containers are frequently live under the OS; listing
/// them risks destabilizing running components.
const EXTENSION_MARKERS: [&str; 10] = [
    ".shareextension",
    ".telegramshare",
    ".notificationserviceextension",
    ".notificationcontentextension",
    ".todayextension",
    ".messagesextension",
    ".intentsextension",
    ".intentsuiextension",
    "shareextension",
    "widgetextension",
];

const GROUP_CONTAINERS_SEGMENT: &str = "/group containers/";

#[derive(Debug, Clone)]
pub(super) struct SearchLocation {
    pub(super) path: PathBuf,
    pub(super) category: ResidueCategory,
    pub(super) area: &'static str,
}

#[derive(Debug, Clone)]
pub(super) struct SearchDirectory {
    pub(super) dir: PathBuf,
    pub(super) category: ResidueCategory,
}

/// The per-user library areas searched for residue. The table is
/// reverse-derived from the observed macOS `~/Library` layout;
/// different arrangements swap the table, not the algorithm.
#[derive(Debug, Clone)]
pub struct LibraryLayout {
    library: PathBuf,
}

impl LibraryLayout {
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self {
            library: home.into().join("Library"),
        }
    }

    /// Layout rooted at `$HOME`, `None` when the environment does not
    /// provide one.
    pub fn detect() -> Option<Self> {
        home_dir().map(Self::new)
    }

    /// Pass A: candidate paths constructed directly from the display
    /// name, checked without listing anything.
    pub(super) fn direct_locations(&self, app_name: &str) -> Vec<SearchLocation> {
        let compact = app_name.split_whitespace().collect::<String>();
        let mut locations = vec![
            SearchLocation {
                path: self.library.join("Application Support").join(app_name),
                category: ResidueCategory::Support,
                area: "application_support",
            },
            SearchLocation {
                path: self.library.join("Caches").join(app_name),
                category: ResidueCategory::Cache,
                area: "caches",
            },
            SearchLocation {
                path: self
                    .library
                    .join("Preferences")
                    .join(format!("{app_name}.plist")),
                category: ResidueCategory::Preferences,
                area: "preferences",
            },
            SearchLocation {
                path: self.library.join("Logs").join(app_name),
                category: ResidueCategory::Logs,
                area: "logs",
            },
            SearchLocation {
                path: self.library.join("WebKit").join(app_name),
                category: ResidueCategory::Cache,
                area: "webkit",
            },
            SearchLocation {
                path: self
                    .library
                    .join("Saved Application State")
                    .join(format!("{app_name}.savedState")),
                category: ResidueCategory::Cache,
                area: "saved_state",
            },
        ];
        if compact != app_name {
            locations.push(SearchLocation {
                path: self.library.join("Application Support").join(&compact),
                category: ResidueCategory::Support,
                area: "application_support_compact",
            });
            locations.push(SearchLocation {
                path: self.library.join("Caches").join(&compact),
                category: ResidueCategory::Cache,
                area: "caches_compact",
            });
        }
        locations
    }

    /// Pass B: directories whose immediate entries are pattern-matched
    /// against the application name.
    pub(super) fn search_directories(&self) -> Vec<SearchDirectory> {
        [
            ("Application Support", ResidueCategory::Support),
            ("Caches", ResidueCategory::Cache),
            ("Preferences", ResidueCategory::Preferences),
            ("Logs", ResidueCategory::Logs),
            ("Saved Application State", ResidueCategory::Cache),
            ("HTTPStorages", ResidueCategory::Cache),
            ("Containers", ResidueCategory::Support),
            ("Group Containers", ResidueCategory::Support),
        ]
        .into_iter()
        .map(|(area, category)| SearchDirectory {
            dir: self.library.join(area),
            category,
        })
        .collect()
    }
}

pub(super) fn is_own_tool_path(path_lower: &str) -> bool {
    SELF_FILE_PATTERNS
        .iter()
        .any(|pattern| path_lower.contains(pattern))
}

pub(super) fn has_extension_marker(path_lower: &str) -> bool {
    EXTENSION_MARKERS
        .iter()
        .any(|marker| path_lower.contains(marker))
}

pub(super) fn in_group_container(path_lower: &str) -> bool {
    path_lower.contains(GROUP_CONTAINERS_SEGMENT)
}

/// Exclusion policy shared by both passes, applied before a candidate
/// is ever stat'ed or recorded.
pub(super) fn should_exclude_path(path: &Path) -> bool {
    let path_lower = path.to_string_lossy().to_lowercase();
    is_own_tool_path(path_lower.as_str())
        || has_extension_marker(path_lower.as_str())
        || in_group_container(path_lower.as_str())
}

/// Finds every entry in the per-user library areas that plausibly
/// belongs to `app_name`. Two passes write into one result set keyed
/// by normalized path: direct well-known locations first, then a
/// pattern search over the broader directories. Always returns a
/// best-effort result; unreadable locations become warnings, and an
/// empty list means a clean application.
pub fn resolve_residual_files(
    port: &dyn FilesystemPort,
    layout: &LibraryLayout,
    app_name: &str,
) -> ResidueScanResultDto {
    let keys = NameKeys::new(app_name);
    // A blank name would turn the direct-location probes into the
    // Library areas themselves.
    if keys.is_empty() {
        tracing::debug!(event = "residue_scan_blank_name");
        return ResidueScanResultDto {
            app_name: app_name.to_string(),
            total_size_bytes: 0,
            files: Vec::new(),
            warnings: Vec::new(),
        };
    }
    let mut files = Vec::new();
    let mut warnings = Vec::new();
    let mut added = HashSet::new();

    for location in layout.direct_locations(app_name) {
        let path_key = normalize_path_key(location.path.to_string_lossy().as_ref());
        if added.contains(path_key.as_str()) {
            continue;
        }
        if should_exclude_path(location.path.as_path()) {
            continue;
        }
        if !port.check_access(location.path.as_path()) {
            continue;
        }
        let reason = format!("direct_location:{}", location.area);
        record_candidate(
            port,
            location.path.as_path(),
            location.category,
            reason,
            &mut files,
            &mut warnings,
        );
        added.insert(path_key);
    }

    for search_dir in layout.search_directories() {
        if !port.check_access(search_dir.dir.as_path()) {
            tracing::debug!(
                event = "residue_search_dir_unreadable",
                dir = %search_dir.dir.display()
            );
            warnings.push(ScanWarningDto {
                code: ScanWarningCode::ReadDirFailed,
                path: search_dir.dir.to_string_lossy().to_string(),
                detail: None,
            });
            continue;
        }
        for entry in port.read_directory(search_dir.dir.as_path()) {
            let Some(rule) = match_entry(entry.as_str(), &keys) else {
                continue;
            };
            let entry_path = search_dir.dir.join(entry.as_str());
            let path_key = normalize_path_key(entry_path.to_string_lossy().as_ref());
            if added.contains(path_key.as_str()) {
                continue;
            }
            if should_exclude_path(entry_path.as_path()) {
                continue;
            }
            if !port.check_access(entry_path.as_path()) {
                warnings.push(ScanWarningDto {
                    code: ScanWarningCode::StatFailed,
                    path: entry_path.to_string_lossy().to_string(),
                    detail: None,
                });
                continue;
            }
            record_candidate(
                port,
                entry_path.as_path(),
                search_dir.category,
                rule.as_str().to_string(),
                &mut files,
                &mut warnings,
            );
            added.insert(path_key);
        }
    }

    let total_size_bytes = files
        .iter()
        .fold(0u64, |acc, file| acc.saturating_add(file.size_bytes));
    tracing::debug!(
        event = "residue_scan_completed",
        app_name = app_name,
        files = files.len(),
        total_size_bytes = total_size_bytes
    );

    ResidueScanResultDto {
        app_name: app_name.to_string(),
        total_size_bytes,
        files,
        warnings,
    }
}

fn record_candidate(
    port: &dyn FilesystemPort,
    path: &Path,
    category: ResidueCategory,
    match_reason: String,
    files: &mut Vec<ResidualFileDto>,
    warnings: &mut Vec<ScanWarningDto>,
) {
    let stat = port.stat(path);
    let size_bytes = if stat.is_directory {
        let computation = directory_size_bytes(port, path);
        warnings.extend(computation.warnings);
        computation.size_bytes
    } else {
        stat.size_bytes
    };
    files.push(ResidualFileDto {
        path: path.to_string_lossy().to_string(),
        category,
        size_bytes,
        match_reason,
    });
}
