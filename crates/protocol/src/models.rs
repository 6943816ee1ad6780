use serde::{Deserialize, Serialize};

/// One installed application bundle as reported by a discovery pass.
/// Identity is `path`; a fresh scan produces fresh instances.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationDto {
    pub name: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub size_bytes: u64,
    /// Base64 `data:image/png` URL when icon extraction succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResidueCategory {
    Cache,
    Preferences,
    Logs,
    Support,
}

impl ResidueCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cache => "cache",
            Self::Preferences => "preferences",
            Self::Logs => "logs",
            Self::Support => "support",
        }
    }
}

/// A filesystem entry outside the bundle that plausibly belongs to the
/// application. Identity is `path`, unique within one resolution call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResidualFileDto {
    pub path: String,
    pub category: ResidueCategory,
    pub size_bytes: u64,
    /// Which predicate or direct location produced the match.
    pub match_reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanWarningCode {
    ReadDirFailed,
    StatFailed,
    SizeDepthLimited,
    SizeCycleSkipped,
}

impl ScanWarningCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ReadDirFailed => "read_dir_failed",
            Self::StatFailed => "stat_failed",
            Self::SizeDepthLimited => "size_depth_limited",
            Self::SizeCycleSkipped => "size_cycle_skipped",
        }
    }
}

/// Structured trace of a sub-operation that was skipped instead of
/// failing the whole scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanWarningDto {
    pub code: ScanWarningCode,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResidueScanResultDto {
    pub app_name: String,
    pub total_size_bytes: u64,
    pub files: Vec<ResidualFileDto>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ScanWarningDto>,
}
