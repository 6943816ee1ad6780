use protocol::models::{
    ApplicationDto, ResidualFileDto, ResidueCategory, ResidueScanResultDto, ScanWarningCode,
    ScanWarningDto,
};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

mod discovery;
mod fs_port;
mod icon;
mod naming;
mod residue;
mod size;

pub use discovery::{default_application_roots, discover_applications};
pub use fs_port::{FilesystemPort, NativeFilesystem, PathStat};
pub use residue::{LibraryLayout, resolve_residual_files};

use discovery::*;
use icon::*;
use naming::*;
use size::*;

fn normalize_path_key(path: &str) -> String {
    path.trim().to_string()
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

fn now_unix_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_millis() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
#[path = "../../tests/engine/fixtures.rs"]
mod fixtures;

#[cfg(test)]
#[path = "../../tests/engine/fs_port_tests.rs"]
mod fs_port_tests;

#[cfg(test)]
#[path = "../../tests/engine/naming_tests.rs"]
mod naming_tests;

#[cfg(test)]
#[path = "../../tests/engine/size_tests.rs"]
mod size_tests;

#[cfg(test)]
#[path = "../../tests/engine/residue_tests.rs"]
mod residue_tests;

#[cfg(test)]
#[path = "../../tests/engine/discovery_tests.rs"]
mod discovery_tests;
