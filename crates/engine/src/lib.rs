mod engine;

pub use engine::{
    FilesystemPort, LibraryLayout, NativeFilesystem, PathStat, default_application_roots,
    discover_applications, resolve_residual_files,
};
