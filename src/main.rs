mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use engine::{
    FilesystemPort, LibraryLayout, NativeFilesystem, default_application_roots,
    discover_applications, resolve_residual_files,
};
use protocol::models::ResidueScanResultDto;
use protocol::{AppError, AppResult, ResultExt};
use std::path::PathBuf;

fn main() {
    let cli = Cli::parse();

    // Logging failures never block the command itself.
    let level = logging::resolve_log_level(cli.verbose);
    if let Some(log_dir) = logging::default_log_dir() {
        match logging::init_logging(&log_dir, &level) {
            Ok(guard) => tracing::debug!(
                event = "logging_initialized",
                log_dir = %guard.log_dir().display(),
                level = guard.level()
            ),
            Err(error) => eprintln!("warning: logging unavailable: {error}"),
        }
    }

    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> AppResult<()> {
    let port = NativeFilesystem;
    tracing::debug!(event = "command_started", command = ?cli.command);
    match cli.command {
        Commands::List { json, roots } => run_list(&port, json, roots),
        Commands::Residue { name, json } => run_residue(&port, &name, json),
    }
}

fn run_list(port: &dyn FilesystemPort, json: bool, roots: Vec<PathBuf>) -> AppResult<()> {
    let roots = if roots.is_empty() {
        default_application_roots()
    } else {
        roots
    };
    let apps = discover_applications(port, &roots);
    if json {
        println!("{}", to_pretty_json(&apps)?);
        return Ok(());
    }
    if apps.is_empty() {
        println!("No applications found.");
        return Ok(());
    }
    for app in &apps {
        let version = app.version.as_deref().unwrap_or("-");
        println!(
            "{:<40} {:>10}  {:<12} {}",
            app.name,
            format_size(app.size_bytes),
            version,
            app.path
        );
    }
    println!("{} application(s)", apps.len());
    Ok(())
}

fn run_residue(port: &dyn FilesystemPort, name: &str, json: bool) -> AppResult<()> {
    let layout = LibraryLayout::detect().ok_or_else(|| {
        AppError::new(
            "residue_home_missing",
            "could not locate the user Library directory",
        )
    })?;
    let mut result = resolve_residual_files(port, &layout, name);
    result
        .files
        .sort_by(|left, right| {
            left.category
                .as_str()
                .cmp(right.category.as_str())
                .then_with(|| left.path.cmp(&right.path))
        });
    if json {
        println!("{}", to_pretty_json(&result)?);
        return Ok(());
    }
    print_residue_table(&result);
    Ok(())
}

fn print_residue_table(result: &ResidueScanResultDto) {
    if result.files.is_empty() {
        println!("No residual files found for {}.", result.app_name);
    } else {
        for file in &result.files {
            println!(
                "{:<12} {:>10}  {}",
                file.category.as_str(),
                format_size(file.size_bytes),
                file.path
            );
        }
        println!(
            "{} file(s), {} total",
            result.files.len(),
            format_size(result.total_size_bytes)
        );
    }
    for warning in &result.warnings {
        eprintln!("warning: {}: {}", warning.code.as_str(), warning.path);
    }
}

fn to_pretty_json<T: serde::Serialize>(value: &T) -> AppResult<String> {
    serde_json::to_string_pretty(value)
        .with_code("output_serialize_failed", "could not serialize output")
}

fn format_size(size_bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    let mut size = size_bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit + 1 < UNITS.len() {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{size_bytes} B")
    } else {
        format!("{size:.1} {}", UNITS[unit])
    }
}
