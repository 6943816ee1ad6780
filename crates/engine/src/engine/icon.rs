use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use super::*;

const ICON_MAX_DIMENSION: &str = "128";

/// Resolves the bundle's icon to a `data:image/png` URL. Every step is
/// best-effort; any failure yields `None` and the caller renders a
/// fallback glyph.
pub(super) fn extract_bundle_icon(app_path: &Path, app_name: &str) -> Option<String> {
    let resources = app_path.join("Contents").join("Resources");
    for candidate in icon_candidates(app_path, app_name) {
        let icon_path = resources.join(candidate.as_str());
        if !icon_path.exists() {
            continue;
        }
        if let Some(data_url) = convert_icon_to_data_url(icon_path.as_path()) {
            return Some(data_url);
        }
    }
    None
}

/// The Info.plist `CFBundleIconFile` name (with and without the
/// `.icns` extension) first, then conventional fallbacks.
fn icon_candidates(app_path: &Path, app_name: &str) -> Vec<String> {
    let plist = app_path.join("Contents").join("Info.plist");
    let declared = fs::read_to_string(plist.as_path())
        .ok()
        .and_then(|content| plist_value(content.as_str(), "CFBundleIconFile"));

    let mut candidates = Vec::new();
    if let Some(declared) = declared {
        if !declared.to_lowercase().ends_with(".icns") {
            candidates.push(format!("{declared}.icns"));
        }
        candidates.insert(0, declared);
    }
    candidates.push("AppIcon.icns".to_string());
    candidates.push("app.icns".to_string());
    candidates.push(format!("{app_name}.icns"));
    candidates.push("icon.icns".to_string());
    candidates
}

/// Downscales the `.icns` through `sips` (ships with macOS) and embeds
/// the PNG bytes as base64.
fn convert_icon_to_data_url(icns_path: &Path) -> Option<String> {
    let temp_png = std::env::temp_dir().join(format!(
        "appsweep-icon-{}-{}.png",
        std::process::id(),
        now_unix_millis()
    ));
    let status = Command::new("sips")
        .args(["-s", "format", "png", "-Z", ICON_MAX_DIMENSION])
        .arg(icns_path)
        .arg("--out")
        .arg(temp_png.as_path())
        .status()
        .ok()?;
    if !status.success() {
        tracing::debug!(
            event = "icon_convert_failed",
            icon = %icns_path.display(),
            status = %status
        );
        let _ = fs::remove_file(temp_png.as_path());
        return None;
    }
    let bytes = fs::read(temp_png.as_path());
    let _ = fs::remove_file(temp_png.as_path());
    Some(format!(
        "data:image/png;base64,{}",
        BASE64.encode(bytes.ok()?)
    ))
}
