//! Build script for ribbon preset validation
//!
//! Runs at compile time and checks every bundled preset JSON file, so an
//! invalid configuration can never ship inside the binary. Mirrors the
//! runtime validation rules: positive dimensions, segment counts >= 1.

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Ribbon preset from JSON (camelCase keys, as authored by JS hosts)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Preset {
    width: f32,
    height: f32,
    width_segments: u32,
    height_segments: u32,
}

/// Validate a single preset file
fn validate_preset_file(path: &Path) -> Result<(), String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

    let preset: Preset = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse {}: {}", path.display(), e))?;

    let mut errors = Vec::new();

    if !(preset.width > 0.0) || !(preset.height > 0.0) {
        errors.push(format!(
            "  dimensions must be positive, got width={} height={}",
            preset.width, preset.height
        ));
    }
    if preset.width_segments < 1 || preset.height_segments < 1 {
        errors.push(format!(
            "  segment counts must be at least 1, got widthSegments={} heightSegments={}",
            preset.width_segments, preset.height_segments
        ));
    }

    if errors.is_empty() {
        println!(
            "cargo:warning=✓ {} validated ({}x{} grid)",
            path.display(),
            preset.width_segments + 1,
            preset.height_segments + 1
        );
        Ok(())
    } else {
        Err(format!(
            "Preset {} is invalid:\n{}",
            path.display(),
            errors.join("\n")
        ))
    }
}

fn main() {
    let preset_dir = Path::new("src/assets/presets");

    if !preset_dir.exists() {
        println!("cargo:warning=Preset directory not found, skipping validation");
        return;
    }

    let mut has_errors = false;

    if let Ok(entries) = fs::read_dir(preset_dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                // Tell cargo to rerun if this file changes
                println!("cargo:rerun-if-changed={}", path.display());

                if let Err(e) = validate_preset_file(&path) {
                    println!("cargo:warning=VALIDATION ERROR: {}", e);
                    has_errors = true;
                }
            }
        }
    }

    if has_errors {
        panic!("Preset validation failed! Fix the ribbon preset files.");
    }

    println!("cargo:rerun-if-changed={}", preset_dir.display());
}
