use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Copy the workspace config.toml next to the built binary so that
/// `load_config` finds it without an explicit path.
fn main() {
    println!("cargo:rerun-if-changed=../../config.toml");

    let workspace_root = Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(Path::parent)
        .map(Path::to_path_buf);
    let Some(workspace_root) = workspace_root else {
        println!("cargo:warning=Workspace root not found, skipping config.toml copy");
        return;
    };

    let Some(target_dir) = profile_dir() else {
        println!("cargo:warning=Target profile directory not found, skipping config.toml copy");
        return;
    };

    let source_config = workspace_root.join("config.toml");
    if !source_config.exists() {
        println!("cargo:warning=config.toml not found at {:?}, the binary will use its embedded default", source_config);
        return;
    }

    let dest_config = target_dir.join("config.toml");
    if let Err(e) = fs::copy(&source_config, &dest_config) {
        println!("cargo:warning=Failed to copy config.toml to {:?}: {}", dest_config, e);
    }
}

/// target/<profile>, found by walking up from OUT_DIR
/// (target/<profile>/build/referral-reports-xxx/out)
fn profile_dir() -> Option<PathBuf> {
    let out_dir = env::var("OUT_DIR").ok()?;
    let profile = env::var("PROFILE").ok()?;
    Path::new(&out_dir)
        .ancestors()
        .find(|p| p.ends_with(&profile))
        .map(Path::to_path_buf)
}
