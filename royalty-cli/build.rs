use std::path::Path;
use std::process::Command;

/// Embed `git describe` output so `royalties --version` names the exact build.
fn main() {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let repo_root = Path::new(&manifest_dir).join("..");

    let describe = Command::new("git")
        .arg("-C")
        .arg(&repo_root)
        .args(["describe", "--always", "--dirty"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
        .filter(|s| !s.is_empty());

    println!(
        "cargo:rustc-env=ROYALTIES_BUILD_SHA={}",
        describe.as_deref().unwrap_or("unknown")
    );
    println!("cargo:rerun-if-changed=../.git/HEAD");
}
