use std::env;
use std::fs;
use std::path::Path;

/// Копирует config.toml (из корня workspace) и фикстуру продаж рядом с бинарником
fn main() {
    println!("cargo:rerun-if-changed=../../config.toml");
    println!("cargo:rerun-if-changed=data/sales.json");

    // OUT_DIR is typically: target/debug/build/backend-xxx/out
    let out_dir = env::var("OUT_DIR").unwrap();
    let profile = env::var("PROFILE").unwrap();
    let target_dir = Path::new(&out_dir)
        .ancestors()
        .find(|p| p.ends_with(&profile))
        .expect("Could not find target profile directory");

    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let workspace_root = manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("Could not find workspace root");

    copy_if_exists(&workspace_root.join("config.toml"), &target_dir.join("config.toml"));
    copy_if_exists(
        &manifest_dir.join("data").join("sales.json"),
        &target_dir.join("data").join("sales.json"),
    );
}

fn copy_if_exists(source: &Path, dest: &Path) {
    if !source.exists() {
        println!("cargo:warning={:?} not found, using embedded defaults", source);
        return;
    }
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)
            .unwrap_or_else(|e| panic!("Failed to create {:?}: {}", parent, e));
    }
    fs::copy(source, dest).unwrap_or_else(|e| panic!("Failed to copy {:?}: {}", source, e));
}
