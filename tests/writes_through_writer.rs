// tests/writes_through_writer.rs
// Fails if runtime code outside the writer issues SQLite writes directly.
// Allowed: the writer, schema setup and connection pragmas; test code is skipped.

use std::fs;
use std::path::{Path, PathBuf};

fn collect_rs_files(dir: &Path, files: &mut Vec<PathBuf>) {
    if let Ok(entries) = fs::read_dir(dir) {
        for e in entries.flatten() {
            let p = e.path();
            if p.is_dir() {
                collect_rs_files(&p, files);
            } else if p.extension().map(|s| s == "rs").unwrap_or(false) {
                files.push(p);
            }
        }
    }
}

fn is_whitelisted(path: &Path) -> bool {
    let p = path.to_string_lossy().replace('\\', "/");
    p.contains("/store/writer/")
        || p.ends_with("/store/schema.rs")
        || p.ends_with("/store/connection.rs")
        || p.ends_with("/store/test_helpers.rs")
}

/// Source up to the first test module.
fn runtime_part(content: &str) -> &str {
    match content.find("#[cfg(test)]") {
        Some(idx) => &content[..idx],
        None => content,
    }
}

#[test]
fn no_direct_db_writes_outside_writer() {
    let src_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("src");

    let mut files = Vec::new();
    collect_rs_files(&src_dir, &mut files);
    assert!(!files.is_empty());

    let bad_patterns = [
        "conn.execute(",
        ".execute_batch(",
        "stmt.execute(",
        "tx.execute(",
    ];

    let mut offenders: Vec<(String, String)> = Vec::new();
    for file in files {
        if is_whitelisted(&file) {
            continue;
        }
        let Ok(content) = fs::read_to_string(&file) else {
            continue;
        };
        let runtime = runtime_part(&content);
        for pat in &bad_patterns {
            if runtime.contains(pat) {
                offenders.push((file.to_string_lossy().to_string(), pat.to_string()));
            }
        }
    }

    if !offenders.is_empty() {
        let mut msg = String::from("Direct DB write calls found in runtime code:\n");
        for (file, pat) in offenders {
            msg.push_str(&format!("  {} contains pattern '{}': route through store::writer instead\n", file, pat));
        }
        panic!("{}", msg);
    }
}
