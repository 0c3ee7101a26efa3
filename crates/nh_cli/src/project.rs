//! Whole-project operations: `build` and `check`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use nh_syntax::TransformOptions;
use nh_transform::{looks_like_tsx, transform};
use walkdir::WalkDir;

use crate::check::parse_output;
use crate::config::ProjectConfig;

pub const SOURCE_EXTENSION: &str = "neha";

/// Counts reported after a build.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BuildSummary {
    pub transformed: usize,
    pub copied: usize,
}

pub fn is_source(path: &Path) -> bool {
    path.extension().is_some_and(|e| e == SOURCE_EXTENSION)
}

/// Output extension for a transformed source.
pub fn output_extension(source: &str) -> &'static str {
    if looks_like_tsx(source) {
        "tsx"
    } else {
        "ts"
    }
}

/// Every Neha source under `dir`, sorted by path.
pub fn source_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.with_context(|| format!("failed to walk {}", dir.display()))?;
        if entry.file_type().is_file() && is_source(entry.path()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Transform every source under `root_dir` into `out_dir` and copy all other
/// files across unchanged.
pub fn build(root: &Path, config: &ProjectConfig) -> Result<BuildSummary> {
    let root_dir = root.join(&config.root_dir);
    let out_dir = root.join(&config.out_dir);

    if !root_dir.is_dir() {
        bail!("root_dir {} is not a directory", root_dir.display());
    }
    if root_dir.starts_with(&out_dir) {
        bail!(
            "out_dir {} must not contain root_dir {}",
            out_dir.display(),
            root_dir.display()
        );
    }

    if out_dir.exists() {
        fs::remove_dir_all(&out_dir)
            .with_context(|| format!("failed to empty {}", out_dir.display()))?;
    }
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    let mut summary = BuildSummary::default();
    let walker = WalkDir::new(&root_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.path() != out_dir);

    for entry in walker {
        let entry = entry.with_context(|| format!("failed to walk {}", root_dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let relative = path.strip_prefix(&root_dir)?;
        let dest = out_dir.join(relative);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        if is_source(path) {
            build_file(path, relative, &dest, config)?;
            summary.transformed += 1;
        } else {
            fs::copy(path, &dest)
                .with_context(|| format!("failed to copy {}", path.display()))?;
            summary.copied += 1;
        }
    }

    if summary.transformed == 0 {
        tracing::warn!(dir = %root_dir.display(), "no .neha files found");
    }
    tracing::info!(
        transformed = summary.transformed,
        copied = summary.copied,
        out_dir = %out_dir.display(),
        "build finished"
    );
    Ok(summary)
}

fn build_file(path: &Path, relative: &Path, dest: &Path, config: &ProjectConfig) -> Result<()> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let options = TransformOptions {
        filename: Some(relative.display().to_string()),
        inline_source_map: config.inline_source_map,
    };
    let out = transform(&source, &options)
        .with_context(|| format!("failed to transform {}", path.display()))?;

    let dest = dest.with_extension(output_extension(&source));
    let mut code = out.code;

    if config.source_maps {
        let map_path = map_path(&dest);
        fs::write(&map_path, out.map.to_json()?)
            .with_context(|| format!("failed to write {}", map_path.display()))?;
        if !config.inline_source_map {
            if let Some(name) = map_path.file_name() {
                code.push_str(&format!("\n//# sourceMappingURL={}", name.to_string_lossy()));
            }
        }
    }

    fs::write(&dest, code).with_context(|| format!("failed to write {}", dest.display()))?;
    tracing::debug!(from = %path.display(), to = %dest.display(), "transformed");
    Ok(())
}

/// `app.tsx` → `app.tsx.map`.
pub fn map_path(output: &Path) -> PathBuf {
    let mut name = output.as_os_str().to_owned();
    name.push(".map");
    PathBuf::from(name)
}

/// Transform every source under `root_dir` and parse the output. Returns the
/// number of files that failed; diagnostics have already gone to stderr.
pub fn check(root: &Path, config: &ProjectConfig) -> Result<usize> {
    let root_dir = root.join(&config.root_dir);
    let files = source_files(&root_dir)?;
    if files.is_empty() {
        tracing::warn!(dir = %root_dir.display(), "no .neha files found");
    }

    let mut failures = 0;
    for path in &files {
        let source = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let filename = path.display().to_string();
        let out = transform(&source, &TransformOptions::with_filename(&filename))
            .with_context(|| format!("failed to transform {filename}"))?;

        let ext = output_extension(&source);
        let output_name = path.with_extension(ext).display().to_string();
        match parse_output(&out.code, &output_name, ext == "tsx") {
            Ok(_) => tracing::debug!(file = %filename, "ok"),
            Err(e) => {
                eprintln!("error: {e:#}");
                failures += 1;
            }
        }
    }

    Ok(failures)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn write(path: &Path, text: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, text).unwrap();
    }

    #[test]
    fn build_transforms_and_copies() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(&root.join("src/app.neha"), "bhej kaam App() { de <div class=\"a\" />; }\n");
        write(&root.join("src/lib/util.neha"), "bhej tay two = 2;\n");
        write(&root.join("src/styles.css"), ".a { color: red; }\n");
        write(&root.join("dist/stale.txt"), "old");

        let summary = build(root, &ProjectConfig::default()).unwrap();
        assert_eq!(summary, BuildSummary { transformed: 2, copied: 1 });

        let app = fs::read_to_string(root.join("dist/app.tsx")).unwrap();
        assert_eq!(
            app,
            "export function App() { return <div className=\"a\" />; }\n\n//# sourceMappingURL=app.tsx.map"
        );
        assert!(root.join("dist/app.tsx.map").exists());

        let util = fs::read_to_string(root.join("dist/lib/util.ts")).unwrap();
        assert!(util.starts_with("export const two = 2;\n"));
        assert_eq!(
            fs::read_to_string(root.join("dist/styles.css")).unwrap(),
            ".a { color: red; }\n"
        );
        assert!(!root.join("dist/stale.txt").exists());
    }

    #[test]
    fn build_without_maps() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(&root.join("src/a.neha"), "tay a = sach;");
        let config = ProjectConfig {
            source_maps: false,
            ..Default::default()
        };
        build(root, &config).unwrap();
        assert_eq!(fs::read_to_string(root.join("dist/a.ts")).unwrap(), "const a = true;");
        assert!(!root.join("dist/a.ts.map").exists());
    }

    #[test]
    fn build_refuses_to_empty_the_sources() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(&root.join("src/a.neha"), "tay a = 1;");
        let config = ProjectConfig {
            out_dir: root.to_path_buf(),
            ..Default::default()
        };
        assert!(build(root, &config).is_err());
        assert!(root.join("src/a.neha").exists());
    }

    #[test]
    fn check_counts_failures() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(&root.join("src/good.neha"), "rakh x = 1;\nagar (x) { dikha(x); }\n");
        write(&root.join("src/bad.neha"), "tay = ;\n");
        assert_eq!(check(root, &ProjectConfig::default()).unwrap(), 1);
    }

    #[test]
    fn map_path_appends_extension() {
        assert_eq!(map_path(Path::new("dist/app.tsx")), PathBuf::from("dist/app.tsx.map"));
    }
}
