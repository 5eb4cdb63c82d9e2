//! Read catalog documents from a file, a directory tree, or a .zip mod pack.

use super::CatalogError;
use crate::config::{MAX_DEF_FILES, MAX_DEF_FILE_BYTES};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

const DEF_SUFFIX: &str = ".toml";

/// A catalog document: where it came from and its text.
#[derive(Debug, Clone)]
pub struct SourceDoc {
    pub origin: String,
    pub content: String,
}

/// Collect every `*.toml` document reachable from `path`, in a stable order.
pub fn read_sources(path: &Path) -> Result<Vec<SourceDoc>, CatalogError> {
    if path.is_dir() {
        let mut files = Vec::new();
        collect_def_files(path, &mut files)?;
        files.sort();
        let mut docs = Vec::with_capacity(files.len());
        for f in &files {
            docs.push(read_file(f)?);
        }
        return Ok(docs);
    }
    if !path.is_file() {
        return Err(CatalogError::UnsupportedSource(format!(
            "{} does not exist",
            path.display()
        )));
    }
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "toml" => Ok(vec![read_file(path)?]),
        "zip" | "pak" => read_zip(path),
        _ => Err(CatalogError::UnsupportedSource(format!(
            "{} is not a .toml file, a directory, or a .zip/.pak archive",
            path.display()
        ))),
    }
}

fn read_file(path: &Path) -> Result<SourceDoc, CatalogError> {
    let size = fs::metadata(path)?.len();
    if size > MAX_DEF_FILE_BYTES as u64 {
        return Err(CatalogError::TooLarge {
            origin: path.display().to_string(),
            bytes: size,
        });
    }
    Ok(SourceDoc {
        origin: path.display().to_string(),
        content: fs::read_to_string(path)?,
    })
}

fn collect_def_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), CatalogError> {
    if out.len() >= MAX_DEF_FILES {
        return Ok(());
    }
    for e in fs::read_dir(dir)? {
        let path = e?.path();
        if path.is_dir() {
            collect_def_files(&path, out)?;
        } else if path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.ends_with(DEF_SUFFIX))
            .unwrap_or(false)
        {
            if out.len() >= MAX_DEF_FILES {
                tracing::warn!("stopped collecting at {} definition file(s)", MAX_DEF_FILES);
                return Ok(());
            }
            out.push(path);
        }
    }
    Ok(())
}

fn read_zip(zip_path: &Path) -> Result<Vec<SourceDoc>, CatalogError> {
    let file = fs::File::open(zip_path)?;
    let mut zip = zip::ZipArchive::new(file)?;
    let mut docs = Vec::new();
    for i in 0..zip.len() {
        if docs.len() >= MAX_DEF_FILES {
            tracing::warn!(
                "stopped reading {} at {} definition file(s)",
                zip_path.display(),
                MAX_DEF_FILES
            );
            break;
        }
        let mut entry = zip.by_index(i)?;
        let name = entry.name().to_string();
        if !entry.is_file() || !name.ends_with(DEF_SUFFIX) || name.contains("__MACOSX") {
            continue;
        }
        if entry.size() > MAX_DEF_FILE_BYTES as u64 {
            return Err(CatalogError::TooLarge {
                origin: format!("{}!{}", zip_path.display(), name),
                bytes: entry.size(),
            });
        }
        let mut content = String::with_capacity(entry.size() as usize);
        entry.read_to_string(&mut content)?;
        docs.push(SourceDoc {
            origin: format!("{}!{}", zip_path.display(), name),
            content,
        });
    }
    docs.sort_by(|a, b| a.origin.cmp(&b.origin));
    Ok(docs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn directory_sources_are_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("b.toml"), "").unwrap();
        fs::write(dir.path().join("sub").join("a.toml"), "").unwrap();
        fs::write(dir.path().join("readme.txt"), "ignored").unwrap();
        let docs = read_sources(dir.path()).unwrap();
        assert_eq!(docs.len(), 2);
        assert!(docs[0].origin.ends_with("b.toml"));
        assert!(docs[1].origin.ends_with("a.toml"));
    }

    #[test]
    fn zip_sources() {
        let dir = tempfile::tempdir().unwrap();
        let zip_path = dir.path().join("pack.zip");
        let file = fs::File::create(&zip_path).unwrap();
        let mut zw = zip::ZipWriter::new(file);
        let opts = zip::write::SimpleFileOptions::default();
        zw.start_file("defs/guns.toml", opts).unwrap();
        zw.write_all(b"[[weapon]]\ndef_name = \"Gun_X\"\n").unwrap();
        zw.start_file("__MACOSX/defs/guns.toml", opts).unwrap();
        zw.write_all(b"junk").unwrap();
        zw.start_file("notes.txt", opts).unwrap();
        zw.write_all(b"junk").unwrap();
        zw.finish().unwrap();

        let docs = read_sources(&zip_path).unwrap();
        assert_eq!(docs.len(), 1);
        assert!(docs[0].origin.ends_with("!defs/guns.toml"));
        assert!(docs[0].content.contains("Gun_X"));
    }

    #[test]
    fn unsupported_file_type() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("defs.xml");
        fs::write(&p, "<Defs/>").unwrap();
        assert!(matches!(
            read_sources(&p),
            Err(CatalogError::UnsupportedSource(_))
        ));
        assert!(matches!(
            read_sources(&dir.path().join("missing")),
            Err(CatalogError::UnsupportedSource(_))
        ));
    }
}
