//! Gzip the rendered site into a parallel tree
//!
//! Every file under the source directory is written, gzipped, to the same
//! relative path under the output directory. The output tree is recreated on
//! each run so removed pages do not linger.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use ignore::WalkBuilder;

use crate::domain::ports::{DeployEvent, DeployEventSink};
use crate::error::{DeployError, DeployResult};

/// Gzip `source` into `output`, returning the relative paths written.
pub fn gzip_tree(
    source: &Path,
    output: &Path,
    events: &dyn DeployEventSink,
) -> DeployResult<Vec<PathBuf>> {
    if !source.is_dir() {
        return Err(DeployError::io(
            source,
            io::Error::new(io::ErrorKind::NotFound, "source directory does not exist"),
        ));
    }

    check_disjoint(source, output)?;

    if output.exists() {
        fs::remove_dir_all(output).map_err(|e| DeployError::io(output, e))?;
    }
    fs::create_dir_all(output).map_err(|e| DeployError::io(output, e))?;

    let walker = WalkBuilder::new(source)
        .standard_filters(false)
        .sort_by_file_path(|a, b| a.cmp(b))
        .build();

    let mut written = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| DeployError::io(source, io::Error::other(e)))?;
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(source)
            .unwrap_or(entry.path())
            .to_path_buf();
        let dest = output.join(&relative);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(|e| DeployError::io(parent, e))?;
        }

        gzip_file(entry.path(), &dest)?;
        events.on_event(DeployEvent::FileCompressed {
            path: relative.clone(),
        });
        written.push(relative);
    }

    Ok(written)
}

/// The output tree is deleted before writing, so it must not overlap the source.
fn check_disjoint(source: &Path, output: &Path) -> DeployResult<()> {
    let src = absolute(source)?;
    let out = absolute(output)?;
    if src.starts_with(&out) || out.starts_with(&src) {
        return Err(DeployError::Config {
            path: output.to_path_buf(),
            message: format!(
                "gzip_dir overlaps the source directory {}",
                source.display()
            ),
        });
    }
    Ok(())
}

/// Canonical form of `path`; a missing tail is appended to its nearest
/// existing ancestor.
fn absolute(path: &Path) -> DeployResult<PathBuf> {
    let mut existing = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|e| DeployError::io(path, e))?
            .join(path)
    };
    let mut missing = Vec::new();
    while !existing.exists() {
        match (existing.file_name(), existing.parent()) {
            (Some(name), Some(parent)) => {
                missing.push(name.to_os_string());
                existing = parent.to_path_buf();
            }
            _ => break,
        }
    }
    let mut resolved = existing
        .canonicalize()
        .map_err(|e| DeployError::io(&existing, e))?;
    resolved.extend(missing.iter().rev());
    Ok(resolved)
}

fn gzip_file(src: &Path, dest: &Path) -> DeployResult<()> {
    let input = File::open(src).map_err(|e| DeployError::io(src, e))?;
    let out = File::create(dest).map_err(|e| DeployError::io(dest, e))?;

    let mut reader = BufReader::new(input);
    let mut encoder = GzEncoder::new(BufWriter::new(out), Compression::default());
    io::copy(&mut reader, &mut encoder).map_err(|e| DeployError::io(src, e))?;
    encoder
        .finish()
        .and_then(|mut w| io::Write::flush(&mut w))
        .map_err(|e| DeployError::io(dest, e))
}
