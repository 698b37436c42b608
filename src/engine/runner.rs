//! engine::runner
//!
//! The update pipeline and its file I/O.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::{Context, RunError};
use crate::core::types::Rate;
use crate::document::{self, Document, DocumentError};
use crate::rates::RateSource;
use crate::ui::output;
use crate::units::{self, names, BITCOIN};

/// What to update and where to get the rate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRequest {
    /// Units file to read and rewrite (already tilde-expanded).
    pub units_file: PathBuf,
    /// Resolved rate endpoint.
    pub url: String,
}

/// Result of a successful run.
#[derive(Debug, Clone)]
pub struct UpdateOutcome {
    /// The rate written.
    pub rate: Rate,
    /// Relation text before the update (empty for a new unit).
    pub previous: String,
    /// The unit was created by this run.
    pub created_unit: bool,
    /// The Currency category was created by this run.
    pub created_category: bool,
    /// The rendered document.
    pub document: String,
    /// False on a dry run.
    pub written: bool,
}

/// Run the full pipeline once.
///
/// # Errors
///
/// Returns the [`RunError`] of the first failing step; later steps do not
/// run.
pub async fn run_update(
    ctx: &Context,
    request: &UpdateRequest,
    source: &dyn RateSource,
) -> Result<UpdateOutcome, RunError> {
    let path = &request.units_file;

    let mut doc = load_document(path, ctx)?;

    let handle = units::locate_or_create(&mut doc, &BITCOIN).map_err(|source| {
        RunError::Consistency {
            path: path.clone(),
            source,
        }
    })?;
    if handle.created_unit {
        ctx.progress("No unit matches selection, will create one.");
    }
    if handle.created_category {
        output::debug(
            format!("creating '{}' category", BITCOIN.category),
            ctx.verbosity,
        );
    }

    ctx.progress(format!("Loading EUR/BTC rate from {}", request.url));
    let rate = source
        .fetch(&request.url)
        .await
        .map_err(|source| RunError::FetchError {
            url: request.url.clone(),
            source,
        })?;
    output::debug(format!("fetched rate {}", rate), ctx.verbosity);

    let previous = units::write_rate(&mut doc, &handle, &BITCOIN, &rate).map_err(|source| {
        RunError::Consistency {
            path: path.clone(),
            source,
        }
    })?;

    let rendered = document::render(&doc);
    let written = if ctx.dry_run {
        output::debug("dry run, not writing", ctx.verbosity);
        false
    } else {
        write_document(path, &rendered, ctx)?;
        true
    };

    Ok(UpdateOutcome {
        rate,
        previous,
        created_unit: handle.created_unit,
        created_category: handle.created_category,
        document: rendered,
        written,
    })
}

/// Read and parse the units file.
///
/// A missing file yields an empty `QALCULATE` document.
pub fn load_document(path: &Path, ctx: &Context) -> Result<Document, RunError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            output::debug(
                format!("'{}' does not exist, starting empty", path.display()),
                ctx.verbosity,
            );
            return Ok(Document::new(names::ROOT));
        }
        Err(e) => {
            return Err(RunError::ReadError {
                path: path.to_path_buf(),
                source: e,
            })
        }
    };

    let parse_error = |source: DocumentError| RunError::ParseError {
        path: path.to_path_buf(),
        source,
    };
    let text = std::str::from_utf8(&bytes).map_err(|e| parse_error(e.into()))?;
    document::parse(text).map_err(parse_error)
}

/// Replace the units file with `contents`.
///
/// Creates parent directories if needed. Writes to a sibling temp file,
/// syncs it, then renames it over the target.
pub fn write_document(path: &Path, contents: &str, ctx: &Context) -> Result<(), RunError> {
    let write_error = |source: io::Error| RunError::WriteError {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_error)?;
    }

    let temp_path = temp_path_for(path).ok_or_else(|| {
        write_error(io::Error::new(
            io::ErrorKind::InvalidInput,
            "path has no file name",
        ))
    })?;
    output::debug(
        format!("writing '{}'", temp_path.display()),
        ctx.verbosity,
    );

    let result = write_and_sync(&temp_path, contents).and_then(|()| fs::rename(&temp_path, path));
    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result.map_err(write_error)
}

fn write_and_sync(path: &Path, contents: &str) -> io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()
}

/// `units.xml` -> `units.xml.tmp` in the same directory.
fn temp_path_for(path: &Path) -> Option<PathBuf> {
    let mut name = path.file_name()?.to_os_string();
    name.push(".tmp");
    Some(path.with_file_name(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_loads_empty_document() {
        let temp = TempDir::new().unwrap();
        let doc = load_document(&temp.path().join("absent.xml"), &Context::default()).unwrap();
        assert_eq!(doc, Document::new("QALCULATE"));
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("units.xml");
        fs::write(&path, "<QALCULATE><category></QALCULATE>").unwrap();

        let err = load_document(&path, &Context::default()).unwrap_err();
        assert!(matches!(err, RunError::ParseError { .. }));
        assert!(err.to_string().contains("units.xml"));
    }

    #[test]
    fn non_utf8_file_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("units.xml");
        fs::write(&path, b"<QALCULATE>\xff</QALCULATE>").unwrap();

        let err = load_document(&path, &Context::default()).unwrap_err();
        assert!(matches!(
            err,
            RunError::ParseError {
                source: DocumentError::InvalidUtf8(_),
                ..
            }
        ));
    }

    #[test]
    fn directory_is_read_error() {
        let temp = TempDir::new().unwrap();
        let err = load_document(temp.path(), &Context::default()).unwrap_err();
        assert!(matches!(err, RunError::ReadError { .. }));
    }

    #[test]
    fn write_creates_parent_directories() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".qalculate/definitions/units.xml");

        write_document(&path, "<QALCULATE/>\n", &Context::default()).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "<QALCULATE/>\n");
        assert!(!temp.path().join(".qalculate/definitions/units.xml.tmp").exists());
    }

    #[test]
    fn write_replaces_existing_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("units.xml");
        fs::write(&path, "old").unwrap();

        write_document(&path, "new", &Context::default()).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn write_into_directory_path_fails() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("units.xml");
        fs::create_dir(&blocker).unwrap();
        fs::write(blocker.join("keep"), "x").unwrap();

        let err = write_document(&blocker, "new", &Context::default()).unwrap_err();
        assert!(matches!(err, RunError::WriteError { .. }));
        assert!(!temp.path().join("units.xml.tmp").exists());
    }

    #[test]
    fn temp_path_is_sibling() {
        assert_eq!(
            temp_path_for(Path::new("/a/b/units.xml")),
            Some(PathBuf::from("/a/b/units.xml.tmp"))
        );
        assert_eq!(temp_path_for(Path::new("/")), None);
    }
}
