use crate::error::{FilesystemWriteError, MaterializeError, WriteOp};
use crate::model::{Curriculum, Leaf};
use crate::segment::{self, SegmentPolicy};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// What to do with a `resources.txt` that is already on disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExistingPolicy {
    #[default]
    Overwrite,
    Keep,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailureMode {
    /// Stop at the first failed leaf.
    #[default]
    Abort,
    /// Record the failure and move on to the next leaf.
    Continue,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    pub existing: ExistingPolicy,
    pub failures: FailureMode,
    pub segments: SegmentPolicy,
}

#[derive(Debug, Default)]
pub struct Report {
    pub base: PathBuf,
    pub leaves: usize,
    pub dirs_created: usize,
    pub files_written: usize,
    pub files_kept: usize,
    pub failures: Vec<FilesystemWriteError>,
}

impl Report {
    pub fn is_success(&self) -> bool { self.failures.is_empty() }
}

enum Written { Fresh, Kept }

pub fn materialize(curriculum: &Curriculum, base: &Path, opts: &Options) -> Result<Report, MaterializeError> {
    segment::validate(curriculum, opts.segments).map_err(MaterializeError::InvalidSegments)?;

    let mut report = Report { base: base.to_path_buf(), ..Default::default() };
    let mut current_dept: Option<&str> = None;
    for leaf in curriculum.leaves() {
        if current_dept != Some(leaf.department) {
            info!(department = leaf.department, base = %base.display(), "materializing department");
            current_dept = Some(leaf.department);
        }
        match materialize_leaf(&leaf, base, opts.existing, &mut report) {
            Ok(()) => report.leaves += 1,
            Err(e) => match opts.failures {
                FailureMode::Abort => return Err(e.into()),
                FailureMode::Continue => {
                    warn!(%leaf, error = %e, "skipping leaf");
                    report.failures.push(e);
                }
            },
        }
    }
    info!(base = %report.base.display(), leaves = report.leaves, dirs = report.dirs_created, written = report.files_written, kept = report.files_kept, failed = report.failures.len(), "materialization finished");
    Ok(report)
}

fn materialize_leaf(leaf: &Leaf<'_>, base: &Path, existing: ExistingPolicy, report: &mut Report) -> Result<(), FilesystemWriteError> {
    let dir = leaf.dir_in(base);
    let fresh_dir = !dir.is_dir();
    fs::create_dir_all(&dir).map_err(|source| FilesystemWriteError { op: WriteOp::CreateDir, path: dir.clone(), source })?;
    if fresh_dir { report.dirs_created += 1; }

    let file = leaf.resource_path(base);
    let written = write_placeholder(&file, &leaf.placeholder(), existing)
        .map_err(|source| FilesystemWriteError { op: WriteOp::WriteFile, path: file.clone(), source })?;
    match written {
        Written::Fresh => { report.files_written += 1; debug!(path = %file.display(), "wrote placeholder"); }
        Written::Kept => { report.files_kept += 1; debug!(path = %file.display(), "kept existing file"); }
    }
    Ok(())
}

fn write_placeholder(path: &Path, content: &str, existing: ExistingPolicy) -> io::Result<Written> {
    match existing {
        ExistingPolicy::Overwrite => { fs::write(path, content.as_bytes())?; Ok(Written::Fresh) }
        ExistingPolicy::Keep => {
            match create_exclusive(path, |f| f.write_all(content.as_bytes())) {
                Ok(()) => Ok(Written::Fresh),
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(Written::Kept),
                Err(e) => Err(e),
            }
        }
    }
}

/// Creates `path` only if absent. A failed fill removes the file again, so a
/// later keep-existing run never mistakes a truncated file for user notes.
pub(crate) fn create_exclusive(path: &Path, fill: impl FnOnce(&mut fs::File) -> io::Result<()>) -> io::Result<()> {
    let mut f = fs::OpenOptions::new().write(true).create_new(true).open(path)?;
    if let Err(e) = fill(&mut f).and_then(|()| f.sync_all()) {
        drop(f);
        let _ = fs::remove_file(path);
        return Err(e);
    }
    Ok(())
}
