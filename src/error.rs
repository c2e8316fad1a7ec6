use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOp { CreateDir, WriteFile }

impl fmt::Display for WriteOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteOp::CreateDir => f.write_str("create directory"),
            WriteOp::WriteFile => f.write_str("write file"),
        }
    }
}

/// Directory creation or file write that failed on disk.
#[derive(Debug, Error)]
#[error("failed to {op} {}", .path.display())]
pub struct FilesystemWriteError {
    pub op: WriteOp,
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid path segment {segment:?} in {department} / {semester} / {subject}: {reason}")]
pub struct SegmentError {
    pub department: String,
    pub semester: String,
    pub subject: String,
    pub segment: String,
    pub reason: &'static str,
}

#[derive(Debug, Error)]
pub enum MaterializeError {
    #[error(transparent)]
    Write(#[from] FilesystemWriteError),
    #[error("{} invalid path segment(s); first: {}", .0.len(), .0[0])]
    InvalidSegments(Vec<SegmentError>),
}
