use crate::materialize::Report;
use crate::model::{Curriculum, Leaf, RESOURCE_FILE};
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize)]
pub struct ManifestEntry {
    pub department: String,
    pub semester: String,
    pub subject: String,
    pub elective: bool,
    pub path: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct Manifest {
    pub base: PathBuf,
    pub resource_file: &'static str,
    pub leaves: Vec<ManifestEntry>,
}

impl Manifest {
    pub fn build(curriculum: &Curriculum, base: &Path) -> Manifest {
        Self::build_filtered(curriculum, base, |_| true)
    }

    /// Only the leaves a materialization run actually produced.
    pub fn from_report(curriculum: &Curriculum, report: &Report) -> Manifest {
        Self::build_filtered(curriculum, &report.base, |l| {
            let (dir, file) = (l.dir_in(&report.base), l.resource_path(&report.base));
            !report.failures.iter().any(|f| f.path == dir || f.path == file)
        })
    }

    fn build_filtered(curriculum: &Curriculum, base: &Path, keep: impl Fn(&Leaf<'_>) -> bool) -> Manifest {
        let leaves = curriculum.leaves().filter(|l| keep(l)).map(|l| ManifestEntry {
            department: l.department.to_string(),
            semester: l.semester.to_string(),
            subject: l.subject.to_string(),
            elective: l.is_elective(),
            path: l.dir_in(base),
        }).collect();
        Manifest { base: base.to_path_buf(), resource_file: RESOURCE_FILE, leaves }
    }
}

#[derive(Default)]
pub struct ManifestIo;

impl ManifestIo {
    /// Writes via a sibling temp file and rename so readers never see a partial manifest.
    pub fn write(&self, out_path: &Path, manifest: &Manifest) -> Result<PathBuf> {
        if let Some(dir) = out_path.parent() {
            if !dir.as_os_str().is_empty() { fs::create_dir_all(dir)?; }
        }
        let tmp = out_path.with_extension("tmp");
        {
            let mut f = fs::File::create(&tmp).with_context(|| format!("creating {}", tmp.display()))?;
            let data = serde_json::to_vec_pretty(manifest)?;
            f.write_all(&data)?;
            f.sync_all()?;
        }
        fs::rename(&tmp, out_path).with_context(|| format!("replacing {}", out_path.display()))?;
        Ok(out_path.to_path_buf())
    }
}
