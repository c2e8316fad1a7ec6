use crate::model::Curriculum;
use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Differences between a tree on disk and the curriculum it should mirror.
#[derive(Debug, Default, Serialize)]
pub struct Verification {
    pub leaves: usize,
    pub missing: Vec<PathBuf>,
    pub drifted: Vec<PathBuf>,
    pub unexpected: Vec<PathBuf>,
}

impl Verification {
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.drifted.is_empty() && self.unexpected.is_empty()
    }
}

// Finder/Explorer metadata and VCS dirs are not part of the tree.
fn is_ignored_name(name: &str) -> bool {
    name.starts_with('.') || matches!(name.to_lowercase().as_str(), "thumbs.db" | "desktop.ini")
}

pub fn verify(curriculum: &Curriculum, base: &Path) -> Result<Verification> {
    let mut out = Verification::default();
    let mut seen = BTreeSet::new();
    for leaf in curriculum.leaves() {
        out.leaves += 1;
        let file = leaf.resource_path(base);
        if !seen.insert(file.clone()) { continue; }
        match fs::read(&file) {
            Ok(bytes) => { if bytes != leaf.placeholder().as_bytes() { out.drifted.push(file); } }
            Err(e) if e.kind() == io::ErrorKind::NotFound => out.missing.push(file),
            Err(e) => return Err(e).with_context(|| format!("reading {}", file.display())),
        }
    }

    if base.is_dir() {
        for dept in subdirs(base)? {
            let dname = file_name(&dept);
            let Some(semesters) = curriculum.departments.get(&dname) else { out.unexpected.push(dept); continue; };
            for sem in subdirs(&dept)? {
                let sname = file_name(&sem);
                let Some(subjects) = semesters.get(&sname) else { out.unexpected.push(sem); continue; };
                let known: BTreeSet<&str> = subjects.iter().map(String::as_str).collect();
                for subj in subdirs(&sem)? {
                    if !known.contains(file_name(&subj).as_str()) { out.unexpected.push(subj); }
                }
            }
        }
    }
    Ok(out)
}

fn file_name(path: &Path) -> String {
    path.file_name().map(|s| s.to_string_lossy().to_string()).unwrap_or_default()
}

fn subdirs(path: &Path) -> Result<Vec<PathBuf>> {
    let mut entries: Vec<PathBuf> = fs::read_dir(path)
        .with_context(|| format!("listing {}", path.display()))?
        .filter_map(|e| e.ok().map(|d| d.path()))
        .filter(|p| p.is_dir() && !is_ignored_name(&file_name(p)))
        .collect();
    entries.sort();
    Ok(entries)
}
