use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const RESOURCE_FILE: &str = "resources.txt";
pub const ELECTIVE_PREFIX: &str = "Elective - ";

/// Semester label -> subjects, in document order.
pub type SemesterMap = IndexMap<String, Vec<String>>;

/// Department -> semesters. Order of both maps is the traversal order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Curriculum {
    pub departments: IndexMap<String, SemesterMap>,
}

/// One (department, semester, subject) triple borrowed from a `Curriculum`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Leaf<'a> {
    pub department: &'a str,
    pub semester: &'a str,
    pub subject: &'a str,
}

pub fn placeholder_text(subject: &str) -> String {
    format!("Upload notes for {} here.", subject)
}

impl Curriculum {
    pub fn is_empty(&self) -> bool { self.departments.is_empty() }

    pub fn leaves(&self) -> impl Iterator<Item = Leaf<'_>> + '_ {
        self.departments.iter().flat_map(|(department, semesters)| {
            semesters.iter().flat_map(move |(semester, subjects)| {
                subjects.iter().map(move |subject| Leaf { department, semester, subject })
            })
        })
    }

    pub fn leaf_count(&self) -> usize {
        self.departments.values().flat_map(|s| s.values()).map(Vec::len).sum()
    }

    pub fn semester_count(&self) -> usize {
        self.departments.values().map(IndexMap::len).sum()
    }

    /// Subjects listed more than once within the same semester.
    pub fn duplicate_subjects(&self) -> Vec<Leaf<'_>> {
        let mut dups = Vec::new();
        for (department, semesters) in &self.departments {
            for (semester, subjects) in semesters {
                for (i, subject) in subjects.iter().enumerate() {
                    let leaf = Leaf { department, semester, subject };
                    if subjects[..i].contains(subject) && !dups.contains(&leaf) { dups.push(leaf); }
                }
            }
        }
        dups
    }
}

impl<'a> Leaf<'a> {
    pub fn segments(&self) -> [&'a str; 3] { [self.department, self.semester, self.subject] }

    pub fn relative_dir(&self) -> PathBuf {
        let mut p = PathBuf::new();
        for seg in self.segments() { p.push(seg); }
        p
    }

    pub fn dir_in(&self, base: &Path) -> PathBuf { base.join(self.relative_dir()) }

    pub fn resource_path(&self, base: &Path) -> PathBuf { self.dir_in(base).join(RESOURCE_FILE) }

    pub fn placeholder(&self) -> String { placeholder_text(self.subject) }

    pub fn is_elective(&self) -> bool { self.subject.starts_with(ELECTIVE_PREFIX) }
}

impl std::fmt::Display for Leaf<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} / {} / {}", self.department, self.semester, self.subject)
    }
}
