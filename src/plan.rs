use crate::model::Curriculum;
use std::path::Path;

/// One tab-separated line per leaf: department, semester, subject, kind, target directory.
pub fn plan_to_tsv(curriculum: &Curriculum, base: &Path) -> Vec<String> {
    curriculum.leaves().map(|l| {
        let kind = if l.is_elective() { "elective" } else { "core" };
        format!("{}\t{}\t{}\t{}\t{}", l.department, l.semester, l.subject, kind, l.dir_in(base).display())
    }).collect()
}
