// Rules for turning curriculum names into single path components.
use crate::error::SegmentError;
use crate::model::Curriculum;
use regex::Regex;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SegmentPolicy {
    /// Names are used as-is; only names that are not one normal component are refused.
    #[default]
    Verbatim,
    /// Verbatim rules plus everything Windows refuses in a file name.
    Portable,
}

pub fn check_segment(name: &str, policy: SegmentPolicy) -> Result<(), &'static str> {
    if name.is_empty() { return Err("empty name"); }
    if name == "." || name == ".." { return Err("relative path component"); }
    if name.contains('/') || name.contains('\\') { return Err("contains a path separator"); }
    if name.contains('\0') { return Err("contains a NUL byte"); }
    if policy == SegmentPolicy::Portable {
        if name.chars().any(|c| matches!(c, '<' | '>' | ':' | '"' | '|' | '?' | '*') || c.is_control()) {
            return Err("contains a character reserved on Windows");
        }
        if name.ends_with('.') || name.ends_with(' ') { return Err("ends with a dot or space"); }
        static RESERVED: once_cell::sync::Lazy<Regex> = once_cell::sync::Lazy::new(|| {
            Regex::new(r"(?i)^(con|prn|aux|nul|com[1-9]|lpt[1-9])(\..*)?$").unwrap()
        });
        if RESERVED.is_match(name) { return Err("reserved device name"); }
    }
    Ok(())
}

/// Checks every department, semester and subject name; returns all offenders.
/// A bad name is reported once per place it occurs, not once per subject below it.
pub fn validate(curriculum: &Curriculum, policy: SegmentPolicy) -> Result<(), Vec<SegmentError>> {
    let mut errors = Vec::new();
    let mut reported: BTreeSet<Vec<&str>> = BTreeSet::new();
    for leaf in curriculum.leaves() {
        let segments = leaf.segments();
        for (depth, seg) in segments.iter().enumerate() {
            if let Err(reason) = check_segment(seg, policy) {
                if !reported.insert(segments[..=depth].to_vec()) { continue; }
                errors.push(SegmentError {
                    department: leaf.department.to_string(),
                    semester: leaf.semester.to_string(),
                    subject: leaf.subject.to_string(),
                    segment: seg.to_string(),
                    reason,
                });
            }
        }
    }
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
