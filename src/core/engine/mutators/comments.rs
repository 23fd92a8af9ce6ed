use once_cell::sync::Lazy;
use regex::Regex;

use super::line_of;
use crate::types::{DefectKind, DefectRecord};

const KIND: DefectKind = DefectKind::RemovedComment;

// Substantial comments only; short markers like "# ok" are not worth removing
static COMMENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"#[^\n]{15,}").expect("comment regex"));

/// Delete one substantial comment, marker included.
pub fn remove_comment(source: &str, rng: &mut fastrand::Rng) -> (String, DefectRecord) {
    let comments: Vec<regex::Match> = COMMENT_RE.find_iter(source).collect();
    if comments.is_empty() {
        return (
            source.to_string(),
            DefectRecord::failed(KIND, "no suitable comments found"),
        );
    }

    let comment = comments[rng.usize(..comments.len())];
    let mutated = format!("{}{}", &source[..comment.start()], &source[comment.end()..]);
    (
        mutated,
        DefectRecord::removed(KIND, comment.as_str(), line_of(source, comment.start())),
    )
}
