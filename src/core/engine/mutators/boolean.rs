use once_cell::sync::Lazy;
use regex::Regex;

use super::{line_of, splice};
use crate::types::{DefectKind, DefectRecord};

const KIND: DefectKind = DefectKind::BooleanFlip;

/// Fixed priority order: the first operator type with a usable occurrence
/// wins, then a random occurrence of that type is flipped.
const PRIORITY: [&str; 8] = ["==", "!=", ">", "<", ">=", "<=", "and", "or"];

// Longest-match-first tokenization so `>=` never decomposes into `>` and `=`
static OPERATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"==|!=|>=|<=|>|<|\band\b|\bor\b").expect("operator regex"));

fn flip(op: &str) -> &'static str {
    match op {
        "==" => "!=",
        "!=" => "==",
        ">" => "<",
        "<" => ">",
        ">=" => "<=",
        "<=" => ">=",
        "and" => "or",
        _ => "and",
    }
}

/// Replace one comparison or logical operator with its inverse.
pub fn boolean_flip(source: &str, rng: &mut fastrand::Rng) -> (String, DefectRecord) {
    let tokens: Vec<(usize, &str)> = OPERATOR_RE
        .find_iter(source)
        .filter(|m| !after_comment_marker(source, m.start()))
        .map(|m| (m.start(), m.as_str()))
        .collect();

    for op in PRIORITY {
        let occurrences: Vec<usize> = tokens
            .iter()
            .filter(|(_, token)| *token == op)
            .map(|(pos, _)| *pos)
            .collect();
        if occurrences.is_empty() {
            continue;
        }

        let pos = occurrences[rng.usize(..occurrences.len())];
        let flipped = flip(op);
        let mutated = splice(source, pos, op.len(), flipped);
        return (
            mutated,
            DefectRecord::replaced(KIND, op, flipped, line_of(source, pos)),
        );
    }

    (
        source.to_string(),
        DefectRecord::failed(KIND, "no suitable conditions found"),
    )
}

/// True when the byte position sits after a `#` on its own line.
fn after_comment_marker(source: &str, pos: usize) -> bool {
    let line_start = source[..pos].rfind('\n').map(|i| i + 1).unwrap_or(0);
    source[line_start..pos].contains('#')
}
