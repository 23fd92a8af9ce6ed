use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::{line_of, splice};
use crate::types::{DefectKind, DefectRecord};

const KIND: DefectKind = DefectKind::OffByOne;

static RANGE_TWO_ARG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"range\(\s*(\d+)\s*,\s*(\d+)\s*\)").expect("range regex"));
static RANGE_ONE_ARG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"range\(\s*(\d+)\s*\)").expect("range regex"));
static SLICE_BOUNDS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\s*(\d+)\s*:\s*(\d+)\s*\]").expect("slice regex"));
static SINGLE_INDEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\s*(\d+)\s*\]").expect("index regex"));

/// Adjust one bound of a range, slice, or index expression by one.
///
/// Pattern types are tried in fixed priority order; the first type with at
/// least one occurrence wins and a random occurrence of it is rewritten.
/// Per-pattern rule: range upper bounds widen by one, slice upper bounds
/// narrow by one, single indices shift up by one.
pub fn off_by_one(source: &str, rng: &mut fastrand::Rng) -> (String, DefectRecord) {
    type Rewrite = fn(&Captures<'_>) -> Option<String>;
    let patterns: [(&Regex, Rewrite); 4] = [
        (&RANGE_TWO_ARG, |c| {
            let hi: i64 = c[2].parse().ok()?;
            Some(format!("range({}, {})", &c[1], hi + 1))
        }),
        (&RANGE_ONE_ARG, |c| {
            let n: i64 = c[1].parse().ok()?;
            Some(format!("range({})", n + 1))
        }),
        (&SLICE_BOUNDS, |c| {
            let hi: i64 = c[2].parse().ok()?;
            Some(format!("[{}:{}]", &c[1], hi - 1))
        }),
        (&SINGLE_INDEX, |c| {
            let n: i64 = c[1].parse().ok()?;
            Some(format!("[{}]", n + 1))
        }),
    ];

    for (pattern, rewrite) in patterns {
        let matches: Vec<Captures> = pattern.captures_iter(source).collect();
        if matches.is_empty() {
            continue;
        }

        let captures = &matches[rng.usize(..matches.len())];
        let Some(whole) = captures.get(0) else {
            continue;
        };
        let Some(replacement) = rewrite(captures) else {
            continue;
        };

        let mutated = splice(source, whole.start(), whole.len(), &replacement);
        return (
            mutated,
            DefectRecord::replaced(
                KIND,
                whole.as_str(),
                &replacement,
                line_of(source, whole.start()),
            ),
        );
    }

    (
        source.to_string(),
        DefectRecord::failed(KIND, "no suitable patterns found"),
    )
}
