//! Minimal unified-diff reader.
//!
//! Verification only needs changed file paths, hunk extents on the old
//! (mutated) side, and the removed/added line texts. Both `diff --git`
//! headers and bare `---`/`+++` pairs are accepted.

use once_cell::sync::Lazy;
use regex::Regex;

static GIT_HEADER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^diff --git a/(.+) b/(.+)$").expect("diff header regex"));
static HUNK_HEADER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^@@ -(\d+)(?:,(\d+))? \+(\d+)(?:,(\d+))? @@").expect("hunk header regex")
});

/// One contiguous change block.
#[derive(Debug, Clone, PartialEq)]
pub struct Hunk {
    /// 1-based first line on the old side.
    pub old_start: u32,
    /// Line count on the old side (header default is 1).
    pub old_count: u32,
    pub removed: Vec<String>,
    pub added: Vec<String>,
}

impl Hunk {
    /// Whether a 1-based old-side line number falls inside this hunk.
    pub fn touches_line(&self, line: u32) -> bool {
        line >= self.old_start && line < self.old_start + self.old_count.max(1)
    }
}

/// All hunks for one changed file.
#[derive(Debug, Clone, PartialEq)]
pub struct FileDiff {
    /// Path as it appears on the new side, without the `b/` prefix.
    pub path: String,
    pub hunks: Vec<Hunk>,
}

pub fn parse_unified_diff(diff: &str) -> Vec<FileDiff> {
    let mut files: Vec<FileDiff> = Vec::new();
    let mut current: Option<FileDiff> = None;
    let mut pending_old_path: Option<String> = None;
    // Lines still owed to the open hunk on each side. While either is
    // positive, `-`/`+` lines are hunk content, never headers; a removed
    // line whose text begins "-- " would otherwise look like a `---` header.
    let mut old_left: u32 = 0;
    let mut new_left: u32 = 0;

    for line in diff.lines() {
        let in_hunk = old_left > 0 || new_left > 0;

        // Hunk content always carries a +/-/space/backslash prefix, so an
        // unprefixed `diff --git` line is a header even mid-hunk.
        if let Some(captures) = GIT_HEADER_RE.captures(line) {
            if let Some(file) = current.take() {
                files.push(file);
            }
            current = Some(FileDiff {
                path: captures[2].to_string(),
                hunks: Vec::new(),
            });
            pending_old_path = None;
            old_left = 0;
            new_left = 0;
        } else if !in_hunk && let Some(old) = line.strip_prefix("--- ") {
            pending_old_path = Some(strip_side_prefix(old, "a/"));
        } else if !in_hunk && let Some(new) = line.strip_prefix("+++ ") {
            let mut path = strip_side_prefix(new, "b/");
            if path == "/dev/null"
                && let Some(old_path) = pending_old_path.take()
            {
                path = old_path;
            }
            match current.as_mut() {
                // A `diff --git` header already opened this file; the
                // `+++` line just confirms the path.
                Some(file) if file.hunks.is_empty() => file.path = path,
                _ => {
                    if let Some(file) = current.take() {
                        files.push(file);
                    }
                    current = Some(FileDiff {
                        path,
                        hunks: Vec::new(),
                    });
                }
            }
        } else if !in_hunk && let Some(captures) = HUNK_HEADER_RE.captures(line) {
            if let Some(file) = current.as_mut() {
                let old_start = captures[1].parse().unwrap_or(1);
                let old_count = captures
                    .get(2)
                    .and_then(|m| m.as_str().parse().ok())
                    .unwrap_or(1);
                let new_count = captures
                    .get(4)
                    .and_then(|m| m.as_str().parse().ok())
                    .unwrap_or(1);
                old_left = old_count;
                new_left = new_count;
                file.hunks.push(Hunk {
                    old_start,
                    old_count,
                    removed: Vec::new(),
                    added: Vec::new(),
                });
            }
        } else if in_hunk
            && let Some(file) = current.as_mut()
            && let Some(hunk) = file.hunks.last_mut()
        {
            if let Some(added) = line.strip_prefix('+') {
                hunk.added.push(added.to_string());
                new_left = new_left.saturating_sub(1);
            } else if let Some(removed) = line.strip_prefix('-') {
                hunk.removed.push(removed.to_string());
                old_left = old_left.saturating_sub(1);
            } else if !line.starts_with('\\') {
                // Context line; "\ No newline" markers count on neither side
                old_left = old_left.saturating_sub(1);
                new_left = new_left.saturating_sub(1);
            }
        }
    }

    if let Some(file) = current.take() {
        files.push(file);
    }
    files
}

fn strip_side_prefix(path: &str, prefix: &str) -> String {
    path.strip_prefix(prefix).unwrap_or(path).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hunk_header_extents() {
        let diff = "diff --git a/app.py b/app.py\n\
                    index 123..456 100644\n\
                    --- a/app.py\n\
                    +++ b/app.py\n\
                    @@ -3,4 +3,4 @@ def handler():\n \
                    context\n\
                    -old line\n\
                    +new line\n \
                    more context\n";
        let files = parse_unified_diff(diff);
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, "app.py");
        let hunk = &files[0].hunks[0];
        assert_eq!(hunk.old_start, 3);
        assert_eq!(hunk.old_count, 4);
        assert_eq!(hunk.removed, vec!["old line"]);
        assert_eq!(hunk.added, vec!["new line"]);
        assert!(hunk.touches_line(3));
        assert!(hunk.touches_line(6));
        assert!(!hunk.touches_line(7));
    }

    #[test]
    fn accepts_bare_header_pairs() {
        let diff = "--- a/src/util.py\n\
                    +++ b/src/util.py\n\
                    @@ -1 +1 @@\n\
                    -x = 1\n\
                    +x = 2\n";
        let files = parse_unified_diff(diff);
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, "src/util.py");
        assert_eq!(files[0].hunks[0].old_count, 1);
    }

    #[test]
    fn removed_line_starting_with_dashes_is_content() {
        // "-- drop legacy rows" renders as "--- drop legacy rows" in the
        // diff; inside an open hunk that is a removed line, not a header.
        let diff = "diff --git a/query.sql b/query.sql\n\
                    --- a/query.sql\n\
                    +++ b/query.sql\n\
                    @@ -1,2 +1,2 @@\n\
                    --- drop legacy rows\n\
                    +-- keep legacy rows\n \
                    SELECT 1;\n";
        let files = parse_unified_diff(diff);
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, "query.sql");
        let hunk = &files[0].hunks[0];
        assert_eq!(hunk.removed, vec!["-- drop legacy rows"]);
        assert_eq!(hunk.added, vec!["-- keep legacy rows"]);
    }

    #[test]
    fn splits_multiple_files() {
        let diff = "diff --git a/a.py b/a.py\n\
                    --- a/a.py\n\
                    +++ b/a.py\n\
                    @@ -1,2 +1,2 @@\n\
                    -one\n\
                    +uno\n\
                    diff --git a/b.py b/b.py\n\
                    --- a/b.py\n\
                    +++ b/b.py\n\
                    @@ -5,1 +5,2 @@\n\
                    +extra\n";
        let files = parse_unified_diff(diff);
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].path, "a.py");
        assert_eq!(files[1].path, "b.py");
        assert_eq!(files[1].hunks[0].added, vec!["extra"]);
    }
}
