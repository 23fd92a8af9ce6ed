use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::{line_of, splice};
use crate::types::{DefectKind, DefectRecord};

const KIND: DefectKind = DefectKind::SecurityVulnerability;

/// Marker embedded in the injected secret; verification keys on it.
pub const SECRET_MARKER: &str = "S3CR3T_K3Y_";
/// Term identifying the injected statement as a credential.
pub const CREDENTIAL_TERM: &str = "api_key";

const HARDCODED_CREDENTIAL: &str = "api_key = \"S3CR3T_K3Y_123456789abcdef\"";

// SQL injection: strip the parameterization out of a concatenated string
static CONCAT_PARAM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(["'])(\s*\+\s*[\w.]+\s*\+\s*)(["'])"#).expect("concat regex"));
// Command injection: list-form invocation becomes a single shell string
static SUBPROCESS_LIST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"subprocess\.run\(\[([^\]]+)\]").expect("subprocess regex"));
// Input validation: drop a re.match guard block
static VALIDATION_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"if\s+not\s+re\.match[^:]+:[^}]+\}").expect("validation regex"));
static FUNCTION_SIG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"def\s+\w+\s*\([^)]*\):").expect("signature regex"));

/// Weaken the code's security posture.
///
/// Multi-strategy with ordered fallback: removal-based strategies are tried
/// in fixed order, and when none matches, a hardcoded credential is inserted
/// right after a function signature.
pub fn security_vulnerability(source: &str, rng: &mut fastrand::Rng) -> (String, DefectRecord) {
    type Rewrite = fn(&Captures<'_>) -> String;
    let strategies: [(&Regex, Rewrite); 3] = [
        (&CONCAT_PARAM, |c| format!("{}{}", &c[1], &c[3])),
        (&SUBPROCESS_LIST, |c| format!("subprocess.run({}", &c[1])),
        (&VALIDATION_BLOCK, |_| String::new()),
    ];

    for (pattern, rewrite) in strategies {
        let matches: Vec<Captures> = pattern.captures_iter(source).collect();
        if matches.is_empty() {
            continue;
        }

        let captures = &matches[rng.usize(..matches.len())];
        let Some(whole) = captures.get(0) else {
            continue;
        };
        let replacement = rewrite(captures);
        let mutated = splice(source, whole.start(), whole.len(), &replacement);
        let mut record = DefectRecord::replaced(
            KIND,
            whole.as_str(),
            &replacement,
            line_of(source, whole.start()),
        );
        record.details = Some("removed input validation".to_string());
        return (mutated, record);
    }

    // Fallback: plant a credential inside a random function body
    let signatures: Vec<regex::Match> = FUNCTION_SIG.find_iter(source).collect();
    if signatures.is_empty() {
        return (
            source.to_string(),
            DefectRecord::failed(KIND, "no suitable patterns found"),
        );
    }

    let signature = signatures[rng.usize(..signatures.len())];
    let insertion = format!("\n    {HARDCODED_CREDENTIAL}\n");
    let mutated = format!(
        "{}{}{}",
        &source[..signature.end()],
        insertion,
        &source[signature.end()..]
    );
    let mut record = DefectRecord::inserted(
        KIND,
        HARDCODED_CREDENTIAL,
        line_of(source, signature.end()) + 1,
    );
    record.subtype = Some("hardcoded_credentials".to_string());
    record.details = Some("added hardcoded API key".to_string());
    (mutated, record)
}
