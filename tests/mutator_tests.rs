use bugsmith::engine::mutators;
use bugsmith::types::DefectKind;
use pretty_assertions::assert_eq;

fn rng(seed: u64) -> fastrand::Rng {
    fastrand::Rng::with_seed(seed)
}

#[test]
fn every_mutator_is_idempotent_on_failure() {
    // "pass" has no variables, operators, comments, indices, or functions,
    // so every strategy reports failure and returns the input untouched.
    let source = "pass\n";
    let catalog: &[mutators::Mutator] = &[
        mutators::variable_typo,
        mutators::remove_comment,
        mutators::unused_variable,
        mutators::boolean_flip,
        mutators::off_by_one,
        mutators::swapped_arguments,
        mutators::modified_string,
        mutators::removed_error_handling,
        mutators::null_dereference,
        mutators::resource_leak,
        mutators::security_vulnerability,
    ];
    for mutator in catalog {
        let (text, record) = mutator(source, &mut rng(1));
        assert_eq!(text, source);
        assert!(!record.success);
        assert!(record.reason.is_some());
    }
}

#[test]
fn stubs_report_not_implemented() {
    let stubs: &[mutators::Mutator] = &[
        mutators::unused_variable,
        mutators::swapped_arguments,
        mutators::modified_string,
        mutators::removed_error_handling,
        mutators::null_dereference,
        mutators::resource_leak,
    ];
    for stub in stubs {
        let (_, record) = stub("total = 1\n", &mut rng(1));
        assert_eq!(record.reason.as_deref(), Some("not implemented"));
    }
}

#[test]
fn variable_typo_changes_exactly_one_occurrence() {
    let source = "total = 1\nprint(total)\n";
    let (mutated, record) = mutators::variable_typo(source, &mut rng(7));

    assert!(record.success);
    assert_eq!(record.kind, DefectKind::VariableTypo);
    assert_eq!(record.original.as_deref(), Some("total"));
    assert_ne!(mutated, source);
    // One of the two occurrences was rewritten, the other still reads "total"
    assert_eq!(mutated.matches("total").count(), 1);
    assert_eq!(mutated.len(), source.len());
}

#[test]
fn variable_typo_rejects_single_char_names() {
    let (mutated, record) = mutators::variable_typo("x = 1\n", &mut rng(1));
    assert_eq!(mutated, "x = 1\n");
    assert!(!record.success);
    assert_eq!(record.reason.as_deref(), Some("variable name too short"));
}

#[test]
fn variable_typo_rejects_broken_source() {
    let source = "def (((\n";
    let (mutated, record) = mutators::variable_typo(source, &mut rng(1));
    assert_eq!(mutated, source);
    assert!(!record.success);
    assert_eq!(record.reason.as_deref(), Some("syntax error in source"));
}

#[test]
fn boolean_flip_inverts_equality_first() {
    let source = "if a == b and c > d:\n    pass\n";
    let (mutated, record) = mutators::boolean_flip(source, &mut rng(3));

    // "==" outranks every other operator type present
    assert_eq!(record.original.as_deref(), Some("=="));
    assert_eq!(record.modified.as_deref(), Some("!="));
    assert_eq!(mutated, "if a != b and c > d:\n    pass\n");
    assert_eq!(record.line, Some(1));
}

#[test]
fn boolean_flip_skips_commented_operators() {
    let source = "# checks that a == b always\nif x > y:\n    pass\n";
    let (mutated, record) = mutators::boolean_flip(source, &mut rng(3));

    // The "==" inside the comment is not a usable site; ">" is next in line
    assert_eq!(record.original.as_deref(), Some(">"));
    assert_eq!(mutated, "# checks that a == b always\nif x < y:\n    pass\n");
}

#[test]
fn boolean_flip_is_an_involution() {
    let source = "while count <= limit:\n    pass\n";
    let (once, first) = mutators::boolean_flip(source, &mut rng(5));
    assert_eq!(first.modified.as_deref(), Some(">="));
    let (twice, _) = mutators::boolean_flip(&once, &mut rng(5));
    assert_eq!(twice, source);
}

#[test]
fn off_by_one_widens_two_arg_range() {
    let source = "for i in range(0, 5):\n    pass\n";
    let (mutated, record) = mutators::off_by_one(source, &mut rng(2));
    assert_eq!(mutated, "for i in range(0, 6):\n    pass\n");
    assert_eq!(record.original.as_deref(), Some("range(0, 5)"));
    assert_eq!(record.modified.as_deref(), Some("range(0, 6)"));
}

#[test]
fn off_by_one_narrows_slices() {
    let source = "window = items[2:9]\n";
    let (mutated, _) = mutators::off_by_one(source, &mut rng(2));
    assert_eq!(mutated, "window = items[2:8]\n");
}

#[test]
fn off_by_one_shifts_single_index() {
    let source = "first = items[2]\n";
    let (mutated, _) = mutators::off_by_one(source, &mut rng(2));
    assert_eq!(mutated, "first = items[3]\n");
}

#[test]
fn remove_comment_deletes_substantial_comments_only() {
    let source = "# this comment is long enough to matter\nx = 1  # ok\n";
    let (mutated, record) = mutators::remove_comment(source, &mut rng(4));

    assert!(record.success);
    assert_eq!(mutated, "\nx = 1  # ok\n");
    assert_eq!(
        record.original.as_deref(),
        Some("# this comment is long enough to matter")
    );
}

#[test]
fn remove_comment_fails_on_short_comments() {
    let source = "x = 1  # ok\n";
    let (mutated, record) = mutators::remove_comment(source, &mut rng(4));
    assert_eq!(mutated, source);
    assert!(!record.success);
    assert_eq!(record.reason.as_deref(), Some("no suitable comments found"));
}

#[test]
fn security_strips_string_concatenation() {
    let source = "query = \"SELECT * FROM users WHERE id = \" + user_id + \"\"\n";
    let (mutated, record) = mutators::security_vulnerability(source, &mut rng(6));

    assert!(record.success);
    assert_eq!(record.kind, DefectKind::SecurityVulnerability);
    assert!(!mutated.contains("+ user_id +"));
    assert_eq!(record.details.as_deref(), Some("removed input validation"));
}

#[test]
fn security_unwraps_subprocess_list_form() {
    let source = "subprocess.run([\"ls\", \"-la\", path])\n";
    let (mutated, record) = mutators::security_vulnerability(source, &mut rng(6));

    assert!(record.success);
    assert!(mutated.starts_with("subprocess.run(\"ls\", \"-la\", path)"));
}

#[test]
fn security_falls_back_to_hardcoded_credential() {
    let source = "def handler(request):\n    return request\n";
    let (mutated, record) = mutators::security_vulnerability(source, &mut rng(6));

    assert!(record.success);
    assert_eq!(record.subtype.as_deref(), Some("hardcoded_credentials"));
    assert!(mutated.contains(mutators::SECRET_MARKER));
    assert!(mutated.contains(mutators::CREDENTIAL_TERM));
    assert_eq!(record.line, Some(2));
}
