use regex::Regex;
use tree_sitter::{Node, Parser, TreeCursor};

use super::{line_of, splice};
use crate::types::{DefectKind, DefectRecord};

const KIND: DefectKind = DefectKind::VariableTypo;

/// Perturb one character of a variable name at exactly one of its textual
/// occurrences.
///
/// Only write-targets (assignment destinations and loop variables) are
/// candidates, and only a single occurrence is rewritten. The remaining
/// occurrences still reference the old name, which keeps the defect subtle
/// and can itself produce a consistency bug.
pub fn variable_typo(source: &str, rng: &mut fastrand::Rng) -> (String, DefectRecord) {
    let fail = |reason: &str| (source.to_string(), DefectRecord::failed(KIND, reason));

    let mut parser = Parser::new();
    if parser
        .set_language(&tree_sitter_python::LANGUAGE.into())
        .is_err()
    {
        return fail("python grammar unavailable");
    }
    let Some(tree) = parser.parse(source, None) else {
        return fail("unparsable source");
    };
    let root = tree.root_node();
    if root.has_error() {
        return fail("syntax error in source");
    }

    let mut variables: Vec<String> = Vec::new();
    let mut cursor = root.walk();
    visit_nodes(root, &mut cursor, &mut |node| {
        let target = match node.kind() {
            "assignment" | "augmented_assignment" | "for_statement" => {
                node.child_by_field_name("left")
            }
            _ => None,
        };
        if let Some(target) = target {
            collect_identifiers(target, source, &mut variables);
        }
    });
    if variables.is_empty() {
        return fail("no variables found");
    }

    let name = variables[rng.usize(..variables.len())].clone();
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= 1 {
        return fail("variable name too short");
    }

    // Shift one character's code point by a small positive offset
    let idx = rng.usize(..chars.len());
    let offset = rng.u32(1..=5);
    let Some(typo_char) = char::from_u32(chars[idx] as u32 + offset) else {
        return fail("no valid typo character");
    };
    let typo_name: String = chars
        .iter()
        .enumerate()
        .map(|(i, &c)| if i == idx { typo_char } else { c })
        .collect();

    let Ok(word) = Regex::new(&format!(r"\b{}\b", regex::escape(&name))) else {
        return fail("failed to locate variable");
    };
    let occurrences: Vec<usize> = word.find_iter(source).map(|m| m.start()).collect();
    if occurrences.is_empty() {
        return fail("failed to locate variable");
    }

    let pos = occurrences[rng.usize(..occurrences.len())];
    let mutated = splice(source, pos, name.len(), &typo_name);
    (
        mutated,
        DefectRecord::replaced(KIND, &name, &typo_name, line_of(source, pos)),
    )
}

fn collect_identifiers(node: Node, source: &str, out: &mut Vec<String>) {
    if node.kind() == "identifier" {
        out.push(source[node.start_byte()..node.end_byte()].to_string());
        return;
    }
    // Tuple unpacking targets nest identifiers one level down
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "identifier" {
            out.push(source[child.start_byte()..child.end_byte()].to_string());
        }
    }
}

/// Visit all nodes in the tree with a callback, using a provided cursor
fn visit_nodes<F>(node: Node, cursor: &mut TreeCursor, callback: &mut F)
where
    F: FnMut(Node),
{
    callback(node);

    if cursor.goto_first_child() {
        loop {
            let child = cursor.node();
            visit_nodes(child, cursor, callback);

            if !cursor.goto_next_sibling() {
                break;
            }
        }
        cursor.goto_parent();
    }
}
