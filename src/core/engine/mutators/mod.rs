//! The mutator catalog.
//!
//! Each mutator is a pure function over source text: it either finds an
//! applicable injection site and returns the altered text with a successful
//! [`DefectRecord`], or returns the input unchanged with `success == false`
//! and a reason. Finding nothing to do is never an error.

use crate::types::DefectRecord;

mod boolean;
mod comments;
mod identifier;
mod off_by_one;
mod security;
mod stubs;

pub use boolean::boolean_flip;
pub use comments::remove_comment;
pub use identifier::variable_typo;
pub use off_by_one::off_by_one;
pub use security::{CREDENTIAL_TERM, SECRET_MARKER, security_vulnerability};
pub use stubs::{
    modified_string, null_dereference, removed_error_handling, resource_leak, swapped_arguments,
    unused_variable,
};

pub type Mutator = fn(&str, &mut fastrand::Rng) -> (String, DefectRecord);

/// 1-based line number of a byte position.
pub(crate) fn line_of(source: &str, byte_offset: usize) -> u32 {
    source
        .bytes()
        .take(byte_offset)
        .filter(|&b| b == b'\n')
        .count() as u32
        + 1
}

/// Replace `old_len` bytes at `start` with `replacement`.
pub(crate) fn splice(source: &str, start: usize, old_len: usize, replacement: &str) -> String {
    format!(
        "{}{}{}",
        &source[..start],
        replacement,
        &source[start + old_len..]
    )
}
