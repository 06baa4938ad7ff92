#![allow(clippy::module_inception)]

use std::fmt::Display;

use crate::errors::errors::{ErrorTip, SyntaxError};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod serializer;
pub mod type_checker;

extern crate regex;

/// Index of a token within the token stream a node or error stems from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position(pub u32);

impl Position {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Byte range of a token within the source text it was lexed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

pub fn get_line_at_offset(source: &str, offset: usize) -> (usize, String, usize) {
    let mut start = 0;
    let mut line_number = 1;

    for line in source.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&offset) {
            return (line_number, line.to_string(), offset - start);
        }

        start = end;
        line_number += 1;
    }

    // Offsets at the very end point behind the last character
    if source.is_empty() || source.ends_with('\n') {
        return (line_number, String::new(), 0);
    }
    let last = source.rsplit('\n').next().unwrap_or("");
    (line_number - 1, last.to_string(), last.len())
}


/// Renders an error as a caret diagnostic below the offending source line.
///
/// ```text
/// Error: UnclosedBracket (Add the missing closing bracket for `(`)
///   |
/// 1 | x + (a + b
///   |     ^
/// ```
pub fn display_error(error: &SyntaxError, source: &str) -> String {
    let mut out = String::new();

    if let ErrorTip::None = error.get_tip() {
        out.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        out.push_str(&format!(
            "Error: {} ({})\n",
            error.get_error_name(),
            error.get_tip()
        ));
    }

    let span = match error.get_span() {
        Some(span) => span,
        None => {
            out.push_str(&format!(
                "-> {} at token {}\n",
                error.message(),
                error.get_position()
            ));
            return out;
        }
    };

    let (line, line_text, line_pos) = get_line_at_offset(source, span.start);

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    out.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    out.push_str(&format!(
        "{} | {}\n",
        line_string,
        line_text_removed.trim_end()
    ));

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;

    out.push_str(&format!("{:>padding$} {:>arrows$}\n", "|", "^"));
    out
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string.chars().take_while(|c| *c == ' ').count();

    (String::from(&string[start..]), start)
}
