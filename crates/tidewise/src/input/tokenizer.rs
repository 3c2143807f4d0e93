//! Line splitting and delimiter-aware field tokenization.

use serde::{Deserialize, Serialize};

/// Characters that always separate fields.
const FIELD_SEPARATORS: &[char] = &[',', ';', '\t'];

/// Which characters split a line into fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DelimiterRule {
    /// Comma, semicolon or tab.
    Punctuation,
    /// Comma, semicolon, tab, or a bare run of spaces.
    ///
    /// Spaces next to a punctuation separator are padding, not a delimiter.
    PunctuationOrWhitespace,
}

impl DelimiterRule {
    pub fn label(&self) -> &'static str {
        match self {
            DelimiterRule::Punctuation => "comma/semicolon/tab",
            DelimiterRule::PunctuationOrWhitespace => "comma/semicolon/tab/whitespace",
        }
    }
}

pub(crate) fn is_field_separator(c: char) -> bool {
    FIELD_SEPARATORS.contains(&c)
}

/// Split text into non-blank lines, keeping 1-based line numbers.
///
/// Accepts `\n` and `\r\n` line endings.
pub fn split_lines(text: &str) -> Vec<(usize, &str)> {
    text.split('\n')
        .enumerate()
        .map(|(i, line)| (i + 1, line.strip_suffix('\r').unwrap_or(line)))
        .filter(|(_, line)| !line.trim().is_empty())
        .collect()
}

/// Split one line into trimmed fields.
///
/// A field that starts with `"` runs to the closing quote; separators inside
/// it do not split, and `""` stands for a literal quote.
pub fn split_fields(line: &str, rule: DelimiterRule) -> Vec<String> {
    let line = match rule {
        DelimiterRule::Punctuation => line,
        DelimiterRule::PunctuationOrWhitespace => line.trim_matches(' '),
    };

    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut after_separator = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(ch);
            }
            continue;
        }

        match ch {
            '"' if current.trim().is_empty() => {
                in_quotes = true;
                after_separator = false;
            }
            c if is_field_separator(c) => {
                fields.push(take_field(&mut current));
                after_separator = true;
            }
            c if c.is_whitespace() && rule == DelimiterRule::PunctuationOrWhitespace => {
                while let Some(&next) = chars.peek() {
                    if next.is_whitespace() && !is_field_separator(next) {
                        chars.next();
                    } else {
                        break;
                    }
                }
                let before_separator = chars.peek().is_none_or(|&c| is_field_separator(c));
                if !after_separator && !before_separator {
                    fields.push(take_field(&mut current));
                    after_separator = true;
                }
            }
            c => {
                current.push(c);
                if !c.is_whitespace() {
                    after_separator = false;
                }
            }
        }
    }

    fields.push(take_field(&mut current));
    fields
}

fn take_field(current: &mut String) -> String {
    let field = current.trim().to_string();
    current.clear();
    field
}

/// Most frequent separator in a line, ignoring quoted sections.
pub fn dominant_separator(line: &str) -> Option<char> {
    let mut counts = [0usize; 3];
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if !in_quotes => {
                if let Some(i) = FIELD_SEPARATORS.iter().position(|&s| s == c) {
                    counts[i] += 1;
                }
            }
            _ => {}
        }
    }

    // Ties go to the earlier separator in FIELD_SEPARATORS.
    let (best, count) = counts
        .iter()
        .enumerate()
        .fold((0, 0), |acc, (i, &c)| if c > acc.1 { (i, c) } else { acc });
    (count > 0).then(|| FIELD_SEPARATORS[best])
}
