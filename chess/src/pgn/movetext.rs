//! Clean-up of PGN move text before it reaches the SAN parser.
//!
//! Comments, variations, numeric annotation glyphs, `!`/`?` suffixes and the
//! game termination marker are blanked out with spaces. The output has the
//! same number of runes as the input, so positions reported by the SAN
//! parser still point into the original text.

use super::san::SanError;

const RESULTS: [&str; 4] = ["1-0", "0-1", "1/2-1/2", "*"];

/// Blank out everything in `text` that is not a move number or SAN move.
pub fn strip_annotations(text: &str) -> Result<String, SanError> {
    let chars: Vec<char> = text.chars().collect();
    let mut out = chars.clone();
    let mut open_variations: Vec<usize> = Vec::new();
    let mut result_at: Option<usize> = None;
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '{' => {
                let close = chars[i + 1..]
                    .iter()
                    .position(|c| *c == '}')
                    .map(|offset| i + 1 + offset)
                    .ok_or_else(|| syntax(i, "unterminated comment"))?;
                blank(&mut out, i, close + 1);
                i = close + 1;
            }
            '}' => return Err(syntax(i, "unbalanced '}'")),
            ';' => {
                let end = chars[i..]
                    .iter()
                    .position(|c| *c == '\n')
                    .map_or(chars.len(), |offset| i + offset);
                blank(&mut out, i, end);
                i = end;
            }
            '(' => {
                open_variations.push(i);
                blank(&mut out, i, i + 1);
                i += 1;
            }
            ')' => {
                if open_variations.pop().is_none() {
                    return Err(syntax(i, "unbalanced ')'"));
                }
                blank(&mut out, i, i + 1);
                i += 1;
            }
            c if c.is_whitespace() => i += 1,
            _ => {
                let start = i;
                while i < chars.len() && !ends_word(chars[i]) {
                    i += 1;
                }

                if !open_variations.is_empty() {
                    blank(&mut out, start, i);
                    continue;
                }
                if let Some(result) = result_at {
                    tracing::debug!(result_at = result, at = start, "Text after game result");
                    return Err(syntax(start, "unexpected text after game result"));
                }

                let word: String = chars[start..i].iter().collect();
                if RESULTS.contains(&word.as_str()) {
                    result_at = Some(start);
                    blank(&mut out, start, i);
                } else if word.starts_with('$') {
                    blank(&mut out, start, i);
                } else {
                    let glyphs = word
                        .chars()
                        .rev()
                        .take_while(|c| *c == '!' || *c == '?')
                        .count();
                    blank(&mut out, i - glyphs, i);
                }
            }
        }
    }

    if let Some(open) = open_variations.first() {
        return Err(syntax(*open, "unterminated variation"));
    }

    Ok(out.into_iter().collect())
}

fn ends_word(c: char) -> bool {
    c.is_whitespace() || matches!(c, '{' | '}' | ';' | '(' | ')')
}

fn blank(out: &mut [char], start: usize, end: usize) {
    for c in &mut out[start..end] {
        *c = ' ';
    }
}

fn syntax(at: usize, reason: &str) -> SanError {
    SanError::InvalidSyntax {
        at,
        reason: reason.to_string(),
    }
}
