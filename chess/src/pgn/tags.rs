//! Reader for the `[Key "Value"]` tag pairs that open a PGN record.

use std::collections::HashMap;

use crate::scan::Scanner;

/// Read the tag section: leading whitespace and any number of tag pairs.
///
/// Stops at the first rune that is neither whitespace nor `[` and pushes it
/// back, leaving the scanner at the start of the move text. Reaching the end
/// of input between tag pairs is not an error. A repeated key keeps the last
/// value.
pub fn read_tags<I>(scanner: &mut Scanner<I>) -> Result<HashMap<String, String>, TagError>
where
    I: Iterator<Item = char>,
{
    read_tag_block(scanner).map(|block| block.tags)
}

/// Tag pairs plus the input offset of every rune of every decoded value.
#[derive(Debug, Clone, Default)]
pub(crate) struct TagBlock {
    pub(crate) tags: HashMap<String, String>,
    pub(crate) value_offsets: HashMap<String, Vec<usize>>,
}

pub(crate) fn read_tag_block<I>(scanner: &mut Scanner<I>) -> Result<TagBlock, TagError>
where
    I: Iterator<Item = char>,
{
    let mut block = TagBlock::default();
    while let Some(c) = scanner.next_rune() {
        if c.is_whitespace() {
            continue;
        }
        if c != '[' {
            scanner.unread(c);
            break;
        }
        let (key, value, offsets) = read_tag(scanner)?;
        block.value_offsets.insert(key.clone(), offsets);
        block.tags.insert(key, value);
    }
    Ok(block)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagState {
    Key,
    Space,
    Value,
    Escape,
}

/// Read one tag pair; the opening `[` has already been consumed.
fn read_tag<I>(scanner: &mut Scanner<I>) -> Result<(String, String, Vec<usize>), TagError>
where
    I: Iterator<Item = char>,
{
    let mut key = String::new();
    let mut value = String::new();
    let mut offsets = Vec::new();
    let mut state = TagState::Key;

    loop {
        let at = scanner.offset();
        let c = scanner.next_rune().ok_or_else(|| TagError::InvalidSyntax {
            at,
            reason: "unexpected end of input inside tag".to_string(),
        })?;

        state = match state {
            TagState::Key if c.is_whitespace() => {
                if key.is_empty() {
                    return Err(TagError::InvalidSyntax {
                        at,
                        reason: "empty tag name".to_string(),
                    });
                }
                TagState::Space
            }
            TagState::Key if c.is_alphanumeric() || c == '_' => {
                key.push(c);
                TagState::Key
            }
            TagState::Key => return Err(TagError::InvalidRune { at, rune: c }),
            TagState::Space if c == '"' => TagState::Value,
            TagState::Space if c.is_whitespace() => TagState::Space,
            TagState::Space => {
                return Err(TagError::InvalidSyntax {
                    at,
                    reason: format!("expected '\"', got {c:?}"),
                })
            }
            TagState::Value if c == '\\' => TagState::Escape,
            TagState::Value if c == '"' => break,
            TagState::Value => {
                value.push(c);
                offsets.push(at);
                TagState::Value
            }
            TagState::Escape if c == '\\' || c == '"' => {
                value.push(c);
                offsets.push(at);
                TagState::Value
            }
            TagState::Escape => {
                return Err(TagError::InvalidSyntax {
                    at,
                    reason: format!("invalid escape sequence \"\\{c}\""),
                })
            }
        };
    }

    loop {
        let at = scanner.offset();
        match scanner.next_rune() {
            Some(']') => return Ok((key, value, offsets)),
            Some(c) if c.is_whitespace() => continue,
            Some(c) => {
                return Err(TagError::InvalidSyntax {
                    at,
                    reason: format!("expected ']', got {c:?}"),
                })
            }
            None => {
                return Err(TagError::InvalidSyntax {
                    at,
                    reason: "unexpected end of input, expected ']'".to_string(),
                })
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TagError {
    #[error("Invalid character {rune:?} in tag name at position {at}")]
    InvalidRune { at: usize, rune: char },
    #[error("Invalid tag syntax at {at}: {reason}")]
    InvalidSyntax { at: usize, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(input: &str) -> (Result<HashMap<String, String>, TagError>, String) {
        let mut scanner = Scanner::new(input.chars());
        let tags = read_tags(&mut scanner);
        (tags, scanner.rest())
    }

    #[test]
    fn test_reads_tags_and_stops_at_movetext() {
        let (tags, rest) = read("[Foo \"bar\"]\n[Baz \"quux\"]\n\n1. e4 e5");
        let tags = tags.unwrap();
        assert_eq!(tags.len(), 2);
        assert_eq!(tags["Foo"], "bar");
        assert_eq!(tags["Baz"], "quux");
        assert_eq!(rest, "1. e4 e5");
    }

    #[test]
    fn test_no_tags() {
        let (tags, rest) = read("  1. e4");
        assert!(tags.unwrap().is_empty());
        assert_eq!(rest, "1. e4");
    }

    #[test]
    fn test_end_of_input_after_tags() {
        let (tags, rest) = read("[Event \"Casual\"]\n");
        assert_eq!(tags.unwrap()["Event"], "Casual");
        assert_eq!(rest, "");
    }

    #[test]
    fn test_escape_sequences() {
        let (tags, _) = read(r#"[Foo "ba\"r"] [Baz "qu\\ux"]"#);
        let tags = tags.unwrap();
        assert_eq!(tags["Foo"], "ba\"r");
        assert_eq!(tags["Baz"], "qu\\ux");
    }

    #[test]
    fn test_value_keeps_spaces_and_brackets() {
        let (tags, _) = read(r#"[FEN "k7/8/8/8/8/8/8/K7 w - - 0 1"] [Note "a [b] c"]"#);
        let tags = tags.unwrap();
        assert_eq!(tags["FEN"], "k7/8/8/8/8/8/8/K7 w - - 0 1");
        assert_eq!(tags["Note"], "a [b] c");
    }

    #[test]
    fn test_value_offsets_skip_escapes() {
        let mut scanner = Scanner::new(r#"[A "b"] [Foo "x\"y"]"#.chars());
        let block = read_tag_block(&mut scanner).unwrap();
        assert_eq!(block.tags["Foo"], "x\"y");
        assert_eq!(block.value_offsets["A"], [4]);
        assert_eq!(block.value_offsets["Foo"], [14, 16, 17]);
    }

    #[test]
    fn test_duplicate_key_overwrites() {
        let (tags, _) = read(r#"[Round "1"] [Round "2"]"#);
        assert_eq!(tags.unwrap()["Round"], "2");
    }

    #[test]
    fn test_invalid_escape() {
        let (tags, _) = read(r#"[Foo "ba\nr"]"#);
        assert!(matches!(tags, Err(TagError::InvalidSyntax { at: 9, .. })));
    }

    #[test]
    fn test_missing_closing_bracket() {
        let (tags, _) = read("[Foo \"bar\" 1. e4");
        assert!(matches!(tags, Err(TagError::InvalidSyntax { at: 11, .. })));
    }

    #[test]
    fn test_unterminated_value() {
        let (tags, _) = read("[Foo \"bar");
        assert!(matches!(tags, Err(TagError::InvalidSyntax { at: 9, .. })));
    }

    #[test]
    fn test_missing_quote() {
        let (tags, _) = read("[Foo bar]");
        assert!(matches!(tags, Err(TagError::InvalidSyntax { at: 5, .. })));
    }

    #[test]
    fn test_invalid_key_rune() {
        let (tags, _) = read("[Fo\"o \"bar\"]");
        assert_eq!(tags, Err(TagError::InvalidRune { at: 3, rune: '"' }));
    }

    #[test]
    fn test_empty_key() {
        let (tags, _) = read("[ \"bar\"]");
        assert!(matches!(tags, Err(TagError::InvalidSyntax { at: 1, .. })));
    }
}
