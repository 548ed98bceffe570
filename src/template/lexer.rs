//! Tag scanner with standalone-line handling.

use crate::error::TemplateError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum TagKind {
    /// `{{name}}`
    Escaped,
    /// `{{{name}}}` or `{{& name}}`
    Raw,
    /// `{{#name}}`
    SectionOpen,
    /// `{{^name}}`
    InvertedOpen,
    /// `{{/name}}`
    Close,
    /// `{{! ...}}`
    Comment,
    /// `{{> name}}`
    Partial,
}

impl TagKind {
    /// Tags that vanish together with their line when alone on it.
    fn can_stand_alone(self) -> bool {
        !matches!(self, Self::Escaped | Self::Raw)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Token<'a> {
    Text(&'a str),
    Tag {
        kind: TagKind,
        name: &'a str,
        offset: usize,
    },
}

/// Split `src` into text and tag tokens, then strip standalone tag lines.
pub(super) fn tokenize(src: &str) -> Result<Vec<Token<'_>>, TemplateError> {
    let mut tokens = scan(src)?;
    strip_standalone_lines(&mut tokens);
    Ok(tokens)
}

fn scan(src: &str) -> Result<Vec<Token<'_>>, TemplateError> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    while let Some(rel) = src[pos..].find("{{") {
        let start = pos + rel;
        if start > pos {
            tokens.push(Token::Text(&src[pos..start]));
        }
        let body_start = start + 2;
        let unterminated = || TemplateError::Syntax {
            message: "unterminated tag".to_string(),
            offset: start,
        };

        let (kind, name) = if src[body_start..].starts_with('{') {
            let inner = body_start + 1;
            let close = src[inner..].find("}}}").ok_or_else(unterminated)?;
            pos = inner + close + 3;
            (TagKind::Raw, src[inner..inner + close].trim())
        } else {
            let close = src[body_start..].find("}}").ok_or_else(unterminated)?;
            pos = body_start + close + 2;
            classify(&src[body_start..body_start + close], start)?
        };

        if name.is_empty() && kind != TagKind::Comment {
            return Err(TemplateError::Syntax {
                message: "empty tag name".to_string(),
                offset: start,
            });
        }
        tokens.push(Token::Tag {
            kind,
            name,
            offset: start,
        });
    }

    if pos < src.len() {
        tokens.push(Token::Text(&src[pos..]));
    }
    Ok(tokens)
}

fn classify(body: &str, offset: usize) -> Result<(TagKind, &str), TemplateError> {
    let body = body.trim();
    let Some(sigil) = body.chars().next() else {
        return Ok((TagKind::Escaped, body));
    };
    let rest = body[sigil.len_utf8()..].trim();
    let tagged = match sigil {
        '#' => (TagKind::SectionOpen, rest),
        '^' => (TagKind::InvertedOpen, rest),
        '/' => (TagKind::Close, rest),
        '!' => (TagKind::Comment, rest),
        '>' => (TagKind::Partial, rest),
        '&' => (TagKind::Raw, rest),
        '=' => {
            return Err(TemplateError::Syntax {
                message: "custom delimiters are not supported".to_string(),
                offset,
            })
        }
        _ => (TagKind::Escaped, body),
    };
    Ok(tagged)
}

fn is_inline_space(ch: char) -> bool {
    ch == ' ' || ch == '\t'
}

/// Length of the whitespace run after the last newline, if the token that
/// follows it starts a line.
fn line_start_indent(text: &str, is_first_token: bool) -> Option<usize> {
    let tail = match text.rfind('\n') {
        Some(idx) => &text[idx + 1..],
        None if is_first_token => text,
        None => return None,
    };
    tail.chars().all(is_inline_space).then_some(tail.len())
}

/// Length of the whitespace run plus line break that ends the current line.
fn line_end_len(text: &str, is_last_token: bool) -> Option<usize> {
    match text.find('\n') {
        Some(idx) => {
            let head = text[..idx].strip_suffix('\r').unwrap_or(&text[..idx]);
            head.chars().all(is_inline_space).then_some(idx + 1)
        }
        None if is_last_token && text.chars().all(is_inline_space) => Some(text.len()),
        None => None,
    }
}

fn strip_standalone_lines(tokens: &mut [Token<'_>]) {
    let last = tokens.len().saturating_sub(1);
    // (cut_front, cut_back) per token; decided on the untouched texts first.
    let mut cuts = vec![(0usize, 0usize); tokens.len()];

    for i in 0..tokens.len() {
        let Token::Tag { kind, .. } = tokens[i] else {
            continue;
        };
        if !kind.can_stand_alone() {
            continue;
        }

        let before = if i == 0 {
            Some(0)
        } else {
            match tokens[i - 1] {
                Token::Text(text) => line_start_indent(text, i - 1 == 0),
                Token::Tag { .. } => None,
            }
        };
        let after = if i == last {
            Some(0)
        } else {
            match tokens[i + 1] {
                Token::Text(text) => line_end_len(text, i + 1 == last),
                Token::Tag { .. } => None,
            }
        };

        if let (Some(indent), Some(line_end)) = (before, after) {
            if i > 0 {
                cuts[i - 1].1 = indent;
            }
            if i < last {
                cuts[i + 1].0 = line_end;
            }
        }
    }

    for (token, (front, back)) in tokens.iter_mut().zip(cuts) {
        if let Token::Text(text) = token {
            let current: &str = *text;
            let end = current.len() - back;
            *text = if front < end { &current[front..end] } else { "" };
        }
    }
}
