//! Logic-less template rendering.
//!
//! Supports the mustache subset base16/base24 templates rely on:
//! `{{name}}` (HTML-escaped), `{{{name}}}`/`{{& name}}` (raw),
//! `{{#name}}…{{/name}}` and `{{^name}}…{{/name}}` gated on truthiness,
//! plus comments. Partials render nothing; there are no loops or helpers.
//! Unknown variables render as the empty string.

mod lexer;

use crate::error::TemplateError;
use crate::variables::VariableLookup;

use lexer::{tokenize, TagKind, Token};

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Text(String),
    Var { name: String, escape: bool },
    Section {
        name: String,
        inverted: bool,
        children: Vec<Node>,
    },
}

/// A parsed template, reusable across variable sets.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    nodes: Vec<Node>,
}

struct OpenSection {
    name: String,
    inverted: bool,
    offset: usize,
    children: Vec<Node>,
}

impl Template {
    pub fn parse(src: &str) -> Result<Self, TemplateError> {
        let mut root: Vec<Node> = Vec::new();
        let mut stack: Vec<OpenSection> = Vec::new();

        for token in tokenize(src)? {
            let node = match token {
                Token::Text("") => continue,
                Token::Text(text) => Node::Text(text.to_string()),
                Token::Tag { kind, name, offset } => match kind {
                    TagKind::Escaped | TagKind::Raw => Node::Var {
                        name: name.to_string(),
                        escape: kind == TagKind::Escaped,
                    },
                    TagKind::SectionOpen | TagKind::InvertedOpen => {
                        stack.push(OpenSection {
                            name: name.to_string(),
                            inverted: kind == TagKind::InvertedOpen,
                            offset,
                            children: Vec::new(),
                        });
                        continue;
                    }
                    TagKind::Close => {
                        let Some(open) = stack.pop() else {
                            return Err(TemplateError::UnknownSectionClose {
                                name: name.to_string(),
                                expected: None,
                            });
                        };
                        if open.name != name {
                            return Err(TemplateError::UnknownSectionClose {
                                name: name.to_string(),
                                expected: Some(open.name),
                            });
                        }
                        Node::Section {
                            name: open.name,
                            inverted: open.inverted,
                            children: open.children,
                        }
                    }
                    TagKind::Comment | TagKind::Partial => continue,
                },
            };
            match stack.last_mut() {
                Some(open) => open.children.push(node),
                None => root.push(node),
            }
        }

        if let Some(open) = stack.pop() {
            return Err(TemplateError::Syntax {
                message: format!("section `{}` is never closed", open.name),
                offset: open.offset,
            });
        }
        Ok(Self { nodes: root })
    }

    /// Render against `vars`. The result is not trimmed.
    pub fn render(&self, vars: &dyn VariableLookup) -> String {
        let mut out = String::new();
        render_nodes(&self.nodes, vars, &mut out);
        out
    }
}

/// Parse and render `src`, trimming surrounding whitespace from the output.
pub fn render(src: &str, vars: &dyn VariableLookup) -> Result<String, TemplateError> {
    let template = Template::parse(src)?;
    Ok(template.render(vars).trim().to_string())
}

fn render_nodes(nodes: &[Node], vars: &dyn VariableLookup, out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Var { name, escape } => {
                if let Some(value) = vars.resolve(name) {
                    let text = value.to_string();
                    if *escape {
                        push_html_escaped(&text, out);
                    } else {
                        out.push_str(&text);
                    }
                }
            }
            Node::Section {
                name,
                inverted,
                children,
            } => {
                let truthy = vars.resolve(name).is_some_and(|v| v.is_truthy());
                if truthy != *inverted {
                    render_nodes(children, vars, out);
                }
            }
        }
    }
}

fn push_html_escaped(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
}
