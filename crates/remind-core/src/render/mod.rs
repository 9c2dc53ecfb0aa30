//! Template rendering - `{placeholder}` substitution against a context map
//!
//! Substitution is an explicit scan over the pattern rather than any native
//! formatting machinery: the context is a plain string map with defined
//! collision rules (caller-supplied custom data overrides computed fields),
//! and an unresolved placeholder is a recoverable error naming the key.

use std::collections::HashMap;

use thiserror::Error;

/// Rendering failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("Missing template variable '{0}'")]
    MissingKey(String),

    #[error("Unbalanced brace in template at byte {0}")]
    UnbalancedBrace(usize),
}

/// Context map fed into template substitution
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    values: HashMap<String, String>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a computed field
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Overlay caller-supplied data; its keys win on collision
    pub fn overlay(&mut self, data: &HashMap<String, String>) {
        for (k, v) in data {
            self.values.insert(k.clone(), v.clone());
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

/// Substitute `{placeholder}` tokens in `pattern` from the context.
///
/// `{{` and `}}` are literal braces.
pub fn render_template(pattern: &str, ctx: &RenderContext) -> Result<String, RenderError> {
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        match c {
            '{' => {
                if matches!(chars.peek(), Some((_, '{'))) {
                    chars.next();
                    out.push('{');
                    continue;
                }
                let mut key = String::new();
                let mut closed = false;
                for (_, k) in chars.by_ref() {
                    if k == '}' {
                        closed = true;
                        break;
                    }
                    key.push(k);
                }
                if !closed {
                    return Err(RenderError::UnbalancedBrace(pos));
                }
                match ctx.get(&key) {
                    Some(value) => out.push_str(value),
                    None => return Err(RenderError::MissingKey(key)),
                }
            }
            '}' => {
                if matches!(chars.peek(), Some((_, '}'))) {
                    chars.next();
                    out.push('}');
                } else {
                    return Err(RenderError::UnbalancedBrace(pos));
                }
            }
            _ => out.push(c),
        }
    }

    Ok(out)
}
