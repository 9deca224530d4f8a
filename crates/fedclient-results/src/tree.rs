//! Recursive rendering of arbitrary JSON into a display tree.
//!
//! Arrays become ordered lists, objects become `Key: value` stacks in key
//! order, and scalars become leaves. The nesting level is threaded through
//! every descent and checked against [`TreeLimits::max_depth`].

use serde_json::Value;

use crate::format::{capitalize_first, format_value};
use crate::ResultsError;

pub const DEFAULT_MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeLimits {
    pub max_depth: usize,
}

impl Default for TreeLimits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyedEntry {
    /// Capitalized key.
    pub key: String,
    pub value: Fragment,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    List(Vec<Fragment>),
    Keyed(Vec<KeyedEntry>),
    Leaf(String),
}

impl Fragment {
    /// Flatten into indented display lines.
    ///
    /// Leaves are folded onto the line of the key or list marker that owns
    /// them; nested containers start on the following lines.
    pub fn lines(&self) -> Vec<TreeLine> {
        let mut out = Vec::new();
        push_lines(self, 0, &mut out);
        out
    }
}

/// One display line of a flattened [`Fragment`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeLine {
    pub indent: usize,
    /// `"Key:"` or `"1."`, absent for a bare leaf.
    pub marker: Option<String>,
    /// Leaf text folded onto this line, if any.
    pub text: Option<String>,
}

impl std::fmt::Display for TreeLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:width$}", "", width = self.indent * 2)?;
        match (&self.marker, &self.text) {
            (Some(marker), Some(text)) => write!(f, "{marker} {text}"),
            (Some(marker), None) => write!(f, "{marker}"),
            (None, Some(text)) => write!(f, "{text}"),
            (None, None) => Ok(()),
        }
    }
}

/// Render `value` found at nesting `level`.
pub fn render_tree(
    value: &Value,
    level: usize,
    limits: &TreeLimits,
) -> Result<Fragment, ResultsError> {
    if level > limits.max_depth {
        return Err(ResultsError::TooDeep {
            limit: limits.max_depth,
        });
    }
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| render_tree(item, level + 1, limits))
            .collect::<Result<Vec<_>, _>>()
            .map(Fragment::List),
        Value::Object(map) => map
            .iter()
            .map(|(key, value)| {
                Ok(KeyedEntry {
                    key: capitalize_first(key),
                    value: render_tree(value, level + 1, limits)?,
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Fragment::Keyed),
        Value::Null => Ok(Fragment::Leaf(String::new())),
        Value::String(text) => Ok(Fragment::Leaf(text.clone())),
        Value::Bool(flag) => Ok(Fragment::Leaf(flag.to_string())),
        Value::Number(number) => Ok(Fragment::Leaf(match number.as_f64() {
            Some(value) if number.is_f64() => format_value(value),
            _ => number.to_string(),
        })),
    }
}

fn push_lines(fragment: &Fragment, indent: usize, out: &mut Vec<TreeLine>) {
    match fragment {
        Fragment::Leaf(text) => out.push(TreeLine {
            indent,
            marker: None,
            text: Some(text.clone()),
        }),
        Fragment::List(items) => {
            for (index, item) in items.iter().enumerate() {
                push_child(format!("{}.", index + 1), item, indent, out);
            }
        }
        Fragment::Keyed(entries) => {
            for entry in entries {
                push_child(format!("{}:", entry.key), &entry.value, indent, out);
            }
        }
    }
}

fn push_child(marker: String, child: &Fragment, indent: usize, out: &mut Vec<TreeLine>) {
    match child {
        Fragment::Leaf(text) => out.push(TreeLine {
            indent,
            marker: Some(marker),
            text: Some(text.clone()),
        }),
        nested => {
            out.push(TreeLine {
                indent,
                marker: Some(marker),
                text: None,
            });
            push_lines(nested, indent + 1, out);
        }
    }
}
