//! Depth-synchronized matching of tokens against a source document.
//!
//! Every token gets its own pre-order walk of the document. A token's path
//! segment `i` only matches a key found at depth `i`. Once a segment has
//! matched, the rest of the walk only considers nodes exactly one level deeper
//! than that match, and the first of them carrying the next segment's key is
//! taken. Nothing is retried: the walk never returns to an earlier candidate,
//! so paths are expected to be unambiguous against the document's shape.
//!
//! A token whose path does not exist in the document contributes nothing and
//! raises no error.

use indexmap::IndexMap;
use log::{debug, trace, warn};

use super::assertion::validate;
use super::ast::Token;
use super::error::TransitionError;
use super::result::ResultSet;
use crate::document::DataValue;

/// The key a node is stored under in its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKey<'a> {
    Name(&'a str),
    Index(usize),
}

impl NodeKey<'_> {
    /// Compares against a path segment. List indices match their decimal text.
    pub fn matches(&self, segment: &str) -> bool {
        match self {
            NodeKey::Name(name) => *name == segment,
            // Only the canonical decimal form, so "01" and "+1" never match 1
            NodeKey::Index(idx) => segment == idx.to_string(),
        }
    }
}

/// A node visited during the walk. Direct children of the root are at depth 0.
#[derive(Debug, Clone, Copy)]
pub struct Visit<'a> {
    pub key: NodeKey<'a>,
    pub value: &'a DataValue,
    pub depth: usize,
}

enum Children<'a> {
    Object(indexmap::map::Iter<'a, String, DataValue>),
    Array(std::iter::Enumerate<std::slice::Iter<'a, DataValue>>),
}

impl<'a> Children<'a> {
    fn of(value: &'a DataValue) -> Option<Self> {
        match value {
            DataValue::Object(entries) => Some(Children::Object(entries.iter())),
            DataValue::Array(items) => Some(Children::Array(items.iter().enumerate())),
            _ => None,
        }
    }

    fn next(&mut self) -> Option<(NodeKey<'a>, &'a DataValue)> {
        match self {
            Children::Object(iter) => iter.next().map(|(k, v)| (NodeKey::Name(k.as_str()), v)),
            Children::Array(iter) => iter.next().map(|(i, v)| (NodeKey::Index(i), v)),
        }
    }
}

/// Pre-order, depth-first iterator over every node below a root.
///
/// Map entries are visited in insertion order, list items by index, and each
/// node is yielded before its children.
pub struct PreOrder<'a> {
    stack: Vec<(usize, Children<'a>)>,
}

impl<'a> PreOrder<'a> {
    pub fn new(root: &'a DataValue) -> Self {
        Self {
            stack: Children::of(root).map(|c| (0, c)).into_iter().collect(),
        }
    }
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = Visit<'a>;

    fn next(&mut self) -> Option<Visit<'a>> {
        loop {
            let (depth, next) = {
                let (depth, children) = self.stack.last_mut()?;
                (*depth, children.next())
            };
            match next {
                Some((key, value)) => {
                    if let Some(children) = Children::of(value) {
                        self.stack.push((depth + 1, children));
                    }
                    return Some(Visit { key, value, depth });
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

/// Progress of one token along its path.
struct Cursor<'t> {
    path: &'t [String],
    searching_for: usize,
    previous_depth: Option<usize>,
    in_search_mode: bool,
}

impl<'t> Cursor<'t> {
    fn new(path: &'t [String]) -> Self {
        Self {
            path,
            searching_for: 0,
            previous_depth: None,
            in_search_mode: false,
        }
    }

    /// Feeds one visited node; returns true when it is the token's target.
    fn offer(&mut self, visit: &Visit<'_>) -> bool {
        let previous = *self.previous_depth.get_or_insert(visit.depth);
        if self.in_search_mode && visit.depth != previous + 1 {
            return false;
        }

        let Some(segment) = self.path.get(self.searching_for) else {
            return false;
        };
        if visit.depth != self.searching_for || !visit.key.matches(segment) {
            return false;
        }

        if visit.depth + 1 == self.path.len() {
            return true;
        }

        trace!("matched '{}' at depth {}", segment, visit.depth);
        self.previous_depth = Some(visit.depth);
        self.searching_for += 1;
        self.in_search_mode = true;
        false
    }
}

/// Locates the value a token's path describes, if the document has one.
pub fn find<'a>(token: &Token, root: &'a DataValue) -> Option<&'a DataValue> {
    let mut cursor = Cursor::new(&token.path);
    PreOrder::new(root)
        .find(|visit| cursor.offer(visit))
        .map(|visit| visit.value)
}

/// Resolves every token against `root`, validates what was found, and
/// collects the values under their output names in token order.
///
/// A later token with the same output name replaces the earlier value in place.
pub fn match_tokens(tokens: &[Token], root: &DataValue) -> Result<ResultSet, TransitionError> {
    let mut entries = IndexMap::new();

    for token in tokens {
        match find(token, root) {
            Some(value) => {
                validate(value, token)?;
                debug!(
                    "transition '{}' resolved to {} stored as '{}'",
                    token.expression,
                    value.type_name(),
                    token.output_name()
                );
                entries.insert(token.output_name().to_string(), value.clone());
            }
            None => warn!("transition '{}' matched nothing", token.expression),
        }
    }

    if entries.is_empty() {
        return Err(TransitionError::NoMatches);
    }
    Ok(ResultSet::new(entries))
}
