use prism_data::{TokenDocument, TokenNode};
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{debug, instrument};

/// A leaf token addressed by its dotted path.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FlatToken {
    pub value: String,
    pub ty: Option<String>,
    pub description: Option<String>,
    /// File the token was read from, when known.
    pub source: Option<PathBuf>,
}

impl FlatToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Default::default()
        }
    }

    pub fn with_type(mut self, ty: impl Into<String>) -> Self {
        self.ty = Some(ty.into());
        self
    }
}

/// Dotted path -> token. Iteration is ordered by path.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FlatTokenMap {
    tokens: BTreeMap<String, FlatToken>,
}

impl FlatTokenMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Option<&FlatToken> {
        self.tokens.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.tokens.contains_key(path)
    }

    /// Inserts a token, returning the one it replaced.
    pub fn insert(&mut self, path: impl Into<String>, token: FlatToken) -> Option<FlatToken> {
        self.tokens.insert(path.into(), token)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, FlatToken> {
        self.tokens.iter()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.tokens.keys().map(String::as_str)
    }

    /// Overlays `other` on top of `self`; tokens in `other` win.
    pub fn extend(&mut self, other: FlatTokenMap) {
        self.tokens.extend(other.tokens);
    }
}

impl<'a> IntoIterator for &'a FlatTokenMap {
    type Item = (&'a String, &'a FlatToken);
    type IntoIter = btree_map::Iter<'a, String, FlatToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

impl FromIterator<(String, FlatToken)> for FlatTokenMap {
    fn from_iter<I: IntoIterator<Item = (String, FlatToken)>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().collect(),
        }
    }
}

/// Flattens a token tree into dotted paths, prefixed with `prefix`.
pub fn flatten(root: &TokenNode, prefix: &[&str]) -> FlatTokenMap {
    let mut map = FlatTokenMap::new();
    let mut path: Vec<String> = prefix.iter().map(|s| s.to_string()).collect();
    flatten_into(root, &mut path, None, &mut map);
    map
}

fn flatten_into(
    node: &TokenNode,
    path: &mut Vec<String>,
    source: Option<&PathBuf>,
    map: &mut FlatTokenMap,
) {
    match node {
        TokenNode::Leaf(leaf) => {
            map.insert(
                path.join("."),
                FlatToken {
                    value: leaf.value.clone(),
                    ty: leaf.ty.clone(),
                    description: leaf.description.clone(),
                    source: source.cloned(),
                },
            );
        }
        TokenNode::Group(children) => {
            for (name, child) in children {
                path.push(name.clone());
                flatten_into(child, path, source, map);
                path.pop();
            }
        }
    }
}

/// A path defined by more than one document.
#[derive(Debug, Clone, PartialEq)]
pub struct DuplicateToken {
    pub path: String,
    /// Document whose definition was replaced.
    pub shadowed: Option<PathBuf>,
    /// Document whose definition won.
    pub winner: PathBuf,
}

#[derive(Debug, Clone, Default)]
pub struct MergedTokens {
    pub map: FlatTokenMap,
    pub duplicates: Vec<DuplicateToken>,
}

/// Flattens every document into one map so aliases can cross files.
///
/// Later documents win over earlier ones; every override is recorded.
#[instrument(level = "debug", skip_all, fields(documents = documents.len()))]
pub fn merge(documents: &[TokenDocument]) -> MergedTokens {
    let mut merged = MergedTokens::default();
    for doc in documents {
        let mut doc_map = FlatTokenMap::new();
        flatten_into(&doc.root, &mut Vec::new(), Some(&doc.source), &mut doc_map);
        debug!(path = %doc.source.display(), tokens = doc_map.len(), "flattened document");

        for (path, token) in doc_map.tokens {
            if let Some(previous) = merged.map.insert(path.clone(), token) {
                merged.duplicates.push(DuplicateToken {
                    path,
                    shadowed: previous.source,
                    winner: doc.source.clone(),
                });
            }
        }
    }
    merged
}
