use crate::alias::parse_alias;
use crate::error::ResolveError;
use crate::flatten::{FlatToken, FlatTokenMap};
use std::collections::{BTreeMap, HashSet};
use tracing::{instrument, warn};

/// Resolves `reference` to a literal, or `None` if the chain is broken or cyclic.
///
/// Non-alias input is returned unchanged unless it is empty.
pub fn resolve(reference: &str, map: &FlatTokenMap) -> Option<String> {
    resolve_detailed(reference, map).ok()
}

/// Like [`resolve`], but says why resolution failed.
pub fn resolve_detailed(reference: &str, map: &FlatTokenMap) -> Result<String, ResolveError> {
    follow(reference, map).map(|(value, _)| value.to_string())
}

/// Walks the alias chain and returns the literal plus the token that holds it.
fn follow<'m>(
    reference: &'m str,
    map: &'m FlatTokenMap,
) -> Result<(&'m str, Option<&'m FlatToken>), ResolveError> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut chain: Vec<&str> = Vec::new();
    let mut current = reference;
    let mut holder = None;

    loop {
        let Some(path) = parse_alias(current) else {
            if current.is_empty() {
                return Err(ResolveError::Empty);
            }
            return Ok((current, holder));
        };

        chain.push(path);
        if !seen.insert(path) {
            return Err(ResolveError::Cycle {
                chain: chain.iter().map(|p| p.to_string()).collect(),
            });
        }

        let token = map.get(path).ok_or_else(|| ResolveError::Missing {
            path: path.to_string(),
        })?;
        holder = Some(token);
        current = &token.value;
    }
}

/// A token whose value has been resolved to a literal.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedToken {
    pub path: String,
    pub value: String,
    /// The token's own type, or the type of the token its alias chain ends at.
    pub ty: Option<String>,
    pub description: Option<String>,
    /// The original alias reference, if the token was an alias.
    pub alias: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnresolvedToken {
    pub path: String,
    pub reference: String,
    pub error: ResolveError,
}

/// Outcome of resolving every token of a map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedTokens {
    pub tokens: BTreeMap<String, ResolvedToken>,
    pub unresolved: Vec<UnresolvedToken>,
}

impl ResolvedTokens {
    pub fn resolved_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn unresolved_count(&self) -> usize {
        self.unresolved.len()
    }

    pub fn get(&self, path: &str) -> Option<&ResolvedToken> {
        self.tokens.get(path)
    }

    /// Resolved tokens in path order.
    pub fn iter(&self) -> impl Iterator<Item = &ResolvedToken> {
        self.tokens.values()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Resolves every token in `map`. Failures are collected, never raised.
#[instrument(level = "debug", skip_all, fields(tokens = map.len()))]
pub fn resolve_all(map: &FlatTokenMap) -> ResolvedTokens {
    let mut out = ResolvedTokens::default();

    for (path, token) in map {
        match follow(&token.value, map) {
            Ok((value, holder)) => {
                let ty = token
                    .ty
                    .clone()
                    .or_else(|| holder.and_then(|h| h.ty.clone()));
                let alias = parse_alias(&token.value).map(|_| token.value.clone());
                out.tokens.insert(
                    path.clone(),
                    ResolvedToken {
                        path: path.clone(),
                        value: value.to_string(),
                        ty,
                        description: token.description.clone(),
                        alias,
                    },
                );
            }
            Err(error) => {
                warn!(path = %path, reference = %token.value, %error, "unresolved token");
                out.unresolved.push(UnresolvedToken {
                    path: path.clone(),
                    reference: token.value.clone(),
                    error,
                });
            }
        }
    }

    out
}
