//! # Prism Core
//!
//! Turns parsed token documents into resolved literals.
//!
//! ## Responsibilities
//! - **Flattening**: token trees become a [`FlatTokenMap`] keyed by dotted path.
//! - **Merging**: many documents share one map so aliases can cross files.
//! - **Alias resolution**: `{a.b.c}` references are followed to a literal, with
//!   cycle detection so resolution always terminates.

pub mod alias;
pub mod error;
pub mod flatten;
pub mod resolve;

pub use alias::{format_alias, is_alias, parse_alias};
pub use error::ResolveError;
pub use flatten::{flatten, merge, DuplicateToken, FlatToken, FlatTokenMap, MergedTokens};
pub use resolve::{
    resolve, resolve_all, resolve_detailed, ResolvedToken, ResolvedTokens, UnresolvedToken,
};
