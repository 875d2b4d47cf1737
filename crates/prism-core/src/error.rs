use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("reference to unknown token `{path}`")]
    Missing { path: String },
    #[error("alias cycle: {}", chain.join(" -> "))]
    Cycle { chain: Vec<String> },
    #[error("empty value")]
    Empty,
}
