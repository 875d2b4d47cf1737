use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

pub const VALUE_KEY: &str = "$value";
pub const TYPE_KEY: &str = "$type";
pub const DESCRIPTION_KEY: &str = "$description";

/// A node of a design token tree.
///
/// Leaves carry a `$value`; groups map child names to nodes. Keys starting
/// with `$` are metadata and never become children.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenNode {
    Leaf(TokenLeaf),
    Group(BTreeMap<String, TokenNode>),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TokenLeaf {
    /// Literal (`#066a8d`, `8px`) or alias reference (`{color.brand.700}`).
    pub value: String,
    pub ty: Option<String>,
    pub description: Option<String>,
}

/// A problem with the shape of a token document that does not stop the run.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuralIssue {
    /// Dotted path of the offending node (empty for the document root).
    pub path: String,
    pub message: String,
}

impl Default for TokenNode {
    fn default() -> Self {
        TokenNode::Group(BTreeMap::new())
    }
}

impl TokenLeaf {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ty: None,
            description: None,
        }
    }

    pub fn with_type(mut self, ty: impl Into<String>) -> Self {
        self.ty = Some(ty.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl TokenNode {
    pub fn leaf(value: impl Into<String>) -> Self {
        TokenNode::Leaf(TokenLeaf::new(value))
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, TokenNode::Leaf(_))
    }

    /// Builds a node from arbitrary JSON, collecting structural issues instead of failing.
    ///
    /// Non-object values become empty groups. A group-level `$type` is inherited by
    /// descendant leaves that do not declare their own.
    pub fn from_value(value: &Value) -> (TokenNode, Vec<StructuralIssue>) {
        let mut issues = Vec::new();
        let mut path = Vec::new();
        let node = node_from_value(value, &mut path, None, &mut issues);
        (node, issues)
    }

    pub fn to_value(&self) -> Value {
        match self {
            TokenNode::Leaf(leaf) => {
                let mut obj = Map::new();
                obj.insert(VALUE_KEY.to_string(), Value::String(leaf.value.clone()));
                if let Some(ty) = &leaf.ty {
                    obj.insert(TYPE_KEY.to_string(), Value::String(ty.clone()));
                }
                if let Some(desc) = &leaf.description {
                    obj.insert(DESCRIPTION_KEY.to_string(), Value::String(desc.clone()));
                }
                Value::Object(obj)
            }
            TokenNode::Group(children) => Value::Object(
                children
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_value()))
                    .collect(),
            ),
        }
    }

    /// Inserts `node` at `path`, creating intermediate groups.
    ///
    /// A leaf sitting where a group is needed is replaced.
    pub fn insert(&mut self, path: &[&str], node: TokenNode) {
        let Some((first, rest)) = path.split_first() else {
            *self = node;
            return;
        };
        if self.is_leaf() {
            *self = TokenNode::default();
        }
        if let TokenNode::Group(children) = self {
            let child = children.entry((*first).to_string()).or_default();
            child.insert(rest, node);
        }
    }

    pub fn get(&self, path: &[&str]) -> Option<&TokenNode> {
        match path.split_first() {
            None => Some(self),
            Some((first, rest)) => match self {
                TokenNode::Group(children) => children.get(*first)?.get(rest),
                TokenNode::Leaf(_) => None,
            },
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            TokenNode::Leaf(_) => 1,
            TokenNode::Group(children) => children.values().map(TokenNode::leaf_count).sum(),
        }
    }
}

fn node_from_value(
    value: &Value,
    path: &mut Vec<String>,
    inherited_type: Option<&str>,
    issues: &mut Vec<StructuralIssue>,
) -> TokenNode {
    let Value::Object(obj) = value else {
        return TokenNode::default();
    };

    let ty = obj
        .get(TYPE_KEY)
        .and_then(Value::as_str)
        .or(inherited_type);
    let description = obj.get(DESCRIPTION_KEY).and_then(Value::as_str);

    if let Some(raw) = obj.get(VALUE_KEY) {
        let value = match raw {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            other => {
                issues.push(StructuralIssue {
                    path: path.join("."),
                    message: format!(
                        "`$value` must be a string, number or boolean, found {}",
                        json_kind(other)
                    ),
                });
                return TokenNode::default();
            }
        };
        return TokenNode::Leaf(TokenLeaf {
            value,
            ty: ty.map(str::to_string),
            description: description.map(str::to_string),
        });
    }

    let mut children = BTreeMap::new();
    for (key, child) in obj {
        if key.starts_with('$') {
            continue;
        }
        path.push(key.clone());
        let node = node_from_value(child, path, ty, issues);
        path.pop();
        children.insert(key.clone(), node);
    }

    // Metadata without a value and without children is a leaf missing its `$value`.
    let has_leaf_metadata = obj.contains_key(TYPE_KEY) || obj.contains_key(DESCRIPTION_KEY);
    if children.is_empty() && has_leaf_metadata && !path.is_empty() {
        issues.push(StructuralIssue {
            path: path.join("."),
            message: "token is missing required `$value`".to_string(),
        });
    }

    TokenNode::Group(children)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl Serialize for TokenNode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TokenNode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(TokenNode::from_value(&value).0)
    }
}
