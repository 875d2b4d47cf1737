use crate::error::FamilyError;
use prism_core::{resolve_detailed, FlatToken, FlatTokenMap};
use prism_data::{TokenLeaf, TokenNode};
use prism_scale::{generate, ColorAnchor, ColorFormat, TonalScale};
use prism_schema::{FamilyConfig, ResolvedFamily};
use std::collections::BTreeMap;
use tracing::{info, instrument, warn};

#[derive(Debug)]
pub struct FamilyFailure {
    pub family: String,
    pub error: FamilyError,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedFamily {
    pub name: String,
    pub path: String,
    pub scale: TonalScale,
}

/// New literal tokens derived from the configured families.
#[derive(Debug, Default)]
pub struct GeneratedTokens {
    /// Flat tokens to overlay on the base map.
    pub tokens: FlatTokenMap,
    /// The same tokens as a token tree, for the JSON snapshot.
    pub snapshot: TokenNode,
    pub families: Vec<GeneratedFamily>,
    pub failures: Vec<FamilyFailure>,
}

/// Generates every family against the base token map.
///
/// Anchors are read from `base` only, so families never see each other's
/// output and the order of families does not matter. A failing family
/// contributes no tokens at all.
#[instrument(level = "debug", skip_all, fields(families = families.len()))]
pub fn generate_families(
    families: &[FamilyConfig],
    step_tables: &BTreeMap<String, prism_scale::StepTable>,
    base: &FlatTokenMap,
    format: ColorFormat,
) -> GeneratedTokens {
    let mut out = GeneratedTokens::default();

    for family in families {
        match generate_family(family, step_tables, base) {
            Ok((resolved, scale)) => {
                for (step, value) in scale.render(format) {
                    let path = format!("{}.{}", resolved.path, step);
                    let description = (step == resolved.anchor_step)
                        .then(|| format!("Anchor of the {} scale", resolved.name));

                    let mut leaf = TokenLeaf::new(value.clone()).with_type("color");
                    leaf.description = description.clone();
                    let segments: Vec<&str> = path.split('.').collect();
                    out.snapshot.insert(&segments, TokenNode::Leaf(leaf));

                    if let Some(prior) = base.get(&path) {
                        if prior.value != value {
                            info!(path = %path, from = %prior.value, to = %value, "replacing token with generated value");
                        }
                    }
                    out.tokens.insert(
                        path,
                        FlatToken {
                            value,
                            ty: Some("color".to_string()),
                            description,
                            source: None,
                        },
                    );
                }
                info!(family = %resolved.name, steps = scale.steps.len(), "generated family");
                out.families.push(GeneratedFamily {
                    name: resolved.name,
                    path: resolved.path,
                    scale,
                });
            }
            Err(error) => {
                warn!(family = %family.name, %error, "family generation failed");
                out.failures.push(FamilyFailure {
                    family: family.name.clone(),
                    error,
                });
            }
        }
    }

    out
}

fn generate_family(
    family: &FamilyConfig,
    step_tables: &BTreeMap<String, prism_scale::StepTable>,
    base: &FlatTokenMap,
) -> Result<(ResolvedFamily, TonalScale), FamilyError> {
    let resolved = family.resolve(step_tables)?;
    let literal =
        resolve_detailed(&resolved.anchor, base).map_err(|source| FamilyError::Anchor {
            anchor: resolved.anchor.clone(),
            source,
        })?;
    let anchor = ColorAnchor::parse(&literal)?;
    let scale = generate(&anchor, &resolved.anchor_step, &resolved.steps, resolved.params)?;
    Ok((resolved, scale))
}
