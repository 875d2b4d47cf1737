//! # Scale Module
//!
//! Derives a tonal scale from one anchor color.
//!
//! Every step sits at a lightness offset from the anchor. Chroma falls off
//! along a parabola of the normalized distance `d = |offset| / max|offset|`,
//! so midrange steps keep most of the anchor's colorfulness while the extreme
//! steps lose it quickly. Hue may drift linearly with `d`, in the direction
//! of the offset. The anchor step is never recomputed.

use crate::color::{format_hex, ColorAnchor, ColorFormat, OklchColor};
use crate::error::ScaleError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Ordered step name -> lightness offset (percentage points) from the anchor.
///
/// Steps are kept in numeric order when their names are numbers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, f64>", into = "BTreeMap<String, f64>")]
pub struct StepTable {
    steps: Vec<(String, f64)>,
}

impl StepTable {
    pub fn new<I, S>(steps: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut steps: Vec<(String, f64)> =
            steps.into_iter().map(|(s, o)| (s.into(), o)).collect();
        steps.sort_by(|a, b| compare_step_names(&a.0, &b.0));
        steps.dedup_by(|a, b| a.0 == b.0);
        Self { steps }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.steps.iter().map(|(s, o)| (s.as_str(), *o))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(|(s, _)| s.as_str())
    }

    pub fn offset(&self, step: &str) -> Option<f64> {
        self.steps.iter().find(|(s, _)| s == step).map(|(_, o)| *o)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Largest absolute offset; the distance that maps to `d = 1`.
    pub fn max_offset_magnitude(&self) -> f64 {
        self.steps.iter().map(|(_, o)| o.abs()).fold(0.0, f64::max)
    }
}

impl From<BTreeMap<String, f64>> for StepTable {
    fn from(map: BTreeMap<String, f64>) -> Self {
        StepTable::new(map)
    }
}

impl From<StepTable> for BTreeMap<String, f64> {
    fn from(table: StepTable) -> Self {
        table.steps.into_iter().collect()
    }
}

fn compare_step_names(a: &str, b: &str) -> Ordering {
    match (a.parse::<u32>(), b.parse::<u32>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// Per-family softness of a scale.
#[derive(Copy, Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleParams {
    /// Fraction of the anchor's chroma lost at the most distant step.
    pub chroma_reduction: f64,
    /// Hue drift in degrees at the most distant step.
    pub hue_shift: f64,
    /// Achromatic family: every step gets `C = 0`, `H = 0`.
    pub neutral: bool,
}

impl ScaleParams {
    pub fn new(chroma_reduction: f64, hue_shift: f64) -> Self {
        Self {
            chroma_reduction,
            hue_shift,
            neutral: false,
        }
    }

    pub fn neutral() -> Self {
        Self {
            neutral: true,
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScaleStep {
    pub name: String,
    pub offset: f64,
    pub color: OklchColor,
    pub is_anchor: bool,
}

/// A fully generated scale. Never partially populated.
#[derive(Clone, Debug, PartialEq)]
pub struct TonalScale {
    pub anchor: ColorAnchor,
    pub anchor_step: String,
    pub steps: Vec<ScaleStep>,
}

impl TonalScale {
    pub fn get(&self, step: &str) -> Option<&ScaleStep> {
        self.steps.iter().find(|s| s.name == step)
    }

    pub fn anchor_color(&self) -> Option<&OklchColor> {
        self.get(&self.anchor_step).map(|s| &s.color)
    }

    /// Renders one step, reproducing an sRGB anchor literal exactly in hex.
    pub fn render_step(&self, step: &ScaleStep, format: ColorFormat) -> String {
        match format {
            ColorFormat::Oklch => step.color.to_css(),
            ColorFormat::Hex => match self.anchor.srgb {
                Some(rgb) if step.is_anchor && step.color == self.anchor.color => format_hex(rgb),
                _ => step.color.to_hex(),
            },
        }
    }

    /// Step name -> rendered color, in step order.
    pub fn render(&self, format: ColorFormat) -> Vec<(String, String)> {
        self.steps
            .iter()
            .map(|s| (s.name.clone(), self.render_step(s, format)))
            .collect()
    }
}

/// Generates a chromatic scale from an anchor literal.
pub fn generate_scale(
    anchor_color: &str,
    anchor_step: &str,
    step_table: &StepTable,
    chroma_reduction: f64,
    hue_shift: f64,
) -> Result<TonalScale, ScaleError> {
    let anchor = ColorAnchor::parse(anchor_color)?;
    generate(
        &anchor,
        anchor_step,
        step_table,
        ScaleParams::new(chroma_reduction, hue_shift),
    )
}

/// Generates an achromatic scale: the anchor only supplies lightness.
pub fn generate_neutral_scale(
    anchor_color: &str,
    anchor_step: &str,
    step_table: &StepTable,
) -> Result<TonalScale, ScaleError> {
    let anchor = ColorAnchor::parse(anchor_color)?;
    generate(&anchor, anchor_step, step_table, ScaleParams::neutral())
}

/// Generates a scale from an already parsed anchor.
#[instrument(level = "debug", skip(anchor, step_table), fields(anchor = %anchor.literal))]
pub fn generate(
    anchor: &ColorAnchor,
    anchor_step: &str,
    step_table: &StepTable,
    params: ScaleParams,
) -> Result<TonalScale, ScaleError> {
    validate(anchor_step, step_table, &params)?;

    let OklchColor {
        lightness: l0,
        chroma: c0,
        hue: h0,
    } = anchor.color;
    let max_offset = step_table.max_offset_magnitude();

    let steps = step_table
        .iter()
        .map(|(name, offset)| {
            let is_anchor = name == anchor_step;
            let color = if params.neutral {
                let lightness = if is_anchor {
                    l0
                } else {
                    (l0 + offset).clamp(0.0, 100.0)
                };
                OklchColor::achromatic(lightness)
            } else if is_anchor {
                anchor.color
            } else {
                let d = if max_offset > 0.0 {
                    offset.abs() / max_offset
                } else {
                    0.0
                };
                let lightness = (l0 + offset).clamp(0.0, 100.0);
                let chroma = (c0 * (1.0 - d * d * params.chroma_reduction)).max(0.0);
                let hue = h0 + offset.signum() * d * params.hue_shift;
                OklchColor::new(lightness, chroma, hue)
            };
            ScaleStep {
                name: name.to_string(),
                offset,
                color,
                is_anchor,
            }
        })
        .collect::<Vec<_>>();

    debug!(steps = steps.len(), "generated tonal scale");

    Ok(TonalScale {
        anchor: anchor.clone(),
        anchor_step: anchor_step.to_string(),
        steps,
    })
}

fn validate(anchor_step: &str, table: &StepTable, params: &ScaleParams) -> Result<(), ScaleError> {
    if table.is_empty() {
        return Err(ScaleError::InvalidStepTable("table has no steps".into()));
    }
    match table.offset(anchor_step) {
        None => {
            return Err(ScaleError::InvalidStepTable(format!(
                "anchor step `{}` is not in the table",
                anchor_step
            )))
        }
        Some(offset) if offset != 0.0 => {
            return Err(ScaleError::InvalidStepTable(format!(
                "anchor step `{}` must have offset 0, found {}",
                anchor_step, offset
            )))
        }
        Some(_) => {}
    }
    if let Some((name, offset)) = table.iter().find(|(_, o)| !o.is_finite()) {
        return Err(ScaleError::InvalidStepTable(format!(
            "step `{}` has non-finite offset {}",
            name, offset
        )));
    }
    if !params.chroma_reduction.is_finite() {
        return Err(ScaleError::InvalidParameter {
            name: "chroma_reduction",
            value: params.chroma_reduction,
        });
    }
    if !params.hue_shift.is_finite() {
        return Err(ScaleError::InvalidParameter {
            name: "hue_shift",
            value: params.hue_shift,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brand_table() -> StepTable {
        StepTable::new([("700", 0.0), ("800", -8.0), ("900", -15.0)])
    }

    #[test]
    fn step_table_sorts_numerically() {
        let table = StepTable::new([("900", -30.0), ("50", 45.0), ("500", 0.0), ("100", 38.0)]);
        let names: Vec<_> = table.names().collect();
        assert_eq!(names, vec!["50", "100", "500", "900"]);
        assert_eq!(table.max_offset_magnitude(), 45.0);
    }

    #[test]
    fn step_table_deserializes_from_object() {
        let table: StepTable =
            serde_json::from_str(r#"{ "900": -15, "700": 0, "800": -8 }"#).unwrap();
        assert_eq!(table, brand_table());
    }

    #[test]
    fn anchor_is_preserved_exactly() {
        let scale = generate_scale("oklch(62% 0.19 25.3)", "700", &brand_table(), 0.7, 6.0)
            .unwrap();
        let anchor = scale.get("700").unwrap();
        assert!(anchor.is_anchor);
        assert_eq!(anchor.color, OklchColor::new(62.0, 0.19, 25.3));
        assert_eq!(anchor.color.to_css(), "oklch(62% 0.19 25.3)");
    }

    #[test]
    fn chroma_falls_off_parabolically() {
        let scale = generate_scale("oklch(60% 0.20 250)", "700", &brand_table(), 0.7, 0.0)
            .unwrap();
        let c700 = scale.get("700").unwrap().color.chroma;
        let c800 = scale.get("800").unwrap().color.chroma;
        let c900 = scale.get("900").unwrap().color.chroma;

        let d800 = 8.0 / 15.0;
        assert!((c800 - 0.20 * (1.0 - d800 * d800 * 0.7)).abs() < 1e-12);
        assert!((c900 - 0.20 * 0.3).abs() < 1e-12);
        assert!(c700 > c800 && c800 > c900);
    }

    #[test]
    fn hue_drifts_with_offset_sign() {
        let table = StepTable::new([("50", 40.0), ("500", 0.0), ("900", -20.0)]);
        let scale = generate_scale("oklch(50% 0.1 358)", "500", &table, 0.5, 10.0).unwrap();
        assert!((scale.get("50").unwrap().color.hue - 8.0).abs() < 1e-9);
        assert!((scale.get("900").unwrap().color.hue - 353.0).abs() < 1e-9);
        assert_eq!(scale.get("500").unwrap().color.hue, 358.0);
    }

    #[test]
    fn lightness_is_clamped() {
        let table = StepTable::new([("50", 80.0), ("500", 0.0), ("900", -80.0)]);
        let scale = generate_scale("oklch(50% 0.1 200)", "500", &table, 0.5, 0.0).unwrap();
        assert_eq!(scale.get("50").unwrap().color.lightness, 100.0);
        assert_eq!(scale.get("900").unwrap().color.lightness, 0.0);
    }

    #[test]
    fn strong_reduction_never_goes_negative() {
        let scale = generate_scale("oklch(50% 0.1 200)", "700", &brand_table(), 3.0, 0.0).unwrap();
        assert_eq!(scale.get("900").unwrap().color.chroma, 0.0);
    }

    #[test]
    fn neutral_forces_achromatic() {
        let anchor = ColorAnchor::parse("oklch(55% 0.03 250)").unwrap();
        let scale = generate(&anchor, "700", &brand_table(), ScaleParams::neutral()).unwrap();
        for step in &scale.steps {
            assert_eq!(step.color.chroma, 0.0, "step {}", step.name);
            assert_eq!(step.color.hue, 0.0, "step {}", step.name);
        }
        assert_eq!(scale.get("700").unwrap().color.lightness, 55.0);
        assert_eq!(scale.get("900").unwrap().color.lightness, 40.0);
    }

    #[test]
    fn single_step_table_is_just_the_anchor() {
        let table = StepTable::new([("500", 0.0)]);
        let scale = generate_scale("#066a8d", "500", &table, 0.7, 0.0).unwrap();
        assert_eq!(scale.steps.len(), 1);
        assert_eq!(scale.render(ColorFormat::Hex)[0].1, "#066a8d");
    }

    #[test]
    fn invalid_tables_fail_whole_family() {
        let missing = generate_scale("#066a8d", "500", &brand_table(), 0.7, 0.0);
        assert!(matches!(missing, Err(ScaleError::InvalidStepTable(_))));

        let shifted = StepTable::new([("700", 2.0), ("800", -8.0)]);
        let shifted = generate_scale("#066a8d", "700", &shifted, 0.7, 0.0);
        assert!(matches!(shifted, Err(ScaleError::InvalidStepTable(_))));

        let nan = generate_scale("#066a8d", "700", &brand_table(), f64::NAN, 0.0);
        assert!(matches!(nan, Err(ScaleError::InvalidParameter { .. })));
    }

    #[test]
    fn unparseable_anchor_names_literal() {
        match generate_scale("not-a-color", "700", &brand_table(), 0.7, 0.0) {
            Err(ScaleError::Parse { literal, .. }) => assert_eq!(literal, "not-a-color"),
            other => panic!("Expected parse error, got {:?}", other),
        }
    }
}
