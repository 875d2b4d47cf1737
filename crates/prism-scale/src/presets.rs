//! Named step tables and family policies.
//!
//! These are example configurations. Light steps get finer offsets than dark
//! ones because perceived differences bunch up near white.

use crate::scale::{ScaleParams, StepTable};

pub const FULL_500: &str = "full-500";
pub const FULL_700: &str = "full-700";
pub const REDUCED_500: &str = "reduced-500";

pub const STEP_TABLE_PRESETS: &[&str] = &[FULL_500, FULL_700, REDUCED_500];

pub fn step_table_preset(name: &str) -> Option<StepTable> {
    let steps: &[(&str, f64)] = match name {
        FULL_500 => &[
            ("50", 45.0),
            ("100", 38.0),
            ("200", 29.0),
            ("300", 20.0),
            ("400", 10.0),
            ("500", 0.0),
            ("600", -8.0),
            ("700", -16.0),
            ("800", -23.0),
            ("900", -30.0),
        ],
        FULL_700 => &[
            ("50", 55.0),
            ("100", 48.0),
            ("200", 40.0),
            ("300", 31.0),
            ("400", 22.0),
            ("500", 13.0),
            ("600", 6.0),
            ("700", 0.0),
            ("800", -8.0),
            ("900", -15.0),
        ],
        REDUCED_500 => &[
            ("50", 45.0),
            ("100", 38.0),
            ("500", 0.0),
            ("600", -8.0),
            ("700", -16.0),
        ],
        _ => return None,
    };
    Some(StepTable::new(steps.iter().copied()))
}

/// Default step table and softness for a kind of color family.
#[derive(Clone, Debug, PartialEq)]
pub struct FamilyPreset {
    pub name: &'static str,
    pub step_table: &'static str,
    pub anchor_step: &'static str,
    pub params: ScaleParams,
}

pub const FAMILY_PRESETS: &[FamilyPreset] = &[
    FamilyPreset {
        name: "brand",
        step_table: FULL_700,
        anchor_step: "700",
        params: ScaleParams {
            chroma_reduction: 0.7,
            hue_shift: 0.0,
            neutral: false,
        },
    },
    FamilyPreset {
        name: "accent",
        step_table: FULL_500,
        anchor_step: "500",
        params: ScaleParams {
            chroma_reduction: 0.6,
            hue_shift: 4.0,
            neutral: false,
        },
    },
    FamilyPreset {
        name: "status",
        step_table: REDUCED_500,
        anchor_step: "500",
        params: ScaleParams {
            chroma_reduction: 0.5,
            hue_shift: 0.0,
            neutral: false,
        },
    },
    FamilyPreset {
        name: "neutral",
        step_table: FULL_500,
        anchor_step: "500",
        params: ScaleParams {
            chroma_reduction: 0.0,
            hue_shift: 0.0,
            neutral: true,
        },
    },
];

pub fn family_preset(name: &str) -> Option<&'static FamilyPreset> {
    FAMILY_PRESETS.iter().find(|p| p.name == name)
}
