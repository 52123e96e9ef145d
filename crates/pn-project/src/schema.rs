//! Case file schema definitions.

use serde::{Deserialize, Serialize};

/// Current case file version.
pub const CASE_VERSION: u32 = 1;

/// Upper bound on the number of scale points one sweep may request.
pub const MAX_SWEEP_POINTS: usize = 10_000;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaseFile {
    pub version: u32,
    pub name: String,
    #[serde(default = "default_fluid")]
    pub fluid: String,
    #[serde(default)]
    pub operating: OperatingDef,
    #[serde(default)]
    pub equipment: EquipmentDef,
    /// Series segments upstream of the parallel group
    #[serde(default)]
    pub pre: Vec<SegmentDef>,
    #[serde(default)]
    pub branches: Vec<BranchDef>,
    /// Series segments downstream of the parallel group
    #[serde(default)]
    pub post: Vec<SegmentDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sweep: Option<SweepDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solver: Option<SolverDef>,
}

impl CaseFile {
    /// The starting case: water at 100 m³/h over two identical branches.
    pub fn example() -> Self {
        Self {
            version: CASE_VERSION,
            name: "Example network".to_string(),
            fluid: default_fluid(),
            operating: OperatingDef::default(),
            equipment: EquipmentDef::default(),
            pre: Vec::new(),
            branches: vec![
                BranchDef {
                    name: "Branch 1".to_string(),
                    segments: vec![SegmentDef::branch_default()],
                },
                BranchDef {
                    name: "Branch 2".to_string(),
                    segments: vec![SegmentDef::branch_default()],
                },
            ],
            post: Vec::new(),
            sweep: Some(SweepDef::default()),
            solver: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct OperatingDef {
    #[serde(default = "default_flow")]
    pub flow_m3h: f64,
    #[serde(default = "default_geometric_head")]
    pub geometric_head_m: f64,
}

impl Default for OperatingDef {
    fn default() -> Self {
        Self {
            flow_m3h: default_flow(),
            geometric_head_m: default_geometric_head(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct EquipmentDef {
    /// Fraction in (0, 1]
    #[serde(default = "default_pump_efficiency")]
    pub pump_efficiency: f64,
    /// Fraction in (0, 1]
    #[serde(default = "default_motor_efficiency")]
    pub motor_efficiency: f64,
    #[serde(default = "default_hours_per_day")]
    pub hours_per_day: f64,
    /// Currency per kWh
    #[serde(default = "default_tariff")]
    pub tariff_per_kwh: f64,
}

impl Default for EquipmentDef {
    fn default() -> Self {
        Self {
            pump_efficiency: default_pump_efficiency(),
            motor_efficiency: default_motor_efficiency(),
            hours_per_day: default_hours_per_day(),
            tariff_per_kwh: default_tariff(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SegmentDef {
    pub length_m: f64,
    pub diameter_mm: f64,
    #[serde(default = "default_roughness")]
    pub roughness_mm: f64,
    /// Fitting ids, e.g. `elbow_90_long_radius`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fittings: Vec<String>,
}

impl SegmentDef {
    pub fn series_default() -> Self {
        Self {
            length_m: 10.0,
            diameter_mm: 100.0,
            roughness_mm: default_roughness(),
            fittings: Vec::new(),
        }
    }

    pub fn branch_default() -> Self {
        Self {
            length_m: 50.0,
            diameter_mm: 80.0,
            roughness_mm: default_roughness(),
            fittings: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BranchDef {
    pub name: String,
    pub segments: Vec<SegmentDef>,
}

/// Diameter scale range in percent, inclusive at both ends.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SweepDef {
    #[serde(default = "default_sweep_low")]
    pub low_percent: f64,
    #[serde(default = "default_sweep_high")]
    pub high_percent: f64,
    #[serde(default = "default_sweep_step")]
    pub step_percent: f64,
}

impl Default for SweepDef {
    fn default() -> Self {
        Self {
            low_percent: default_sweep_low(),
            high_percent: default_sweep_high(),
            step_percent: default_sweep_step(),
        }
    }
}

/// Overrides for the parallel split iteration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct SolverDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_iterations: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abs_tol_m: Option<f64>,
}

fn default_fluid() -> String {
    "water-20c".to_string()
}

fn default_flow() -> f64 {
    100.0
}

fn default_geometric_head() -> f64 {
    15.0
}

fn default_pump_efficiency() -> f64 {
    0.70
}

fn default_motor_efficiency() -> f64 {
    0.90
}

fn default_hours_per_day() -> f64 {
    8.0
}

fn default_tariff() -> f64 {
    0.75
}

fn default_roughness() -> f64 {
    0.15
}

fn default_sweep_low() -> f64 {
    50.0
}

fn default_sweep_high() -> f64 {
    150.0
}

fn default_sweep_step() -> f64 {
    5.0
}
