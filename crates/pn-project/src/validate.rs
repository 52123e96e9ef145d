//! Case file validation.

use crate::schema::{
    BranchDef, CASE_VERSION, CaseFile, EquipmentDef, MAX_SWEEP_POINTS, SegmentDef, SweepDef,
};
use std::collections::HashSet;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Duplicate branch name: {name}")]
    DuplicateBranch { name: String },

    #[error("Empty value: {field}")]
    Empty { field: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: impl Into<String>, value: f64, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.into(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn require(
    ok: bool,
    field: impl Into<String>,
    value: f64,
    reason: &str,
) -> Result<(), ValidationError> {
    if ok { Ok(()) } else { Err(invalid(field, value, reason)) }
}

pub fn validate_case(case: &CaseFile) -> Result<(), ValidationError> {
    if case.version == 0 || case.version > CASE_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: case.version,
        });
    }
    if case.fluid.trim().is_empty() {
        return Err(ValidationError::Empty {
            field: "fluid".to_string(),
        });
    }

    let flow = case.operating.flow_m3h;
    require(flow.is_finite() && flow > 0.0, "operating.flow_m3h", flow, "must be positive")?;
    let head = case.operating.geometric_head_m;
    require(head.is_finite(), "operating.geometric_head_m", head, "must be finite")?;

    validate_equipment(&case.equipment)?;

    for (i, segment) in case.pre.iter().enumerate() {
        validate_segment(segment, &format!("pre[{i}]"))?;
    }
    validate_branches(&case.branches)?;
    for (i, segment) in case.post.iter().enumerate() {
        validate_segment(segment, &format!("post[{i}]"))?;
    }

    if let Some(sweep) = &case.sweep {
        validate_sweep(sweep)?;
    }

    if let Some(solver) = &case.solver {
        if let Some(iters) = solver.max_iterations {
            require(iters > 0, "solver.max_iterations", iters as f64, "must be positive")?;
        }
        if let Some(tol) = solver.abs_tol_m {
            require(tol.is_finite() && tol > 0.0, "solver.abs_tol_m", tol, "must be positive")?;
        }
    }

    Ok(())
}

pub fn validate_equipment(equipment: &EquipmentDef) -> Result<(), ValidationError> {
    let eff_ok = |v: f64| v.is_finite() && v > 0.0 && v <= 1.0;
    require(
        eff_ok(equipment.pump_efficiency),
        "equipment.pump_efficiency",
        equipment.pump_efficiency,
        "expected (0, 1]",
    )?;
    require(
        eff_ok(equipment.motor_efficiency),
        "equipment.motor_efficiency",
        equipment.motor_efficiency,
        "expected (0, 1]",
    )?;
    let hours = equipment.hours_per_day;
    require(
        hours.is_finite() && (0.0..=24.0).contains(&hours),
        "equipment.hours_per_day",
        hours,
        "expected [0, 24]",
    )?;
    let tariff = equipment.tariff_per_kwh;
    require(
        tariff.is_finite() && tariff >= 0.0,
        "equipment.tariff_per_kwh",
        tariff,
        "must be non-negative",
    )
}

pub fn validate_sweep(sweep: &SweepDef) -> Result<(), ValidationError> {
    require(
        sweep.step_percent.is_finite() && sweep.step_percent > 0.0,
        "sweep.step_percent",
        sweep.step_percent,
        "must be positive",
    )?;
    require(
        sweep.low_percent.is_finite() && sweep.low_percent > 0.0,
        "sweep.low_percent",
        sweep.low_percent,
        "must be positive",
    )?;
    require(
        sweep.high_percent.is_finite() && sweep.high_percent >= sweep.low_percent,
        "sweep.high_percent",
        sweep.high_percent,
        "must not be below low_percent",
    )?;
    let span = (sweep.high_percent - sweep.low_percent) / sweep.step_percent;
    require(
        span < MAX_SWEEP_POINTS as f64,
        "sweep.step_percent",
        sweep.step_percent,
        "too small for the range, the sweep would exceed the point limit",
    )
}

fn validate_branches(branches: &[BranchDef]) -> Result<(), ValidationError> {
    let mut names = HashSet::new();
    for (i, branch) in branches.iter().enumerate() {
        if branch.name.trim().is_empty() {
            return Err(ValidationError::Empty {
                field: format!("branches[{i}].name"),
            });
        }
        if !names.insert(branch.name.as_str()) {
            return Err(ValidationError::DuplicateBranch {
                name: branch.name.clone(),
            });
        }
        if branch.segments.is_empty() {
            return Err(ValidationError::Empty {
                field: format!("branches[{i}].segments"),
            });
        }
        for (j, segment) in branch.segments.iter().enumerate() {
            validate_segment(segment, &format!("branches[{i}].segments[{j}]"))?;
        }
    }
    Ok(())
}

// Non-positive diameters pass: they are evaluated as degenerate segments.
fn validate_segment(segment: &SegmentDef, context: &str) -> Result<(), ValidationError> {
    require(
        segment.length_m.is_finite() && segment.length_m > 0.0,
        format!("{context}.length_m"),
        segment.length_m,
        "must be positive",
    )?;
    require(
        segment.diameter_mm.is_finite(),
        format!("{context}.diameter_mm"),
        segment.diameter_mm,
        "must be finite",
    )?;
    require(
        segment.roughness_mm.is_finite() && segment.roughness_mm >= 0.0,
        format!("{context}.roughness_mm"),
        segment.roughness_mm,
        "must be non-negative",
    )?;
    for (k, fitting) in segment.fittings.iter().enumerate() {
        if fitting.trim().is_empty() {
            return Err(ValidationError::Empty {
                field: format!("{context}.fittings[{k}]"),
            });
        }
    }
    Ok(())
}
