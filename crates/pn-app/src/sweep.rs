//! Diameter sensitivity sweep.
//!
//! Every pipe diameter in the network is multiplied by `scale / 100` and the
//! full evaluation chain is rerun. Points are independent, so they are
//! evaluated on the rayon pool; the indexed collect keeps them in scale order.

use crate::error::{EvaluationError, EvaluationResult};
use crate::evaluate::Evaluator;
use pn_core::{ensure_in_range, ensure_positive};
use pn_network::Network;
use pn_project::schema::MAX_SWEEP_POINTS;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Scale range in percent of the nominal diameters, inclusive at both ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepRange {
    pub low_percent: f64,
    pub high_percent: f64,
    pub step_percent: f64,
}

impl Default for SweepRange {
    fn default() -> Self {
        Self {
            low_percent: 50.0,
            high_percent: 150.0,
            step_percent: 5.0,
        }
    }
}

impl SweepRange {
    pub fn validate(&self) -> EvaluationResult<()> {
        ensure_positive(self.step_percent, "sweep step")?;
        ensure_positive(self.low_percent, "sweep low")?;
        ensure_in_range(
            self.high_percent,
            self.low_percent,
            f64::MAX,
            "sweep high",
            ">= sweep low",
        )?;
        if self.span() >= MAX_SWEEP_POINTS as f64 {
            return Err(EvaluationError::invalid(format!(
                "sweep range {}..{} step {} exceeds {} points",
                self.low_percent, self.high_percent, self.step_percent, MAX_SWEEP_POINTS
            )));
        }
        Ok(())
    }

    fn span(&self) -> f64 {
        (self.high_percent - self.low_percent) / self.step_percent
    }

    /// Scale points `low, low + step, ...` up to and including `high`.
    pub fn points(&self) -> EvaluationResult<Vec<f64>> {
        self.validate()?;
        // Slack absorbs representation error so `high` itself is not lost.
        let count = (self.span() + 1e-9).floor() as usize + 1;
        Ok((0..count)
            .map(|i| self.low_percent + i as f64 * self.step_percent)
            .collect())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepPoint {
    pub scale_percent: f64,
    /// `None` when the point failed
    pub annual_cost: Option<f64>,
    pub manometric_head_m: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
}

impl SweepPoint {
    pub fn succeeded(&self) -> bool {
        self.annual_cost.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepReport {
    pub points: Vec<SweepPoint>,
    pub num_successful: usize,
    pub num_failed: usize,
}

impl SweepReport {
    /// Successful point with the lowest annual cost.
    pub fn cheapest(&self) -> Option<&SweepPoint> {
        self.points
            .iter()
            .filter_map(|p| p.annual_cost.map(|c| (p, c)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(p, _)| p)
    }
}

/// Evaluate `network` at every scale point of `range`.
///
/// A point whose evaluation fails is kept in the series with no cost and
/// counted in `num_failed`.
pub fn run_sweep(
    network: &Network,
    evaluator: &Evaluator,
    range: &SweepRange,
) -> EvaluationResult<SweepReport> {
    let scales = range.points()?;
    info!(
        points = scales.len(),
        low = range.low_percent,
        high = range.high_percent,
        step = range.step_percent,
        "starting diameter sweep"
    );

    let points: Vec<SweepPoint> = scales
        .par_iter()
        .map(|&scale| {
            let scaled = network.with_scaled_diameters(scale / 100.0);
            match evaluator.evaluate(&scaled) {
                Ok(report) => {
                    debug!(
                        scale_percent = scale,
                        annual_cost = report.energy.annual_cost,
                        "sweep point evaluated"
                    );
                    SweepPoint {
                        scale_percent: scale,
                        annual_cost: Some(report.energy.annual_cost),
                        manometric_head_m: Some(report.manometric_head_m()),
                        failure: None,
                    }
                }
                Err(err) => {
                    warn!(scale_percent = scale, error = %err, "sweep point failed");
                    SweepPoint {
                        scale_percent: scale,
                        annual_cost: None,
                        manometric_head_m: None,
                        failure: Some(err.to_string()),
                    }
                }
            }
        })
        .collect();

    let num_successful = points.iter().filter(|p| p.succeeded()).count();
    let num_failed = points.len() - num_successful;
    info!(num_successful, num_failed, "diameter sweep finished");

    Ok(SweepReport {
        points,
        num_successful,
        num_failed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_range_has_21_points() {
        let points = SweepRange::default().points().unwrap();
        assert_eq!(points.len(), 21);
        assert_eq!(points[0], 50.0);
        assert_eq!(*points.last().unwrap(), 150.0);
    }

    #[test]
    fn uneven_step_stops_before_high() {
        let range = SweepRange {
            low_percent: 80.0,
            high_percent: 100.0,
            step_percent: 7.0,
        };
        assert_eq!(range.points().unwrap(), vec![80.0, 87.0, 94.0]);
    }

    #[test]
    fn fractional_step_reaches_high() {
        let range = SweepRange {
            low_percent: 90.0,
            high_percent: 91.0,
            step_percent: 0.1,
        };
        let points = range.points().unwrap();
        assert_eq!(points.len(), 11);
        assert!((points[10] - 91.0).abs() < 1e-9);
    }

    #[test]
    fn single_point_range() {
        let range = SweepRange {
            low_percent: 100.0,
            high_percent: 100.0,
            step_percent: 5.0,
        };
        assert_eq!(range.points().unwrap(), vec![100.0]);
    }

    #[test]
    fn rejects_bad_ranges() {
        for range in [
            SweepRange {
                step_percent: 0.0,
                ..SweepRange::default()
            },
            SweepRange {
                step_percent: -5.0,
                ..SweepRange::default()
            },
            SweepRange {
                low_percent: 150.0,
                high_percent: 50.0,
                step_percent: 5.0,
            },
            SweepRange {
                low_percent: 0.0,
                ..SweepRange::default()
            },
        ] {
            assert!(matches!(
                range.points(),
                Err(EvaluationError::InvalidInput { .. })
            ));
        }
    }

    #[test]
    fn huge_range_is_rejected_before_allocating() {
        let range = SweepRange {
            low_percent: 1.0,
            high_percent: 1e30,
            step_percent: 1.0,
        };
        let err = range.points().unwrap_err();
        assert!(matches!(err, EvaluationError::InvalidInput { .. }));
        assert!(err.to_string().contains("points"));

        let widest = SweepRange {
            low_percent: 1.0,
            high_percent: MAX_SWEEP_POINTS as f64,
            step_percent: 1.0,
        };
        assert_eq!(widest.points().unwrap().len(), MAX_SWEEP_POINTS);
    }
}
