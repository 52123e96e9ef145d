//! Electrical power and annual energy cost of a pumping duty.

use crate::error::EvaluationResult;
use pn_core::ensure_in_range;
use pn_core::units::{Power, VolumeRate, constants::G_MPS2, kw, to_kw};
use pn_fluids::FluidProperties;

/// Billing year used for the annual cost: 30-day months, 12 of them.
pub const DAYS_PER_MONTH: f64 = 30.0;
pub const MONTHS_PER_YEAR: f64 = 12.0;

/// Pump, motor and tariff data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquipmentParams {
    /// Fraction in (0, 1]
    pub pump_efficiency: f64,
    /// Fraction in (0, 1]
    pub motor_efficiency: f64,
    pub hours_per_day: f64,
    /// Currency per kWh
    pub tariff_per_kwh: f64,
}

impl Default for EquipmentParams {
    fn default() -> Self {
        Self {
            pump_efficiency: 0.70,
            motor_efficiency: 0.90,
            hours_per_day: 8.0,
            tariff_per_kwh: 0.75,
        }
    }
}

impl EquipmentParams {
    pub fn validate(&self) -> EvaluationResult<()> {
        let fraction = |v: f64, what: &'static str| {
            ensure_in_range(v, f64::MIN_POSITIVE, 1.0, what, "(0, 1]")
        };
        fraction(self.pump_efficiency, "pump efficiency")?;
        fraction(self.motor_efficiency, "motor efficiency")?;
        ensure_in_range(self.hours_per_day, 0.0, 24.0, "hours per day", "[0, 24]")?;
        ensure_in_range(self.tariff_per_kwh, 0.0, f64::MAX, "tariff", ">= 0")?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyResult {
    /// Electrical power drawn by the motor
    pub power: Power,
    pub annual_cost: f64,
}

impl EnergyResult {
    pub fn power_kw(&self) -> f64 {
        to_kw(self.power)
    }
}

/// Electrical power and annual cost of lifting `flow` through `head_m`.
///
/// A non-positive combined efficiency yields zero power rather than a
/// division by zero.
pub fn energy_cost(
    flow: VolumeRate,
    head_m: f64,
    fluid: &FluidProperties,
    equipment: &EquipmentParams,
) -> EnergyResult {
    let efficiency = equipment.pump_efficiency * equipment.motor_efficiency;
    let power_kw = if efficiency > 0.0 {
        let hydraulic_w = flow.value * fluid.density.value * G_MPS2 * head_m;
        hydraulic_w / efficiency / 1000.0
    } else {
        0.0
    };

    let annual_cost = power_kw
        * equipment.hours_per_day
        * DAYS_PER_MONTH
        * MONTHS_PER_YEAR
        * equipment.tariff_per_kwh;

    EnergyResult {
        power: kw(power_kw),
        annual_cost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EvaluationError;
    use pn_core::units::{kg_per_m3, m2ps, m3ph};

    fn water() -> FluidProperties {
        FluidProperties {
            density: kg_per_m3(998.2),
            kinematic_viscosity: m2ps(1.004e-6),
        }
    }

    #[test]
    fn reference_duty() {
        // 100 m³/h against 30 m at 0.7 x 0.9
        let energy = energy_cost(m3ph(100.0), 30.0, &water(), &EquipmentParams::default());
        let expected_kw = 100.0 / 3600.0 * 998.2 * 9.81 * 30.0 / 0.63 / 1000.0;
        assert!((energy.power_kw() - expected_kw).abs() < 1e-9);
        assert!((energy.annual_cost - expected_kw * 8.0 * 360.0 * 0.75).abs() < 1e-6);
    }

    #[test]
    fn zero_efficiency_draws_nothing() {
        let equipment = EquipmentParams {
            pump_efficiency: 0.0,
            ..EquipmentParams::default()
        };
        let energy = energy_cost(m3ph(100.0), 30.0, &water(), &equipment);
        assert_eq!(energy.power_kw(), 0.0);
        assert_eq!(energy.annual_cost, 0.0);
    }

    #[test]
    fn cost_scales_with_hours_and_tariff() {
        let base = energy_cost(m3ph(50.0), 20.0, &water(), &EquipmentParams::default());
        let double = energy_cost(
            m3ph(50.0),
            20.0,
            &water(),
            &EquipmentParams {
                hours_per_day: 16.0,
                ..EquipmentParams::default()
            },
        );
        assert!((double.annual_cost - 2.0 * base.annual_cost).abs() < 1e-9);
        assert_eq!(double.power, base.power);
    }

    #[test]
    fn validation_bounds() {
        assert!(EquipmentParams::default().validate().is_ok());
        for bad in [
            EquipmentParams {
                pump_efficiency: 1.5,
                ..Default::default()
            },
            EquipmentParams {
                motor_efficiency: 0.0,
                ..Default::default()
            },
            EquipmentParams {
                hours_per_day: -1.0,
                ..Default::default()
            },
            EquipmentParams {
                tariff_per_kwh: f64::NAN,
                ..Default::default()
            },
        ] {
            assert!(matches!(
                bad.validate(),
                Err(EvaluationError::InvalidInput { .. })
            ));
        }
    }
}
