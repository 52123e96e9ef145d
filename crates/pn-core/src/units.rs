// pn-core/src/units.rs

use uom::si::f64::{
    KinematicViscosity as UomKinematicViscosity, Length as UomLength,
    MassDensity as UomMassDensity, Power as UomPower, Velocity as UomVelocity,
    VolumeRate as UomVolumeRate,
};

// Public canonical unit types (SI, f64)
pub type Density = UomMassDensity;
pub type KinVisc = UomKinematicViscosity;
pub type Length = UomLength;
pub type Power = UomPower;
pub type Velocity = UomVelocity;
pub type VolumeRate = UomVolumeRate;

const SECONDS_PER_HOUR: f64 = 3600.0;

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn mm(v: f64) -> Length {
    use uom::si::length::millimeter;
    Length::new::<millimeter>(v)
}

#[inline]
pub fn m3ps(v: f64) -> VolumeRate {
    use uom::si::volume_rate::cubic_meter_per_second;
    VolumeRate::new::<cubic_meter_per_second>(v)
}

/// Volumetric flow from cubic meters per hour, the unit pump duty is quoted in.
#[inline]
pub fn m3ph(v: f64) -> VolumeRate {
    m3ps(v / SECONDS_PER_HOUR)
}

#[inline]
pub fn kg_per_m3(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

#[inline]
pub fn m2ps(v: f64) -> KinVisc {
    use uom::si::kinematic_viscosity::square_meter_per_second;
    KinVisc::new::<square_meter_per_second>(v)
}

#[inline]
pub fn mps(v: f64) -> Velocity {
    use uom::si::velocity::meter_per_second;
    Velocity::new::<meter_per_second>(v)
}

#[inline]
pub fn kw(v: f64) -> Power {
    use uom::si::power::kilowatt;
    Power::new::<kilowatt>(v)
}

#[inline]
pub fn to_m3ph(q: VolumeRate) -> f64 {
    q.value * SECONDS_PER_HOUR
}

#[inline]
pub fn to_kw(p: Power) -> f64 {
    use uom::si::power::kilowatt;
    p.get::<kilowatt>()
}

pub mod constants {
    /// Gravitational acceleration used by the head-loss and pump-power relations.
    pub const G_MPS2: f64 = 9.81;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        let _l = m(2.0);
        let _d = mm(100.0);
        let _rho = kg_per_m3(998.2);
        let _nu = m2ps(1.004e-6);
        let _v = mps(1.5);
        let _p = kw(3.0);
    }

    #[test]
    fn cubic_meters_per_hour_round_trip() {
        let q = m3ph(100.0);
        assert!((q.value - 100.0 / 3600.0).abs() < 1e-15);
        assert!((to_m3ph(q) - 100.0).abs() < 1e-12);
    }

    #[test]
    fn millimeters_are_stored_in_meters() {
        let d = mm(80.0);
        assert!((d.value - 0.08).abs() < 1e-15);
    }

    #[test]
    fn kinematic_viscosity_is_stored_in_square_meters_per_second() {
        let nu = m2ps(1.004e-6);
        assert!((nu.value - 1.004e-6).abs() < 1e-18);
    }
}
