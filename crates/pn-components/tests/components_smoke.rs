//! Integration tests for pn-components with the fluid table.

use pn_components::{PipeSegment, series_head_loss};
use pn_core::units::{m, m3ph, mm};
use pn_fluids::FluidTable;
use proptest::prelude::*;

#[test]
fn water_reference_run() {
    let water = FluidTable::lookup("water").unwrap();
    let run = [PipeSegment::new(m(100.0), mm(100.0), mm(0.15))];

    let head = series_head_loss(&run, m3ph(100.0), &water);
    assert!((head - 14.35).abs() / 14.35 < 0.01, "head = {head}");

    // Roughly quadratic in flow
    let half = series_head_loss(&run, m3ph(50.0), &water);
    assert!(half < head / 3.0 && half > head / 5.0);
}

#[test]
fn ethanol_is_more_viscous_than_water() {
    let water = FluidTable::lookup("water").unwrap();
    let ethanol = FluidTable::lookup("ethanol").unwrap();
    let seg = PipeSegment::new(m(10.0), mm(50.0), mm(0.05));

    let q = m3ph(10.0);
    assert!(seg.loss(q, &ethanol).reynolds < seg.loss(q, &water).reynolds);
}

proptest! {
    #[test]
    fn series_loss_is_monotonic_in_flow(
        q_lo in 0.0_f64..200.0,
        dq in 0.0_f64..200.0,
        length in 1.0_f64..500.0,
        diameter in 10.0_f64..400.0,
        roughness in 0.0_f64..1.0,
    ) {
        let water = FluidTable::lookup("water").unwrap();
        let run = [PipeSegment::new(m(length), mm(diameter), mm(roughness))];
        let lo = series_head_loss(&run, m3ph(q_lo), &water);
        let hi = series_head_loss(&run, m3ph(q_lo + dq), &water);
        // The friction factor jumps upward at Re = 4000, which keeps the order.
        prop_assert!(hi >= lo * (1.0 - 1e-12));
    }
}
