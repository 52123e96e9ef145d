//! Fixed table of liquids at 20 °C.

use crate::error::{FluidError, FluidResult};
use pn_core::units::{Density, KinVisc, kg_per_m3, m2ps};

/// Properties consumed by the friction and pump-power models.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FluidProperties {
    pub density: Density,
    pub kinematic_viscosity: KinVisc,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FluidEntry {
    pub canonical_id: &'static str,
    pub display_name: &'static str,
    pub aliases: &'static [&'static str],
    /// kg/m³
    pub density_kg_m3: f64,
    /// m²/s
    pub kinematic_viscosity_m2_s: f64,
}

impl FluidEntry {
    pub fn properties(&self) -> FluidProperties {
        FluidProperties {
            density: kg_per_m3(self.density_kg_m3),
            kinematic_viscosity: m2ps(self.kinematic_viscosity_m2_s),
        }
    }

    /// Case-insensitive exact match on id, display name or alias.
    pub fn is_named(&self, name: &str) -> bool {
        let name = name.trim();
        self.canonical_id.eq_ignore_ascii_case(name)
            || self.display_name.eq_ignore_ascii_case(name)
            || self.aliases.iter().any(|alias| alias.eq_ignore_ascii_case(name))
    }

    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_ascii_lowercase();
        if query.is_empty() {
            return true;
        }

        self.canonical_id.to_ascii_lowercase().contains(&query)
            || self.display_name.to_ascii_lowercase().contains(&query)
            || self
                .aliases
                .iter()
                .any(|alias| alias.to_ascii_lowercase().contains(&query))
    }
}

const FLUID_TABLE: [FluidEntry; 2] = [
    FluidEntry {
        canonical_id: "water-20c",
        display_name: "Water at 20°C",
        aliases: &["water", "h2o"],
        density_kg_m3: 998.2,
        kinematic_viscosity_m2_s: 1.004e-6,
    },
    FluidEntry {
        canonical_id: "ethanol-20c",
        display_name: "Ethanol at 20°C",
        aliases: &["ethanol", "ethyl alcohol"],
        density_kg_m3: 789.0,
        kinematic_viscosity_m2_s: 1.51e-6,
    },
];

/// Name-keyed lookup over the fixed fluid table.
pub struct FluidTable;

impl FluidTable {
    pub fn entries() -> &'static [FluidEntry] {
        &FLUID_TABLE
    }

    pub fn entry(name: &str) -> FluidResult<&'static FluidEntry> {
        FLUID_TABLE
            .iter()
            .find(|entry| entry.is_named(name))
            .ok_or_else(|| FluidError::UnknownFluid {
                name: name.to_string(),
            })
    }

    pub fn lookup(name: &str) -> FluidResult<FluidProperties> {
        Self::entry(name).map(FluidEntry::properties)
    }

    pub fn search(query: &str) -> Vec<FluidEntry> {
        FLUID_TABLE
            .iter()
            .copied()
            .filter(|entry| entry.matches_query(query))
            .collect()
    }
}
