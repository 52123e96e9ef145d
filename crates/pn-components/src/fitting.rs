//! Fitting (minor-loss) catalog.

use std::fmt;
use std::str::FromStr;

/// Pipe fittings with tabulated resistance coefficients K.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fitting {
    SharpEntrance,
    SlightlyRoundedEntrance,
    WellRoundedEntrance,
    PipeExit,
    GateValveOpen,
    GateValveHalfOpen,
    GlobeValveOpen,
    SwingCheckValve,
    Elbow90LongRadius,
    Elbow90ShortRadius,
    Elbow45,
    ReturnBend180,
    TeeThrough,
    TeeBranch,
}

impl Fitting {
    pub const ALL: [Fitting; 14] = [
        Fitting::SharpEntrance,
        Fitting::SlightlyRoundedEntrance,
        Fitting::WellRoundedEntrance,
        Fitting::PipeExit,
        Fitting::GateValveOpen,
        Fitting::GateValveHalfOpen,
        Fitting::GlobeValveOpen,
        Fitting::SwingCheckValve,
        Fitting::Elbow90LongRadius,
        Fitting::Elbow90ShortRadius,
        Fitting::Elbow45,
        Fitting::ReturnBend180,
        Fitting::TeeThrough,
        Fitting::TeeBranch,
    ];

    /// Resistance coefficient K (dimensionless).
    pub fn k(self) -> f64 {
        match self {
            Fitting::SharpEntrance => 0.5,
            Fitting::SlightlyRoundedEntrance => 0.2,
            Fitting::WellRoundedEntrance => 0.04,
            Fitting::PipeExit => 1.0,
            Fitting::GateValveOpen => 0.2,
            Fitting::GateValveHalfOpen => 5.6,
            Fitting::GlobeValveOpen => 10.0,
            Fitting::SwingCheckValve => 2.5,
            Fitting::Elbow90LongRadius => 0.6,
            Fitting::Elbow90ShortRadius => 0.9,
            Fitting::Elbow45 => 0.4,
            Fitting::ReturnBend180 => 2.2,
            Fitting::TeeThrough => 0.6,
            Fitting::TeeBranch => 1.8,
        }
    }

    /// Stable identifier used in case files.
    pub fn id(self) -> &'static str {
        match self {
            Fitting::SharpEntrance => "sharp_entrance",
            Fitting::SlightlyRoundedEntrance => "slightly_rounded_entrance",
            Fitting::WellRoundedEntrance => "well_rounded_entrance",
            Fitting::PipeExit => "pipe_exit",
            Fitting::GateValveOpen => "gate_valve_open",
            Fitting::GateValveHalfOpen => "gate_valve_half_open",
            Fitting::GlobeValveOpen => "globe_valve_open",
            Fitting::SwingCheckValve => "swing_check_valve",
            Fitting::Elbow90LongRadius => "elbow_90_long_radius",
            Fitting::Elbow90ShortRadius => "elbow_90_short_radius",
            Fitting::Elbow45 => "elbow_45",
            Fitting::ReturnBend180 => "return_bend_180",
            Fitting::TeeThrough => "tee_through",
            Fitting::TeeBranch => "tee_branch",
        }
    }
}

impl fmt::Display for Fitting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for Fitting {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Fitting::ALL
            .iter()
            .copied()
            .find(|fitting| fitting.id().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown fitting '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_parse_back() {
        for fitting in Fitting::ALL {
            assert_eq!(fitting.id().parse::<Fitting>(), Ok(fitting));
        }
    }

    #[test]
    fn unknown_id_is_rejected() {
        assert!("butterfly_valve".parse::<Fitting>().is_err());
    }

    #[test]
    fn coefficients_are_non_negative() {
        assert!(Fitting::ALL.iter().all(|f| f.k() >= 0.0));
        assert_eq!(Fitting::GlobeValveOpen.k(), 10.0);
    }
}
