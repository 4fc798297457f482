/*
 * Simulation Parameters Module
 *
 * This module defines the SimulationParams struct holding every tunable
 * coefficient of the steering model. The world owns one copy and mutates it
 * only through named setters; at the start of each tick it takes a
 * ParamSnapshot so a whole tick sees one consistent set of values.
 *
 * Nothing here rejects nonsensical values on the hot path. `validate` reports
 * them for callers that care, and the snapshot quietly reorders or caps the
 * ones that would otherwise break the speed clamp or the range checks.
 */

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParamError {
    #[error("min_speed ({min}) must be below max_speed ({max})")]
    InvertedSpeedBounds { min: f32, max: f32 },

    #[error("protected_range ({protected}) must not exceed visible_range ({visible})")]
    ProtectedExceedsVisible { protected: f32, visible: f32 },

    #[error("{name} must be non-negative, got {value}")]
    NegativeParameter { name: &'static str, value: f32 },

    #[error("{name} must be a finite number")]
    NonFiniteParameter { name: &'static str },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationParams {
    pub avoid_factor: f32,
    pub visible_range: f32,
    pub matching_factor: f32,
    pub turn_factor: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub centering_factor: f32,
    pub protected_range: f32,
    pub predator_turn_factor: f32,
    pub predator_range: f32,
    // Distance from each edge at which boundary turning kicks in
    pub edge_margin: f32,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            avoid_factor: 0.05,
            visible_range: 40.0,
            matching_factor: 0.04,
            turn_factor: 0.4,
            min_speed: 0.8,
            max_speed: 4.0,
            centering_factor: 0.0008,
            protected_range: 10.0,
            predator_turn_factor: 0.5,
            predator_range: 80.0,
            edge_margin: 0.0,
        }
    }
}

impl SimulationParams {
    pub fn named_values(&self) -> [(&'static str, f32); 11] {
        [
            ("avoid_factor", self.avoid_factor),
            ("visible_range", self.visible_range),
            ("matching_factor", self.matching_factor),
            ("turn_factor", self.turn_factor),
            ("min_speed", self.min_speed),
            ("max_speed", self.max_speed),
            ("centering_factor", self.centering_factor),
            ("protected_range", self.protected_range),
            ("predator_turn_factor", self.predator_turn_factor),
            ("predator_range", self.predator_range),
            ("edge_margin", self.edge_margin),
        ]
    }

    /// Check the documented invariants: finite, non-negative values,
    /// `min_speed < max_speed` and `protected_range <= visible_range`.
    ///
    /// The engine runs with invalid parameters too; this is for callers that
    /// would rather refuse them up front.
    pub fn validate(&self) -> Result<(), ParamError> {
        for (name, value) in self.named_values() {
            if !value.is_finite() {
                return Err(ParamError::NonFiniteParameter { name });
            }
            if value < 0.0 {
                return Err(ParamError::NegativeParameter { name, value });
            }
        }

        if self.min_speed >= self.max_speed {
            return Err(ParamError::InvertedSpeedBounds {
                min: self.min_speed,
                max: self.max_speed,
            });
        }

        if self.protected_range > self.visible_range {
            return Err(ParamError::ProtectedExceedsVisible {
                protected: self.protected_range,
                visible: self.visible_range,
            });
        }

        Ok(())
    }

    // Freeze the current values for one tick
    pub fn snapshot(&self) -> ParamSnapshot {
        let min_speed = f32::min(self.min_speed, self.max_speed).max(0.0);
        let max_speed = f32::max(self.min_speed, self.max_speed).max(0.0);
        let visible_range = self.visible_range.max(0.0);
        let protected_range = self.protected_range.max(0.0).min(visible_range);
        let predator_range = self.predator_range.max(0.0);

        ParamSnapshot {
            avoid_factor: self.avoid_factor,
            matching_factor: self.matching_factor,
            centering_factor: self.centering_factor,
            turn_factor: self.turn_factor,
            predator_turn_factor: self.predator_turn_factor,
            min_speed,
            max_speed,
            visible_range,
            protected_range,
            predator_range,
            edge_margin: self.edge_margin.max(0.0),
        }
    }

    // Get parameter ranges for UI sliders
    pub fn get_factor_range() -> std::ops::RangeInclusive<f32> {
        0.0..=1.0
    }

    pub fn get_speed_range() -> std::ops::RangeInclusive<f32> {
        0.0..=20.0
    }

    pub fn get_radius_range() -> std::ops::RangeInclusive<f32> {
        0.0..=200.0
    }

    pub fn get_turn_factor_range() -> std::ops::RangeInclusive<f32> {
        0.0..=2.0
    }

    pub fn get_margin_range() -> std::ops::RangeInclusive<f32> {
        0.0..=150.0
    }
}

/// Parameters as seen by one tick.
///
/// Speed bounds are ordered, ranges are non-negative and the protected range
/// never exceeds the visible range. Factors are copied as given.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParamSnapshot {
    pub avoid_factor: f32,
    pub matching_factor: f32,
    pub centering_factor: f32,
    pub turn_factor: f32,
    pub predator_turn_factor: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub visible_range: f32,
    pub protected_range: f32,
    pub predator_range: f32,
    pub edge_margin: f32,
}

impl ParamSnapshot {
    #[inline]
    pub fn visible_range_sq(&self) -> f32 {
        self.visible_range * self.visible_range
    }

    #[inline]
    pub fn protected_range_sq(&self) -> f32 {
        self.protected_range * self.protected_range
    }

    #[inline]
    pub fn predator_range_sq(&self) -> f32 {
        self.predator_range * self.predator_range
    }

    // Largest radius the flock rules query with; sizes the spatial grid cells
    pub fn flock_reach(&self) -> f32 {
        f32::max(self.visible_range, self.protected_range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(Ok(()), SimulationParams::default().validate());
    }

    #[test]
    fn validate_reports_each_broken_invariant() {
        let inverted = SimulationParams {
            min_speed: 5.0,
            max_speed: 1.0,
            ..Default::default()
        };
        assert_eq!(
            Err(ParamError::InvertedSpeedBounds { min: 5.0, max: 1.0 }),
            inverted.validate()
        );

        let crowded = SimulationParams {
            protected_range: 50.0,
            visible_range: 20.0,
            ..Default::default()
        };
        assert!(matches!(
            crowded.validate(),
            Err(ParamError::ProtectedExceedsVisible { .. })
        ));

        let negative = SimulationParams {
            avoid_factor: -0.1,
            ..Default::default()
        };
        assert_eq!(
            Err(ParamError::NegativeParameter {
                name: "avoid_factor",
                value: -0.1
            }),
            negative.validate()
        );

        let nan = SimulationParams {
            predator_range: f32::NAN,
            ..Default::default()
        };
        assert_eq!(
            Err(ParamError::NonFiniteParameter {
                name: "predator_range"
            }),
            nan.validate()
        );
    }

    #[test]
    fn snapshot_repairs_out_of_order_values() {
        let params = SimulationParams {
            min_speed: 6.0,
            max_speed: 2.0,
            protected_range: 90.0,
            visible_range: 30.0,
            predator_range: -5.0,
            avoid_factor: -1.0,
            ..Default::default()
        };
        let snapshot = params.snapshot();

        assert_eq!(2.0, snapshot.min_speed);
        assert_eq!(6.0, snapshot.max_speed);
        assert_eq!(30.0, snapshot.protected_range);
        assert_eq!(0.0, snapshot.predator_range);
        // Factors are passed through so bad tuning stays visible
        assert_eq!(-1.0, snapshot.avoid_factor);
    }

    #[test]
    fn snapshot_squares_its_ranges() {
        let snapshot = SimulationParams {
            visible_range: 40.0,
            protected_range: 50.0,
            predator_range: 80.0,
            ..Default::default()
        }
        .snapshot();

        assert_eq!(1600.0, snapshot.visible_range_sq());
        // Capped at the visible range before squaring
        assert_eq!(1600.0, snapshot.protected_range_sq());
        assert_eq!(6400.0, snapshot.predator_range_sq());
        assert_eq!(40.0, snapshot.flock_reach());
    }

    #[test]
    fn error_messages_name_the_parameter() {
        let err = ParamError::NegativeParameter {
            name: "turn_factor",
            value: -2.0,
        };
        assert_eq!("turn_factor must be non-negative, got -2", err.to_string());
    }
}
