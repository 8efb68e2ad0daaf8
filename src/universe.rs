use crate::error::ConfigError;
use crate::linspace::Linspace;

// Absorbs float noise in (max - min) / step, e.g. 0.3 / 0.1 == 2.9999999999999996
const STEP_TOLERANCE: f64 = 1e-9;

const MAX_POINTS: f64 = 10_000_000.;

/// A discretized numeric domain: `min, min + step, ...` up to the largest
/// sample not exceeding `max`.
#[derive(Clone, Debug, PartialEq)]
pub struct Universe {
    min: f64,
    max: f64,
    step: f64,
    points: Vec<f64>,
}

impl Universe {
    pub fn new(min: f64, max: f64, step: f64) -> Result<Self, ConfigError> {
        let finite = min.is_finite() && max.is_finite() && step.is_finite();

        if !finite || min >= max || step <= 0. {
            return Err(ConfigError::InvalidUniverse { min, max, step });
        }

        // max - min can overflow to infinity even for finite bounds
        let steps = ((max - min) / step + STEP_TOLERANCE).floor();

        if !steps.is_finite() || steps >= MAX_POINTS {
            return Err(ConfigError::InvalidUniverse { min, max, step });
        }

        let num = steps as usize + 1;
        let last = min + step * (num - 1) as f64;
        let points = Linspace::new(min, last, num).collect();

        Ok(Self { min, max, step, points })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn contains(&self, x: f64) -> bool {
        (self.min..=self.max).contains(&x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_steps_include_both_ends() {
        let universe = Universe::new(0., 100., 1.).unwrap();

        assert_eq!(universe.len(), 101);
        assert_eq!(universe.points()[0], 0.);
        assert_eq!(universe.points()[100], 100.);
        assert!(universe.points().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn negative_range() {
        let universe = Universe::new(-20., 40., 1.).unwrap();

        assert_eq!(universe.len(), 61);
        assert_eq!(universe.points()[20], 0.);
    }

    #[test]
    fn fractional_step_tolerates_float_noise() {
        let universe = Universe::new(0., 0.3, 0.1).unwrap();

        assert_eq!(universe.len(), 4);
    }

    #[test]
    fn step_not_dividing_range_stops_below_max() {
        let universe = Universe::new(0., 10., 3.).unwrap();

        assert_eq!(universe.points(), &[0., 3., 6., 9.]);
        assert_eq!(universe.max(), 10.);
        assert!(universe.contains(10.));
    }

    #[test]
    fn rejects_malformed_ranges() {
        assert!(matches!(Universe::new(1., 1., 1.), Err(ConfigError::InvalidUniverse { .. })));
        assert!(matches!(Universe::new(2., 1., 1.), Err(ConfigError::InvalidUniverse { .. })));
        assert!(matches!(Universe::new(0., 1., 0.), Err(ConfigError::InvalidUniverse { .. })));
        assert!(matches!(Universe::new(0., 1., -1.), Err(ConfigError::InvalidUniverse { .. })));
        assert!(matches!(Universe::new(0., f64::INFINITY, 1.), Err(ConfigError::InvalidUniverse { .. })));
    }

    #[test]
    fn rejects_unbounded_resolution() {
        assert!(matches!(Universe::new(0., 1e300, 1e-300), Err(ConfigError::InvalidUniverse { .. })));
        assert!(matches!(Universe::new(-f64::MAX, f64::MAX, 1.), Err(ConfigError::InvalidUniverse { .. })));
        assert!(matches!(Universe::new(0., 1e9, 1.), Err(ConfigError::InvalidUniverse { .. })));
    }
}
