use crate::error::ConfigError;
use crate::universe::Universe;

/// Triangular shape with feet at `a` and `c` and its peak at `b`.
///
/// `a == b` gives a left shoulder and `b == c` a right shoulder.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangular {
    a: f64,
    b: f64,
    c: f64,
}

impl Triangular {
    pub fn new(a: f64, b: f64, c: f64) -> Result<Self, ConfigError> {
        let finite = a.is_finite() && b.is_finite() && c.is_finite();

        if !finite || a > b || b > c {
            return Err(ConfigError::InvalidShape { a, b, c });
        }

        Ok(Self { a, b, c })
    }

    pub fn params(&self) -> (f64, f64, f64) {
        (self.a, self.b, self.c)
    }

    /// Degree of membership of `x`, always in `[0, 1]`.
    pub fn membership(&self, x: f64) -> f64 {
        let Self { a, b, c } = *self;

        if x == b {
            return 1.;
        }
        if x.is_nan() || x <= a || x >= c {
            return 0.;
        }

        // a < x < c and x != b, so the ramp we land on has a non-zero width
        if x < b {
            (x - a) / (b - a)
        } else {
            (c - x) / (c - b)
        }
    }
}

/// A named fuzzy set.
#[derive(Clone, Debug, PartialEq)]
pub struct MembershipFunction {
    label: String,
    shape: Triangular,
}

impl MembershipFunction {
    pub fn new(label: impl Into<String>, shape: Triangular) -> Self {
        Self {
            label: label.into(),
            shape,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn shape(&self) -> &Triangular {
        &self.shape
    }

    pub fn membership(&self, x: f64) -> f64 {
        self.shape.membership(x)
    }

    /// Evaluates the set at every sample point of `universe`.
    pub fn sample(&self, universe: &Universe) -> Vec<f64> {
        universe.points().iter().map(|&x| self.membership(x)).collect()
    }
}
