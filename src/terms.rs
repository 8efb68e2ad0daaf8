use crate::error::ConfigError;
use crate::membership::{MembershipFunction, Triangular};

/// The linguistic labels of one variable, in definition order.
#[derive(Clone, Debug, Default)]
pub struct Terms(pub(crate) Vec<MembershipFunction>);

impl Terms {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn insert(&mut self, label: impl Into<String>, shape: Triangular) {
        self.0.push(MembershipFunction::new(label, shape));
    }

    /// Shorthand for inserting a triangle straight from its parameters.
    pub fn triangle(mut self, label: impl Into<String>, a: f64, b: f64, c: f64) -> Result<Self, ConfigError> {
        self.insert(label, Triangular::new(a, b, c)?);

        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn first_duplicate(&self) -> Option<&str> {
        self.0.iter().enumerate().find_map(|(i, mf)| {
            self.0[..i]
                .iter()
                .any(|prev| prev.label() == mf.label())
                .then(|| mf.label())
        })
    }
}

#[test]
fn test_duplicate_labels() {
    let terms = Terms::new()
        .triangle("low", 0., 0., 30.)
        .and_then(|t| t.triangle("high", 70., 90., 100.))
        .and_then(|t| t.triangle("low", 10., 20., 30.))
        .unwrap();

    assert_eq!(terms.len(), 3);
    assert_eq!(terms.first_duplicate(), Some("low"));
}
