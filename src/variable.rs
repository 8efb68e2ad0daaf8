use std::collections::HashMap;

use slotmap::{new_key_type, SlotMap};
use tracing::warn;

use crate::error::ConfigError;
use crate::math::interp;
use crate::membership::MembershipFunction;
use crate::terms::Terms;
use crate::universe::Universe;

new_key_type! {
    /// A variable key
    pub struct VariableKey;
}

/// Whether a variable consumes a crisp input or produces the aggregated output.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Role {
    Antecedent,
    Consequent,
}

/// Copyable handle to a variable stored in [`Variables`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Variable(pub(crate) VariableKey);

impl Variable {
    pub fn key(self) -> VariableKey {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct Variables(pub(crate) SlotMap<VariableKey, LinguisticVariable>);

impl Variables {
    pub fn new() -> Self {
        Self(SlotMap::with_key())
    }

    pub fn add(
        &mut self,
        name: impl Into<String>,
        role: Role,
        universe: Universe,
        terms: Terms,
    ) -> Result<Variable, ConfigError> {
        let name = name.into();

        if self.find(&name).is_some() {
            return Err(ConfigError::DuplicateVariable { name });
        }

        let var = LinguisticVariable::new(name, role, universe, terms)?;

        Ok(Variable(self.0.insert(var)))
    }

    pub fn find(&self, name: &str) -> Option<Variable> {
        self.0
            .iter()
            .find_map(|(key, var)| (var.name == name).then_some(Variable(key)))
    }

    pub fn get(&self, var: Variable) -> Option<&LinguisticVariable> {
        self.0.get(var.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Variable, &LinguisticVariable)> {
        self.0.iter().map(|(key, var)| (Variable(key), var))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A named numeric dimension and its fuzzy sets.
#[derive(Clone, Debug)]
pub struct LinguisticVariable {
    name: String,
    role: Role,
    universe: Universe,
    terms: Vec<MembershipFunction>,
    // terms[i] sampled at every universe point
    curves: Vec<Vec<f64>>,
}

impl LinguisticVariable {
    fn new(name: String, role: Role, universe: Universe, terms: Terms) -> Result<Self, ConfigError> {
        if terms.is_empty() {
            return Err(ConfigError::EmptyTerms { name });
        }
        if let Some(label) = terms.first_duplicate() {
            return Err(ConfigError::DuplicateLabel {
                variable: name,
                label: label.to_owned(),
            });
        }

        let curves = terms.0.iter().map(|mf| mf.sample(&universe)).collect();

        Ok(Self {
            name,
            role,
            universe,
            terms: terms.0,
            curves,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    pub fn terms(&self) -> &[MembershipFunction] {
        &self.terms
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(MembershipFunction::label)
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.labels().any(|l| l == label)
    }

    /// The set for `label` sampled over the universe.
    pub fn curve(&self, label: &str) -> Option<&[f64]> {
        self.terms
            .iter()
            .position(|mf| mf.label() == label)
            .map(|i| &*self.curves[i])
    }

    /// Degree of membership of `x` in every set of this variable.
    ///
    /// Values beyond the universe take the edge value of each sampled set.
    pub fn fuzzify(&self, x: f64) -> HashMap<String, f64> {
        let inside = self.universe.contains(x);

        if !inside {
            warn!(
                variable = %self.name,
                value = x,
                min = self.universe.min(),
                max = self.universe.max(),
                "input outside universe"
            );
        }

        let points = self.universe.points();

        self.terms
            .iter()
            .zip(&self.curves)
            .map(|(mf, curve)| {
                let degree = if inside { mf.membership(x) } else { interp(x, points, curve) };
                (mf.label().to_owned(), degree)
            })
            .collect()
    }
}
