use crate::dsl::Expr;

#[derive(Clone, Debug, Default)]
pub struct Rules(pub(crate) Vec<Rule>);

impl Rules {
    pub fn new() -> Self {
        Rules(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Rules(Vec::with_capacity(capacity))
    }

    /// Adds a rule whose premise implies the consequent set called `consequence`.
    pub fn add(&mut self, premise: Expr, consequence: impl Into<String>) {
        self.0.push(Rule {
            premise,
            consequence: consequence.into(),
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Rule {
    pub(crate) premise: Expr,
    pub(crate) consequence: String,
}

impl Rule {
    pub fn premise(&self) -> &Expr {
        &self.premise
    }

    pub fn consequence(&self) -> &str {
        &self.consequence
    }
}
