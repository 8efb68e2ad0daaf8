use std::collections::BTreeMap;

use rayon::prelude::*;
use tracing::{debug, info, trace};

use crate::category::Categories;
use crate::dsl::{Fuzzified, Memberships};
use crate::error::{ConfigError, InferenceError};
use crate::inputs::Inputs;
use crate::ops::{aggregate, DefuzzificationOp, ImplicationOp};
use crate::outputs::InferenceResult;
use crate::rules::Rules;
use crate::variable::{LinguisticVariable, Role, Variable, Variables};

/// A validated rule base over a set of antecedents and one consequent.
///
/// Inference never mutates the engine, so one engine can serve any number of
/// concurrent callers behind a shared reference or an `Arc`.
#[derive(Debug)]
pub struct InferenceEngine {
    name: String,
    vars: Variables,
    antecedents: Vec<Variable>,
    consequent: Variable,
    rules: Rules,
    categories: Categories,
    imp_op: ImplicationOp,
    defuzz_op: DefuzzificationOp,
}

impl InferenceEngine {
    pub fn new(
        name: impl Into<String>,
        vars: Variables,
        rules: Rules,
        categories: Categories,
    ) -> Result<Self, ConfigError> {
        let name = name.into();
        let mut antecedents = Vec::new();
        let mut consequent = None;

        for (var, def) in vars.iter() {
            match def.role() {
                Role::Antecedent => antecedents.push(var),
                Role::Consequent if consequent.is_some() => return Err(ConfigError::MultipleConsequents),
                Role::Consequent => consequent = Some(var),
            }
        }

        let consequent = consequent.ok_or(ConfigError::MissingConsequent)?;

        if antecedents.is_empty() {
            return Err(ConfigError::MissingAntecedents);
        }
        if rules.is_empty() {
            return Err(ConfigError::NoRules);
        }

        let consequent_def = &vars.0[consequent.0];

        for rule in rules.iter() {
            for (var_key, label) in rule.premise.propositions() {
                let def = vars.0.get(var_key).ok_or_else(|| ConfigError::UnknownVariable {
                    name: format!("{var_key:?}"),
                })?;

                if def.role() == Role::Consequent {
                    return Err(ConfigError::ConsequentInPremise {
                        name: def.name().to_owned(),
                    });
                }
                check_label(def, label)?;
            }

            check_label(consequent_def, &rule.consequence)?;
        }

        // Antecedents in a stable order for logging and diagnostics
        antecedents.sort_by(|a, b| vars.0[a.0].name().cmp(vars.0[b.0].name()));

        info!(
            engine = %name,
            antecedents = antecedents.len(),
            consequent = %consequent_def.name(),
            rules = rules.len(),
            "inference engine ready"
        );

        Ok(Self {
            name,
            vars,
            antecedents,
            consequent,
            rules,
            categories,
            imp_op: ImplicationOp::default(),
            defuzz_op: DefuzzificationOp::default(),
        })
    }

    pub fn with_implication(mut self, imp_op: ImplicationOp) -> Self {
        self.imp_op = imp_op;
        self
    }

    pub fn with_defuzzification(mut self, defuzz_op: DefuzzificationOp) -> Self {
        self.defuzz_op = defuzz_op;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn variables(&self) -> &Variables {
        &self.vars
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn categories(&self) -> &Categories {
        &self.categories
    }

    pub fn antecedent_names(&self) -> impl Iterator<Item = &str> {
        self.antecedents.iter().map(|var| self.vars.0[var.0].name())
    }

    pub fn consequent(&self) -> &LinguisticVariable {
        &self.vars.0[self.consequent.0]
    }

    /// Converts crisp inputs into membership degrees for every antecedent.
    pub fn fuzzify(&self, inputs: &Inputs) -> Result<Fuzzified, InferenceError> {
        let mut fuzzified = Fuzzified::default();

        for var in &self.antecedents {
            let def = &self.vars.0[var.0];
            let value = inputs.get(def.name()).ok_or_else(|| InferenceError::MissingInput {
                variable: def.name().to_owned(),
            })?;

            if !value.is_finite() {
                return Err(InferenceError::NonNumericInput {
                    variable: def.name().to_owned(),
                    value: value.to_string(),
                });
            }

            let memberships = Memberships {
                variable: def.name().to_owned(),
                degrees: def.fuzzify(value),
            };

            fuzzified.0.insert(var.0, memberships);
        }

        for (name, _) in inputs.iter() {
            if self.vars.find(name).map_or(true, |var| !self.antecedents.contains(&var)) {
                debug!(engine = %self.name, input = name, "ignoring input with no antecedent");
            }
        }

        Ok(fuzzified)
    }

    /// Firing strength of every rule, in rule order.
    pub fn firing_strengths(&self, inputs: &Inputs) -> Result<Vec<f64>, InferenceError> {
        let fuzzified = self.fuzzify(inputs)?;

        self.rules.iter().map(|rule| rule.premise.evaluate(&fuzzified)).collect()
    }

    pub fn infer(&self, inputs: &Inputs) -> Result<InferenceResult, InferenceError> {
        let fuzzified = self.fuzzify(inputs)?;
        let consequent = self.consequent();
        let mut aggregated = vec![0.; consequent.universe().len()];

        // Fuzzy implication and aggregation
        for (i, rule) in self.rules.iter().enumerate() {
            let strength = rule.premise.evaluate(&fuzzified)?;

            trace!(rule = i, consequence = %rule.consequence, strength, "rule evaluated");

            if strength <= 0. {
                continue;
            }

            let membership = consequent
                .curve(&rule.consequence)
                .ok_or_else(|| InferenceError::UnknownLabel {
                    variable: consequent.name().to_owned(),
                    label: rule.consequence.clone(),
                })?;

            aggregate(&mut aggregated, self.imp_op.call(strength, membership));
        }

        if aggregated.iter().all(|&m| m == 0.) {
            debug!(engine = %self.name, "no rule fired");
            return Err(InferenceError::NoRuleFired);
        }

        // Defuzzificate
        let crisp_output = self.defuzz_op.call(consequent.universe().points(), &aggregated);
        let category = self.categories.categorize(crisp_output).to_owned();

        debug!(engine = %self.name, crisp_output, category = %category, "inference complete");

        let inputs = self
            .antecedent_names()
            .filter_map(|name| Some((name.to_owned(), inputs.get(name)?)))
            .collect::<BTreeMap<_, _>>();

        Ok(InferenceResult::new(inputs, crisp_output, category))
    }

    /// Runs independent inference calls in parallel.
    pub fn infer_batch(&self, batch: &[Inputs]) -> Vec<Result<InferenceResult, InferenceError>> {
        batch.par_iter().map(|inputs| self.infer(inputs)).collect()
    }
}

fn check_label(var: &LinguisticVariable, label: &str) -> Result<(), ConfigError> {
    if var.has_label(label) {
        Ok(())
    } else {
        Err(ConfigError::UnknownLabel {
            variable: var.name().to_owned(),
            label: label.to_owned(),
        })
    }
}
