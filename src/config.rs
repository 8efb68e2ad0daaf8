use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::category::{Categories, Category};
use crate::dsl;
use crate::error::ConfigError;
use crate::inference::InferenceEngine;
use crate::membership::Triangular;
use crate::ops::{DefuzzificationOp, ImplicationOp};
use crate::rules::Rules;
use crate::terms::Terms;
use crate::universe::Universe;
use crate::variable::{Role, Variables};

/// A complete engine definition, usually read from TOML.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SystemConfig {
    pub name: String,
    pub antecedents: Vec<VariableConfig>,
    pub consequent: VariableConfig,
    pub rules: Vec<RuleConfig>,
    pub categories: Vec<Category>,
    #[serde(default)]
    pub inference: InferenceConfig,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct VariableConfig {
    pub name: String,
    pub universe: UniverseConfig,
    pub terms: Vec<TermConfig>,
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct UniverseConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct TermConfig {
    pub label: String,
    /// `[a, b, c]`: feet at `a` and `c`, peak at `b`
    pub triangle: [f64; 3],
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct RuleConfig {
    /// Premise in rule syntax, e.g. `precipitation is none and humidity is low`
    pub when: String,
    /// Consequent label
    pub then: String,
}

/// Operator choices; both default to the Mamdani min/centroid pair.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct InferenceConfig {
    pub implication: ImplicationOp,
    pub defuzzification: DefuzzificationOp,
}

impl SystemConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;

        Self::from_toml_str(&text)
    }

    /// Validates the definition and builds an engine from it.
    pub fn build(&self) -> Result<InferenceEngine, ConfigError> {
        let mut vars = Variables::new();

        for var in &self.antecedents {
            var.add_to(&mut vars, Role::Antecedent)?;
        }
        self.consequent.add_to(&mut vars, Role::Consequent)?;

        let mut rules = Rules::with_capacity(self.rules.len());

        for rule in &self.rules {
            rules.add(dsl::parse(&rule.when, &vars)?, rule.then.as_str());
        }

        let categories = Categories::from_vec(self.categories.clone())?;

        Ok(InferenceEngine::new(self.name.as_str(), vars, rules, categories)?
            .with_implication(self.inference.implication)
            .with_defuzzification(self.inference.defuzzification))
    }
}

impl VariableConfig {
    fn add_to(&self, vars: &mut Variables, role: Role) -> Result<(), ConfigError> {
        let UniverseConfig { min, max, step } = self.universe;
        let universe = Universe::new(min, max, step)?;
        let mut terms = Terms::new();

        for term in &self.terms {
            let [a, b, c] = term.triangle;
            terms.insert(term.label.as_str(), Triangular::new(a, b, c)?);
        }

        vars.add(self.name.as_str(), role, universe, terms)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::Inputs;

    const MINIMAL: &str = r#"
        name = "minimal"

        [[antecedents]]
        name = "wind_speed"
        universe = { min = 0.0, max = 60.0, step = 1.0 }
        terms = [
            { label = "calm", triangle = [0.0, 0.0, 10.0] },
            { label = "strong", triangle = [40.0, 60.0, 60.0] },
        ]

        [consequent]
        name = "comfort"
        universe = { min = 0.0, max = 10.0, step = 0.5 }
        terms = [
            { label = "poor", triangle = [0.0, 0.0, 5.0] },
            { label = "fine", triangle = [5.0, 10.0, 10.0] },
        ]

        [[rules]]
        when = "wind_speed is strong"
        then = "poor"

        [[rules]]
        when = "wind_speed is calm"
        then = "fine"

        [[categories]]
        label = "Poor"
        upper = 5.0

        [[categories]]
        label = "Fine"
        upper = 10.0
    "#;

    #[test]
    fn builds_from_toml() {
        let config = SystemConfig::from_toml_str(MINIMAL).unwrap();

        assert_eq!(config.inference.implication, ImplicationOp::Min);
        assert_eq!(config.inference.defuzzification, DefuzzificationOp::Centroid);

        let engine = config.build().unwrap();

        assert_eq!(engine.name(), "minimal");
        assert_eq!(engine.rules().len(), 2);
        assert_eq!(engine.consequent().universe().len(), 21);

        let calm = engine.infer(&Inputs::new().with("wind_speed", 0.)).unwrap();
        let gale = engine.infer(&Inputs::new().with("wind_speed", 60.)).unwrap();

        assert_eq!(calm.category(), "Fine");
        assert_eq!(gale.category(), "Poor");
    }

    #[test]
    fn inference_section_overrides_operators() {
        let text = format!("{MINIMAL}\n[inference]\ndefuzzification = \"largest_of_maximum\"\n");
        let engine = SystemConfig::from_toml_str(&text).unwrap().build().unwrap();
        let calm = engine.infer(&Inputs::new().with("wind_speed", 0.)).unwrap();

        assert_eq!(calm.crisp_output(), 10.);
    }

    #[test]
    fn invalid_definitions_fail_fast() {
        let bad_shape = MINIMAL.replace("[40.0, 60.0, 60.0]", "[40.0, 70.0, 60.0]");
        let bad_label = MINIMAL.replace("then = \"poor\"", "then = \"dreadful\"");
        let bad_rule = MINIMAL.replace("wind_speed is strong", "wind_speed strong");
        let unknown_var = MINIMAL.replace("wind_speed is strong", "gusts is strong");
        let bad_universe = MINIMAL.replace("step = 0.5", "step = 0.0");

        let build = |text: &str| SystemConfig::from_toml_str(text).and_then(|c| c.build());

        assert!(matches!(build(&bad_shape), Err(ConfigError::InvalidShape { .. })));
        assert!(matches!(build(&bad_label), Err(ConfigError::UnknownLabel { .. })));
        assert!(matches!(build(&bad_rule), Err(ConfigError::RuleSyntax { .. })));
        assert!(matches!(build(&unknown_var), Err(ConfigError::UnknownVariable { .. })));
        assert!(matches!(build(&bad_universe), Err(ConfigError::InvalidUniverse { .. })));
        assert!(matches!(build("name = 3"), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            SystemConfig::load("/nonexistent/outlook.toml"),
            Err(ConfigError::Io { .. })
        ));
    }
}
