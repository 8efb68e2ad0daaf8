use std::collections::HashMap;

use crate::error::InferenceError;

/// Crisp input values keyed by antecedent name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Inputs(pub(crate) HashMap<String, f64>);

impl Inputs {
    pub fn new() -> Self {
        Inputs(HashMap::new())
    }

    pub fn add(&mut self, name: impl Into<String>, val: f64) -> &mut Self {
        self.0.insert(name.into(), val);
        self
    }

    pub fn with(mut self, name: impl Into<String>, val: f64) -> Self {
        self.add(name, val);
        self
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(name, val)| (name.as_str(), *val))
    }

    /// Parses raw text fields, e.g. from a submitted form. Values must be
    /// finite numbers.
    pub fn parse<'a>(fields: impl IntoIterator<Item = (&'a str, &'a str)>) -> Result<Self, InferenceError> {
        let mut inputs = Self::new();

        for (name, raw) in fields {
            let val = raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| InferenceError::NonNumericInput {
                    variable: name.to_owned(),
                    value: raw.to_owned(),
                })?;

            inputs.add(name, val);
        }

        Ok(inputs)
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for Inputs {
    fn from_iter<T: IntoIterator<Item = (S, f64)>>(iter: T) -> Self {
        Inputs(iter.into_iter().map(|(name, val)| (name.into(), val)).collect())
    }
}

#[test]
fn test_parse_fields() {
    let inputs = Inputs::parse([("precipitation", "12.5"), ("humidity", " 80 ")]).unwrap();

    assert_eq!(inputs.get("precipitation"), Some(12.5));
    assert_eq!(inputs.get("humidity"), Some(80.));
    assert_eq!(inputs.get("wind_speed"), None);

    for raw in ["", "windy", "NaN", "inf", "1e400"] {
        assert_eq!(
            Inputs::parse([("wind_speed", raw)]),
            Err(InferenceError::NonNumericInput {
                variable: "wind_speed".into(),
                value: raw.into(),
            })
        );
    }
}
