use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::InferenceError;

/// Result of a single inference call.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InferenceResult {
    inputs: BTreeMap<String, f64>,
    crisp_output: f64,
    category: String,
}

impl InferenceResult {
    pub(crate) fn new(inputs: BTreeMap<String, f64>, crisp_output: f64, category: String) -> Self {
        Self {
            inputs,
            crisp_output,
            category,
        }
    }

    pub fn inputs(&self) -> &BTreeMap<String, f64> {
        &self.inputs
    }

    pub fn crisp_output(&self) -> f64 {
        self.crisp_output
    }

    pub fn category(&self) -> &str {
        &self.category
    }
}

/// Serializable outcome of an inference call, for callers that render
/// failures instead of propagating them.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Report {
    Ok(InferenceResult),
    /// No rule fired, so there is no outlook to give
    Indeterminate { error: String },
    Invalid { error: String },
}

impl From<Result<InferenceResult, InferenceError>> for Report {
    fn from(result: Result<InferenceResult, InferenceError>) -> Self {
        match result {
            Ok(result) => Report::Ok(result),
            Err(e @ InferenceError::NoRuleFired) => Report::Indeterminate { error: e.to_string() },
            Err(e) => Report::Invalid { error: e.to_string() },
        }
    }
}

#[test]
fn test_report_serialization() {
    let result = InferenceResult::new(BTreeMap::from([("humidity".to_owned(), 10.)]), 9.5, "Hot".into());
    let json = serde_json::to_value(Report::from(Ok::<_, InferenceError>(result))).unwrap();

    assert_eq!(json["status"], "ok");
    assert_eq!(json["category"], "Hot");
    assert_eq!(json["crisp_output"], 9.5);
    assert_eq!(json["inputs"]["humidity"], 10.);

    let json = serde_json::to_value(Report::from(Err::<InferenceResult, _>(InferenceError::NoRuleFired))).unwrap();

    assert_eq!(json["status"], "indeterminate");

    let missing = InferenceError::MissingInput {
        variable: "humidity".into(),
    };
    let json = serde_json::to_value(Report::from(Err::<InferenceResult, _>(missing))).unwrap();

    assert_eq!(json["status"], "invalid");
    assert_eq!(json["error"], "missing input for `humidity`");
}
