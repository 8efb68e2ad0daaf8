use std::path::PathBuf;

/// Errors raised while building an engine. These are fatal: a process should
/// refuse to serve until its configuration builds cleanly.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid triangular shape: expected a <= b <= c, got [{a}, {b}, {c}]")]
    InvalidShape { a: f64, b: f64, c: f64 },

    #[error("invalid universe: min {min}, max {max}, step {step}")]
    InvalidUniverse { min: f64, max: f64, step: f64 },

    #[error("variable `{name}` is defined more than once")]
    DuplicateVariable { name: String },

    #[error("variable `{variable}` defines label `{label}` more than once")]
    DuplicateLabel { variable: String, label: String },

    #[error("variable `{name}` has no fuzzy sets")]
    EmptyTerms { name: String },

    #[error("unknown variable `{name}`")]
    UnknownVariable { name: String },

    #[error("variable `{variable}` has no label `{label}`")]
    UnknownLabel { variable: String, label: String },

    #[error("variable `{name}` is a consequent and cannot appear in a rule premise")]
    ConsequentInPremise { name: String },

    #[error("no consequent variable defined")]
    MissingConsequent,

    #[error("more than one consequent variable defined")]
    MultipleConsequents,

    #[error("no antecedent variables defined")]
    MissingAntecedents,

    #[error("rule base is empty")]
    NoRules,

    #[error("invalid categories: {reason}")]
    InvalidCategories { reason: String },

    #[error("rule `{rule}`: {message}")]
    RuleSyntax { rule: String, message: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

/// Errors raised by a single inference call. None of these leave the engine in
/// a different state; the caller can report them and keep serving.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum InferenceError {
    #[error("missing input for `{variable}`")]
    MissingInput { variable: String },

    #[error("input for `{variable}` is not a finite number: `{value}`")]
    NonNumericInput { variable: String, value: String },

    #[error("variable `{variable}` has no label `{label}`")]
    UnknownLabel { variable: String, label: String },

    #[error("rule references a variable that was not fuzzified")]
    NotFuzzified,

    #[error("no rule fired for the given inputs; outlook is indeterminate")]
    NoRuleFired,
}
