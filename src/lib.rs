//! Mamdani fuzzy inference.
//!
//! Crisp inputs are fuzzified against the sets of each antecedent, every rule
//! premise is evaluated with min (AND) and max (OR), the consequent sets are
//! clipped at the rule firing strengths and aggregated with max, and the
//! aggregate is defuzzified back into a crisp score and a category.
//!
//! ```
//! use fuzzy_outlook::{presets, Inputs};
//!
//! let engine = presets::temperature_outlook()?;
//! let inputs = Inputs::new()
//!     .with("precipitation", 0.)
//!     .with("wind_speed", 0.)
//!     .with("humidity", 10.);
//! let result = engine.infer(&inputs)?;
//!
//! assert_eq!(result.category(), "Hot");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod category;
pub mod config;
mod dsl;
mod error;
mod inference;
mod inputs;
mod linspace;
mod math;
mod membership;
mod ops;
mod outputs;
pub mod presets;
mod rules;
mod terms;
mod universe;
mod variable;

pub use category::{Categories, Category};
pub use config::SystemConfig;
pub use dsl::{parse, Expr, Fuzzified};
pub use error::{ConfigError, InferenceError};
pub use inference::InferenceEngine;
pub use inputs::Inputs;
pub use membership::{MembershipFunction, Triangular};
pub use ops::{DefuzzificationOp, ImplicationOp};
pub use outputs::{InferenceResult, Report};
pub use rules::{Rule, Rules};
pub use terms::Terms;
pub use universe::Universe;
pub use variable::{LinguisticVariable, Role, Variable, VariableKey, Variables};
