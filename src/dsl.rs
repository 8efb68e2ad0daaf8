use std::collections::HashMap;
use std::fmt;

use crate::error::{ConfigError, InferenceError};
use crate::variable::{Variable, VariableKey, Variables};

/// Membership degrees of every antecedent for one set of crisp inputs.
#[derive(Clone, Debug, Default)]
pub struct Fuzzified(pub(crate) HashMap<VariableKey, Memberships>);

#[derive(Clone, Debug)]
pub struct Memberships {
    pub(crate) variable: String,
    pub(crate) degrees: HashMap<String, f64>,
}

impl Fuzzified {
    pub fn degree(&self, var: VariableKey, label: &str) -> Result<f64, InferenceError> {
        let memberships = self.0.get(&var).ok_or(InferenceError::NotFuzzified)?;

        memberships
            .degrees
            .get(label)
            .copied()
            .ok_or_else(|| InferenceError::UnknownLabel {
                variable: memberships.variable.clone(),
                label: label.to_owned(),
            })
    }

    /// Degrees of the variable called `name`, keyed by label.
    pub fn by_name(&self, name: &str) -> Option<&HashMap<String, f64>> {
        self.0.values().find(|m| m.variable == name).map(|m| &m.degrees)
    }
}

/// A rule premise.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Is(VariableKey, String),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn or(self, rhs: Expr) -> Self {
        Expr::Or(Box::new(self), Box::new(rhs))
    }

    pub fn and(self, rhs: Expr) -> Self {
        Expr::And(Box::new(self), Box::new(rhs))
    }

    /// Firing strength of this premise: AND is the minimum, OR the maximum.
    pub fn evaluate(&self, fuzzified: &Fuzzified) -> Result<f64, InferenceError> {
        match self {
            Expr::Is(var_key, label) => fuzzified.degree(*var_key, label),
            Expr::And(lhs, rhs) => Ok(f64::min(lhs.evaluate(fuzzified)?, rhs.evaluate(fuzzified)?)),
            Expr::Or(lhs, rhs) => Ok(f64::max(lhs.evaluate(fuzzified)?, rhs.evaluate(fuzzified)?)),
        }
    }

    pub fn propositions(&self) -> Vec<(VariableKey, &str)> {
        let mut props = Vec::new();

        fn parse<'p>(expr: &'p Expr, out: &mut Vec<(VariableKey, &'p str)>) {
            match expr {
                Expr::Is(var_key, label) => out.push((*var_key, label)),
                Expr::And(lhs, rhs) | Expr::Or(lhs, rhs) => {
                    parse(lhs, out);
                    parse(rhs, out);
                },
            }
        }

        parse(self, &mut props);

        props
    }

    /// Renders the premise in the textual rule syntax.
    pub fn display<'a>(&'a self, vars: &'a Variables) -> impl fmt::Display + 'a {
        Display { expr: self, vars }
    }
}

impl Variable {
    pub fn is(self, label: impl Into<String>) -> Expr {
        Expr::Is(self.0, label.into())
    }
}

struct Display<'a> {
    expr: &'a Expr,
    vars: &'a Variables,
}

impl<'a> Display<'a> {
    fn nested(&self, expr: &'a Expr) -> Display<'a> {
        Display { expr, vars: self.vars }
    }
}

impl fmt::Display for Display<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.expr {
            Expr::Is(var_key, label) => match self.vars.0.get(*var_key) {
                Some(var) => write!(f, "{} is {label}", var.name()),
                None => write!(f, "{var_key:?} is {label}"),
            },
            // `and` binds tighter, so only an `or` beneath an `and` needs parentheses
            Expr::And(lhs, rhs) => {
                for (i, side) in [lhs, rhs].into_iter().enumerate() {
                    if i > 0 {
                        f.write_str(" and ")?;
                    }
                    match **side {
                        Expr::Or(..) => write!(f, "({})", self.nested(side))?,
                        _ => write!(f, "{}", self.nested(side))?,
                    }
                }
                Ok(())
            },
            Expr::Or(lhs, rhs) => write!(f, "{} or {}", self.nested(lhs), self.nested(rhs)),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Token<'s> {
    Open,
    Close,
    Word(&'s str),
}

fn tokenize(text: &str) -> Result<Vec<Token<'_>>, String> {
    let mut tokens = Vec::new();
    let mut rest = text;

    while let Some(c) = rest.chars().next() {
        match c {
            '(' => {
                tokens.push(Token::Open);
                rest = &rest[1..];
            },
            ')' => {
                tokens.push(Token::Close);
                rest = &rest[1..];
            },
            c if c.is_whitespace() => rest = &rest[c.len_utf8()..],
            c if c.is_ascii_alphanumeric() || c == '_' => {
                let end = rest
                    .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                    .unwrap_or(rest.len());
                tokens.push(Token::Word(&rest[..end]));
                rest = &rest[end..];
            },
            c => return Err(format!("unexpected character `{c}`")),
        }
    }

    Ok(tokens)
}

/// Parses a textual premise such as
/// `precipitation is none and (wind_speed is calm or humidity is low)`.
///
/// `and` binds tighter than `or`; both associate to the left.
pub fn parse(text: &str, vars: &Variables) -> Result<Expr, ConfigError> {
    let syntax = |message: String| ConfigError::RuleSyntax {
        rule: text.to_owned(),
        message,
    };
    let tokens = tokenize(text).map_err(syntax)?;
    let mut parser = Parser { tokens, pos: 0, vars };
    let expr = parser.disjunction().map_err(|e| match e {
        ParseError::Syntax(message) => syntax(message),
        ParseError::Config(e) => e,
    })?;

    match parser.tokens.get(parser.pos) {
        None => Ok(expr),
        Some(token) => Err(syntax(format!("unexpected trailing {token:?}"))),
    }
}

enum ParseError {
    Syntax(String),
    Config(ConfigError),
}

struct Parser<'s, 'v> {
    tokens: Vec<Token<'s>>,
    pos: usize,
    vars: &'v Variables,
}

impl<'s> Parser<'s, '_> {
    fn peek_keyword(&self, keyword: &str) -> bool {
        matches!(self.tokens.get(self.pos), Some(Token::Word(w)) if w.eq_ignore_ascii_case(keyword))
    }

    fn next(&mut self) -> Option<Token<'s>> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn disjunction(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.conjunction()?;

        while self.peek_keyword("or") {
            self.pos += 1;
            expr = expr.or(self.conjunction()?);
        }

        Ok(expr)
    }

    fn conjunction(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.atom()?;

        while self.peek_keyword("and") {
            self.pos += 1;
            expr = expr.and(self.atom()?);
        }

        Ok(expr)
    }

    fn atom(&mut self) -> Result<Expr, ParseError> {
        match self.next() {
            Some(Token::Open) => {
                let expr = self.disjunction()?;

                match self.next() {
                    Some(Token::Close) => Ok(expr),
                    _ => Err(ParseError::Syntax("missing `)`".into())),
                }
            },
            Some(Token::Word(name)) => {
                if !self.peek_keyword("is") {
                    return Err(ParseError::Syntax(format!("expected `is` after `{name}`")));
                }
                self.pos += 1;

                let label = match self.next() {
                    Some(Token::Word(label)) => label,
                    _ => return Err(ParseError::Syntax(format!("expected a label after `{name} is`"))),
                };
                let var = self
                    .vars
                    .find(name)
                    .ok_or_else(|| ParseError::Config(ConfigError::UnknownVariable { name: name.to_owned() }))?;

                Ok(var.is(label))
            },
            Some(token) => Err(ParseError::Syntax(format!("unexpected {token:?}"))),
            None => Err(ParseError::Syntax("unexpected end of rule".into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terms::Terms;
    use crate::universe::Universe;
    use crate::variable::Role;

    fn vars() -> (Variables, Variable, Variable, Variable) {
        let mut vars = Variables::new();
        let universe = Universe::new(0., 100., 1.).unwrap();
        let mut add = |name: &str, labels: [&str; 2]| {
            let terms = Terms::new()
                .triangle(labels[0], 0., 0., 50.)
                .and_then(|t| t.triangle(labels[1], 50., 100., 100.))
                .unwrap();
            vars.add(name, Role::Antecedent, universe.clone(), terms).unwrap()
        };
        let precipitation = add("precipitation", ["none", "heavy"]);
        let wind_speed = add("wind_speed", ["calm", "strong"]);
        let humidity = add("humidity", ["low", "high"]);

        (vars, precipitation, wind_speed, humidity)
    }

    fn fuzzified(vars: &Variables, inputs: &[(Variable, f64)]) -> Fuzzified {
        Fuzzified(
            inputs
                .iter()
                .map(|&(var, x)| {
                    let def = vars.get(var).unwrap();
                    let memberships = Memberships {
                        variable: def.name().to_owned(),
                        degrees: def.fuzzify(x),
                    };
                    (var.key(), memberships)
                })
                .collect(),
        )
    }

    #[test]
    fn and_is_min_or_is_max() {
        let (vars, precipitation, wind_speed, humidity) = vars();
        let facts = fuzzified(&vars, &[(precipitation, 10.), (wind_speed, 30.), (humidity, 75.)]);

        assert_eq!(precipitation.is("none").evaluate(&facts), Ok(0.8));
        assert_eq!(wind_speed.is("calm").evaluate(&facts), Ok(0.4));
        assert_eq!(humidity.is("high").evaluate(&facts), Ok(0.5));

        let both = precipitation.is("none").and(wind_speed.is("calm"));
        let either = precipitation.is("none").or(wind_speed.is("calm"));

        assert_eq!(both.evaluate(&facts), Ok(0.4));
        assert_eq!(either.evaluate(&facts), Ok(0.8));

        let nested = both.or(humidity.is("high"));

        assert_eq!(nested.evaluate(&facts), Ok(0.5));
    }

    #[test]
    fn unknown_label_is_reported() {
        let (vars, precipitation, ..) = vars();
        let facts = fuzzified(&vars, &[(precipitation, 10.)]);

        assert_eq!(
            precipitation.is("drizzle").evaluate(&facts),
            Err(InferenceError::UnknownLabel {
                variable: "precipitation".into(),
                label: "drizzle".into(),
            })
        );
    }

    #[test]
    fn variable_without_input_is_reported() {
        let (vars, precipitation, wind_speed, _) = vars();
        let facts = fuzzified(&vars, &[(precipitation, 10.)]);

        assert_eq!(wind_speed.is("calm").evaluate(&facts), Err(InferenceError::NotFuzzified));
        assert_eq!(
            InferenceError::NotFuzzified.to_string(),
            "rule references a variable that was not fuzzified"
        );
    }

    #[test]
    fn parse_precedence() {
        let (vars, precipitation, wind_speed, humidity) = vars();
        let expr = parse("precipitation is none and wind_speed is calm or humidity is low", &vars).unwrap();

        assert_eq!(
            expr,
            precipitation
                .is("none")
                .and(wind_speed.is("calm"))
                .or(humidity.is("low"))
        );

        let grouped = parse("precipitation is none AND (wind_speed is calm OR humidity is low)", &vars).unwrap();

        assert_eq!(
            grouped,
            precipitation
                .is("none")
                .and(wind_speed.is("calm").or(humidity.is("low")))
        );
        assert_eq!(
            grouped.display(&vars).to_string(),
            "precipitation is none and (wind_speed is calm or humidity is low)"
        );
    }

    #[test]
    fn parse_chains_left_to_right() {
        let (vars, precipitation, wind_speed, humidity) = vars();
        let expr = parse("precipitation is none and wind_speed is calm and humidity is low", &vars).unwrap();

        assert_eq!(
            expr,
            precipitation
                .is("none")
                .and(wind_speed.is("calm"))
                .and(humidity.is("low"))
        );
        assert_eq!(expr.propositions().len(), 3);
    }

    #[test]
    fn parse_errors() {
        let (vars, ..) = vars();

        for text in [
            "",
            "precipitation",
            "precipitation is",
            "precipitation none",
            "(precipitation is none",
            "precipitation is none humidity is low",
            "precipitation is none & humidity is low",
            "precipitation is none or",
        ] {
            assert!(
                matches!(parse(text, &vars), Err(ConfigError::RuleSyntax { .. })),
                "{text:?} should not parse"
            );
        }

        assert!(matches!(
            parse("temperature is hot", &vars),
            Err(ConfigError::UnknownVariable { .. })
        ));
    }
}
