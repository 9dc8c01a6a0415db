use crate::utils::error::{Result, TestkitError};
use std::collections::BTreeSet;
use std::env;
use std::fmt;
use std::sync::LazyLock;
use tracing::warn;

pub const INTERPOLATOR_ENV: &str = "TESTKIT_INTERPOLATOR";
pub const LITERAL_INTERPOLATOR: &str = "literal";
pub const PARAMETER_INTERPOLATOR: &str = "parameter";

/// A single constraint failure, naming the offending attribute path.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Violation {
    pub path: String,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Shape-level constraints, reported into a [`ConstraintReport`].
pub trait Constrained {
    fn check(&self, report: &mut ConstraintReport<'_>);
}

pub struct ConstraintReport<'a> {
    interpolator: &'a dyn MessageInterpolator,
    violations: BTreeSet<Violation>,
}

impl ConstraintReport<'_> {
    pub fn violation(&mut self, path: &str, template: &str, params: &[(&str, &str)]) {
        let message = self.interpolator.interpolate(template, params);
        self.violations.insert(Violation {
            path: path.to_string(),
            message,
        });
    }
}

pub trait MessageInterpolator: Send + Sync {
    fn interpolate(&self, template: &str, params: &[(&str, &str)]) -> String;
}

struct LiteralInterpolator;

impl MessageInterpolator for LiteralInterpolator {
    fn interpolate(&self, template: &str, _params: &[(&str, &str)]) -> String {
        template.to_string()
    }
}

struct ParameterInterpolator;

impl MessageInterpolator for ParameterInterpolator {
    fn interpolate(&self, template: &str, params: &[(&str, &str)]) -> String {
        let mut message = template.to_string();
        for (name, value) in params {
            message = message.replace(&format!("{{{name}}}"), value);
        }
        message
    }
}

fn interpolator_by_name(name: &str) -> Option<Box<dyn MessageInterpolator>> {
    match name {
        LITERAL_INTERPOLATOR => Some(Box::new(LiteralInterpolator)),
        PARAMETER_INTERPOLATOR => Some(Box::new(ParameterInterpolator)),
        _ => None,
    }
}

pub struct Validator {
    interpolator: Box<dyn MessageInterpolator>,
}

impl Validator {
    fn with_default_provider() -> Self {
        let name =
            env::var(INTERPOLATOR_ENV).unwrap_or_else(|_| PARAMETER_INTERPOLATOR.to_string());
        Self::with_interpolator_named(&name)
    }

    fn with_interpolator_named(name: &str) -> Self {
        let interpolator = interpolator_by_name(name).unwrap_or_else(|| {
            warn!(interpolator = %name, "unknown message interpolator, using literal messages");
            Box::new(LiteralInterpolator)
        });
        Self { interpolator }
    }

    pub fn validate<T: Constrained + ?Sized>(&self, object: &T) -> BTreeSet<Violation> {
        let mut report = ConstraintReport {
            interpolator: self.interpolator.as_ref(),
            violations: BTreeSet::new(),
        };
        object.check(&mut report);
        report.violations
    }
}

static VALIDATOR: LazyLock<Validator> = LazyLock::new(Validator::with_default_provider);

pub fn with_validator<R>(operation: impl FnOnce(&Validator) -> R) -> R {
    operation(&VALIDATOR)
}

pub fn with_validator_and<U, R>(
    supplier: impl FnOnce() -> U,
    operation: impl FnOnce(&Validator, U) -> R,
) -> R {
    with_validator(|validator| operation(validator, supplier()))
}

pub fn use_validator(operation: impl FnOnce(&Validator)) {
    with_validator(|validator| operation(validator));
}

pub fn use_validator_and<U>(supplier: impl FnOnce() -> U, operation: impl FnOnce(&Validator, U)) {
    use_validator(|validator| operation(validator, supplier()));
}

pub fn validate<T: Constrained>(object: &T) -> BTreeSet<Violation> {
    with_validator(|validator| validator.validate(object))
}

/// An absent object is trivially valid.
pub fn is_valid<T: Constrained>(object: Option<&T>) -> bool {
    match object {
        None => true,
        Some(object) => validate(object).is_empty(),
    }
}

pub fn ensure_valid<T: Constrained>(object: T) -> Result<T> {
    let violations = validate(&object);
    if violations.is_empty() {
        Ok(object)
    } else {
        Err(TestkitError::ConstraintViolationError { violations })
    }
}

/// An absent object passes through unchanged.
pub fn require_valid<T: Constrained>(object: Option<T>) -> Result<Option<T>> {
    match object {
        None => Ok(None),
        Some(object) => ensure_valid(object).map(Some),
    }
}
