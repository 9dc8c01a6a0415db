use anyhow::Result;
use std::collections::HashSet;
use strum::{EnumIter, IntoEnumIterator};
use testkit::{
    ensure_valid, is_valid, random_variant, require_valid, validate, with_validator, Constrained,
    ConstraintReport, TestkitError,
};

#[derive(Debug, Clone, PartialEq)]
struct Transfer {
    reference: String,
    amount: i64,
    currency: Currency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
enum Currency {
    Eur,
    Usd,
    Gbp,
}

impl Constrained for Transfer {
    fn check(&self, report: &mut ConstraintReport<'_>) {
        if self.reference.trim().is_empty() {
            report.violation("reference", "must not be blank", &[]);
        }
        if self.amount <= 0 {
            report.violation("amount", "must be greater than {min}", &[("min", "0")]);
        }
    }
}

fn valid_transfer() -> Transfer {
    Transfer {
        reference: "tx-1".to_string(),
        amount: 250,
        currency: Currency::Eur,
    }
}

#[test]
fn test_a_valid_object_passes_the_gate_unchanged() -> Result<()> {
    let transfer = valid_transfer();
    let passed = require_valid(Some(transfer.clone()))?.unwrap();
    assert_eq!(passed, transfer);
    Ok(())
}

#[test]
fn test_the_gate_is_idempotent() -> Result<()> {
    let once = ensure_valid(valid_transfer())?;
    let twice = ensure_valid(once.clone())?;
    assert_eq!(once, twice);
    Ok(())
}

#[test]
fn test_an_absent_object_is_trivially_valid() -> Result<()> {
    assert!(is_valid::<Transfer>(None));
    assert_eq!(require_valid::<Transfer>(None)?, None);
    Ok(())
}

#[test]
fn test_violations_carry_interpolated_messages() {
    let transfer = Transfer {
        reference: String::new(),
        amount: 0,
        currency: Currency::Usd,
    };
    let violations = validate(&transfer);
    assert_eq!(violations.len(), 2);
    let messages: Vec<&str> = violations.iter().map(|v| v.message.as_str()).collect();
    assert!(messages.contains(&"must be greater than 0"));
    assert!(messages.contains(&"must not be blank"));
}

#[test]
fn test_the_failure_carries_the_complete_violation_set() {
    let transfer = Transfer {
        reference: "  ".to_string(),
        amount: -3,
        currency: Currency::Gbp,
    };
    match ensure_valid(transfer) {
        Err(TestkitError::ConstraintViolationError { violations }) => {
            let paths: Vec<&str> = violations.iter().map(|v| v.path.as_str()).collect();
            assert_eq!(paths, ["amount", "reference"]);
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_the_shared_validator_is_reachable_through_indirection() {
    let violations = with_validator(|validator| validator.validate(&valid_transfer()));
    assert!(violations.is_empty());
}

#[test]
fn test_sampled_transfers_validate_across_all_currencies() -> Result<()> {
    let mut seen = HashSet::new();
    for _ in 0..10_000 {
        let currency = random_variant::<Currency>()?;
        let transfer = Transfer {
            currency,
            ..valid_transfer()
        };
        assert!(is_valid(Some(&transfer)));
        seen.insert(currency);
        if seen.len() == Currency::iter().len() {
            break;
        }
    }
    assert_eq!(seen.len(), Currency::iter().len());
    Ok(())
}
