//! Calculation model and the arithmetic evaluation engine.
//!
//! The engine is a pure, total function from an operation kind and two
//! operands to a result or a well-defined error. It performs no I/O and owns
//! no state; persistence of the outcome is the repository's concern.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::error::Error;

/// Closed enumeration of arithmetic operation kinds.
///
/// Subtraction serializes as `"Sub"` to match the established wire format;
/// `"Subtract"` is accepted as an input alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Operation {
    /// `a + b`
    Add,
    /// `a - b`
    #[serde(alias = "Subtract")]
    Sub,
    /// `a * b`
    Multiply,
    /// `a / b`, failing on a zero divisor.
    Divide,
}

impl Operation {
    /// Map a boundary string onto the closed enumeration.
    ///
    /// Accepted spellings: `Add`, `Subtract`/`Sub`, `Multiply`, `Divide`.
    /// Any other string is an [`ErrorCode::InvalidOperation`] failure.
    ///
    /// [`ErrorCode::InvalidOperation`]: super::ErrorCode::InvalidOperation
    pub fn parse(kind: &str) -> Result<Self, Error> {
        match kind {
            "Add" => Ok(Self::Add),
            "Subtract" | "Sub" => Ok(Self::Sub),
            "Multiply" => Ok(Self::Multiply),
            "Divide" => Ok(Self::Divide),
            other => Err(Error::invalid_operation(format!(
                "unknown operation type: {other}"
            ))),
        }
    }

    /// Canonical string form, as stored and as serialized.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "Add",
            Self::Sub => "Sub",
            Self::Multiply => "Multiply",
            Self::Divide => "Divide",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Evaluate `operation` over the two operands.
///
/// # Errors
/// Returns [`ErrorCode::DivisionByZero`] when dividing by zero; no result is
/// produced in that case.
///
/// [`ErrorCode::DivisionByZero`]: super::ErrorCode::DivisionByZero
///
/// # Examples
/// ```
/// use backend::domain::{evaluate, Operation};
///
/// assert_eq!(evaluate(Operation::Add, 10.0, 5.0), Ok(15.0));
/// assert!(evaluate(Operation::Divide, 1.0, 0.0).is_err());
/// ```
pub fn evaluate(operation: Operation, a: f64, b: f64) -> Result<f64, Error> {
    match operation {
        Operation::Add => Ok(a + b),
        Operation::Sub => Ok(a - b),
        Operation::Multiply => Ok(a * b),
        Operation::Divide => {
            if b == 0.0 {
                Err(Error::division_by_zero("division by zero is not allowed"))
            } else {
                Ok(a / b)
            }
        }
    }
}

/// Stable calculation identifier assigned by the record store on creation.
///
/// Identifiers are backed by a monotonic sequence and are never reused after
/// deletion.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct CalculationId(i32);

impl CalculationId {
    /// Wrap a raw identifier value.
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    /// Access the raw identifier value.
    pub fn get(self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for CalculationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for CalculationId {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

/// Validated inputs for creating or editing a calculation.
///
/// The result is deliberately absent: it is always derived by [`evaluate`]
/// and never supplied by callers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculationDraft {
    /// Operand A.
    pub a: f64,
    /// Operand B.
    pub b: f64,
    /// Operation kind applied to the operands.
    pub operation: Operation,
}

impl CalculationDraft {
    /// Build a draft from its components.
    pub fn new(a: f64, b: f64, operation: Operation) -> Self {
        Self { a, b, operation }
    }

    /// Run the engine over this draft's inputs.
    pub fn evaluate(&self) -> Result<f64, Error> {
        evaluate(self.operation, self.a, self.b)
    }
}

/// Persisted calculation record.
///
/// ## Invariants
/// - `result` is consistent with `evaluate(operation, a, b)`; a record with
///   an unevaluatable input combination is never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Calculation {
    /// Identifier assigned on creation, stable thereafter.
    #[schema(value_type = i32, example = 1)]
    pub id: CalculationId,
    /// Operand A.
    pub a: f64,
    /// Operand B.
    pub b: f64,
    /// Operation kind.
    #[serde(rename = "type")]
    pub operation: Operation,
    /// Result computed by the engine at create or edit time.
    pub result: f64,
}

impl Calculation {
    /// Assemble a record from an identifier, draft, and computed result.
    pub fn from_draft(id: CalculationId, draft: &CalculationDraft, result: f64) -> Self {
        Self {
            id,
            a: draft.a,
            b: draft.b,
            operation: draft.operation,
            result,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Engine and serialization coverage.
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(Operation::Add, 10.0, 5.0, 15.0)]
    #[case(Operation::Sub, 10.0, 2.0, 8.0)]
    #[case(Operation::Multiply, 7.0, 3.0, 21.0)]
    #[case(Operation::Divide, 8.0, 2.0, 4.0)]
    #[case(Operation::Divide, 10.0, 5.0, 2.0)]
    #[case(Operation::Add, -1.5, 0.5, -1.0)]
    fn evaluate_returns_expected_result(
        #[case] operation: Operation,
        #[case] a: f64,
        #[case] b: f64,
        #[case] expected: f64,
    ) {
        assert_eq!(evaluate(operation, a, b), Ok(expected));
    }

    #[test]
    fn divide_by_zero_fails_without_a_result() {
        let error = evaluate(Operation::Divide, 10.0, 0.0).expect_err("must fail");
        assert_eq!(error.code(), crate::domain::ErrorCode::DivisionByZero);
    }

    #[rstest]
    #[case("Add", Operation::Add)]
    #[case("Sub", Operation::Sub)]
    #[case("Subtract", Operation::Sub)]
    #[case("Multiply", Operation::Multiply)]
    #[case("Divide", Operation::Divide)]
    fn parse_accepts_boundary_spellings(#[case] input: &str, #[case] expected: Operation) {
        assert_eq!(Operation::parse(input).expect("valid kind"), expected);
    }

    #[rstest]
    #[case("add")]
    #[case("NotAType")]
    #[case("")]
    fn parse_rejects_unknown_spellings(#[case] input: &str) {
        let error = Operation::parse(input).expect_err("must fail");
        assert_eq!(error.code(), crate::domain::ErrorCode::InvalidOperation);
    }

    #[test]
    fn calculation_serializes_with_type_field() {
        let draft = CalculationDraft::new(10.0, 2.0, Operation::Sub);
        let record = Calculation::from_draft(CalculationId::new(3), &draft, 8.0);
        let value = serde_json::to_value(&record).expect("serialize record");
        assert_eq!(
            value,
            json!({ "id": 3, "a": 10.0, "b": 2.0, "type": "Sub", "result": 8.0 })
        );
    }
}
