//! Implicit cast rules
//!
//! Two questions are answered here:
//! - may a value of one type be implicitly converted to another (`can_cast_from`)
//! - which concrete type should an operand become when an operator requires
//!   a given family (`implicit_cast`)

use crate::{OperandFamily, PrecisionPolicy, SqlType, TypeFamily};

/// Check if a value of type `from` may be implicitly converted to `to`
///
/// NULL converts to everything; ANY on either side is always accepted.
/// Character values convert to most scalar families, mirroring the way
/// string literals are accepted in numeric and datetime positions.
pub fn can_cast_from(to: &SqlType, from: &SqlType) -> bool {
    if from.is_null() || from.is_any() || to.is_any() {
        return true;
    }
    if to.family() == from.family() && !to.is_collection() {
        return true;
    }

    match (to.family(), from.family()) {
        (TypeFamily::Collection, TypeFamily::Collection) => match (to.element(), from.element()) {
            (Some(to_element), Some(from_element)) => can_cast_from(to_element, from_element),
            _ => false,
        },

        // Numeric widening in any direction, strings parse as numbers
        (t, f) if t.is_numeric() => f.is_numeric() || f == TypeFamily::Character,

        (TypeFamily::Character, f) => matches!(
            f,
            TypeFamily::Boolean
                | TypeFamily::ExactNumeric
                | TypeFamily::ApproximateNumeric
                | TypeFamily::Decimal
                | TypeFamily::Date
                | TypeFamily::Time
                | TypeFamily::Timestamp
                | TypeFamily::Interval
        ),

        (TypeFamily::Binary, TypeFamily::Character) => true,
        (TypeFamily::Boolean, TypeFamily::Character) => true,

        (TypeFamily::Date, TypeFamily::Timestamp | TypeFamily::Character) => true,
        (TypeFamily::Time, TypeFamily::Timestamp | TypeFamily::Character) => true,
        (TypeFamily::Timestamp, TypeFamily::Date | TypeFamily::Time | TypeFamily::Character) => {
            true
        }
        (TypeFamily::Interval, TypeFamily::Character) => true,

        _ => false,
    }
}

/// Destination type for an operand of type `input` under the required `expected` family
///
/// Returns `input` itself when it already belongs to the family, and `None`
/// when no implicit conversion exists.
pub fn implicit_cast(
    input: &SqlType,
    expected: OperandFamily,
    policy: &PrecisionPolicy,
) -> Option<SqlType> {
    use OperandFamily as F;

    if expected.contains(input) {
        return Some(input.clone());
    }

    // Untyped NULL takes the family's representative type
    if input.is_null() {
        return expected.default_concrete_type(policy);
    }

    if input.is_numeric() && expected == F::Decimal {
        return policy.decimal_of(input);
    }
    // REAL/DOUBLE -> DECIMAL
    if input.is_approximate() && expected == F::ExactNumeric {
        return policy.decimal_of(input);
    }

    match input.family() {
        TypeFamily::Date if expected == F::Timestamp => {
            return Some(SqlType::timestamp(0).with_nullable(input.is_nullable()));
        }
        TypeFamily::Timestamp if expected == F::Date => {
            return Some(SqlType::date().with_nullable(input.is_nullable()));
        }
        _ => {}
    }

    if input.is_character() {
        let target = match expected {
            e if e.is_numeric() => e.default_concrete_type(policy),
            F::Date | F::Time | F::Timestamp | F::Datetime | F::Binary | F::Boolean => {
                expected.default_concrete_type(policy)
            }
            _ => None,
        };
        return target.map(|t| t.with_nullable(input.is_nullable()));
    }

    // From here on the input is never a string
    if input.is_atomic() && matches!(expected, F::String | F::Character) {
        return expected
            .default_concrete_type(policy)
            .map(|t| t.with_nullable(input.is_nullable()));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_cast_from_numeric() {
        assert!(can_cast_from(&SqlType::integer(), &SqlType::double()));
        assert!(can_cast_from(&SqlType::decimal(5, 2), &SqlType::varchar(None)));
        assert!(!can_cast_from(&SqlType::integer(), &SqlType::boolean()));
        assert!(!can_cast_from(&SqlType::integer(), &SqlType::date()));
    }

    #[test]
    fn test_can_cast_from_character() {
        assert!(can_cast_from(&SqlType::varchar(Some(3)), &SqlType::integer()));
        assert!(can_cast_from(&SqlType::varchar(None), &SqlType::date()));
        assert!(!can_cast_from(&SqlType::varchar(None), &SqlType::varbinary(None)));
        assert!(can_cast_from(&SqlType::varbinary(None), &SqlType::varchar(None)));
    }

    #[test]
    fn test_can_cast_from_special() {
        assert!(can_cast_from(&SqlType::boolean(), &SqlType::null()));
        assert!(can_cast_from(&SqlType::boolean(), &SqlType::any()));
        assert!(can_cast_from(&SqlType::any(), &SqlType::date()));
        assert!(can_cast_from(
            &SqlType::collection(SqlType::bigint()),
            &SqlType::collection(SqlType::integer())
        ));
        assert!(!can_cast_from(
            &SqlType::collection(SqlType::date()),
            &SqlType::collection(SqlType::integer())
        ));
    }

    #[test]
    fn test_implicit_cast_keeps_member() {
        let policy = PrecisionPolicy::default();
        let ty = SqlType::smallint();
        assert_eq!(implicit_cast(&ty, OperandFamily::Numeric, &policy), Some(ty));
    }

    #[test]
    fn test_implicit_cast_numeric_to_decimal() {
        let policy = PrecisionPolicy::default();
        assert_eq!(
            implicit_cast(&SqlType::integer(), OperandFamily::Decimal, &policy),
            Some(SqlType::decimal(10, 0))
        );
        assert_eq!(
            implicit_cast(&SqlType::real(), OperandFamily::ExactNumeric, &policy),
            Some(SqlType::decimal(14, 7))
        );
    }

    #[test]
    fn test_implicit_cast_strings() {
        let policy = PrecisionPolicy::default();
        let varchar = SqlType::varchar(Some(8));
        assert_eq!(
            implicit_cast(&varchar, OperandFamily::Numeric, &policy),
            Some(SqlType::decimal(19, 0))
        );
        assert_eq!(
            implicit_cast(&varchar, OperandFamily::Date, &policy),
            Some(SqlType::date())
        );
        assert_eq!(
            implicit_cast(&SqlType::integer(), OperandFamily::Character, &policy),
            Some(SqlType::varchar(None))
        );
        assert_eq!(implicit_cast(&varchar, OperandFamily::Interval, &policy), None);
    }

    #[test]
    fn test_implicit_cast_datetime_and_null() {
        let policy = PrecisionPolicy::default();
        assert_eq!(
            implicit_cast(&SqlType::date(), OperandFamily::Timestamp, &policy),
            Some(SqlType::timestamp(0))
        );
        assert_eq!(
            implicit_cast(&SqlType::null(), OperandFamily::Boolean, &policy),
            Some(SqlType::boolean())
        );
        assert_eq!(
            implicit_cast(&SqlType::boolean(), OperandFamily::Numeric, &policy),
            None
        );
    }
}
