//! Type lattice resolver
//!
//! Pure functions that compute common types for two or more descriptors:
//! - `tightest_common_type`: lossless common type
//! - `wider_type_for_two` / `wider_type_for_many`: common type allowing bounded loss
//! - `wider_type_for_decimal`: DECIMAL precision/scale arithmetic
//! - `common_type_for_comparison`: common type for binary comparisons
//!
//! Every function returns `None` for incompatible inputs; none of them fail.

use crate::{PrecisionPolicy, SqlType, TypeFamily};
use log::trace;

/// Resolver over the default type lattice, parameterized by a precision policy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypeLattice {
    policy: PrecisionPolicy,
}

impl TypeLattice {
    pub fn new(policy: PrecisionPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &PrecisionPolicy {
        &self.policy
    }

    /// The minimal type both inputs convert to without loss
    ///
    /// Commutative. The result is nullable if either input is.
    pub fn tightest_common_type(&self, t1: &SqlType, t2: &SqlType) -> Option<SqlType> {
        let nullable = t1.is_nullable() || t2.is_nullable();
        let result = tightest_sans_nullability(t1, t2).map(|t| t.with_nullable(nullable));
        trace!(
            "tightest({}, {}) = {}",
            t1,
            t2,
            result.as_ref().map_or("none".to_string(), |t| t.to_string())
        );
        result
    }

    /// Common type of two inputs, permitting DECIMAL to approximate widening
    /// and, when `allow_string_promotion` is set, promotion of scalars to VARCHAR
    pub fn wider_type_for_two(
        &self,
        t1: &SqlType,
        t2: &SqlType,
        allow_string_promotion: bool,
    ) -> Option<SqlType> {
        if let Some(tightest) = self.tightest_common_type(t1, t2) {
            return Some(tightest);
        }

        let nullable = t1.is_nullable() || t2.is_nullable();
        let widened = match (t1.family(), t2.family()) {
            (TypeFamily::Decimal, TypeFamily::ApproximateNumeric)
            | (TypeFamily::ApproximateNumeric, TypeFamily::Decimal) => Some(SqlType::double()),
            (TypeFamily::Collection, TypeFamily::Collection) => {
                match (t1.element(), t2.element()) {
                    (Some(e1), Some(e2)) => self
                        .wider_type_for_two(e1, e2, allow_string_promotion)
                        .map(SqlType::collection),
                    _ => None,
                }
            }
            _ => self
                .wider_type_for_decimal(t1, t2)
                .or_else(|| {
                    if allow_string_promotion {
                        self.promote_to_varchar(t1, t2)
                    } else {
                        None
                    }
                }),
        };

        let result = widened.map(|t| t.with_nullable(nullable));
        trace!(
            "wider({}, {}, promote={}) = {}",
            t1,
            t2,
            allow_string_promotion,
            result.as_ref().map_or("none".to_string(), |t| t.to_string())
        );
        result
    }

    /// Common type of a sequence of inputs
    ///
    /// Without character-bearing elements this is a left fold of
    /// [`wider_type_for_two`](Self::wider_type_for_two). Otherwise the
    /// non-character elements are unified first and the character-bearing
    /// ones folded last, which makes the result independent of input order.
    pub fn wider_type_for_many(
        &self,
        types: &[SqlType],
        allow_string_promotion: bool,
    ) -> Option<SqlType> {
        match types {
            [] => return None,
            [single] => return Some(single.clone()),
            _ => {}
        }

        if !types.iter().any(SqlType::has_character) {
            return self.fold_wider(types.iter(), None, allow_string_promotion);
        }

        let (strings, others): (Vec<&SqlType>, Vec<&SqlType>) =
            types.iter().partition(|t| t.has_character());

        if others.is_empty() {
            return self.fold_wider(strings.into_iter(), None, allow_string_promotion);
        }

        match self.fold_wider(others.iter().copied(), None, allow_string_promotion) {
            Some(base) => self.fold_wider(strings.into_iter(), Some(base), allow_string_promotion),
            None if allow_string_promotion => {
                // No common non-string type; promote everything onto the strings
                let base = self.fold_wider(strings.into_iter(), None, true)?;
                self.fold_wider(others.into_iter(), Some(base), true)
            }
            None => None,
        }
    }

    fn fold_wider<'a>(
        &self,
        types: impl Iterator<Item = &'a SqlType>,
        seed: Option<SqlType>,
        allow_string_promotion: bool,
    ) -> Option<SqlType> {
        let mut acc = seed;
        for ty in types {
            acc = match acc {
                None => Some(ty.clone()),
                Some(prev) => Some(self.wider_type_for_two(&prev, ty, allow_string_promotion)?),
            };
        }
        acc
    }

    /// DECIMAL common type of two numerics, at least one of them DECIMAL
    ///
    /// The result keeps the larger integer part and the larger scale. When
    /// that needs more digits than the policy allows, the integer part is
    /// kept (up to `max_precision`) and the scale shrinks to fit.
    pub fn wider_type_for_decimal(&self, t1: &SqlType, t2: &SqlType) -> Option<SqlType> {
        if !(t1.is_decimal() || t2.is_decimal()) || !t1.is_numeric() || !t2.is_numeric() {
            return None;
        }
        let d1 = self.policy.decimal_of(t1)?;
        let d2 = self.policy.decimal_of(t2)?;
        let (p1, s1) = (d1.precision().unwrap_or(0), d1.scale().unwrap_or(0));
        let (p2, s2) = (d2.precision().unwrap_or(0), d2.scale().unwrap_or(0));

        let scale = s1.max(s2);
        let integer_digits = (p1 - s1).max(p2 - s2);
        let (precision, scale) = self.policy.fit_digits(integer_digits, scale);

        let nullable = t1.is_nullable() || t2.is_nullable();
        Some(SqlType::decimal(precision, scale).with_nullable(nullable))
    }

    /// Common type for a binary comparison
    ///
    /// A string compared with a date, time or timestamp is read as that
    /// datetime type. Otherwise the tightest type is preferred, falling back
    /// to widening with string promotion only when either side is CHARACTER.
    pub fn common_type_for_comparison(&self, t1: &SqlType, t2: &SqlType) -> Option<SqlType> {
        let nullable = t1.is_nullable() || t2.is_nullable();

        if t1.is_character() && t2.is_datetime() {
            return Some(t2.clone().with_nullable(nullable));
        }
        if t2.is_character() && t1.is_datetime() {
            return Some(t1.clone().with_nullable(nullable));
        }
        if (t1.is_binary() && t2.is_approximate()) || (t2.is_binary() && t1.is_approximate()) {
            return None;
        }

        self.tightest_common_type(t1, t2).or_else(|| {
            let promote = t1.is_character() || t2.is_character();
            self.wider_type_for_two(t1, t2, promote)
        })
    }

    /// VARCHAR common type of a CHARACTER and an atomic scalar
    ///
    /// The length is the larger of the character side's length and the
    /// policy default, unbounded winning.
    fn promote_to_varchar(&self, t1: &SqlType, t2: &SqlType) -> Option<SqlType> {
        let string = if t1.is_character() && t2.is_atomic() {
            t1
        } else if t2.is_character() && t1.is_atomic() {
            t2
        } else {
            return None;
        };
        let length = max_length(string.precision(), self.policy.default_varchar_precision);
        Some(SqlType::varchar(length))
    }
}

/// Larger of two optional lengths where `None` means unbounded
fn max_length(a: Option<u32>, b: Option<u32>) -> Option<u32> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.max(b)),
        _ => None,
    }
}

fn tightest_sans_nullability(t1: &SqlType, t2: &SqlType) -> Option<SqlType> {
    use TypeFamily as F;

    if t1.equals_sans_nullability(t2) {
        return Some(t1.clone());
    }
    if t1.is_null() {
        return Some(t2.clone());
    }
    if t2.is_null() {
        return Some(t1.clone());
    }
    if t1.is_any() || t2.is_any() {
        return Some(SqlType::any());
    }

    match (t1.family(), t2.family()) {
        (F::Character, F::Character) => {
            Some(SqlType::varchar(max_length(t1.precision(), t2.precision())))
        }
        (F::Binary, F::Binary) => Some(SqlType::varbinary(max_length(
            t1.precision(),
            t2.precision(),
        ))),

        // DECIMAL pairs are left to decimal widening
        (F::Decimal, _) | (_, F::Decimal) => None,

        (F::ApproximateNumeric, F::ApproximateNumeric) | (F::ExactNumeric, F::ExactNumeric) => {
            Some(if t1.precision() >= t2.precision() { t1 } else { t2 }.clone())
        }
        (F::ApproximateNumeric, F::ExactNumeric) => Some(t1.clone()),
        (F::ExactNumeric, F::ApproximateNumeric) => Some(t2.clone()),

        (F::Date, F::Timestamp) => Some(t2.clone()),
        (F::Timestamp, F::Date) => Some(t1.clone()),
        (F::Time, F::Time) | (F::Timestamp, F::Timestamp) => {
            Some(if t1.precision() >= t2.precision() { t1 } else { t2 }.clone())
        }

        (F::Collection, F::Collection) => match (t1.element(), t2.element()) {
            (Some(e1), Some(e2)) => {
                let nullable = e1.is_nullable() || e2.is_nullable();
                tightest_sans_nullability(e1, e2)
                    .map(|e| SqlType::collection(e.with_nullable(nullable)))
            }
            _ => None,
        },

        _ => None,
    }
}
