//! Coercion implementations

use crate::TypeCoercion;
use sqlcoerce_types::{
    OperandFamily, PrecisionPolicy, SqlType, TypeLattice, can_cast_from, implicit_cast,
};

/// Coercion over the default type lattice
///
/// Strings are promoted where the lattice allows it, so `col = '5'` and
/// `1 + '2'` type-check after coercion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultTypeCoercion {
    lattice: TypeLattice,
}

impl DefaultTypeCoercion {
    pub fn new(policy: PrecisionPolicy) -> Self {
        Self {
            lattice: TypeLattice::new(policy),
        }
    }

    pub fn lattice(&self) -> &TypeLattice {
        &self.lattice
    }
}

impl TypeCoercion for DefaultTypeCoercion {
    fn policy(&self) -> &PrecisionPolicy {
        self.lattice.policy()
    }

    fn tightest_common_type(&self, t1: &SqlType, t2: &SqlType) -> Option<SqlType> {
        self.lattice.tightest_common_type(t1, t2)
    }

    fn wider_type_for_two(
        &self,
        t1: &SqlType,
        t2: &SqlType,
        allow_string_promotion: bool,
    ) -> Option<SqlType> {
        self.lattice.wider_type_for_two(t1, t2, allow_string_promotion)
    }

    fn wider_type_for_many(
        &self,
        types: &[SqlType],
        allow_string_promotion: bool,
    ) -> Option<SqlType> {
        self.lattice.wider_type_for_many(types, allow_string_promotion)
    }

    fn wider_type_for_decimal(&self, t1: &SqlType, t2: &SqlType) -> Option<SqlType> {
        self.lattice.wider_type_for_decimal(t1, t2)
    }

    fn common_type_for_comparison(&self, t1: &SqlType, t2: &SqlType) -> Option<SqlType> {
        self.lattice.common_type_for_comparison(t1, t2)
    }
}

/// Coercion closer to the SQL standard
///
/// Character values never unify with other families: there is no string
/// promotion, comparisons use only the tightest and DECIMAL rules, and no
/// implicit cast crosses between character and non-character types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StrictTypeCoercion {
    lattice: TypeLattice,
}

impl StrictTypeCoercion {
    pub fn new(policy: PrecisionPolicy) -> Self {
        Self {
            lattice: TypeLattice::new(policy),
        }
    }
}

/// Check if a cast between `to` and `from` crosses the character boundary
fn crosses_character(to: &SqlType, from: &SqlType) -> bool {
    if from.is_null() || from.is_any() || to.is_any() {
        return false;
    }
    to.has_character() != from.has_character()
}

impl TypeCoercion for StrictTypeCoercion {
    fn policy(&self) -> &PrecisionPolicy {
        self.lattice.policy()
    }

    fn tightest_common_type(&self, t1: &SqlType, t2: &SqlType) -> Option<SqlType> {
        self.lattice.tightest_common_type(t1, t2)
    }

    fn wider_type_for_two(
        &self,
        t1: &SqlType,
        t2: &SqlType,
        _allow_string_promotion: bool,
    ) -> Option<SqlType> {
        self.lattice.wider_type_for_two(t1, t2, false)
    }

    fn wider_type_for_many(
        &self,
        types: &[SqlType],
        _allow_string_promotion: bool,
    ) -> Option<SqlType> {
        self.lattice.wider_type_for_many(types, false)
    }

    fn wider_type_for_decimal(&self, t1: &SqlType, t2: &SqlType) -> Option<SqlType> {
        self.lattice.wider_type_for_decimal(t1, t2)
    }

    fn common_type_for_comparison(&self, t1: &SqlType, t2: &SqlType) -> Option<SqlType> {
        self.lattice
            .tightest_common_type(t1, t2)
            .or_else(|| self.lattice.wider_type_for_decimal(t1, t2))
    }

    fn can_cast_from(&self, to: &SqlType, from: &SqlType) -> bool {
        !crosses_character(to, from) && can_cast_from(to, from)
    }

    fn implicit_cast(&self, input: &SqlType, expected: OperandFamily) -> Option<SqlType> {
        implicit_cast(input, expected, self.policy())
            .filter(|target| !crosses_character(target, input))
    }
}
