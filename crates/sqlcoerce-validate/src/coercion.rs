//! The coercion trait

use crate::gateway::{self, CoercionPlan};
use crate::strategy::{binary, conditional, function, membership, set_op};
use crate::{CoercionResult, FunctionSignature};
use log::debug;
use sqlcoerce_ast::Expression;
use sqlcoerce_types::{OperandFamily, OperandFamilyChecker, PrecisionPolicy, SqlType, cast_rules};

/// Implicit type coercion over a type lattice
///
/// Implementors supply the resolver functions; every strategy is provided on
/// top of them. Each strategy has a pure `plan_*` half that only reads the
/// tree and a boolean half that applies the plan through the
/// [gateway](crate::gateway) and reports whether any operand was converted.
///
/// A `false` return means the node was either already well-typed or could not
/// be coerced; the caller's own type check tells the two apart.
pub trait TypeCoercion: Send + Sync {
    /// Precision policy the resolver functions work under
    fn policy(&self) -> &PrecisionPolicy;

    fn tightest_common_type(&self, t1: &SqlType, t2: &SqlType) -> Option<SqlType>;

    fn wider_type_for_two(
        &self,
        t1: &SqlType,
        t2: &SqlType,
        allow_string_promotion: bool,
    ) -> Option<SqlType>;

    fn wider_type_for_many(
        &self,
        types: &[SqlType],
        allow_string_promotion: bool,
    ) -> Option<SqlType>;

    fn wider_type_for_decimal(&self, t1: &SqlType, t2: &SqlType) -> Option<SqlType>;

    fn common_type_for_comparison(&self, t1: &SqlType, t2: &SqlType) -> Option<SqlType>;

    /// Check if a value of type `from` may be implicitly converted to `to`
    fn can_cast_from(&self, to: &SqlType, from: &SqlType) -> bool {
        cast_rules::can_cast_from(to, from)
    }

    /// Destination type for an operand of type `input` under the `expected` family
    fn implicit_cast(&self, input: &SqlType, expected: OperandFamily) -> Option<SqlType> {
        cast_rules::implicit_cast(input, expected, self.policy())
    }

    /// Cast operand `index` of `parent` to `target`; see [`gateway::coerce_operand_type`]
    fn coerce_operand_type(
        &self,
        parent: &mut Expression,
        index: usize,
        target: &SqlType,
    ) -> CoercionResult<bool> {
        gateway::coerce_operand_type(parent, index, target)
    }

    // === Planners ===

    fn plan_row_type(
        &self,
        query: &Expression,
        column: usize,
        target: &SqlType,
    ) -> CoercionResult<CoercionPlan> {
        set_op::plan_row_type(self, query, column, target)
    }

    fn plan_query_source(
        &self,
        query: &Expression,
        source_row: &[SqlType],
        target_row: &[SqlType],
    ) -> CoercionResult<CoercionPlan> {
        set_op::plan_query_source(self, query, source_row, target_row)
    }

    fn plan_in_operation(&self, call: &Expression) -> CoercionResult<CoercionPlan> {
        membership::plan_in_operation(self, call)
    }

    fn plan_quantify_operation(&self, call: &Expression) -> CoercionResult<CoercionPlan> {
        membership::plan_quantify_operation(self, call)
    }

    fn plan_binary_arithmetic(&self, call: &Expression) -> CoercionResult<CoercionPlan> {
        binary::plan_binary_arithmetic(self, call)
    }

    fn plan_binary_comparison(&self, call: &Expression) -> CoercionResult<CoercionPlan> {
        binary::plan_binary_comparison(self, call)
    }

    fn plan_case_or_equivalent(&self, node: &Expression) -> CoercionResult<CoercionPlan> {
        conditional::plan_case_or_equivalent(self, node)
    }

    fn plan_builtin_function(
        &self,
        call: &Expression,
        checker: &OperandFamilyChecker,
    ) -> CoercionResult<CoercionPlan> {
        function::plan_builtin_function(self, call, checker)
    }

    fn plan_user_defined_function(
        &self,
        call: &Expression,
        signature: &FunctionSignature,
    ) -> CoercionResult<CoercionPlan> {
        function::plan_user_defined_function(self, call, signature)
    }

    // === Strategies ===

    /// Cast output column `column` of every branch of `query` to `target`
    fn row_type_coercion(
        &self,
        query: &mut Expression,
        column: usize,
        target: &SqlType,
    ) -> CoercionResult<bool> {
        let plan = self.plan_row_type(query, column, target)?;
        apply(self, "row type", query, &plan)
    }

    /// Cast the columns of an INSERT or UPDATE source to the target row type
    ///
    /// Nothing is converted unless every column either matches or can be
    /// implicitly cast.
    fn query_source_coercion(
        &self,
        query: &mut Expression,
        source_row: &[SqlType],
        target_row: &[SqlType],
    ) -> CoercionResult<bool> {
        let plan = self.plan_query_source(query, source_row, target_row)?;
        apply(self, "query source", query, &plan)
    }

    /// `a [NOT] IN (...)` with a value list or a sub-query
    fn in_operation_coercion(&self, call: &mut Expression) -> CoercionResult<bool> {
        let plan = self.plan_in_operation(call)?;
        apply(self, "IN", call, &plan)
    }

    /// `a op SOME|ANY|ALL (...)`
    fn quantify_operation_coercion(&self, call: &mut Expression) -> CoercionResult<bool> {
        let plan = self.plan_quantify_operation(call)?;
        apply(self, "quantified comparison", call, &plan)
    }

    fn binary_arithmetic_coercion(&self, call: &mut Expression) -> CoercionResult<bool> {
        let plan = self.plan_binary_arithmetic(call)?;
        apply(self, "arithmetic", call, &plan)
    }

    /// Binary comparison or BETWEEN
    fn binary_comparison_coercion(&self, call: &mut Expression) -> CoercionResult<bool> {
        let plan = self.plan_binary_comparison(call)?;
        apply(self, "comparison", call, &plan)
    }

    /// CASE, COALESCE or NULLIF; NULLIF is never coerced
    fn case_or_equivalent_coercion(&self, node: &mut Expression) -> CoercionResult<bool> {
        let plan = self.plan_case_or_equivalent(node)?;
        apply(self, "CASE", node, &plan)
    }

    fn builtin_function_coercion(
        &self,
        call: &mut Expression,
        checker: &OperandFamilyChecker,
    ) -> CoercionResult<bool> {
        let plan = self.plan_builtin_function(call, checker)?;
        apply(self, "builtin function", call, &plan)
    }

    fn user_defined_function_coercion(
        &self,
        call: &mut Expression,
        signature: &FunctionSignature,
    ) -> CoercionResult<bool> {
        let plan = self.plan_user_defined_function(call, signature)?;
        apply(self, "user-defined function", call, &plan)
    }
}

fn apply<C: TypeCoercion + ?Sized>(
    coercion: &C,
    strategy: &str,
    root: &mut Expression,
    plan: &CoercionPlan,
) -> CoercionResult<bool> {
    if plan.is_empty() {
        return Ok(false);
    }
    debug!("{strategy} coercion plan: {plan}");
    gateway::apply_plan_with(root, plan, |parent, index, target| {
        coercion.coerce_operand_type(parent, index, target)
    })
}
