//! Coercion benchmarks using divan
//!
//! Resolver calls and full strategy rounds over freshly built trees.

use sqlcoerce::{
    CoercionConfig, ComparisonOp, Expression, Operator, SqlType, TypeCoercion, TypeLattice,
};

fn main() {
    divan::main();
}

// === Resolver Benchmarks ===

mod resolver {
    use super::*;

    #[divan::bench]
    fn tightest_numeric(bencher: divan::Bencher) {
        let lattice = TypeLattice::default();
        let (a, b) = (SqlType::integer(), SqlType::double());
        bencher.bench_local(|| lattice.tightest_common_type(divan::black_box(&a), &b));
    }

    #[divan::bench]
    fn wider_decimal(bencher: divan::Bencher) {
        let lattice = TypeLattice::default();
        let (a, b) = (SqlType::decimal(19, 4), SqlType::decimal(10, 10));
        bencher.bench_local(|| lattice.wider_type_for_decimal(divan::black_box(&a), &b));
    }

    #[divan::bench(args = [2, 8, 32])]
    fn wider_many_with_strings(bencher: divan::Bencher, len: usize) {
        let lattice = TypeLattice::default();
        let types: Vec<SqlType> = (0..len)
            .map(|i| match i % 3 {
                0 => SqlType::varchar(Some(i as u32 + 1)),
                1 => SqlType::integer(),
                _ => SqlType::decimal(10, 2),
            })
            .collect();
        bencher.bench_local(|| lattice.wider_type_for_many(divan::black_box(&types), true));
    }
}

// === Strategy Benchmarks ===

mod strategies {
    use super::*;

    fn in_list(len: usize) -> Expression {
        let items = (0..len)
            .map(|i| {
                if i % 2 == 0 {
                    Expression::integer(i as i64)
                } else {
                    Expression::string(i.to_string())
                }
            })
            .collect();
        Expression::call(
            Operator::In,
            vec![
                Expression::column("x", SqlType::decimal(10, 2)),
                Expression::value_list(items),
            ],
            Some(SqlType::boolean()),
        )
    }

    #[divan::bench]
    fn comparison(bencher: divan::Bencher) {
        let coercion = CoercionConfig::default().build();
        bencher
            .with_inputs(|| {
                Expression::call(
                    Operator::Comparison(ComparisonOp::Equal),
                    vec![
                        Expression::column("code", SqlType::varchar(Some(5))),
                        Expression::integer(42),
                    ],
                    Some(SqlType::boolean()),
                )
            })
            .bench_local_values(|mut call| {
                let _ = coercion.binary_comparison_coercion(&mut call);
                call
            });
    }

    #[divan::bench(args = [4, 64])]
    fn in_operation(bencher: divan::Bencher, len: usize) {
        let coercion = CoercionConfig::default().build();
        bencher
            .with_inputs(|| in_list(len))
            .bench_local_values(|mut call| {
                let _ = coercion.in_operation_coercion(&mut call);
                call
            });
    }

    #[divan::bench(args = [4, 64])]
    fn plan_only(bencher: divan::Bencher, len: usize) {
        let coercion: Box<dyn TypeCoercion> = CoercionConfig::default().build();
        let call = in_list(len);
        bencher.bench_local(|| coercion.plan_in_operation(divan::black_box(&call)));
    }
}
