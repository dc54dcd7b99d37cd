use mmult::{Dims, Variant, WorkerPool, matmul_naive_ijk, multiply};
use proptest::prelude::*;

/// Dimensions up to 40 in each direction plus a tile edge, with operands
/// drawn from the full `i32` range so products wrap.
fn arb_problem() -> impl Strategy<Value = (Dims, usize, Vec<i32>, Vec<i32>)> {
    (1usize..40, 1usize..40, 1usize..40, 1usize..20).prop_flat_map(|(m, k, n, tile)| {
        let dims = Dims::new(m, k, n);
        (
            Just(dims),
            Just(tile),
            proptest::collection::vec(any::<i32>(), dims.a_len()),
            proptest::collection::vec(any::<i32>(), dims.b_len()),
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn every_variant_matches_reference((dims, tile, a, b) in arb_problem()) {
        let pool = WorkerPool::new(3).unwrap();

        let mut expected = vec![0; dims.c_len()];
        matmul_naive_ijk(&a, &b, &mut expected, dims);

        for variant in Variant::ALL {
            let mut actual = vec![0x5a5a_5a5a; dims.c_len()];
            multiply(variant, &a, &b, &mut actual, dims, tile, &pool).unwrap();
            prop_assert_eq!(&expected, &actual, "{} {} tile {}", variant, dims, tile);
        }
    }

    #[test]
    fn small_values_never_overflow((dims, tile, _a, _b) in arb_problem(), seed in any::<u8>()) {
        // Values in -3..=3 keep every sum far from i32 overflow, so the
        // result must also equal a widened i64 computation.
        let a: Vec<i32> = (0..dims.a_len()).map(|i| ((i + seed as usize) % 7) as i32 - 3).collect();
        let b: Vec<i32> = (0..dims.b_len()).map(|i| ((i * 3 + seed as usize) % 7) as i32 - 3).collect();
        let pool = WorkerPool::new(2).unwrap();

        let mut actual = vec![0; dims.c_len()];
        multiply(Variant::Tiled3d, &a, &b, &mut actual, dims, tile, &pool).unwrap();

        for i in 0..dims.m {
            for j in 0..dims.n {
                let wide: i64 = (0..dims.k)
                    .map(|z| a[i * dims.k + z] as i64 * b[z * dims.n + j] as i64)
                    .sum();
                prop_assert_eq!(wide, actual[i * dims.n + j] as i64);
            }
        }
    }
}
