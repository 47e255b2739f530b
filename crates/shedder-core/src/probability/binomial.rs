use num_bigint::BigUint;
use num_traits::{One, Zero};

/// Exact `C(n, k)`; zero when `k > n`.
pub fn binomial(n: usize, k: usize) -> BigUint {
    if k > n {
        return BigUint::zero();
    }
    let k = k.min(n - k);
    let mut result = BigUint::one();
    for i in 0..k {
        // Each partial product is C(n, i + 1) so the division is exact.
        result *= n - i;
        result /= i + 1;
    }
    result
}
