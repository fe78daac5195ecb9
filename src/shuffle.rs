//! Uniform in-place shuffling.

use rand::Rng;

/// Fisher-Yates shuffle: walk from the last index down to 1, swapping each
/// element with a uniformly chosen one at or below it. Linear time, and every
/// permutation is equally likely given an unbiased source.
pub fn fisher_yates<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}
