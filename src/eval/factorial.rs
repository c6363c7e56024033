//! Chunked parallel factorial
//!
//! `n!` is split into contiguous ranges whose products are computed on the
//! rayon pool and multiplied back together in range order. The chunk count
//! is the smaller of the pool width and the decimal digit length of `n`,
//! so small arguments stay on one thread and large ones never fan out past
//! the point where the split pays for itself.

use num_bigint::BigInt;
use num_traits::One;
use rayon::prelude::*;

pub(crate) fn factorial(n: u64) -> BigInt {
    if n < 2 {
        return BigInt::one();
    }
    let threads = rayon::current_num_threads().max(1) as u64;
    let digits = u64::from(n.ilog10() + 1);
    let chunks = threads.min(digits);
    partition(n, chunks)
        .into_par_iter()
        .map(|(lo, hi)| range_product(lo, hi))
        .collect::<Vec<_>>()
        .into_iter()
        .fold(BigInt::one(), |acc, part| acc * part)
}

/// Contiguous ranges covering `[1, n]`, the first `n % chunks` of them one
/// element longer
fn partition(n: u64, chunks: u64) -> Vec<(u64, u64)> {
    let size = n / chunks;
    let extra = n % chunks;
    let mut ranges = Vec::with_capacity(chunks as usize);
    let mut start = 1;
    for i in 0..chunks {
        let len = size + u64::from(i < extra);
        ranges.push((start, start + len - 1));
        start += len;
    }
    ranges
}

fn range_product(lo: u64, hi: u64) -> BigInt {
    (lo..=hi).map(BigInt::from).fold(BigInt::one(), |acc, v| acc * v)
}
