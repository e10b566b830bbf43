//! Three ways to sum `1..=n`.

/// Closed form, `n(n + 1) / 2`. Constant time.
pub fn sum_to_n_formula(n: u64) -> u64 {
    n * (n + 1) / 2
}

/// Accumulates `1..=n` in a loop. Linear time, constant space.
pub fn sum_to_n_loop(n: u64) -> u64 {
    let mut sum = 0;
    for i in 1..=n {
        sum += i;
    }
    sum
}

/// Recursive definition. Linear stack depth, so keep `n` small.
pub fn sum_to_n_recursive(n: u64) -> u64 {
    if n == 0 {
        0
    } else {
        n + sum_to_n_recursive(n - 1)
    }
}
