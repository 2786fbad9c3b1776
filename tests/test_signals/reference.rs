//! Straightforward evaluations of the filtering sums, used to check the
//! streaming implementation.

/// `y[i] = sum_k h[k] * x[i - (n-1-k)]`, zero outside the frame
pub fn direct_convolve(taps: &[f64], data: &[f64]) -> Vec<f64> {
    let n = taps.len() as isize;
    let len = data.len() as isize;
    (0..len)
        .map(|i| {
            let mut acc = 0.0;
            for k in 0..n {
                let idx = i - (n - 1 - k);
                if idx >= 0 && idx < len {
                    acc += taps[k as usize] * data[idx as usize];
                }
            }
            acc
        })
        .collect()
}

/// Forward pass, reverse, backward pass, reverse
pub fn direct_zero_phase(taps: &[f64], data: &[f64]) -> Vec<f64> {
    let mut forward = direct_convolve(taps, data);
    forward.reverse();
    let mut backward = direct_convolve(taps, &forward);
    backward.reverse();
    backward
}

/// `R[t] = sum_k h[k] * h[k - t]` for `t` in `0..len`, zero for `t >= n`
pub fn one_sided_autocorrelation(taps: &[f64], len: usize) -> Vec<f64> {
    let n = taps.len();
    (0..len)
        .map(|t| {
            if t >= n {
                0.0
            } else {
                (t..n).map(|k| taps[k] * taps[k - t]).sum()
            }
        })
        .collect()
}
