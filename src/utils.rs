use std::ops::Neg;

use crate::Weight;

/// Given the frequencies of the symbols of a source and their sum, calculates the entropy of the
/// source, in bits per symbol:
/// ```text
/// entropy(P) = - ∑ p(x) * log(p(x))
/// ```
/// Symbols with frequency 0 do not contribute.
pub fn entropy(distr: &[Weight], total_freq: f64) -> f64 {
    let mut entropy = 0.0;

    for freq in distr {
        if *freq == 0 {
            continue;
        }
        let pr = *freq as f64 / total_freq;
        entropy += pr * f64::log2(pr);
    }
    entropy.neg()
}
