/// Pre-activation of one neuron: `Σ weight_i · value_i + bias`.
///
/// `weights[i]` belongs to the edge from left neuron `i`, so both slices
/// must have the left layer's length.
pub fn pre_activation(weights: &[f64], values: &[f64], bias: f64) -> f64 {
    debug_assert_eq!(weights.len(), values.len());
    weights.iter().zip(values.iter())
        .map(|(w, o)| w * o)
        .sum::<f64>() + bias
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weighted_sum_plus_bias() {
        assert_eq!(pre_activation(&[0.5, 0.5], &[2.0, 3.0], 0.0), 2.5);
        assert_eq!(pre_activation(&[1.0, -2.0, 0.5], &[1.0, 1.0, 4.0], 0.25), 1.25);
        assert_eq!(pre_activation(&[], &[], 3.0), 3.0);
    }
}
