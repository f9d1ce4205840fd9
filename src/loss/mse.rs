/// Squared error of a single regression output.
pub struct MseLoss;

impl MseLoss {
    /// Scalar loss: (y_hat - y)²
    pub fn loss(y_hat: f64, y: f64) -> f64 {
        (y_hat - y).powi(2)
    }

    /// d/d(y_hat): 2·(y_hat - y)
    pub fn gradient(y_hat: f64, y: f64) -> f64 {
        2.0 * (y_hat - y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn loss_and_gradient() {
        assert_relative_eq!(MseLoss::loss(0.8, 1.3), 0.25, epsilon = 1e-12);
        assert_relative_eq!(MseLoss::gradient(0.8, 1.3), -1.0, epsilon = 1e-12);
        assert_eq!(MseLoss::loss(2.0, 2.0), 0.0);
    }
}
