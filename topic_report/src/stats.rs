use crate::config::MetricStats;

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (N - 1 denominator). NaN below two values.
pub fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    let sum_sq: f64 = values.iter().map(|x| (x - m) * (x - m)).sum();
    (sum_sq / (values.len() - 1) as f64).sqrt()
}

impl MetricStats {
    pub fn from_values(values: &[f64]) -> MetricStats {
        MetricStats {
            mean: mean(values),
            std: sample_std(values),
            count: values.len(),
        }
    }
}

/// Rounds to 3 decimals for display. NaN stays NaN.
///
/// Goes through the decimal expansion so that the stored value is rounded,
/// not a scaled copy of it: 1.0005 is stored below the midpoint and gives 1.0.
pub fn round3(x: f64) -> f64 {
    if !x.is_finite() {
        return x;
    }
    format!("{:.3}", x).parse().unwrap_or(x)
}
