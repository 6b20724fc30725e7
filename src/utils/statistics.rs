//! Descriptive statistics over short numeric series
//!
//! Population (not sample) moments throughout: a region's observed periods are
//! the whole population being described, not a sample of it.

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population variance, `None` for an empty slice
pub fn population_variance(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    Some(sum_sq / values.len() as f64)
}

/// Population standard deviation, `None` for an empty slice
pub fn population_stddev(values: &[f64]) -> Option<f64> {
    population_variance(values).map(f64::sqrt)
}

/// Period-over-period growth rates `(T_t - T_{t-1}) / T_{t-1}`
///
/// Element `i` is the growth from `totals[i]` to `totals[i + 1]`, so the result
/// has one fewer element than the input. Growth from a zero total is undefined
/// and reported as `None`.
pub fn growth_rates(totals: &[u64]) -> Vec<Option<f64>> {
    totals
        .windows(2)
        .map(|pair| {
            let (prev, curr) = (pair[0] as f64, pair[1] as f64);
            if pair[0] == 0 {
                None
            } else {
                Some((curr - prev) / prev)
            }
        })
        .collect()
}

/// Maximal runs of consecutive `true` flags as `(start, length)` pairs
pub fn consecutive_runs(flags: &[bool]) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut start: Option<usize> = None;

    for (i, &flag) in flags.iter().enumerate() {
        match (flag, start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                runs.push((s, i - s));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        runs.push((s, flags.len() - s));
    }

    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_moments() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(mean(&values).unwrap(), 5.0);
        assert_relative_eq!(population_variance(&values).unwrap(), 4.0);
        assert_relative_eq!(population_stddev(&values).unwrap(), 2.0);
    }

    #[test]
    fn test_empty_series() {
        assert!(mean(&[]).is_none());
        assert!(population_variance(&[]).is_none());
    }

    #[test]
    fn test_single_value_has_zero_variance() {
        assert_relative_eq!(population_variance(&[42.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_growth_rates() {
        let growth = growth_rates(&[100, 90, 0, 50]);
        assert_eq!(growth.len(), 3);
        assert_relative_eq!(growth[0].unwrap(), -0.1);
        assert_relative_eq!(growth[1].unwrap(), -1.0);
        assert!(growth[2].is_none(), "growth from zero is undefined");
    }

    #[test]
    fn test_consecutive_runs() {
        let flags = [true, true, false, true, false, false, true, true, true];
        assert_eq!(consecutive_runs(&flags), vec![(0, 2), (3, 1), (6, 3)]);
        assert!(consecutive_runs(&[false, false]).is_empty());
        assert!(consecutive_runs(&[]).is_empty());
    }
}
