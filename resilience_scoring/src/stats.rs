use crate::config::QuestionStats;

/// Descriptive statistics over a list of scores.
///
/// The standard deviation is the sample one (denominator `n-1`), and is 0 with fewer than
/// two scores. The mode picks the largest value among the most frequent ones.
/// Values are not rounded.
pub fn describe(scores: &[f64]) -> QuestionStats {
    let n = scores.len();
    if n == 0 {
        return QuestionStats::default();
    }

    let mut sorted = scores.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let median = if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    };

    let std_dev = if n < 2 {
        0.0
    } else {
        let mean = mean(scores);
        let ss: f64 = scores.iter().map(|x| (x - mean).powi(2)).sum();
        (ss / (n - 1) as f64).sqrt()
    };

    QuestionStats {
        n,
        median,
        mode: mode(&sorted),
        std_dev,
        min: sorted[0],
        max: sorted[n - 1],
    }
}

pub fn mean(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        0.0
    } else {
        scores.iter().sum::<f64>() / scores.len() as f64
    }
}

// Runs over the sorted values: a later run with the same count wins the tie.
fn mode(sorted: &[f64]) -> f64 {
    let mut best = (0.0, 0usize);
    let mut idx = 0;
    while idx < sorted.len() {
        let value = sorted[idx];
        let run = sorted[idx..].iter().take_while(|x| **x == value).count();
        if run >= best.1 {
            best = (value, run);
        }
        idx += run;
    }
    best.0
}

/// Rounds to 2 decimal places.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

impl QuestionStats {
    /// The statistics rounded to 2 decimal places, for display.
    pub fn rounded(&self) -> QuestionStats {
        QuestionStats {
            n: self.n,
            median: round2(self.median),
            mode: round2(self.mode),
            std_dev: round2(self.std_dev),
            min: round2(self.min),
            max: round2(self.max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty() {
        let s = describe(&[]);
        assert_eq!(
            s,
            QuestionStats {
                n: 0,
                median: 0.0,
                mode: 0.0,
                std_dev: 0.0,
                min: 0.0,
                max: 0.0
            }
        );
    }

    #[test]
    fn single() {
        let s = describe(&[3.0]);
        assert_eq!(
            s,
            QuestionStats {
                n: 1,
                median: 3.0,
                mode: 3.0,
                std_dev: 0.0,
                min: 3.0,
                max: 3.0
            }
        );
    }

    #[test]
    fn sample_std_dev() {
        let s = describe(&[1.0, 2.0, 2.0, 3.0]);
        assert_eq!(s.n, 4);
        assert_eq!(s.median, 2.0);
        assert_eq!(s.mode, 2.0);
        assert!((s.std_dev - 0.816496580927726).abs() < 1e-12);
        assert_eq!(s.min, 1.0);
        assert_eq!(s.max, 3.0);
        assert_eq!(s.rounded().std_dev, 0.82);
    }

    #[test]
    fn odd_median_unsorted() {
        let s = describe(&[5.0, 1.0, 4.0]);
        assert_eq!(s.median, 4.0);
        assert_eq!(s.min, 1.0);
        assert_eq!(s.max, 5.0);
    }

    #[test]
    fn mode_ties_pick_largest() {
        assert_eq!(describe(&[1.0, 1.0, 4.0, 4.0, 2.0]).mode, 4.0);
        assert_eq!(describe(&[5.0, 3.0, 1.0]).mode, 5.0);
        assert_eq!(describe(&[2.0, 2.0, 2.0, 5.0]).mode, 2.0);
    }

    #[test]
    fn rounding() {
        assert_eq!(round2(3.333333), 3.33);
        assert_eq!(round2(2.675000001), 2.68);
        assert_eq!(round2(0.0), 0.0);
    }
}
