//! Descriptive statistics over class counts

use super::Histogram;

impl Histogram {
    /// Total number of counted values
    pub fn sum_frequency(&self) -> i64 {
        self.counts.iter().sum()
    }

    /// Sum of counts of all classes up to and including the class of `value`
    ///
    /// Linear histograms return 0 below the domain and the total above it.
    pub fn cumulative_frequency(&self, value: f64) -> i64 {
        match self.layout.index_of(value) {
            Some(index) => self.counts[..=index].iter().sum(),
            None if value >= self.stop() => self.sum_frequency(),
            None => 0,
        }
    }

    /// Cumulative frequency as a fraction of the total, in `[0, 1]`
    pub fn cumulative_percentage(&self, value: f64) -> f64 {
        self.fraction_of_total(self.cumulative_frequency(value))
    }

    /// Count of the class containing `value` as a fraction of the total
    pub fn percentage(&self, value: f64) -> f64 {
        self.fraction_of_total(self.count(value))
    }

    /// Highest class count
    pub fn max_bin_count(&self) -> i64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Lowest class count
    pub fn min_bin_count(&self) -> i64 {
        self.counts.iter().copied().min().unwrap_or(0)
    }

    /// Shannon entropy of the class distribution in bits
    ///
    /// Classes with zero (or negative) probability mass are skipped.
    pub fn entropy(&self) -> f64 {
        let total = self.sum_frequency();
        if total <= 0 {
            return 0.0;
        }
        self.counts
            .iter()
            .filter(|&&c| c > 0)
            .map(|&c| {
                let p = c as f64 / total as f64;
                -p * p.log2()
            })
            .sum()
    }

    /// Count-weighted mean of the class centres
    ///
    /// `None` for an empty histogram.
    pub fn mean(&self) -> Option<f64> {
        let total = self.sum_frequency();
        if total <= 0 {
            return None;
        }
        let weighted: f64 = self
            .counts
            .iter()
            .enumerate()
            .map(|(i, &c)| self.layout.centre(i) * c as f64)
            .sum();
        Some(weighted / total as f64)
    }

    /// Centre of the class where the cumulative count first reaches half the total
    pub fn median(&self) -> Option<f64> {
        let total = self.sum_frequency();
        if total <= 0 {
            return None;
        }
        let mut cumulative = 0i64;
        for (i, &c) in self.counts.iter().enumerate() {
            cumulative += c;
            if cumulative * 2 >= total {
                return Some(self.layout.centre(i));
            }
        }
        None
    }

    /// Count-weighted standard deviation of the class centres
    pub fn standard_deviation(&self) -> Option<f64> {
        let mean = self.mean()?;
        let total = self.sum_frequency() as f64;
        let variance: f64 = self
            .counts
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                let d = self.layout.centre(i) - mean;
                d * d * c as f64
            })
            .sum::<f64>()
            / total;
        Some(variance.max(0.0).sqrt())
    }

    fn fraction_of_total(&self, count: i64) -> f64 {
        let total = self.sum_frequency();
        if total == 0 {
            0.0
        } else {
            count as f64 / total as f64
        }
    }
}
