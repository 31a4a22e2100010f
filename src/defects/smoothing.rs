//! Temporal smoothing of pair-count series and the creation-rate estimate.

use tracing::warn;

use crate::error::{KinkError, Result};
use crate::lattice::LatticeConfig;

/// Creation rate Γ and creation time τ over a measurement window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CreationRates {
    /// Number of upward steps in the smoothed series
    pub creations: usize,
    /// Γ = creations / window length (proper time)
    pub gamma: f64,
    /// τ = window length / creations; infinite when nothing was created
    pub tau: f64,
}

impl CreationRates {
    /// No creation events in the window: Γ = 0 and τ = ∞.
    pub fn is_degenerate(&self) -> bool {
        self.creations == 0
    }
}

/// Debounce filter removing pair-count transitions shorter than the
/// minimum kink duration.
#[derive(Debug, Clone, Copy)]
pub struct Smoother {
    d_kink_frame: usize,
    buff_frame: usize,
    frame_time: f64,
}

impl Smoother {
    pub fn new(config: &LatticeConfig) -> Self {
        Self {
            d_kink_frame: config.d_kink_frame(),
            buff_frame: config.buff_frame(),
            frame_time: config.frame_time(),
        }
    }

    /// Frames needed beyond `tmax_frame`.
    pub fn buff_frame(&self) -> usize {
        self.buff_frame
    }

    /// Remove fluctuations lasting fewer than `d_kink_frame` frames and
    /// return the first `tmax_frame` values.
    ///
    /// Durations are removed shortest first. For duration `d` every value
    /// that differs from its predecessor is replaced by the value `d` frames
    /// later; the scan stops `d(d+1)/2` frames before the end, which keeps
    /// every lookahead inside the series across all passes.
    pub fn smooth(&self, series: &[usize], tmax_frame: usize) -> Result<Vec<usize>> {
        let required = tmax_frame + self.buff_frame;
        if series.len() < required {
            return Err(KinkError::InsufficientSeriesLength {
                required,
                found: series.len(),
            });
        }

        let mut s = series.to_vec();
        for d in 1..self.d_kink_frame {
            let end = s.len() - d * (d + 1) / 2;
            for k in 1..end {
                if s[k] != s[k - 1] {
                    s[k] = s[k + d];
                }
            }
        }
        s.truncate(tmax_frame);
        Ok(s)
    }

    /// Upward steps of the smoothed series; drops are ignored.
    pub fn creations(&self, series: &[usize], tmax_frame: usize) -> Result<usize> {
        let smoothed = self.smooth(series, tmax_frame)?;
        Ok(smoothed.windows(2).map(|w| w[1].saturating_sub(w[0])).sum())
    }

    pub fn creation_rates(&self, series: &[usize], tmax_frame: usize) -> Result<CreationRates> {
        let tmax_units = self.frame_time * tmax_frame as f64;
        let creations = self.creations(series, tmax_frame)?;

        if creations == 0 {
            warn!(tmax_frame, "no pair creations in measurement window");
            return Ok(CreationRates {
                creations,
                gamma: 0.0,
                tau: f64::INFINITY,
            });
        }
        Ok(CreationRates {
            creations,
            gamma: creations as f64 / tmax_units,
            tau: tmax_units / creations as f64,
        })
    }
}

/// Smooth a pair-count series with the thresholds of `config`.
pub fn smooth(config: &LatticeConfig, series: &[usize], tmax_frame: usize) -> Result<Vec<usize>> {
    Smoother::new(config).smooth(series, tmax_frame)
}

/// Creation rate and time of a pair-count series with the thresholds of `config`.
pub fn creation_rates(config: &LatticeConfig, series: &[usize], tmax_frame: usize) -> Result<CreationRates> {
    Smoother::new(config).creation_rates(series, tmax_frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::LatticeParams;
    use approx::assert_relative_eq;

    /// frame_space 10, dt 0.1: one frame is one time unit.
    fn config_with_duration(d_kink: usize) -> LatticeConfig {
        let params = LatticeParams { d_kink, dt: Some(0.1), ..LatticeParams::default() };
        LatticeConfig::new(params).unwrap()
    }

    #[test]
    fn test_isolated_spike_removed() {
        let config = config_with_duration(30);
        let smoother = Smoother::new(&config);
        assert_eq!(config.d_kink_frame(), 3);
        assert_eq!(smoother.buff_frame(), 3);

        let series = [0, 0, 1, 0, 0];
        let smoothed = smoother.smooth(&series, 2).unwrap();
        assert_eq!(smoothed, vec![0, 0]);

        let rates = smoother.creation_rates(&series, 2).unwrap();
        assert!(rates.is_degenerate());
        assert_eq!(rates.gamma, 0.0);
        assert!(rates.tau.is_infinite());
    }

    #[test]
    fn test_spike_removed_inside_longer_window() {
        let config = config_with_duration(30);
        let series = [0, 0, 1, 0, 0, 0, 0, 0, 0, 0];
        let smoothed = smooth(&config, &series, 7).unwrap();
        assert_eq!(smoothed, vec![0; 7]);
    }

    #[test]
    fn test_two_frame_spike_removed() {
        let config = config_with_duration(30);
        let series = [1, 1, 2, 2, 1, 1, 1, 1, 1, 1];
        assert_eq!(smooth(&config, &series, 7).unwrap(), vec![1; 7]);
    }

    #[test]
    fn test_lasting_step_kept() {
        let config = config_with_duration(30);
        let series = [0, 0, 0, 1, 1, 1, 1, 1, 1, 1];
        let smoothed = smooth(&config, &series, 7).unwrap();
        assert_eq!(smoothed, vec![0, 0, 0, 1, 1, 1, 1]);

        let rates = creation_rates(&config, &series, 7).unwrap();
        assert_eq!(rates.creations, 1);
        assert_relative_eq!(rates.gamma, 1.0 / 7.0, epsilon = 1e-12);
        assert_relative_eq!(rates.tau, 7.0, epsilon = 1e-12);
    }

    #[test]
    fn test_constant_series_unchanged() {
        let config = config_with_duration(50);
        let series = vec![3; 40];
        assert_eq!(smooth(&config, &series, 30).unwrap(), vec![3; 30]);
    }

    #[test]
    fn test_long_plateaus_unchanged() {
        let config = config_with_duration(30);
        let series = [0, 0, 0, 0, 2, 2, 2, 2, 1, 1, 1, 1, 1, 1];
        let smoothed = smooth(&config, &series, 11).unwrap();
        assert_eq!(smoothed, series[..11].to_vec());
    }

    #[test]
    fn test_drops_are_not_creations() {
        let config = config_with_duration(30);
        let series = [2, 2, 2, 2, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1];
        let creations = Smoother::new(&config).creations(&series, 11).unwrap();
        assert_eq!(creations, 1);
    }

    #[test]
    fn test_short_series_rejected() {
        let config = config_with_duration(50);
        let smoother = Smoother::new(&config);
        let err = smoother.smooth(&[0; 12], 5).unwrap_err();
        assert!(matches!(err, KinkError::InsufficientSeriesLength { required: 15, found: 12 }));
        assert!(smoother.creation_rates(&[0; 12], 5).is_err());
    }

    #[test]
    fn test_no_smoothing_below_two_frames() {
        let config = config_with_duration(10);
        assert_eq!(config.d_kink_frame(), 1);
        let series = [0, 1, 0, 1];
        assert_eq!(smooth(&config, &series, 4).unwrap(), vec![0, 1, 0, 1]);
        assert_eq!(Smoother::new(&config).creations(&series, 4).unwrap(), 2);
    }

    #[test]
    fn test_empty_window_is_degenerate() {
        let config = config_with_duration(30);
        let rates = creation_rates(&config, &[0, 0, 0], 0).unwrap();
        assert!(rates.is_degenerate());
        assert!(rates.tau.is_infinite());
    }
}
