use chrono::NaiveTime;

use crate::curve::curvebucket::CurveBucket;

pub const TOTAL_VOLUME: f64 = 100.0;
pub const TOTAL_VOLUME_TOLERANCE: f64 = 1e-8;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CurveError {
    #[error("curve '{symbol}' has no buckets")]
    NoData { symbol: String }
}

/// Intraday volume curve of one symbol.
///
/// Implementors only provide storage: the buckets are expected to be kept
/// sorted by start time, ties in insertion order. Validation and the volume
/// queries are derived from that ordered view.
pub trait Curve {
    fn symbol(&self) -> &str;

    fn buckets(&self) -> &[CurveBucket];

    fn add_bucket(&mut self, bucket: CurveBucket);

    /// True when some bucket ends after the next one starts.
    fn overlaps(&self) -> bool {
        self.buckets()
            .windows(2)
            .any(|pair| pair[0].end_time() > pair[1].start_time())
    }

    fn total_volume(&self) -> f64 {
        self.buckets()
            .iter()
            .map(|bucket| bucket.percent_day_volume())
            .sum()
    }

    fn sums_to_100(&self) -> bool {
        (self.total_volume() - TOTAL_VOLUME).abs() < TOTAL_VOLUME_TOLERANCE
    }

    /// Checks the rules that hold for any symbol: no time covered twice, no
    /// negative volume and exactly 100% of the day's volume overall.
    ///
    /// Session placement (auctions at the right point of the day, no
    /// continuous volume during an intraday close) depends on the listing
    /// exchange and is not checked here.
    fn is_valid(&self) -> bool {
        if self.overlaps() {
            log::debug!("curve '{}' has overlapping buckets", self.symbol());
            return false;
        }

        if let Some(index) = self.buckets().iter().position(|bucket| !bucket.is_valid()) {
            log::debug!("curve '{}' has an invalid bucket at {}: {}",
                        self.symbol(), index, self.buckets()[index]);
            return false;
        }

        if !self.sums_to_100() {
            log::debug!("curve '{}' volume sums to {}", self.symbol(), self.total_volume());
            return false;
        }

        true
    }

    fn first_bucket(&self) -> Result<&CurveBucket, CurveError> {
        self.buckets()
            .first()
            .ok_or_else(|| CurveError::NoData { symbol: self.symbol().to_owned() })
    }

    fn last_bucket(&self) -> Result<&CurveBucket, CurveError> {
        self.buckets()
            .last()
            .ok_or_else(|| CurveError::NoData { symbol: self.symbol().to_owned() })
    }

    /// Volume observed from the start of the day until `time`.
    fn cumulative_volume(&self, time: NaiveTime) -> f64 {
        self.buckets()
            .iter()
            .fold(0.0, |volume, bucket| volume + bucket.volume_until(time))
    }

    /// Percentage of the day's volume traded between `start` and `end`.
    ///
    /// Zero when the interval is reversed or lies outside the curve.
    fn volume(&self, start: NaiveTime, end: NaiveTime) -> Result<f64, CurveError> {
        if end < start {
            return Ok(0.0);
        }

        let first_start = self.first_bucket()?.start_time();
        let last_end = self.last_bucket()?.end_time();
        if end < first_start || start > last_end {
            return Ok(0.0);
        }

        let (start_volume, end_volume) = self.buckets()
            .iter()
            .fold((0.0, 0.0), |(start_volume, end_volume), bucket| {
                (start_volume + bucket.volume_until(start),
                 end_volume + bucket.volume_until(end))
            });

        Ok(end_volume - start_volume)
    }

    /// Volume observed by `time` as a percentage of the volume between
    /// `start` and `end`.
    ///
    /// Zero when `time` is outside `[start, end]` or the interval misses the
    /// curve. An interval with no volume at all yields NaN.
    fn relative_volume(&self,
                       start: NaiveTime,
                       end: NaiveTime,
                       time: NaiveTime) -> Result<f64, CurveError> {
        if end < start {
            return Ok(0.0);
        }

        let first_start = self.first_bucket()?.start_time();
        let last_end = self.last_bucket()?.end_time();
        if end < first_start || start > last_end {
            return Ok(0.0);
        }

        if time < start || time > end {
            return Ok(0.0);
        }

        let (start_volume, time_volume, end_volume) = self.buckets()
            .iter()
            .fold((0.0, 0.0, 0.0), |(start_volume, time_volume, end_volume), bucket| {
                (start_volume + bucket.volume_until(start),
                 time_volume + bucket.volume_until(time),
                 end_volume + bucket.volume_until(end))
            });

        Ok(TOTAL_VOLUME * (time_volume - start_volume) / (end_volume - start_volume))
    }
}
