use std::fmt;

use chrono::NaiveTime;
use crate::curve::buckettype::BucketType;
use crate::time::timeofday::{
    seconds_between,
    TimeOfDay
};

/// A slice of the trading day together with the share of the day's volume
/// observed in it.
///
/// Nothing is checked on construction, so an invalid bucket can be built and
/// inspected with `is_valid`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveBucket {
    start_time: NaiveTime,
    end_time: NaiveTime,
    percent_day_volume: f64,
    bucket_type: BucketType
}

impl CurveBucket {
    pub fn new(start_time: NaiveTime,
               end_time: NaiveTime,
               percent_day_volume: f64,
               bucket_type: BucketType) -> CurveBucket {
        CurveBucket { start_time, end_time, percent_day_volume, bucket_type }
    }

    pub fn start_time(&self) -> NaiveTime {
        self.start_time
    }

    pub fn end_time(&self) -> NaiveTime {
        self.end_time
    }

    pub fn percent_day_volume(&self) -> f64 {
        self.percent_day_volume
    }

    pub fn bucket_type(&self) -> BucketType {
        self.bucket_type
    }

    pub fn is_valid(&self) -> bool {
        self.percent_day_volume >= 0.0 && self.start_time <= self.end_time
    }

    /// Share of this bucket's volume observed strictly before `time`, with the
    /// volume spread uniformly over the bucket.
    pub fn volume_until(&self, time: NaiveTime) -> f64 {
        if time > self.end_time {
            self.percent_day_volume
        } else if time > self.start_time {
            let elapsed = seconds_between(self.start_time, time);
            let length = seconds_between(self.start_time, self.end_time);
            self.percent_day_volume * (elapsed / length)
        } else {
            0.0
        }
    }
}

impl fmt::Display for CurveBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Start={}, End={}, Vol={}, Type={}",
               TimeOfDay(self.start_time),
               TimeOfDay(self.end_time),
               self.percent_day_volume,
               self.bucket_type)
    }
}
