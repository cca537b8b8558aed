use std::fmt;

use crate::curve::curve::Curve;
use crate::curve::curvebucket::CurveBucket;

#[derive(Debug, Clone, PartialEq)]
pub struct CurveData {
    symbol: String,
    buckets: Vec<CurveBucket>
}

impl CurveData {
    pub fn new(symbol: &str) -> CurveData {
        CurveData { symbol: symbol.to_owned(), buckets: Vec::new() }
    }

    pub fn number_buckets(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

impl Curve for CurveData {
    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn buckets(&self) -> &[CurveBucket] {
        &self.buckets
    }

    /// Inserts after every bucket starting at or before the new one, which
    /// keeps buckets with equal start times in insertion order.
    fn add_bucket(&mut self, bucket: CurveBucket) {
        let index = self.buckets
            .partition_point(|b| b.start_time() <= bucket.start_time());
        self.buckets.insert(index, bucket);
    }
}

impl Extend<CurveBucket> for CurveData {
    fn extend<I: IntoIterator<Item = CurveBucket>>(&mut self, iter: I) {
        for bucket in iter {
            self.add_bucket(bucket);
        }
    }
}

impl fmt::Display for CurveData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol='{}', BucketCount={}", self.symbol, self.buckets.len())
    }
}
