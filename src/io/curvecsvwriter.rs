use std::io::Write;

use csv::{
    Writer,
    WriterBuilder
};
use serde::Serialize;

use crate::curve::buckettype::BucketType;
use crate::curve::curve::Curve;
use crate::curve::curvebucket::CurveBucket;
use crate::time::timeofday::TimeOfDay;

pub const HEADER: [&str; 4] = ["StartTime", "EndTime", "VolPercent", "BucketType"];

#[derive(Serialize)]
struct CurveRecord {
    start_time: String,
    end_time: String,
    percent_day_volume: f64,
    bucket_type: BucketType
}

impl From<&CurveBucket> for CurveRecord {
    fn from(bucket: &CurveBucket) -> CurveRecord {
        CurveRecord {
            start_time: TimeOfDay(bucket.start_time()).to_string(),
            end_time: TimeOfDay(bucket.end_time()).to_string(),
            percent_day_volume: bucket.percent_day_volume(),
            bucket_type: bucket.bucket_type()
        }
    }
}

/// Writes curves in the record layout `CurveCsvReader` ingests.
///
/// Volumes use the shortest representation that parses back to the same
/// `f64`, so a written curve reads back bucket for bucket.
#[derive(Debug, Default, Clone, Copy)]
pub struct CurveCsvWriter;

impl CurveCsvWriter {
    pub fn new() -> CurveCsvWriter {
        CurveCsvWriter
    }

    pub fn write_curve<C, W>(&self, curve: &C, writer: W) -> std::io::Result<()>
        where C: Curve + ?Sized, W: Write {
        let mut records: Writer<W> = WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        records.write_record(HEADER)?;
        for bucket in curve.buckets() {
            records.serialize(CurveRecord::from(bucket))?;
        }
        records.flush()
    }
}
