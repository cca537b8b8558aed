use std::fs::File;
use std::io::{
    BufWriter,
    Write
};
use std::path::Path;

use chrono::{
    NaiveTime,
    TimeDelta
};

use crate::curve::buckettype::BucketType;
use crate::curve::curve::Curve;
use crate::curve::curvebucket::CurveBucket;
use crate::curve::curvedata::CurveData;
use crate::io::curvecsvwriter::CurveCsvWriter;

const fn hm(hour: u32, minute: u32) -> NaiveTime {
    match NaiveTime::from_hms_opt(hour, minute, 0) {
        Some(time) => time,
        None => panic!("invalid session time")
    }
}

/// Session boundaries of the stylized curve.
pub const DAY_START: NaiveTime = hm(0, 0);
pub const OPEN_AUCTION_START: NaiveTime = hm(9, 0);
pub const CONT_TRADING_START: NaiveTime = hm(9, 30);
pub const INTRADAY_CLOSE_START: NaiveTime = hm(12, 0);
pub const INTRADAY_CLOSE_END: NaiveTime = hm(13, 0);
pub const CLOSE_AUCTION_START: NaiveTime = hm(16, 0);
pub const CLOSE_AUCTION_END: NaiveTime = hm(16, 10);
pub const DAY_END: NaiveTime = hm(23, 59);

/// Builds the sample "Generic HK" curve from the Hong Kong session layout.
///
/// Auctions get a fixed share and each continuous session spreads its share
/// evenly over fixed length buckets. Real curves vary far more from bucket to
/// bucket; this one exists to give a well defined fixture.
#[derive(Debug, Clone)]
pub struct SampleCurveGenerator {
    pub open_auction_volume: f64,
    pub morning_volume: f64,
    pub afternoon_volume: f64,
    pub close_auction_volume: f64,
    pub bucket_length: TimeDelta
}

impl Default for SampleCurveGenerator {
    fn default() -> SampleCurveGenerator {
        SampleCurveGenerator {
            open_auction_volume: 8.0,
            morning_volume: 35.0,
            afternoon_volume: 47.0,
            close_auction_volume: 10.0,
            bucket_length: TimeDelta::minutes(5)
        }
    }
}

impl SampleCurveGenerator {
    pub fn new() -> SampleCurveGenerator {
        SampleCurveGenerator::default()
    }

    pub fn generate(&self, symbol: &str) -> CurveData {
        let mut curve = CurveData::new(symbol);
        curve.add_bucket(CurveBucket::new(DAY_START, OPEN_AUCTION_START, 0.0, BucketType::MarketClosed));
        curve.add_bucket(CurveBucket::new(OPEN_AUCTION_START, CONT_TRADING_START,
                                          self.open_auction_volume, BucketType::OpenAuction));
        curve.extend(self.continuous_trading(CONT_TRADING_START, INTRADAY_CLOSE_START, self.morning_volume));
        curve.add_bucket(CurveBucket::new(INTRADAY_CLOSE_START, INTRADAY_CLOSE_END, 0.0, BucketType::IntradayClose));
        curve.extend(self.continuous_trading(INTRADAY_CLOSE_END, CLOSE_AUCTION_START, self.afternoon_volume));
        curve.add_bucket(CurveBucket::new(CLOSE_AUCTION_START, CLOSE_AUCTION_END,
                                          self.close_auction_volume, BucketType::CloseAuction));
        curve.add_bucket(CurveBucket::new(CLOSE_AUCTION_END, DAY_END, 0.0, BucketType::PostClose));
        curve
    }

    /// Splits `[start, end)` into as many whole buckets as fit and gives each
    /// the same share of `total_volume`.
    ///
    /// A bucket length under a second, or longer than the session, yields no
    /// buckets and the session's volume is missing from the curve.
    fn continuous_trading(&self,
                          start: NaiveTime,
                          end: NaiveTime,
                          total_volume: f64) -> Vec<CurveBucket> {
        let length = self.bucket_length.num_seconds();
        let number_buckets = if length > 0 { (end - start).num_seconds() / length } else { 0 };
        if number_buckets == 0 {
            log::warn!("bucket length {}s fits no bucket in {} - {}, {} of volume left out",
                       length, start, end, total_volume);
            return Vec::new();
        }

        let volume = total_volume / number_buckets as f64;
        (0..number_buckets)
            .map(|index| {
                let bucket_start = start + self.bucket_length * index as i32;
                let bucket_end = bucket_start + self.bucket_length;
                CurveBucket::new(bucket_start, bucket_end, volume, BucketType::ContTrading)
            })
            .collect()
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let curve = self.generate("");
        CurveCsvWriter::new().write_curve(&curve, writer)
    }

    pub fn generate_file<P: AsRef<Path>>(&self, file_path: P) -> std::io::Result<()> {
        let file_path = file_path.as_ref();
        let mut writer = BufWriter::new(File::create(file_path)?);
        self.write_to(&mut writer)?;
        log::info!("sample curve written to {}", file_path.display());
        Ok(())
    }
}
