use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{
    ReaderBuilder,
    StringRecord,
    Trim
};

use crate::curve::buckettype::BucketType;
use crate::curve::curve::Curve;
use crate::curve::curvebucket::CurveBucket;
use crate::curve::curvedata::CurveData;
use crate::time::timeofday::parse_time_of_day;

pub const HEADER_PREFIX: &str = "StartTime";
const BYTE_ORDER_MARK: char = '\u{feff}';
const FIELD_COUNT: usize = 4;

#[derive(Debug, thiserror::Error)]
pub enum CurveReadError {
    #[error("unable to read curve source: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: expected 4 fields, found {found}")]
    FieldCount { line: usize, found: usize },
    #[error("line {line}: unable to parse time '{value}'")]
    Time { line: usize, value: String },
    #[error("line {line}: unable to parse volume '{value}'")]
    Volume { line: usize, value: String },
    #[error("line {line}: unknown bucket type '{value}'")]
    BucketType { line: usize, value: String }
}

/// Loads a curve from comma separated records of the form
///
/// `StartTime,EndTime,VolPercent,BucketType`
///
/// with times written `HH:MM` or `HH:MM:SS` and the bucket type spelled as
/// its enumeration name. A header record starting with `StartTime` (a UTF-8
/// byte order mark in front of it is ignored) and blank lines are skipped.
/// Any malformed record fails the whole read.
#[derive(Debug, Default, Clone, Copy)]
pub struct CurveCsvReader;

impl CurveCsvReader {
    pub fn new() -> CurveCsvReader {
        CurveCsvReader
    }

    pub fn read_curve<P: AsRef<Path>>(&self,
                                      symbol: &str,
                                      file_path: P) -> Result<CurveData, CurveReadError> {
        let file_path = file_path.as_ref();
        let result = File::open(file_path)
            .map_err(CurveReadError::from)
            .and_then(|file| self.read_from(symbol, file));

        match &result {
            Ok(curve) => log::debug!("read {} buckets for '{}' from {}",
                                     curve.number_buckets(), symbol, file_path.display()),
            Err(error) => log::warn!("no curve read for '{}' from {}: {}",
                                     symbol, file_path.display(), error)
        }
        result
    }

    pub fn read_from<R: Read>(&self, symbol: &str, reader: R) -> Result<CurveData, CurveReadError> {
        let mut records = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let mut curve = CurveData::new(symbol);
        for (index, record) in records.records().enumerate() {
            let record = record?;
            let line = record
                .position()
                .map_or(index + 1, |position| position.line() as usize);
            if record.iter().all(str::is_empty) || Self::is_header(&record) {
                continue;
            }
            curve.add_bucket(Self::read_bucket(line, &record)?);
        }
        Ok(curve)
    }

    fn is_header(record: &StringRecord) -> bool {
        record
            .get(0)
            .is_some_and(|field| field.trim_start_matches(BYTE_ORDER_MARK).starts_with(HEADER_PREFIX))
    }

    fn read_bucket(line: usize, record: &StringRecord) -> Result<CurveBucket, CurveReadError> {
        if record.len() != FIELD_COUNT {
            return Err(CurveReadError::FieldCount { line, found: record.len() });
        }

        let time_field = |value: &str| parse_time_of_day(value)
            .map_err(|_| CurveReadError::Time { line, value: value.to_owned() });
        let start_time = time_field(record[0].trim_start_matches(BYTE_ORDER_MARK))?;
        let end_time = time_field(&record[1])?;
        let volume = record[2]
            .parse::<f64>()
            .map_err(|_| CurveReadError::Volume { line, value: record[2].to_owned() })?;
        let bucket_type = record[3]
            .parse::<BucketType>()
            .map_err(|_| CurveReadError::BucketType { line, value: record[3].to_owned() })?;

        Ok(CurveBucket::new(start_time, end_time, volume, bucket_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(content: &str) -> Result<CurveData, CurveReadError> {
        CurveCsvReader::new().read_from("5 HK", content.as_bytes())
    }

    #[test]
    fn reads_records_and_skips_header() {
        let curve = read("StartTime,EndTime,VolPercent,BucketType\n\
                          09:05,09:10,60,CONT_TRADING\n\
                          09:00:00,09:05:00,40,OPEN_AUCTION\n").unwrap();
        assert_eq!(curve.symbol(), "5 HK");
        assert_eq!(curve.number_buckets(), 2);
        assert_eq!(curve.buckets()[0].bucket_type(), BucketType::OpenAuction);
        assert_eq!(curve.buckets()[1].percent_day_volume(), 60.0);
        assert!(curve.is_valid());
    }

    #[test]
    fn accepts_crlf_and_blank_lines() {
        let curve = read("09:00,09:05,100,OPEN_AUCTION\r\n\r\n").unwrap();
        assert_eq!(curve.number_buckets(), 1);
    }

    #[test]
    fn empty_source_gives_empty_curve() {
        let curve = read("StartTime,EndTime,VolPercent,BucketType\n").unwrap();
        assert!(curve.is_empty());
    }

    #[test]
    fn keeps_invalid_buckets_for_later_validation() {
        let curve = read("09:05,09:00,-1,UNKNOWN\n").unwrap();
        assert_eq!(curve.number_buckets(), 1);
        assert!(!curve.is_valid());
    }

    #[test]
    fn wrong_field_count_fails() {
        let err = read("09:00,09:05,100\n").unwrap_err();
        assert!(matches!(err, CurveReadError::FieldCount { line: 1, found: 3 }));
        let err = read("09:00,09:05,100,OPEN_AUCTION,extra\n").unwrap_err();
        assert!(matches!(err, CurveReadError::FieldCount { line: 1, found: 5 }));
    }

    #[test]
    fn bad_time_fails_with_line_number() {
        let err = read("09:00,09:05,50,OPEN_AUCTION\n09:05,9h10,50,CONT_TRADING\n").unwrap_err();
        match err {
            CurveReadError::Time { line, value } => {
                assert_eq!(line, 2);
                assert_eq!(value, "9h10");
            },
            other => panic!("unexpected error {other}")
        }
    }

    #[test]
    fn bad_volume_fails() {
        let err = read("09:00,09:05,lots,OPEN_AUCTION\n").unwrap_err();
        assert!(matches!(err, CurveReadError::Volume { line: 1, .. }));
    }

    #[test]
    fn unknown_bucket_type_fails() {
        let err = read("09:00,09:05,100,LUNCH\n").unwrap_err();
        assert!(matches!(err, CurveReadError::BucketType { line: 1, .. }));
        assert_eq!(err.to_string(), "line 1: unknown bucket type 'LUNCH'");
    }

    #[test]
    fn header_behind_byte_order_mark_is_skipped() {
        let curve = read("\u{feff}StartTime,EndTime,VolPercent,BucketType\n\
                          09:00,09:05,100,OPEN_AUCTION\n").unwrap();
        assert_eq!(curve.number_buckets(), 1);
        assert!(curve.is_valid());
    }

    #[test]
    fn byte_order_mark_before_first_record_is_ignored() {
        let curve = read("\u{feff}09:00,09:05,100,OPEN_AUCTION\n").unwrap();
        assert_eq!(curve.buckets()[0].start_time(), parse_time_of_day("09:00").unwrap());
    }

    #[test]
    fn trailing_separator_counts_as_a_field() {
        let err = read("09:00,09:05,100,OPEN_AUCTION,\n").unwrap_err();
        assert!(matches!(err, CurveReadError::FieldCount { line: 1, found: 5 }));
    }

    #[test]
    fn empty_fields_fail_with_their_kind() {
        let err = read("09:00,09:05,,OPEN_AUCTION\n").unwrap_err();
        match err {
            CurveReadError::Volume { line, value } => {
                assert_eq!(line, 1);
                assert_eq!(value, "");
            },
            other => panic!("unexpected error {other}")
        }
        let err = read("09:00,09:05,50,OPEN_AUCTION\n,09:10,50,CONT_TRADING\n").unwrap_err();
        assert!(matches!(err, CurveReadError::Time { line: 2, .. }));
        let err = read("09:00,09:05,100, \n").unwrap_err();
        assert!(matches!(err, CurveReadError::BucketType { line: 1, .. }));
    }

    #[test]
    fn separator_only_record_is_blank() {
        let curve = read("09:00,09:05,100,OPEN_AUCTION\n,,,\n").unwrap();
        assert_eq!(curve.number_buckets(), 1);
    }

    #[test]
    fn invalid_utf8_is_malformed_csv() {
        let err = CurveCsvReader::new()
            .read_from("5 HK", &b"09:00,09:05,100,OPEN_\xffAUCTION\n"[..])
            .unwrap_err();
        assert!(matches!(err, CurveReadError::Csv(_)));
    }

    #[test]
    fn fields_are_trimmed() {
        let curve = read(" 09:00 , 09:05 , 100 , OPEN_AUCTION \n").unwrap();
        assert_eq!(curve.buckets()[0].bucket_type(), BucketType::OpenAuction);
        assert_eq!(curve.buckets()[0].percent_day_volume(), 100.0);
    }
}
