use std::fmt;
use std::str::FromStr;

use serde::{
    Serialize,
    Deserialize
};

/// Trading session the volume of a bucket is attributed to.
///
/// Carried through for consumers of the curve; it plays no part in the
/// volume arithmetic.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BucketType {
    Unknown,
    MarketClosed,
    OpenAuction,
    ContTrading,
    IntradayClose,
    IntradayAuction,
    CloseAuction,
    PostClose
}

impl BucketType {
    pub const ALL: [BucketType; 8] = [
        BucketType::Unknown,
        BucketType::MarketClosed,
        BucketType::OpenAuction,
        BucketType::ContTrading,
        BucketType::IntradayClose,
        BucketType::IntradayAuction,
        BucketType::CloseAuction,
        BucketType::PostClose
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BucketType::Unknown => "UNKNOWN",
            BucketType::MarketClosed => "MARKET_CLOSED",
            BucketType::OpenAuction => "OPEN_AUCTION",
            BucketType::ContTrading => "CONT_TRADING",
            BucketType::IntradayClose => "INTRADAY_CLOSE",
            BucketType::IntradayAuction => "INTRADAY_AUCTION",
            BucketType::CloseAuction => "CLOSE_AUCTION",
            BucketType::PostClose => "POST_CLOSE"
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown bucket type '{0}'")]
pub struct ParseBucketTypeError(pub String);

impl FromStr for BucketType {
    type Err = ParseBucketTypeError;

    /// Names must match exactly, case included.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BucketType::ALL
            .iter()
            .find(|bucket_type| bucket_type.name() == s)
            .copied()
            .ok_or_else(|| ParseBucketTypeError(s.to_owned()))
    }
}

impl fmt::Display for BucketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
