use std::path::PathBuf;
use std::process::ExitCode;

use volumecurve::curve::curve::Curve;
use volumecurve::io::curvecsvreader::CurveCsvReader;
use volumecurve::io::samplecurvegenerator::{
    CONT_TRADING_START,
    OPEN_AUCTION_START,
    SampleCurveGenerator
};

const DEFAULT_CURVE_FILE: &str = "resources/Generic_HK.csv";
const SYMBOL: &str = "Generic HK";

/// Reads a curve file (the bundled sample unless a path is given), checks it
/// and prints the volume of the first half hour of trading.
///
/// `--generate <path>` writes the sample curve instead.
fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let [flag, path] = args.as_slice() {
        if flag == "--generate" {
            return match SampleCurveGenerator::new().generate_file(path) {
                Ok(()) => ExitCode::SUCCESS,
                Err(error) => {
                    log::error!("unable to write sample curve to {}: {}", path, error);
                    ExitCode::FAILURE
                }
            };
        }
    }

    let file_path = args
        .first()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CURVE_FILE));
    log::info!("Reading curve from file: {}", file_path.display());

    let curve = match CurveCsvReader::new().read_curve(SYMBOL, &file_path) {
        Ok(curve) => curve,
        Err(error) => {
            log::error!("no curve produced: {}", error);
            return ExitCode::FAILURE;
        }
    };
    log::info!("Curve validity: {}", curve.is_valid());

    let (start, end) = (OPEN_AUCTION_START, CONT_TRADING_START);
    match curve.volume(start, end) {
        Ok(volume) => {
            log::info!("Volume between {} and {} is: {}", start, end, volume);
            ExitCode::SUCCESS
        },
        Err(error) => {
            log::error!("{}", error);
            ExitCode::FAILURE
        }
    }
}
