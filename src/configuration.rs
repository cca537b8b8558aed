use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::manager::managererror::ManagerError;
use crate::manager::manager::{
    CurveManager,
    IManager
};

#[derive(Deserialize)]
struct ConfigurationJsonProp {
    #[serde(default)]
    curve: Vec<serde_json::Value>
}

/// Curves to load, described by a JSON document of the form
///
/// ```json
/// { "curve": [ { "name": "Generic HK", "file": "Generic_HK.csv", "require_valid": true } ] }
/// ```
pub struct Configuration {
    curve_manager: CurveManager
}

impl Configuration {
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Configuration {
        Configuration { curve_manager: CurveManager::new(base_dir) }
    }

    pub fn curve_manager(&self) -> &CurveManager {
        &self.curve_manager
    }

    /// Curve files are looked up relative to the directory holding the
    /// configuration file. The first entry that fails aborts the load.
    pub fn from_reader<P: AsRef<Path>>(file_path: P) -> Result<Configuration, ManagerError> {
        let file_path = file_path.as_ref();
        let reader = BufReader::new(File::open(file_path)?);
        let json_prop: ConfigurationJsonProp = serde_json::from_reader(reader)?;

        let base_dir = file_path.parent().unwrap_or_else(|| Path::new("."));
        let configuration = Configuration::new(base_dir);
        configuration.curve_manager.insert_obj_from_json_vec(&json_prop.curve)?;
        log::debug!("configuration {} loaded {} curves",
                    file_path.display(), json_prop.curve.len());
        Ok(configuration)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use serde_json::json;

    use super::*;
    use crate::curve::curve::Curve;
    use crate::io::samplecurvegenerator::SampleCurveGenerator;

    #[test]
    fn loads_curves_relative_to_configuration() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("curves")).unwrap();
        SampleCurveGenerator::new().generate_file(dir.path().join("curves/Generic_HK.csv")).unwrap();
        let config_path = dir.path().join("config.json");
        fs::write(&config_path, json!({
            "curve": [{"name": "Generic HK", "file": "curves/Generic_HK.csv", "require_valid": true}]
        }).to_string()).unwrap();

        let configuration = Configuration::from_reader(&config_path).unwrap();
        let curve = configuration.curve_manager().get("Generic HK").unwrap();
        assert_eq!(curve.number_buckets(), 71);
        assert!(curve.is_valid());
    }

    #[test]
    fn empty_configuration_has_no_curves() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.json");
        fs::write(&config_path, "{}").unwrap();
        let configuration = Configuration::from_reader(&config_path).unwrap();
        assert!(configuration.curve_manager().names().is_empty());
    }

    #[test]
    fn malformed_configuration_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.json");
        fs::write(&config_path, "{\"curve\": 3}").unwrap();
        let result = Configuration::from_reader(&config_path);
        assert!(matches!(result, Err(ManagerError::JsonParseError(_))));
    }

    #[test]
    fn missing_configuration_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Configuration::from_reader(dir.path().join("absent.json"));
        assert!(matches!(result, Err(ManagerError::IOError(_))));
    }
}
