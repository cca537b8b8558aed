use std::cell::{
    RefCell,
    RefMut
};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{
    Path,
    PathBuf
};
use std::sync::Arc;

use serde::Deserialize;

use super::managererror::ManagerError;
use crate::curve::curve::Curve;
use crate::curve::curvedata::CurveData;
use crate::io::curvecsvreader::CurveCsvReader;

/// Name keyed registry of objects built from JSON descriptions.
pub trait IManager<V> where
    V: Clone {
    fn map(&self) -> RefMut<'_, HashMap<String, V>>;

    fn insert_obj_from_json(&self, json_value: serde_json::Value) -> Result<(), ManagerError>;

    fn get(&self, name: &str) -> Result<V, ManagerError> {
        self.map()
            .get(name)
            .cloned()
            .ok_or_else(|| ManagerError::map_elem_not_found(name))
    }

    fn insert(&self, name: &str, obj: V) {
        self.map().insert(name.to_owned(), obj);
    }

    fn contains(&self, name: &str) -> bool {
        self.map().contains_key(name)
    }

    fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.map().keys().cloned().collect();
        names.sort();
        names
    }

    fn insert_obj_from_json_vec(&self, json_vec: &[serde_json::Value]) -> Result<(), ManagerError> {
        for json_value in json_vec {
            self.insert_obj_from_json(json_value.clone())?;
        }
        Ok(())
    }

    /// Accepts either a single JSON object or an array of them.
    fn from_reader<P: AsRef<Path>>(&self, file_path: P) -> Result<(), ManagerError> {
        let reader = BufReader::new(File::open(file_path)?);
        let json_value: serde_json::Value = serde_json::from_reader(reader)?;
        if json_value.is_array() {
            let json_array: Vec<serde_json::Value> = ManagerError::from_json_or_json_parse_error(json_value)?;
            self.insert_obj_from_json_vec(&json_array)
        } else {
            self.insert_obj_from_json(json_value)
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurveFileEntry {
    pub name: String,
    pub file: PathBuf,
    #[serde(default)]
    pub require_valid: bool
}

/// Curves loaded from CSV files, shared read-only once built.
pub struct CurveManager {
    map_cell: RefCell<HashMap<String, Arc<CurveData>>>,
    base_dir: PathBuf,
    reader: CurveCsvReader
}

impl CurveManager {
    /// Relative curve file paths are resolved against `base_dir`.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> CurveManager {
        CurveManager {
            map_cell: RefCell::new(HashMap::new()),
            base_dir: base_dir.as_ref().to_path_buf(),
            reader: CurveCsvReader::new()
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn load(&self, entry: &CurveFileEntry) -> Result<Arc<CurveData>, ManagerError> {
        let file_path = self.base_dir.join(&entry.file);
        let curve = self.reader
            .read_curve(&entry.name, &file_path)
            .map_err(|source| ManagerError::CurveReadError { name: entry.name.clone(), source })?;

        if !curve.is_valid() {
            if entry.require_valid {
                return Err(ManagerError::InvalidCurveError { name: entry.name.clone() });
            }
            log::warn!("curve '{}' loaded from {} is not valid", entry.name, file_path.display());
        }

        let curve = Arc::new(curve);
        self.insert(&entry.name, curve.clone());
        Ok(curve)
    }
}

impl IManager<Arc<CurveData>> for CurveManager {
    fn map(&self) -> RefMut<'_, HashMap<String, Arc<CurveData>>> {
        self.map_cell.borrow_mut()
    }

    fn insert_obj_from_json(&self, json_value: serde_json::Value) -> Result<(), ManagerError> {
        let entry: CurveFileEntry = ManagerError::from_json_or_json_parse_error(json_value)?;
        self.load(&entry).map(|_| ())
    }
}
