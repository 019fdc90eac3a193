use std::fs;
use std::path::{Path, PathBuf};

use blake3::Hasher;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::prediction::{PetitionSummary, SuccessPrediction};
use crate::error::{AppError, AppResult};

const CACHE_FILE_NAME: &str = "prediction_cache.json";
const CACHE_LIMIT: usize = 32;

#[derive(Default, Serialize, Deserialize)]
struct CacheFile {
    entries: Vec<CacheEntry>,
}

#[derive(Serialize, Deserialize, Clone)]
struct CacheEntry {
    key: String,
    prediction: SuccessPrediction,
}

/// Recent success predictions, keyed by a hash of the petition text.
pub struct PredictionCache {
    file_path: PathBuf,
    file: CacheFile,
}

impl PredictionCache {
    pub fn load(config_dir: &Path) -> AppResult<Self> {
        let path = config_dir.join(CACHE_FILE_NAME);
        let file = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str::<CacheFile>(&contents)
                .map_err(|err| AppError::Configuration(format!("invalid cache file: {err}")))?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => CacheFile::default(),
            Err(err) => return Err(AppError::Io(err)),
        };

        Ok(Self {
            file_path: path,
            file,
        })
    }

    pub fn get(&self, key: &str) -> Option<SuccessPrediction> {
        self.file
            .entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.prediction.clone())
    }

    pub fn insert(&mut self, key: String, prediction: &SuccessPrediction) {
        self.file.entries.retain(|entry| entry.key != key);
        self.file.entries.push(CacheEntry {
            key,
            prediction: prediction.clone(),
        });

        if self.file.entries.len() > CACHE_LIMIT {
            let overflow = self.file.entries.len() - CACHE_LIMIT;
            debug!(overflow, "evicting old predictions");
            self.file.entries.drain(0..overflow);
        }
    }

    pub fn save(&self) -> AppResult<()> {
        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(&self.file)?;
        fs::write(&self.file_path, data)?;
        Ok(())
    }

    pub fn compute_key(summary: &PetitionSummary) -> String {
        let mut hasher = Hasher::new();
        for part in [
            summary.title.as_str(),
            summary.description.as_str(),
            summary.target.as_str(),
            summary.category.as_str(),
            summary.company.as_deref().unwrap_or(""),
        ] {
            hasher.update(part.as_bytes());
            // Field separator so ("ab", "c") and ("a", "bc") hash differently.
            hasher.update(&[0]);
        }
        hasher.finalize().to_hex().to_string()
    }
}
