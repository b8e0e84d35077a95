//! Implements PlanStore using a single JSON file.
//!
//! Intended for local development and demos; the whole document set is
//! cached in memory and rewritten on every save.

use crate::domain::{DomainError, PlanRecord};
use crate::ports::PlanStore;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

/// On-disk layout: plan_id -> plan document
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreData {
    workout_plans: HashMap<String, PlanRecord>,
}

/// JSON file-based plan storage.
pub struct JsonPlanStore {
    path: PathBuf,
    cache: tokio::sync::RwLock<StoreData>,
}

impl JsonPlanStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            cache: tokio::sync::RwLock::new(StoreData::default()),
        }
    }

    /// Load plans from disk. A missing file is an empty store; a corrupt one is an error.
    pub async fn load(&self) -> Result<(), DomainError> {
        let data = match fs::read_to_string(&self.path).await {
            Ok(s) => serde_json::from_str(&s).map_err(|e| {
                DomainError::Store(format!("{}: {}", self.path.display(), e))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %self.path.display(), "plan file not found, starting empty");
                StoreData::default()
            }
            Err(e) => return Err(DomainError::Store(e.to_string())),
        };
        info!(
            path = %self.path.display(),
            plans = data.workout_plans.len(),
            "JSON plan store loaded"
        );
        *self.cache.write().await = data;
        Ok(())
    }

    /// Atomic save using the write-replace pattern:
    /// write temp file, sync_all(), rename over the target.
    async fn save(&self, data: &StoreData) -> Result<(), DomainError> {
        let json =
            serde_json::to_string_pretty(data).map_err(|e| DomainError::Store(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| DomainError::Store(format!("create data dir: {}", e)))?;
        }

        let temp_path = self.path.with_extension("json.tmp");
        let mut f = fs::File::create(&temp_path)
            .await
            .map_err(|e| DomainError::Store(format!("create temp file: {}", e)))?;
        f.write_all(json.as_bytes())
            .await
            .map_err(|e| DomainError::Store(format!("write temp file: {}", e)))?;
        f.sync_all()
            .await
            .map_err(|e| DomainError::Store(format!("sync temp file: {}", e)))?;
        drop(f);

        fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| DomainError::Store(format!("atomic rename failed: {}", e)))?;

        Ok(())
    }
}

#[async_trait::async_trait]
impl PlanStore for JsonPlanStore {
    async fn get_plan(&self, plan_id: &str) -> Result<Option<PlanRecord>, DomainError> {
        let cache = self.cache.read().await;
        Ok(cache.workout_plans.get(plan_id).cloned())
    }

    async fn save_plan(&self, record: &PlanRecord) -> Result<(), DomainError> {
        // Hold the write lock across the file write so saves are serialized.
        let mut cache = self.cache.write().await;
        cache
            .workout_plans
            .insert(record.id.clone(), record.clone());
        self.save(&cache).await
    }

    async fn list_plans(&self) -> Result<Vec<PlanRecord>, DomainError> {
        let cache = self.cache.read().await;
        let mut plans: Vec<_> = cache.workout_plans.values().cloned().collect();
        plans.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(plans)
    }
}
