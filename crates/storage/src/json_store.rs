//! JSON file storage implementation.
//!
//! Stores each operation as one JSON file under an `operations/`
//! directory. The whole record, phase list included, is written in a
//! single file replacement, which gives the atomic
//! replace-all-phases semantics the engine relies on.

use std::path::Path;

use opstrack_core::{Operation, OperationId};
use tokio::fs;
use tracing::debug;

use super::{Result, StorageError, Store};

/// File-based JSON storage backend.
pub struct JsonStore {
    root: std::path::PathBuf,
}

impl JsonStore {
    /// Create storage rooted at `root`, creating directories as needed.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(root.join("operations")).await?;
        Ok(Self { root })
    }

    fn operation_path(&self, id: OperationId) -> std::path::PathBuf {
        self.root.join("operations").join(format!("{}.json", id))
    }
}

#[async_trait::async_trait]
impl Store for JsonStore {
    async fn save_operation(&mut self, op: &Operation) -> Result<()> {
        let path = self.operation_path(op.id);

        // Version check: the caller must present the stored version.
        if let Some(existing) = read_json::<Operation>(&path).await? {
            if existing.version != op.version {
                return Err(StorageError::Conflict {
                    id: op.id,
                    stored: existing.version,
                    given: op.version,
                });
            }
        }

        let mut persisted = op.clone();
        persisted.version += 1;

        let json = serde_json::to_string_pretty(&persisted)?;
        fs::write(&path, json.as_bytes()).await?;
        debug!(id = %op.id, version = persisted.version, "saved operation");
        Ok(())
    }

    async fn load_operation(&self, id: OperationId) -> Result<Option<Operation>> {
        let mut op = read_json::<Operation>(&self.operation_path(id)).await?;
        if let Some(op) = op.as_mut() {
            op.phases.sort_by_key(|p| p.start);
        }
        Ok(op)
    }

    async fn list_operations(&self) -> Result<Vec<Operation>> {
        let dir = self.root.join("operations");
        let mut operations: Vec<Operation> = Vec::new();
        let mut rd = fs::read_dir(&dir).await?;
        while let Some(entry) = rd.next_entry().await? {
            if entry.path().extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            if let Some(mut op) = read_json::<Operation>(&entry.path()).await? {
                op.phases.sort_by_key(|p| p.start);
                operations.push(op);
            }
        }
        operations.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(operations)
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &std::path::Path) -> Result<Option<T>> {
    match fs::read_to_string(path).await {
        Ok(json) => {
            let value = serde_json::from_str(&json)?;
            Ok(Some(value))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use opstrack_core::{
        Operation, OperationKind, OperationStatus, Phase, PhaseDomain, PhaseId, PhaseStatus,
    };

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn phase(name: &str, start: NaiveDate, end: NaiveDate) -> Phase {
        Phase {
            id: PhaseId::new(),
            name: name.to_string(),
            start,
            end,
            color: "#1f77b4".to_string(),
            status: PhaseStatus::Pending,
            description: String::new(),
            responsible: "Jean MARTIN".to_string(),
            domain: PhaseDomain::default(),
            critical: false,
            blockers: Vec::new(),
        }
    }

    fn sample_operation() -> Operation {
        Operation {
            id: OperationId::new(),
            name: "Résidence Les Flamboyants".to_string(),
            kind: OperationKind::Opp,
            officer: "Jean MARTIN".to_string(),
            created_at: chrono::Utc::now(),
            start: d(2025, 1, 1),
            planned_end: d(2026, 1, 1),
            budget: 500_000.0,
            status: OperationStatus::Created,
            version: 0,
            phases: vec![
                phase("Études", d(2025, 1, 1), d(2025, 1, 10)),
                phase("Travaux", d(2025, 1, 11), d(2025, 2, 4)),
            ],
        }
    }

    #[tokio::test]
    async fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonStore::new(dir.path()).await.unwrap();

        let op = sample_operation();
        store.save_operation(&op).await.unwrap();

        let loaded = store.load_operation(op.id).await.unwrap().unwrap();
        assert_eq!(loaded.name, op.name);
        assert_eq!(loaded.phases.len(), 2);
        assert_eq!(loaded.version, 1);
    }

    #[tokio::test]
    async fn test_missing_operation_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path()).await.unwrap();
        assert!(store
            .load_operation(OperationId::new())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_stale_save_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonStore::new(dir.path()).await.unwrap();

        let op = sample_operation();
        store.save_operation(&op).await.unwrap();

        // Two loads of the same record; the first save wins.
        let mut first = store.load_operation(op.id).await.unwrap().unwrap();
        let mut second = store.load_operation(op.id).await.unwrap().unwrap();

        first.name = "Edit A".to_string();
        store.save_operation(&first).await.unwrap();

        second.name = "Edit B".to_string();
        let err = store.save_operation(&second).await.unwrap_err();
        assert!(matches!(err, StorageError::Conflict { stored: 2, given: 1, .. }));
    }

    #[tokio::test]
    async fn test_save_replaces_whole_phase_list() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonStore::new(dir.path()).await.unwrap();

        let op = sample_operation();
        store.save_operation(&op).await.unwrap();

        let mut loaded = store.load_operation(op.id).await.unwrap().unwrap();
        loaded.phases.truncate(1);
        store.save_operation(&loaded).await.unwrap();

        let reloaded = store.load_operation(op.id).await.unwrap().unwrap();
        assert_eq!(reloaded.phases.len(), 1);
    }

    #[tokio::test]
    async fn test_phases_come_back_ordered_by_start() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonStore::new(dir.path()).await.unwrap();

        let mut op = sample_operation();
        op.phases.reverse();
        store.save_operation(&op).await.unwrap();

        let loaded = store.load_operation(op.id).await.unwrap().unwrap();
        assert!(loaded.phases.windows(2).all(|w| w[0].start <= w[1].start));
    }

    #[tokio::test]
    async fn test_list_operations() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonStore::new(dir.path()).await.unwrap();

        store.save_operation(&sample_operation()).await.unwrap();
        store.save_operation(&sample_operation()).await.unwrap();

        let all = store.list_operations().await.unwrap();
        assert_eq!(all.len(), 2);
    }
}
