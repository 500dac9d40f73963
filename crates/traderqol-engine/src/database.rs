//! Loading the trader and quest tables from a game database directory.
//!
//! The expected layout:
//!
//! ```text
//! <database>/
//!   traders/<trader id>/base.json
//!   traders/<trader id>/assort.json     (optional)
//!   templates/quests.json               (optional)
//! ```
//!
//! A trader directory without `base.json` is skipped with a warning. Nothing
//! is ever written back.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_json::Map;
use tracing::{debug, info, warn};
use traderqol_types::{Assort, Dataset, Quest, Trader, TraderBase};

/// Errors that can occur while reading the database.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// A file or directory could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// The path being read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A file was not valid JSON for its record type.
    #[error("failed to parse {}: {source}", path.display())]
    Json {
        /// The path being parsed.
        path: PathBuf,
        /// The underlying parse error.
        source: serde_json::Error,
    },
}

/// Read the trader and quest tables under `root`.
pub fn load_dataset(root: &Path) -> Result<Dataset, LoadError> {
    let mut dataset = Dataset::new();
    dataset.traders = load_traders(&root.join("traders"))?;

    let quests_path = root.join("templates").join("quests.json");
    if quests_path.is_file() {
        dataset.quests = read_json::<BTreeMap<String, Quest>>(&quests_path)?;
    } else {
        info!(path = %quests_path.display(), "No quest table found, skipping quests");
    }

    info!(
        root = %root.display(),
        traders = dataset.traders.len(),
        quests = dataset.quests.len(),
        "Database loaded"
    );
    Ok(dataset)
}

fn load_traders(dir: &Path) -> Result<BTreeMap<String, Trader>, LoadError> {
    let mut traders = BTreeMap::new();
    if !dir.is_dir() {
        warn!(path = %dir.display(), "No traders directory found");
        return Ok(traders);
    }

    let entries = fs::read_dir(dir).map_err(|source| LoadError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    for entry in entries {
        let entry = entry.map_err(|source| LoadError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let trader_dir = entry.path();
        if !trader_dir.is_dir() {
            continue;
        }
        let id = entry.file_name().to_string_lossy().into_owned();

        let base_path = trader_dir.join("base.json");
        if !base_path.is_file() {
            warn!(trader_id = %id, "Trader directory has no base.json, skipping");
            continue;
        }
        let base: TraderBase = read_json(&base_path)?;

        let assort_path = trader_dir.join("assort.json");
        let assort = if assort_path.is_file() {
            let assort: Assort = read_json(&assort_path)?;
            debug!(trader_id = %id, items = assort.items().len(), "Assort loaded");
            Some(assort)
        } else {
            debug!(trader_id = %id, "Trader has no assort");
            None
        };

        traders.insert(
            id,
            Trader {
                base,
                assort,
                extra: Map::new(),
            },
        );
    }

    Ok(traders)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let contents = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use traderqol_types::ROUBLE_TEMPLATE_ID;

    use super::*;

    fn write(path: &Path, value: &serde_json::Value) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).ok();
        }
        fs::write(path, value.to_string()).ok();
    }

    fn base(nickname: &str) -> serde_json::Value {
        json!({
            "_id": nickname,
            "nickname": nickname,
            "currency": "RUB",
            "loyaltyLevels": [
                { "minLevel": 1, "minSalesSum": 0, "insurance_price_coef": 20, "repair_price_coef": 10 }
            ],
            "insurance": { "availability": false },
            "repair": { "availability": true, "quality": 0.6 }
        })
    }

    #[test]
    fn loads_traders_assorts_and_quests() {
        let dir = tempfile::tempdir().ok();
        let Some(root) = dir.as_ref().map(tempfile::TempDir::path) else {
            return;
        };

        write(&root.join("traders/prapor/base.json"), &base("Prapor"));
        write(
            &root.join("traders/prapor/assort.json"),
            &json!({
                "items": [{ "_id": "offer", "_tpl": "tpl", "upd": { "StackObjectsCount": 5 } }],
                "barter_scheme": { "offer": [[{ "_tpl": ROUBLE_TEMPLATE_ID, "count": 100 }]] },
                "loyal_level_items": { "offer": 1 }
            }),
        );
        write(&root.join("traders/ragman/base.json"), &base("Ragman"));
        write(
            &root.join("templates/quests.json"),
            &json!({ "q1": { "_id": "q1", "conditions": {}, "rewards": {} } }),
        );

        let dataset = load_dataset(root);
        assert!(dataset.is_ok());
        let dataset = dataset.unwrap_or_default();

        assert_eq!(dataset.traders.len(), 2);
        assert_eq!(dataset.quests.len(), 1);

        let prapor = dataset.traders.get("prapor");
        assert_eq!(prapor.map(|t| t.base.nickname.as_str()), Some("Prapor"));
        assert_eq!(
            prapor.and_then(|t| t.assort.as_ref()).map(|a| a.items().len()),
            Some(1)
        );
        assert!(
            dataset
                .traders
                .get("ragman")
                .is_some_and(|t| t.assort.is_none())
        );
    }

    #[test]
    fn missing_pieces_are_skipped() {
        let dir = tempfile::tempdir().ok();
        let Some(root) = dir.as_ref().map(tempfile::TempDir::path) else {
            return;
        };

        write(&root.join("traders/empty/readme.json"), &json!({}));
        let dataset = load_dataset(root).unwrap_or_default();
        assert!(dataset.traders.is_empty());
        assert!(dataset.quests.is_empty());

        let nothing = load_dataset(&root.join("does-not-exist")).unwrap_or_default();
        assert_eq!(nothing, Dataset::new());
    }

    #[test]
    fn malformed_base_reports_path() {
        let dir = tempfile::tempdir().ok();
        let Some(root) = dir.as_ref().map(tempfile::TempDir::path) else {
            return;
        };

        let path = root.join("traders/broken/base.json");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).ok();
        }
        fs::write(&path, "{ not json").ok();

        let err = load_dataset(root).err();
        assert!(matches!(err, Some(LoadError::Json { .. })));
        assert!(err.is_some_and(|e| e.to_string().contains("base.json")));
    }
}
