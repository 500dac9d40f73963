//! The tables the transformer runs over.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::quest::Quest;
use crate::trader::Trader;

/// The trader and quest tables of a loaded database.
///
/// The caller owns the dataset; the transformer borrows it mutably for one
/// pass and keeps nothing afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Trader id to trader.
    #[serde(default)]
    pub traders: BTreeMap<String, Trader>,

    /// Quest id to quest template.
    #[serde(default)]
    pub quests: BTreeMap<String, Quest>,
}

impl Dataset {
    /// Create an empty dataset.
    pub const fn new() -> Self {
        Self {
            traders: BTreeMap::new(),
            quests: BTreeMap::new(),
        }
    }
}
