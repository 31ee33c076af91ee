//! Per-region persisted planner state.
//!
//! The store is owned by the caller and handed to the planner. A region must
//! be initialized before the planner will write to it.

use crate::compiler::StructureSite;
use crate::location::*;
use crate::visual::CoreVisual;
use log::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("region {0} has not been initialized")]
    Uninitialized(String),
    #[error("failed to (de)serialize region store: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Work counter for one source, maintained by whoever harvests it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLoad {
    #[serde(with = "crate::location::xy_serde")]
    pub source: Location,
    pub load: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegionRecord {
    pub sites: Vec<StructureSite>,
    pub room_visuals: Option<CoreVisual>,
    pub source_load: Vec<SourceLoad>,
}

impl RegionRecord {
    pub fn new(sources: &[Location]) -> Self {
        RegionRecord {
            sites: Vec::new(),
            room_visuals: None,
            source_load: sources
                .iter()
                .map(|&source| SourceLoad { source, load: 0 })
                .collect(),
        }
    }
}

pub trait RegionStore {
    /// Create an empty record for the region. Re-initializing resets it.
    fn initialize(&mut self, region: &str, sources: &[Location]);

    fn is_initialized(&self, region: &str) -> bool;

    /// Replace the region's site list in full.
    fn write_sites(&mut self, region: &str, sites: Vec<StructureSite>) -> Result<(), StoreError>;

    fn sites(&self, region: &str) -> Option<&[StructureSite]>;

    fn write_visual(&mut self, region: &str, visual: CoreVisual) -> Result<(), StoreError>;

    fn visual(&self, region: &str) -> Option<&CoreVisual>;

    /// Remove and return the first site in the region's list.
    fn pop_next_site(&mut self, region: &str) -> Option<StructureSite>;
}

/// Region records kept in memory, ordered by region name so dumps are stable.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryRegionStore {
    regions: BTreeMap<String, RegionRecord>,
}

impl MemoryRegionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, region: &str) -> Option<&RegionRecord> {
        self.regions.get(region)
    }

    pub fn to_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(data: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(data)?)
    }

    fn initialized_record(&mut self, region: &str) -> Result<&mut RegionRecord, StoreError> {
        self.regions
            .get_mut(region)
            .ok_or_else(|| StoreError::Uninitialized(region.to_owned()))
    }
}

impl RegionStore for MemoryRegionStore {
    fn initialize(&mut self, region: &str, sources: &[Location]) {
        debug!("Initializing region {} with {} sources", region, sources.len());

        self.regions
            .insert(region.to_owned(), RegionRecord::new(sources));
    }

    fn is_initialized(&self, region: &str) -> bool {
        self.regions.contains_key(region)
    }

    fn write_sites(&mut self, region: &str, sites: Vec<StructureSite>) -> Result<(), StoreError> {
        self.initialized_record(region)?.sites = sites;
        Ok(())
    }

    fn sites(&self, region: &str) -> Option<&[StructureSite]> {
        self.regions.get(region).map(|record| record.sites.as_slice())
    }

    fn write_visual(&mut self, region: &str, visual: CoreVisual) -> Result<(), StoreError> {
        self.initialized_record(region)?.room_visuals = Some(visual);
        Ok(())
    }

    fn visual(&self, region: &str) -> Option<&CoreVisual> {
        self.regions
            .get(region)
            .and_then(|record| record.room_visuals.as_ref())
    }

    fn pop_next_site(&mut self, region: &str) -> Option<StructureSite> {
        let record = self.regions.get_mut(region)?;
        if record.sites.is_empty() {
            None
        } else {
            Some(record.sites.remove(0))
        }
    }
}
