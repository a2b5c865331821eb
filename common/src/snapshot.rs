//! # Dashboard Snapshot
//!
//! The complete result of one refresh. A [`Snapshot`] is only ever handed out
//! fully built: there is no way to add, drop or mutate entries afterwards.

use std::collections::BTreeMap;
use std::net::IpAddr;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::status::{Connectivity, WanStatus};

/// A probe result for one device, plus the collaborator data attached to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceEntry {
    pub name: String,
    pub ip: IpAddr,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub reachable: bool,
    pub services: BTreeMap<String, bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wan_details: Option<WanStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_log: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connectivity: Option<Connectivity>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    results: BTreeMap<String, DeviceEntry>,
    built_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn new(results: BTreeMap<String, DeviceEntry>, built_at: DateTime<Utc>) -> Self {
        Self { results, built_at }
    }

    pub fn get(&self, name: &str) -> Option<&DeviceEntry> {
        self.results.get(name)
    }

    /// Entries ordered by device name.
    pub fn entries(&self) -> impl Iterator<Item = &DeviceEntry> {
        self.results.values()
    }

    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn online_count(&self) -> usize {
        self.results.values().filter(|e| e.reachable).count()
    }
}
