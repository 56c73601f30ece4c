// SPDX-License-Identifier: MIT OR Apache-2.0
//! Per-job action catalogs.
//!
//! Catalogs are immutable read-only input to the planner: placing an action
//! copies its definition by value, so nothing here can retroactively change
//! an existing rotation. The core performs no validation of catalog
//! contents.

pub mod summoner;

use rotation_planner_core::Action;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use summoner::summoner;

/// Catalog lookup failure
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// No job with the given abbreviation
    #[error("unknown job: {0}")]
    UnknownJob(String),
    /// The job exists but has no such action
    #[error("unknown action for {job}: {name}")]
    UnknownAction {
        /// Job abbreviation
        job: String,
        /// Requested action name
        name: String,
    },
}

/// A job and its usable actions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// Full job name
    pub name: String,
    /// Short job abbreviation, unique within a catalog
    pub abbr: String,
    /// Action definitions for this job
    pub actions: Vec<Action>,
}

impl Job {
    /// Look up an action by name
    pub fn action(&self, name: &str) -> Option<&Action> {
        self.actions.iter().find(|action| action.name == name)
    }
}

/// Collection of job catalogs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    jobs: Vec<Job>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// The catalog of all shipped jobs
    pub fn standard() -> Self {
        Self {
            jobs: vec![summoner()],
        }
    }

    /// Add a job
    pub fn add_job(&mut self, job: Job) {
        self.jobs.push(job);
    }

    /// Get all jobs
    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    /// Look up a job by abbreviation
    pub fn job(&self, abbr: &str) -> Result<&Job, CatalogError> {
        self.jobs
            .iter()
            .find(|job| job.abbr == abbr)
            .ok_or_else(|| CatalogError::UnknownJob(abbr.to_string()))
    }

    /// Look up an action by job abbreviation and name
    pub fn action(&self, abbr: &str, name: &str) -> Result<&Action, CatalogError> {
        let job = self.job(abbr)?;
        job.action(name).ok_or_else(|| CatalogError::UnknownAction {
            job: abbr.to_string(),
            name: name.to_string(),
        })
    }
}
