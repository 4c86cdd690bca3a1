// SPDX-License-Identifier: MPL-2.0
//! Loading of the demo case fixture.
//!
//! The catalog is parsed once at start-up and only ever read afterwards.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::model::{Case, CaseStatus};
use crate::error::Result;

const BUILTIN_FIXTURE: &str = include_str!("../../assets/fixtures/cases.json");

#[derive(Debug, Deserialize)]
struct FixtureFile {
    cases: Vec<Case>,
}

/// Read-only collection of demo cases.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseCatalog {
    cases: Vec<Case>,
}

impl CaseCatalog {
    /// Parses the fixture bundled with the crate.
    ///
    /// # Errors
    ///
    /// Returns `Error::Fixture` if the bundled JSON is malformed.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_FIXTURE)
    }

    /// Parses a fixture document of the form `{ "cases": [...] }`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Fixture` if the JSON does not match the case schema.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: FixtureFile = serde_json::from_str(json)?;
        tracing::debug!(cases = file.cases.len(), "case fixture parsed");
        Ok(Self { cases: file.cases })
    }

    /// Reads and parses a fixture file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file cannot be read and `Error::Fixture`
    /// if it cannot be parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// All cases in fixture order.
    #[must_use]
    pub fn cases(&self) -> &[Case] {
        &self.cases
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Case> {
        self.cases.iter().find(|case| case.id == id)
    }

    pub fn by_status(&self, status: CaseStatus) -> impl Iterator<Item = &Case> {
        self.cases.iter().filter(move |case| case.status == status)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}
