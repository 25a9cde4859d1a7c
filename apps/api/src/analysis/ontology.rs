//! Loads the known skill tokens and the role → default-skill mappings.
//!
//! Loaded once at startup from the JSON files shipped in the crate's `ontology/` directory
//! and shared read-only as `Arc<Ontology>`. A missing or corrupt file never fails the
//! process: the loader reports `OntologyLoad::Degraded` with an empty collection and scoring
//! carries on with weaker signal.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::{info, warn};

pub const SKILLS_FILE: &str = "skills.json";
pub const ROLES_FILE: &str = "roles.json";

/// Directory holding the ontology files shipped with this crate.
pub const DEFAULT_ONTOLOGY_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/ontology");

/// Outcome of loading one ontology file.
///
/// `Degraded` lets callers tell "nothing configured" apart from "nothing matched".
#[derive(Debug, Clone, PartialEq)]
pub enum OntologyLoad<T> {
    Loaded(T),
    Degraded { value: T, reason: String },
}

impl<T> OntologyLoad<T> {
    pub fn degraded_reason(&self) -> Option<&str> {
        match self {
            OntologyLoad::Degraded { reason, .. } => Some(reason),
            OntologyLoad::Loaded(_) => None,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            OntologyLoad::Loaded(value) | OntologyLoad::Degraded { value, .. } => value,
        }
    }
}

/// Reads the flat skill-token list. Tokens are lowercased and trimmed; duplicates and blanks
/// are dropped, keeping first-seen order.
pub fn load_skills(path: &Path) -> OntologyLoad<Vec<String>> {
    match read_json::<Vec<String>>(path) {
        Ok(raw) => OntologyLoad::Loaded(canonical_skills(raw)),
        Err(reason) => OntologyLoad::Degraded {
            value: Vec::new(),
            reason,
        },
    }
}

/// Reads the role-id → default skills mapping.
pub fn load_roles(path: &Path) -> OntologyLoad<BTreeMap<String, Vec<String>>> {
    match read_json::<BTreeMap<String, Vec<String>>>(path) {
        Ok(roles) => OntologyLoad::Loaded(roles),
        Err(reason) => OntologyLoad::Degraded {
            value: BTreeMap::new(),
            reason,
        },
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("could not read {}: {e}", path.display()))?;
    serde_json::from_str(&content).map_err(|e| format!("could not parse {}: {e}", path.display()))
}

fn canonical_skills(raw: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.into_iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty() && seen.insert(s.clone()))
        .collect()
}

/// Read-only skill ontology injected into the analysis engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ontology {
    skills: Vec<String>,
    roles: BTreeMap<String, Vec<String>>,
}

impl Ontology {
    pub fn new(skills: Vec<String>, roles: BTreeMap<String, Vec<String>>) -> Self {
        Self {
            skills: canonical_skills(skills),
            roles,
        }
    }

    /// Loads `skills.json` and `roles.json` from `dir`, logging a warning for each file that
    /// had to be replaced by an empty collection.
    pub fn load(dir: &Path) -> Self {
        let skills = load_skills(&dir.join(SKILLS_FILE));
        let roles = load_roles(&dir.join(ROLES_FILE));

        for (name, reason) in [
            (SKILLS_FILE, skills.degraded_reason()),
            (ROLES_FILE, roles.degraded_reason()),
        ] {
            if let Some(reason) = reason {
                warn!("Ontology file {name} unavailable, continuing with empty data: {reason}");
            }
        }

        let ontology = Self::new(skills.into_value(), roles.into_value());
        info!(
            "Ontology loaded: {} skills, {} roles",
            ontology.skills.len(),
            ontology.roles.len()
        );
        ontology
    }

    /// Known skill tokens in file order.
    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    /// Default skills for a role id, or `None` if the role is not listed.
    pub fn role_defaults(&self, role_id: &str) -> Option<&[String]> {
        self.roles.get(role_id).map(Vec::as_slice)
    }

    pub fn role_count(&self) -> usize {
        self.roles.len()
    }
}
