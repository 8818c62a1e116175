use crate::error::{CompassError, Result};
use crate::types::assessment::Assessment;
use crate::types::org::Organization;
use crate::types::report::Gap;
use crate::types::template::Template;
use crate::types::vendor::Vendor;
use serde::de::DeserializeOwned;
use sha2::{Digest, Sha256};
use std::path::Path;

/// A validated template plus the SHA-256 fingerprint of the file bytes it
/// was loaded from. Templates are immutable once referenced by answers, so
/// the fingerprint identifies the exact version a report was scored
/// against.
#[derive(Debug, Clone)]
pub struct LoadedTemplate {
    pub template: Template,
    pub fingerprint: String,
}

pub fn load_template(path: &Path) -> Result<LoadedTemplate> {
    let bytes = std::fs::read(path)?;
    let template: Template = serde_json::from_slice(&bytes)
        .map_err(|e| CompassError::TemplateParse(format!("{}: {}", path.display(), e)))?;
    template.validate()?;
    tracing::debug!(template = %template.id, path = %path.display(), "template loaded");
    Ok(LoadedTemplate {
        template,
        fingerprint: sha256_hex(&bytes),
    })
}

pub fn load_assessment(path: &Path) -> Result<Assessment> {
    read_json(path)
}

pub fn load_organization(path: &Path) -> Result<Organization> {
    read_json(path)
}

pub fn load_vendors(path: &Path) -> Result<Vec<Vendor>> {
    read_json(path)
}

pub fn load_gaps(path: &Path) -> Result<Vec<Gap>> {
    read_json(path)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(CompassError::Json)
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    digest.iter().map(|byte| format!("{byte:02x}")).collect()
}
