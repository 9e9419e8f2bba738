use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use super::eco::EcoVolume;

/// Openings already stored on disk, grouped by ECO volume
/// Built from file stems, never persisted itself
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnownOpenings {
    /// Volume -> identities, each list sorted ascending
    groups: BTreeMap<EcoVolume, Vec<String>>,
    /// Stems that do not start with a volume letter
    anomalies: Vec<String>,
}

impl KnownOpenings {
    /// Build the registry from the identities stored in `dir`
    /// A missing directory means nothing is known yet
    pub fn scan(dir: &Path) -> Result<Self> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("Openings directory {:?} does not exist yet", dir);
                return Ok(KnownOpenings::default());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read openings directory {:?}", dir));
            }
        };

        let mut stems = Vec::new();
        for entry in entries {
            let path = entry
                .with_context(|| format!("Failed to list openings in {:?}", dir))?
                .path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("md") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                stems.push(stem.to_string());
            }
        }

        let known = KnownOpenings::from_identities(stems);
        log::debug!("Found {} known openings in {:?}", known.total(), dir);
        Ok(known)
    }

    /// Group identities by the volume letter they start with
    pub fn from_identities<I, S>(identities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut identities: Vec<String> = identities.into_iter().map(Into::into).collect();
        identities.sort();

        let mut known = KnownOpenings::default();
        for identity in identities {
            match EcoVolume::from_code(&identity) {
                Some(volume) => known.groups.entry(volume).or_default().push(identity),
                None => {
                    log::warn!(
                        "Stored opening {:?} does not start with an ECO volume letter (A-E), skipping it",
                        identity
                    );
                    known.anomalies.push(identity);
                }
            }
        }
        known
    }

    /// Number of stored openings, anomalies included
    pub fn total(&self) -> usize {
        self.groups.values().map(Vec::len).sum::<usize>() + self.anomalies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Identities stored under one volume
    pub fn get(&self, volume: EcoVolume) -> &[String] {
        self.groups.get(&volume).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Non-empty groups in volume order, optionally limited to one volume
    pub fn groups(&self, filter: Option<EcoVolume>) -> impl Iterator<Item = (EcoVolume, &[String])> {
        self.groups
            .iter()
            .filter(move |(volume, _)| filter.is_none_or(|f| f == **volume))
            .map(|(volume, members)| (*volume, members.as_slice()))
    }

    pub fn anomalies(&self) -> &[String] {
        &self.anomalies
    }
}
