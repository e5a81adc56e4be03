use crate::agents::agent_ids;
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// FNV-1a over the action-index stream. Stable across runs and platforms;
/// used to compare two runs without storing both logs.
pub fn decisions_digest(actions: &[u8]) -> u32 {
    let mut hash: u32 = 0x811C_9DC5;
    for byte in actions {
        hash ^= u32::from(*byte);
        hash = hash.wrapping_mul(0x0100_0193);
    }
    hash
}

/// Comma-separated agent ids, or every rostered agent when absent.
pub fn resolve_agents(input: Option<&str>) -> Result<Vec<String>> {
    match input {
        None => Ok(agent_ids().iter().map(|id| (*id).to_string()).collect()),
        Some(raw) => {
            let mut agents = Vec::new();
            for token in raw.split(',') {
                let token = token.trim();
                if token.is_empty() {
                    continue;
                }
                agents.push(token.to_string());
            }
            if agents.is_empty() {
                return Err(anyhow!("--agents resolved to empty list"));
            }
            Ok(agents)
        }
    }
}

/// All `.json` trace files directly under `dir`, sorted by file name.
pub fn collect_trace_paths(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("failed reading trace directory {}", dir.display()))?;
    let mut paths = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("failed listing {}", dir.display()))?
            .path();
        if path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path);
        }
    }
    if paths.is_empty() {
        return Err(anyhow!("no .json traces found in {}", dir.display()));
    }
    paths.sort();
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_stable_and_order_sensitive() {
        assert_eq!(decisions_digest(&[]), 0x811C_9DC5);
        assert_eq!(decisions_digest(&[2, 4, 2]), decisions_digest(&[2, 4, 2]));
        assert_ne!(decisions_digest(&[2, 4, 2]), decisions_digest(&[4, 2, 2]));
    }

    #[test]
    fn resolve_agents_defaults_to_roster() {
        let all = resolve_agents(None).unwrap();
        assert_eq!(all, vec!["expert".to_string(), "cadet".to_string()]);
        let picked = resolve_agents(Some(" expert , ,cadet ")).unwrap();
        assert_eq!(picked, vec!["expert".to_string(), "cadet".to_string()]);
        assert!(resolve_agents(Some(" , ")).is_err());
    }

    #[test]
    fn collect_trace_paths_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.json"), b"{}").unwrap();
        fs::write(dir.path().join("a.json"), b"{}").unwrap();
        fs::write(dir.path().join("notes.txt"), b"x").unwrap();
        let paths = collect_trace_paths(dir.path()).unwrap();
        let names: Vec<_> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.json", "b.json"]);

        let empty = tempfile::tempdir().unwrap();
        assert!(collect_trace_paths(empty.path()).is_err());
    }
}
