//! `ngpack clean`: forget every fingerprint record.

use ngpack_cache::FingerprintStore;
use ngpack_config::load_config_or_default;

use crate::pipeline::resolve_project_root;
use crate::GlobalArgs;

/// Runs the `ngpack clean` command.
pub fn run(global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let project_dir = resolve_project_root(global)?;
    let config = load_config_or_default(&project_dir)?;
    let store = FingerprintStore::new(project_dir.join(&config.project.cache_dir));

    let removed = store.clear()?;
    if !global.quiet {
        eprintln!(
            "   Removed {removed} fingerprint record(s) from {}",
            store.cache_dir().display()
        );
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_removes_records() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join(".ngpack/cache");
        std::fs::create_dir_all(&cache).unwrap();
        std::fs::write(cache.join("w.common.json"), "{}").unwrap();
        std::fs::write(cache.join("w.client.json"), "{}").unwrap();

        let global = GlobalArgs {
            quiet: true,
            verbose: false,
            color: false,
            config: Some(dir.path().display().to_string()),
        };
        assert_eq!(run(&global).unwrap(), 0);
        assert!(!cache.join("w.common.json").exists());
        assert!(!cache.join("w.client.json").exists());
    }
}
