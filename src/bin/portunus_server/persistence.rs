use super::*;

pub(crate) fn data_path(data_dir: &std::path::Path) -> PathBuf {
    data_dir.join("console.json")
}

pub(crate) fn load_data_from_disk(data_dir: &std::path::Path) -> Result<ConsoleData> {
    let path = data_path(data_dir);
    if !path.exists() {
        return Ok(ConsoleData::default());
    }
    let bytes = std::fs::read(&path).with_context(|| format!("read {}", path.display()))?;
    let data: ConsoleData =
        serde_json::from_slice(&bytes).with_context(|| format!("parse {}", path.display()))?;
    Ok(data)
}

pub(crate) fn persist_data(data_dir: &std::path::Path, data: &ConsoleData) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(data).context("serialize console data")?;
    write_atomic_overwrite(&data_path(data_dir), &bytes).context("write console.json")?;
    Ok(())
}

pub(crate) fn write_atomic_overwrite(path: &std::path::Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create dir {}", parent.display()))?;
    }
    let tmp = path.with_extension(format!("tmp.{}", std::process::id()));
    std::fs::write(&tmp, bytes).with_context(|| format!("write {}", tmp.display()))?;
    std::fs::rename(&tmp, path)
        .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/bin/portunus_server/persistence_tests.rs"]
mod tests;
