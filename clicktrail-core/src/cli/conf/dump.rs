use crate::conf::{load_config, render_config, write_config};
use serde::Serialize;
use std::path::PathBuf;

pub fn dump(path: PathBuf, json: bool, hcl: bool, write: Option<PathBuf>) -> anyhow::Result<()> {
    let cfg = load_config(&path)?;

    if let Some(out) = write {
        let written = write_config(&cfg, &out)?;
        println!("✔ Wrote {}", written.display());
        return Ok(());
    }

    if hcl && !json {
        println!("{}", render_config(&cfg)?);
    } else {
        dump_json(&cfg)?;
    }

    Ok(())
}

fn dump_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    println!("{s}");
    Ok(())
}
