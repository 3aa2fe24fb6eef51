use anyhow::{Result, bail};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

const CONFIG_TEMPLATE: &str = include_str!("templates/clicktrail.hcl");
const ALIASES_TEMPLATE: &str = include_str!("templates/aliases.tsv");

pub fn init(path: PathBuf) -> Result<()> {
    // Refuse to overwrite an existing non-empty directory
    if path.exists() {
        if path.is_file() {
            bail!("{} exists and is not a directory", path.display());
        }

        let is_empty = fs::read_dir(&path)?.next().is_none();
        if !is_empty {
            bail!(
                "config directory '{}' already exists and is not empty",
                path.display()
            );
        }
    }

    fs::create_dir_all(path.join("reports"))?;

    write_file(&path.join("clicktrail.hcl"), CONFIG_TEMPLATE)?;
    write_file(&path.join("aliases.tsv"), ALIASES_TEMPLATE)?;

    // User feedback
    println!("✔ Initialized clicktrail config in {}", path.display());
    println!("✔ Created:");
    println!("  - clicktrail.hcl");
    println!("  - aliases.tsv");
    println!("  - reports/");
    println!();
    println!("Next steps:");
    println!("  clicktrail conf check {}", path.join("clicktrail.hcl").display());
    println!(
        "  clicktrail run --config {} --log access.log",
        path.join("clicktrail.hcl").display()
    );

    Ok(())
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(contents.as_bytes())?;
    Ok(())
}
