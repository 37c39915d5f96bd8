use a2s_core::config::{ConfigRepository, ShowroomConfig};
use a2s_infrastructure::TomlConfigRepository;
use anyhow::{Context, Result, bail};

pub async fn init(repository: &TomlConfigRepository, force: bool) -> Result<()> {
    if repository.path().exists() && !force {
        bail!(
            "{} already exists, pass --force to overwrite",
            repository.path().display()
        );
    }

    repository
        .save(&ShowroomConfig::default())
        .await
        .with_context(|| format!("Failed to write {}", repository.path().display()))?;
    println!("Wrote {}", repository.path().display());
    Ok(())
}

pub async fn show(repository: &TomlConfigRepository) -> Result<()> {
    let config = repository.load().await?;
    println!("# {}", repository.path().display());
    print!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}
