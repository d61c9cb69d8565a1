use larder_core::LarderConfig;

pub fn run(config: &LarderConfig) -> anyhow::Result<()> {
    let vocabulary = config.load_vocabulary()?;
    print!("{}", vocabulary.to_toml()?);
    Ok(())
}
