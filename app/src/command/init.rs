use std::path::PathBuf;

use dayboard_config::Config;

/// Strategy for initializing the configuration.
///
/// Writes the starter config to `--config` when given, otherwise to
/// `~/dayboard/config.json`. An existing file is never overwritten.
#[derive(Debug, Clone, Copy)]
pub struct InitStrategy;

impl super::CommandStrategy for InitStrategy {
    type Input = Option<PathBuf>;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        match input {
            Some(path) => {
                Config::write_template(&path)?;
                println!("✅ Created config file at: {}", path.display());
                Ok(())
            }
            None => Config::create_config(),
        }
    }
}
