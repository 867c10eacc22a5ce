use clap::*;
use lind_skel::SkelConfig;
use std::path::PathBuf;

#[derive(Debug, Parser, Clone)]
#[command(name = "lind-skel")]
pub struct CliOptions {
    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// List the available scenarios and exit
    #[arg(long)]
    pub list: bool,

    /// Device the mmap scenario maps instead of /dev/zero
    #[arg(long, value_name = "PATH")]
    pub zero_device: Option<PathBuf>,

    /// Scenarios to run, in order.  Runs every scenario when empty.
    ///
    /// Example:
    ///   lind-skel fork mmap
    #[arg(value_name = "SCENARIO")]
    pub scenarios: Vec<String>,
}

impl CliOptions {
    /// Environment defaults with the command line applied on top.
    pub fn config(&self) -> SkelConfig {
        let mut config = SkelConfig::from_env();
        config.verbosity = self.verbose;
        if let Some(dev) = &self.zero_device {
            config.zero_device = dev.clone();
        }
        config
    }
}
