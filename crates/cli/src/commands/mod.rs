pub(crate) mod blueprint;
pub(crate) mod contract;

use contractor_core::{BlueprintRepository, ContractRepository};
use contractor_storage::FileStore;

use crate::config::Config;
use crate::OutputFormat;

/// Everything a command needs besides its own arguments.
pub(crate) struct Context {
    pub config: Config,
    pub output: OutputFormat,
    pub quiet: bool,
}

impl Context {
    fn open_store(&self) -> Result<FileStore, String> {
        FileStore::open(&self.config.data_dir).map_err(|e| e.to_string())
    }

    pub(crate) fn blueprints(&self) -> Result<BlueprintRepository<FileStore>, String> {
        BlueprintRepository::load(self.open_store()?).map_err(|e| e.to_string())
    }

    pub(crate) fn contracts(&self) -> Result<ContractRepository<FileStore>, String> {
        ContractRepository::load(self.open_store()?).map_err(|e| e.to_string())
    }

    /// Print a status line unless `--quiet` or JSON output is selected.
    pub(crate) fn note(&self, msg: &str) {
        if !self.quiet && self.output == OutputFormat::Text {
            println!("{}", msg);
        }
    }
}
