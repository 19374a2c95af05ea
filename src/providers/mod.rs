pub mod happy_lof;
pub mod jisilu;

use crate::core::config::AppConfig;
use crate::core::source::{FundSource, SourceKind};

pub use happy_lof::HappyLofProvider;
pub use jisilu::JisiluProvider;

/// Builds the provider for `kind` with its base URL taken from `config`.
pub fn make_source(kind: SourceKind, config: &AppConfig) -> Box<dyn FundSource> {
    match kind {
        SourceKind::HappyLof => Box::new(HappyLofProvider::new(
            config.providers.happy_lof_base_url(),
        )),
        SourceKind::Jisilu => Box::new(JisiluProvider::new(config.providers.jisilu_base_url())),
    }
}
