pub mod loader;

use crate::k8s::client::ClientConfig;
use serde::Deserialize;

/// Configuration of the `packagemanifest` command.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct Config {
    #[serde(flatten)]
    pub k8s: ClientConfig,
}
