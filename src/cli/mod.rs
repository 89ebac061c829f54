use crate::config::loader::{ConfigLoader, ConfigLoaderError, ConfigLoaderFile};
use crate::config::Config;
#[cfg_attr(test, mockall_double::double)]
use crate::k8s::client::SyncK8sClient;
use crate::k8s::Error as K8sError;
use crate::logging::LoggingError;
use crate::olm::{PackageManifest, PackageManifestBuilder, PackageManifestError};
use clap::{Parser, Subcommand};
use kube::api::ListParams;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigLoaderError),

    #[error("{0}")]
    Logging(#[from] LoggingError),

    #[error("could not start the async runtime: `{0}`")]
    Runtime(#[from] std::io::Error),

    #[error("{0}")]
    K8sClient(#[from] K8sError),

    #[error("{0}")]
    PackageManifest(#[from] PackageManifestError),

    #[error("could not print the result: `{0}`")]
    Output(#[from] serde_yaml::Error),
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
pub struct Cli {
    /// Optional YAML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// List the PackageManifests of a namespace.
    List {
        #[arg(short, long)]
        namespace: String,
        #[arg(short = 'l', long)]
        label_selector: Option<String>,
        #[arg(long)]
        field_selector: Option<String>,
    },
    /// Print a single PackageManifest, optionally constrained to one catalog.
    Get {
        name: String,
        #[arg(short, long)]
        namespace: String,
        #[arg(long)]
        catalog: Option<String>,
    },
    /// Delete a PackageManifest. Deleting a missing one succeeds.
    Delete {
        name: String,
        #[arg(short, long)]
        namespace: String,
    },
}

impl Cli {
    /// Parses command line arguments
    pub fn init() -> Self {
        Self::parse()
    }

    pub fn load_config(&self) -> Result<Config, ConfigLoaderError> {
        match &self.config {
            Some(path) => ConfigLoaderFile::new(path).load_config(),
            None => Ok(Config::default()),
        }
    }

    pub fn action(&self) -> &Command {
        &self.command
    }
}

impl Command {
    /// Runs the command and returns the text to print on stdout.
    pub fn run(&self, k8s_client: Arc<SyncK8sClient>) -> Result<String, CliError> {
        match self {
            Command::List {
                namespace,
                label_selector,
                field_selector,
            } => {
                let mut list_params = ListParams::default();
                if let Some(labels) = label_selector {
                    list_params = list_params.labels(labels);
                }
                if let Some(fields) = field_selector {
                    list_params = list_params.fields(fields);
                }

                let builders = PackageManifestBuilder::list(k8s_client, namespace, &list_params)?;
                let objects: Vec<&PackageManifest> =
                    builders.iter().filter_map(|b| b.object()).collect();
                Ok(serde_yaml::to_string(&objects)?)
            }
            Command::Get {
                name,
                namespace,
                catalog,
            } => {
                let builder = match catalog {
                    Some(catalog) => {
                        PackageManifestBuilder::pull_by_catalog(k8s_client, name, namespace, catalog)?
                    }
                    None => PackageManifestBuilder::pull(k8s_client, name, namespace)?,
                };
                Ok(serde_yaml::to_string(builder.definition())?)
            }
            Command::Delete { name, namespace } => {
                let mut builder = match PackageManifestBuilder::pull(k8s_client, name, namespace) {
                    Ok(builder) => builder,
                    Err(PackageManifestError::NotFound { .. }) => {
                        info!("PackageManifest {} not present in namespace {}", name, namespace);
                        return Ok(String::new());
                    }
                    Err(err) => return Err(err.into()),
                };
                builder.delete()?;
                info!("PackageManifest {} deleted from namespace {}", name, namespace);
                Ok(String::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::k8s::client::MockSyncK8sClient;
    use crate::k8s::error::tests::not_found_error;
    use assert_matches::assert_matches;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_get_with_catalog() {
        let cli = Cli::try_parse_from([
            "packagemanifest",
            "get",
            "etcd",
            "--namespace",
            "olm",
            "--catalog",
            "community",
        ])
        .unwrap();

        assert_eq!(
            &Command::Get {
                name: "etcd".to_string(),
                namespace: "olm".to_string(),
                catalog: Some("community".to_string()),
            },
            cli.action()
        );
        assert_eq!(Config::default(), cli.load_config().unwrap());
    }

    #[test]
    fn list_prints_observed_objects() {
        let mut k8s_client = MockSyncK8sClient::default();
        k8s_client
            .expect_list_package_manifests()
            .once()
            .withf(|namespace, list_params| {
                namespace == "olm" && list_params.label_selector.as_deref() == Some("catalog=community")
            })
            .returning(|_, _| Ok(vec![PackageManifest::identity("etcd", "olm")]));

        let command = Command::List {
            namespace: "olm".to_string(),
            label_selector: Some("catalog=community".to_string()),
            field_selector: None,
        };
        let output = command.run(Arc::new(k8s_client)).unwrap();

        let printed: Vec<PackageManifest> = serde_yaml::from_str(&output).unwrap();
        assert_eq!(vec![PackageManifest::identity("etcd", "olm")], printed);
    }

    #[test]
    fn delete_missing_succeeds() {
        let mut k8s_client = MockSyncK8sClient::default();
        k8s_client
            .expect_get_package_manifest()
            .once()
            .returning(|_, _| Err(not_found_error()));
        k8s_client.expect_delete_package_manifest().never();

        let command = Command::Delete {
            name: "etcd".to_string(),
            namespace: "olm".to_string(),
        };

        assert_eq!("", command.run(Arc::new(k8s_client)).unwrap());
    }

    #[test]
    fn get_missing_fails() {
        let mut k8s_client = MockSyncK8sClient::default();
        k8s_client
            .expect_get_package_manifest()
            .once()
            .returning(|_, _| Err(not_found_error()));

        let command = Command::Get {
            name: "etcd".to_string(),
            namespace: "olm".to_string(),
            catalog: None,
        };
        let err = command.run(Arc::new(k8s_client)).unwrap_err();

        assert_matches!(err, CliError::PackageManifest(PackageManifestError::NotFound { .. }));
    }

    #[test]
    fn parse_list_requires_namespace() {
        assert!(Cli::try_parse_from(["packagemanifest", "list"]).is_err());
    }
}
