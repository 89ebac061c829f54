use super::error::K8sError;
use crate::olm::package_manifest::PackageManifest;
use duration_str::deserialize_duration;
use either::Either;
use kube::{
    api::{DeleteParams, ListParams},
    config::KubeConfigOptions,
    Api, Client, Config, ResourceExt,
};
use serde::Deserialize;
use std::fmt::{Debug, Formatter};
use std::{sync::Arc, time::Duration};
use tokio::runtime::Runtime;
use tracing::debug;

/// Provides a _sync_ implementation of [AsyncK8sClient].
///
/// Each method blocks on the shared runtime until the corresponding async call finishes, so
/// callers such as the PackageManifest builder can stay synchronous.
pub struct SyncK8sClient {
    async_client: AsyncK8sClient,
    runtime: Arc<Runtime>,
}

impl Debug for SyncK8sClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncK8sClient")
            .field("async_client", &"AsyncK8sClient implementation")
            .field("runtime", &self.runtime)
            .finish()
    }
}

#[cfg_attr(test, mockall::automock)]
impl SyncK8sClient {
    pub fn try_new(runtime: Arc<Runtime>, config: &ClientConfig) -> Result<Self, K8sError> {
        Ok(Self {
            async_client: runtime.block_on(AsyncK8sClient::try_new(config))?,
            runtime,
        })
    }

    pub fn list_package_manifests(
        &self,
        namespace: &str,
        list_params: &ListParams,
    ) -> Result<Vec<PackageManifest>, K8sError> {
        self.runtime.block_on(
            self.async_client
                .list_package_manifests(namespace, list_params),
        )
    }

    pub fn get_package_manifest(
        &self,
        name: &str,
        namespace: &str,
    ) -> Result<PackageManifest, K8sError> {
        self.runtime
            .block_on(self.async_client.get_package_manifest(name, namespace))
    }

    pub fn delete_package_manifest(&self, name: &str, namespace: &str) -> Result<(), K8sError> {
        self.runtime
            .block_on(self.async_client.delete_package_manifest(name, namespace))
    }
}

/// Same as upstream kube-rs default read timeout.
const DEFAULT_CLIENT_TIMEOUT: Duration = Duration::from_secs(295);

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct ClientConfig {
    /// Maximum time the client waits for an api-server response.
    #[serde(default)]
    pub client_timeout: ClientTimeout,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct ClientTimeout(#[serde(deserialize_with = "deserialize_duration")] Duration);

impl Default for ClientTimeout {
    fn default() -> Self {
        Self(DEFAULT_CLIENT_TIMEOUT)
    }
}

impl From<Duration> for ClientTimeout {
    fn from(value: Duration) -> Self {
        Self(value)
    }
}

impl From<ClientTimeout> for Duration {
    fn from(value: ClientTimeout) -> Self {
        value.0
    }
}

pub struct AsyncK8sClient {
    client: Client,
}

impl AsyncK8sClient {
    /// Constructs a new Kubernetes client.
    ///
    /// If loading from the inCluster config fail we fall back to kube-config
    /// This will respect the `$KUBECONFIG` envvar, but otherwise default to `~/.kube/config`.
    /// Not leveraging infer() to check inClusterConfig first
    pub async fn try_new(client_config: &ClientConfig) -> Result<Self, K8sError> {
        debug!("trying inClusterConfig for k8s client");

        let mut config = match Config::incluster() {
            Ok(c) => c,
            Err(e) => {
                debug!("inClusterConfig {}, trying kubeconfig for k8s client", e);
                let c = KubeConfigOptions::default();
                Config::from_kubeconfig(&c).await?
            }
        };
        config.read_timeout = Some(client_config.client_timeout.into());

        let client = Client::try_from(config)?;

        debug!("k8s client initialization succeeded");
        Ok(Self::new(client))
    }

    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn list_package_manifests(
        &self,
        namespace: &str,
        list_params: &ListParams,
    ) -> Result<Vec<PackageManifest>, K8sError> {
        let api: Api<PackageManifest> = Api::namespaced(self.client.clone(), namespace);
        Ok(api.list(list_params).await?.items)
    }

    pub async fn get_package_manifest(
        &self,
        name: &str,
        namespace: &str,
    ) -> Result<PackageManifest, K8sError> {
        let api: Api<PackageManifest> = Api::namespaced(self.client.clone(), namespace);
        Ok(api.get(name).await?)
    }

    pub async fn delete_package_manifest(
        &self,
        name: &str,
        namespace: &str,
    ) -> Result<(), K8sError> {
        let api: Api<PackageManifest> = Api::namespaced(self.client.clone(), namespace);

        match api.delete(name, &DeleteParams::default()).await? {
            // Object still present, deletion in progress.
            Either::Left(obj) => debug!("Deleting PackageManifest: {}", obj.name_any()),
            // Status response of the deleted object.
            Either::Right(status) => {
                debug!("Deleted PackageManifest {}: status={:?}", name, status)
            }
        }

        Ok(())
    }
}
