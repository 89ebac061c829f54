use super::error::PackageManifestError;
use super::package_manifest::PackageManifest;
#[cfg_attr(test, mockall_double::double)]
use crate::k8s::client::SyncK8sClient;
use crate::k8s::selectors::{catalog_selector, name_selector};
use crate::k8s::Error as K8sError;
use kube::{api::ListParams, ResourceExt};
use std::sync::Arc;
use tracing::debug;

/// Outcome of checking a PackageManifest against the api-server.
#[derive(Debug)]
pub enum Presence {
    /// The object was fetched.
    Found,
    /// The api-server answered that the object does not exist.
    NotFound,
    /// The api-server could not confirm the absence of the object.
    Unconfirmed(K8sError),
}

impl Presence {
    /// Anything but a confirmed absence counts as existing, so an unreachable api-server never
    /// looks like a missing object.
    pub fn exists_or_unknown(&self) -> bool {
        !matches!(self, Presence::NotFound)
    }
}

/// Accessor for a PackageManifest living in the cluster.
///
/// `definition` holds the identity the caller asked for and `object` the last state observed in
/// the api-server. `object` is `None` until something has been observed and again after a
/// successful delete.
pub struct PackageManifestBuilder {
    definition: PackageManifest,
    object: Option<PackageManifest>,
    k8s_client: Arc<SyncK8sClient>,
}

impl PackageManifestBuilder {
    /// Returns the PackageManifests of `namespace` matching `list_params`, one builder each.
    pub fn list(
        k8s_client: Arc<SyncK8sClient>,
        namespace: &str,
        list_params: &ListParams,
    ) -> Result<Vec<Self>, PackageManifestError> {
        debug!(
            "Listing PackageManifests in the namespace {} with the options {:?}",
            namespace, list_params
        );

        if namespace.is_empty() {
            debug!("packagemanifest 'namespace' parameter can not be empty");
            return Err(PackageManifestError::InvalidArgument(
                "failed to list packagemanifests, 'namespace' parameter is empty".to_string(),
            ));
        }

        let items = k8s_client
            .list_package_manifests(namespace, list_params)
            .map_err(|err| {
                debug!(
                    "Failed to list PackageManifests in the namespace {} due to {}",
                    namespace, err
                );
                PackageManifestError::ListFailed {
                    namespace: namespace.to_string(),
                    source: err,
                }
            })?;

        Ok(items
            .into_iter()
            .map(|package_manifest| Self {
                definition: package_manifest.clone(),
                object: Some(package_manifest),
                k8s_client: k8s_client.clone(),
            })
            .collect())
    }

    /// Loads an existing PackageManifest. The returned builder's definition is the observed object.
    pub fn pull(
        k8s_client: Arc<SyncK8sClient>,
        name: &str,
        namespace: &str,
    ) -> Result<Self, PackageManifestError> {
        debug!(
            "Pulling existing PackageManifest name {} in namespace {}",
            name, namespace
        );

        validate_identity(name, namespace)?;

        let mut builder = Self {
            definition: PackageManifest::identity(name, namespace),
            object: None,
            k8s_client,
        };

        match builder.presence() {
            Presence::Found => {}
            Presence::NotFound => {
                return Err(PackageManifestError::NotFound {
                    name: name.to_string(),
                    namespace: namespace.to_string(),
                })
            }
            Presence::Unconfirmed(err) => {
                return Err(PackageManifestError::PullFailed {
                    name: name.to_string(),
                    namespace: namespace.to_string(),
                    source: err,
                })
            }
        }

        if let Some(object) = builder.object.as_ref() {
            builder.definition = object.clone();
        }

        Ok(builder)
    }

    /// Loads the single PackageManifest named `name` that the given catalog publishes.
    pub fn pull_by_catalog(
        k8s_client: Arc<SyncK8sClient>,
        name: &str,
        namespace: &str,
        catalog: &str,
    ) -> Result<Self, PackageManifestError> {
        debug!(
            "Pulling existing PackageManifest name {} in namespace {} and from catalog {}",
            name, namespace, catalog
        );

        let list_params = ListParams::default()
            .labels(&catalog_selector(catalog))
            .fields(&name_selector(name));

        let mut package_manifests = Self::list(k8s_client, namespace, &list_params)?;

        match package_manifests.len() {
            0 => {
                debug!("The list of matching PackageManifests is empty");
                Err(PackageManifestError::NotFound {
                    name: name.to_string(),
                    namespace: namespace.to_string(),
                })
            }
            1 => Ok(package_manifests.remove(0)),
            matches => {
                debug!("More than one matching PackageManifests were found");
                Err(PackageManifestError::AmbiguousResult {
                    name: name.to_string(),
                    namespace: namespace.to_string(),
                    catalog: catalog.to_string(),
                    matches,
                })
            }
        }
    }

    /// Fetches the object named by the definition. On success the observed object is replaced,
    /// on failure it is kept as it was.
    pub fn presence(&mut self) -> Presence {
        let name = self.definition.name_any();
        let namespace = self.definition.namespace().unwrap_or_default();
        debug!("Checking if PackageManifest {} exists", name);

        match self.k8s_client.get_package_manifest(&name, &namespace) {
            Ok(object) => {
                self.object = Some(object);
                Presence::Found
            }
            Err(err) if err.is_not_found() => Presence::NotFound,
            Err(err) => {
                debug!(
                    "Unable to confirm PackageManifest {} in namespace {}: {}",
                    name, namespace, err
                );
                Presence::Unconfirmed(err)
            }
        }
    }

    /// Checks whether the PackageManifest exists. Only a not-found answer returns false.
    pub fn exists(&mut self) -> bool {
        self.presence().exists_or_unknown()
    }

    /// Removes the PackageManifest. Deleting an absent object succeeds without a remote delete.
    pub fn delete(&mut self) -> Result<(), PackageManifestError> {
        let namespace = self.definition.namespace().unwrap_or_default();
        debug!(
            "Deleting PackageManifest {} in namespace {}",
            self.definition.name_any(),
            namespace
        );

        if !self.exists() {
            return Ok(());
        }

        let name = self
            .object
            .as_ref()
            .unwrap_or(&self.definition)
            .name_any();

        self.k8s_client.delete_package_manifest(&name, &namespace)?;
        self.object = None;

        Ok(())
    }

    pub fn definition(&self) -> &PackageManifest {
        &self.definition
    }

    pub fn object(&self) -> Option<&PackageManifest> {
        self.object.as_ref()
    }

    pub fn object_mut(&mut self) -> Option<&mut PackageManifest> {
        self.object.as_mut()
    }
}

/// Only the last failing check is reported.
fn validate_identity(name: &str, namespace: &str) -> Result<(), PackageManifestError> {
    let mut error_msg = None;

    if name.is_empty() {
        debug!("The Name of the PackageManifest is empty");
        error_msg = Some("packagemanifest 'name' cannot be empty");
    }

    if namespace.is_empty() {
        debug!("The Namespace of the PackageManifest is empty");
        error_msg = Some("packagemanifest 'namespace' cannot be empty");
    }

    match error_msg {
        Some(msg) => Err(PackageManifestError::InvalidArgument(msg.to_string())),
        None => Ok(()),
    }
}
