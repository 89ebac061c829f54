use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// PackageManifest as served by the OLM package server aggregated API.
///
/// The spec is always empty: every piece of information lives in the status, which is
/// computed by the package server from the catalog sources of the cluster.
#[derive(Default, CustomResource, Deserialize, Serialize, Clone, Debug, PartialEq, JsonSchema)]
#[kube(
    group = "packages.operators.coreos.com",
    version = "v1",
    kind = "PackageManifest",
    plural = "packagemanifests",
    namespaced,
    status = "PackageManifestStatus",
    derive = "PartialEq",
    derive = "Default"
)]
pub struct PackageManifestSpec {}

#[derive(Default, Deserialize, Serialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifestStatus {
    #[serde(default)]
    pub catalog_source: String,
    #[serde(default)]
    pub catalog_source_display_name: String,
    #[serde(default)]
    pub catalog_source_publisher: String,
    #[serde(default)]
    pub catalog_source_namespace: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<AppLink>,
    #[serde(default)]
    pub package_name: String,
    #[serde(default)]
    pub channels: Vec<PackageChannel>,
    #[serde(default)]
    pub default_channel: String,
}

#[derive(Default, Deserialize, Serialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct AppLink {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Default, Deserialize, Serialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct PackageChannel {
    pub name: String,
    #[serde(rename = "currentCSV", default)]
    pub current_csv: String,
}

impl PackageManifest {
    /// Builds the minimal identity of a PackageManifest: name and namespace only.
    pub fn identity(name: &str, namespace: &str) -> Self {
        let mut package_manifest = PackageManifest::new(name, PackageManifestSpec::default());
        package_manifest.metadata.namespace = Some(namespace.to_string());
        package_manifest
    }
}
