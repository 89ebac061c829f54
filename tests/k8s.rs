//! Scenarios run against a cluster with OLM installed and the community catalog published in the
//! `olm` namespace. The kubeconfig is taken from `$KUBECONFIG`.
use std::sync::Arc;

use assert_matches::assert_matches;
use kube::api::ListParams;
use kube::ResourceExt;
use olm_packagemanifest::k8s::client::{ClientConfig, SyncK8sClient};
use olm_packagemanifest::olm::{PackageManifestBuilder, PackageManifestError};

const NAMESPACE: &str = "olm";

fn k8s_client() -> Arc<SyncK8sClient> {
    let runtime = Arc::new(
        tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .unwrap(),
    );
    Arc::new(SyncK8sClient::try_new(runtime, &ClientConfig::default()).unwrap())
}

#[test]
#[ignore = "needs k8s cluster"]
fn k8s_list_and_pull_package_manifest() {
    let client = k8s_client();

    let builders =
        PackageManifestBuilder::list(client.clone(), NAMESPACE, &ListParams::default()).unwrap();
    assert!(!builders.is_empty());

    let name = builders[0].definition().name_any();
    let builder = PackageManifestBuilder::pull(client, &name, NAMESPACE).unwrap();
    assert_eq!(name, builder.object().unwrap().name_any());
}

#[test]
#[ignore = "needs k8s cluster"]
fn k8s_pull_missing_package_manifest() {
    let err = PackageManifestBuilder::pull(k8s_client(), "not-a-real-package", NAMESPACE)
        .err()
        .unwrap();

    assert_matches!(err, PackageManifestError::NotFound { .. });
}

#[test]
#[ignore = "needs k8s cluster"]
fn k8s_pull_by_unknown_catalog() {
    let err =
        PackageManifestBuilder::pull_by_catalog(k8s_client(), "etcd", NAMESPACE, "no-such-catalog")
            .err()
            .unwrap();

    assert_matches!(err, PackageManifestError::NotFound { .. });
}
