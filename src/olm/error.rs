use crate::k8s;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PackageManifestError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("packagemanifest object {name} doesn't exist in namespace {namespace}")]
    NotFound { name: String, namespace: String },

    #[error("{matches} packagemanifests named {name} were found in namespace {namespace} for catalog {catalog}, expected one")]
    AmbiguousResult {
        name: String,
        namespace: String,
        catalog: String,
        matches: usize,
    },

    #[error("failed to list packagemanifests in namespace {namespace}: `{source}`")]
    ListFailed {
        namespace: String,
        #[source]
        source: k8s::Error,
    },

    #[error("failed to pull packagemanifest {name} in namespace {namespace}: `{source}`")]
    PullFailed {
        name: String,
        namespace: String,
        #[source]
        source: k8s::Error,
    },

    #[error(transparent)]
    Remote(#[from] k8s::Error),
}
