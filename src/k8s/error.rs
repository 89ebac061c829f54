use kube::config::KubeconfigError;

#[derive(thiserror::Error, Debug)]
pub enum K8sError {
    #[error("it is not possible to create a k8s client: `{0}`")]
    UnableToSetupClient(String),

    #[error("the kube client returned an error: `{0}`")]
    Generic(#[from] kube::Error),

    #[error("it is not possible to read kubeconfig: `{0}`")]
    UnableToSetupClientKubeconfig(#[from] KubeconfigError),
}

impl K8sError {
    /// Returns true when the api-server answered that the requested object does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, K8sError::Generic(kube::Error::Api(response)) if response.code == 404)
    }
}
