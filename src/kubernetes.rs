use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use k8s_openapi::api::core::v1::Pod;
use kube::api::ListParams;
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Api, Client};
use tracing::debug;

use crate::error::FetchError;
use crate::types::DeploymentMode;

const CONNECT_TIMEOUT_SECS: u64 = 10;
const READ_TIMEOUT_SECS: u64 = 30;

/// Build a Kubernetes client for the given deployment mode.
///
/// Dev mode reads the local kubeconfig; in-cluster mode uses the service
/// account mounted into the pod.
pub async fn create_client(mode: DeploymentMode) -> Result<Client> {
    let mut config = match mode {
        DeploymentMode::Dev => {
            let path = default_kubeconfig_path()?;
            debug!("Loading kubeconfig from {}", path.display());
            config_from_kubeconfig_file(&path).await?
        }
        DeploymentMode::InCluster => {
            kube::Config::incluster().context("failed to load in-cluster configuration")?
        }
    };

    config.connect_timeout = Some(Duration::from_secs(CONNECT_TIMEOUT_SECS));
    config.read_timeout = Some(Duration::from_secs(READ_TIMEOUT_SECS));

    Client::try_from(config).context("failed to build Kubernetes client")
}

pub async fn config_from_kubeconfig_file(path: &Path) -> Result<kube::Config> {
    let kubeconfig = Kubeconfig::read_from(path)
        .with_context(|| format!("failed to read kubeconfig at {}", path.display()))?;
    kube::Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
        .await
        .context("failed to interpret kubeconfig")
}

fn default_kubeconfig_path() -> Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| anyhow!("neither HOME nor USERPROFILE is set"))?;
    Ok(PathBuf::from(home).join(".kube").join("config"))
}

/// List every pod in the cluster in a single call.
pub async fn list_all_pods(client: &Client) -> Result<Vec<Pod>, FetchError> {
    let pods: Api<Pod> = Api::all(client.clone());
    // Resource version "0" lets the API server answer from its cache, which
    // is plenty fresh for periodic health snapshots.
    let params = ListParams {
        resource_version: Some("0".to_string()),
        ..Default::default()
    };
    let list = pods.list(&params).await?;
    Ok(list.items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const KUBECONFIG: &str = r#"
apiVersion: v1
kind: Config
clusters:
  - name: test
    cluster:
      server: https://10.0.0.1:6443
contexts:
  - name: test
    context:
      cluster: test
      user: tester
current-context: test
users:
  - name: tester
    user:
      token: secret
"#;

    #[test]
    fn test_config_from_kubeconfig_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(KUBECONFIG.as_bytes()).unwrap();

        let config = tokio_test::block_on(config_from_kubeconfig_file(file.path())).unwrap();

        assert!(config.cluster_url.to_string().starts_with("https://10.0.0.1:6443"));
        assert_eq!(config.default_namespace, "default");
    }

    #[test]
    fn test_config_from_missing_kubeconfig_fails() {
        let error =
            tokio_test::block_on(config_from_kubeconfig_file(Path::new("/nonexistent/kubeconfig")))
                .unwrap_err();
        assert!(error.to_string().contains("/nonexistent/kubeconfig"));
    }
}
