use serde::Serialize;

#[derive(Debug, Clone)]
pub struct Config {
    pub webhook_url: String,
    pub interval_minutes: u64,
    pub deployment_mode: DeploymentMode,
    pub policy: ClassificationPolicy,
}

/// How credentials for the cluster are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeploymentMode {
    /// Local development: kubeconfig file from the home directory.
    Dev,
    /// Ambient service-account identity inside the cluster.
    InCluster,
}

/// Which rule-set decides that a container constitutes a problem.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClassificationPolicy {
    /// Legacy rules: every Pending/Running pod is checked per container,
    /// with no age gate on Pending pods.
    Simple,
    /// Pending pods are only flagged once they are old enough to rule out
    /// normal scheduling latency, and their unready containers are merged
    /// into a single problem per pod.
    #[default]
    AgeAware,
}

/// One detected unhealthy condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    pub summary: String,
    pub description: String,
}

#[derive(Serialize)]
pub struct DiscordPayload {
    pub content: String,
}
