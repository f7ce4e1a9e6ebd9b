use std::time::Duration;

use kube::Client;
use tracing::{debug, error, info};

use crate::classifier::classify_pods;
use crate::kubernetes::list_all_pods;
use crate::notifier::{DispatchOutcome, Notifier};
use crate::types::{ClassificationPolicy, Config};

/// Ties the pipeline together: fetch pods, classify them, dispatch the
/// report, sleep, repeat.
pub struct Monitor {
    client: Client,
    policy: ClassificationPolicy,
    notifier: Notifier,
}

impl Monitor {
    pub fn new(client: Client, cfg: &Config) -> Self {
        Monitor {
            client,
            policy: cfg.policy,
            notifier: Notifier::new(cfg.webhook_url.clone()),
        }
    }

    /// Run health check cycles forever, sleeping `interval` between them.
    pub async fn run(mut self, interval: Duration) {
        loop {
            self.run_cycle().await;
            tokio::time::sleep(interval).await;
        }
    }

    /// One fetch-classify-dispatch pass.
    ///
    /// Failures are logged rather than propagated so a flaky API server or
    /// webhook cannot take the monitor down; the next cycle starts fresh.
    pub async fn run_cycle(&mut self) {
        let pods = match list_all_pods(&self.client).await {
            Ok(pods) => pods,
            Err(err) => {
                error!("{}", err);
                return;
            }
        };
        debug!("Classifying {} pods", pods.len());

        let report = classify_pods(&pods, self.policy);

        match self.notifier.dispatch(&report).await {
            Ok(DispatchOutcome::Sent) => {
                info!(
                    "Sent health notification covering {} problems",
                    report.problem_count()
                );
            }
            Ok(DispatchOutcome::Suppressed) => {}
            Ok(DispatchOutcome::Empty) => debug!("All pods healthy"),
            Err(err) => error!("{}", err),
        }
    }
}
