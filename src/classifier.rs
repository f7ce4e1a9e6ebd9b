use chrono::{Duration, Utc};
use k8s_openapi::api::core::v1::{ContainerState, ContainerStatus, Pod};

use crate::report::Report;
use crate::types::{ClassificationPolicy, Problem};

/// Pending pods younger than this are assumed to still be scheduling
/// normally and are not flagged by the age-aware rule-set.
const PENDING_AGE_MINUTES: i64 = 2;

/// Waiting reasons that flag a container even before its first restart.
const IMAGE_PULL_REASONS: [&str; 2] = ["ErrImagePull", "ImagePullBackOff"];

/// Classify a pod inventory snapshot into a report of problems.
///
/// Pure over its input: pods whose phase is neither Pending nor Running are
/// ignored, a container whose state cannot be determined is reported as
/// Unknown, and nothing here can fail. Problems appear in discovery order.
pub fn classify_pods(pods: &[Pod], policy: ClassificationPolicy) -> Report {
    let mut report = Report::new();
    for pod in pods {
        match policy {
            ClassificationPolicy::Simple => check_pod_simple(pod, &mut report),
            ClassificationPolicy::AgeAware => check_pod_age_aware(pod, &mut report),
        }
    }
    report
}

/// Legacy rule-set: one problem per offending container, no age gate.
fn check_pod_simple(pod: &Pod, report: &mut Report) {
    let phase = pod_phase(pod);
    if phase != "Running" && phase != "Pending" {
        return;
    }
    for cs in container_statuses(pod) {
        let (state, reason, message) = container_state_details(cs.state.as_ref());
        if !is_container_unhealthy(cs, state, &reason) {
            continue;
        }
        let summary = if phase == "Pending" {
            pending_summary(pod)
        } else {
            restart_summary(pod, cs.restart_count)
        };
        report.push(Problem {
            summary,
            description: describe_container(&cs.name, state, &reason, &message),
        });
    }
}

/// Default rule-set: Pending pods are age-gated and collapsed into a single
/// problem covering all of their unready containers; Running pods are
/// checked per container like the legacy rule-set.
fn check_pod_age_aware(pod: &Pod, report: &mut Report) {
    match pod_phase(pod) {
        "Pending" => {
            if !pending_age_exceeded(pod) {
                return;
            }
            let mut description = String::new();
            for cs in container_statuses(pod) {
                if cs.ready {
                    continue;
                }
                let (state, reason, message) = container_state_details(cs.state.as_ref());
                description.push_str(&describe_container(&cs.name, state, &reason, &message));
            }
            report.push(Problem {
                summary: pending_summary(pod),
                description,
            });
        }
        "Running" => {
            for cs in container_statuses(pod) {
                let (state, reason, message) = container_state_details(cs.state.as_ref());
                if !is_container_unhealthy(cs, state, &reason) {
                    continue;
                }
                report.push(Problem {
                    summary: restart_summary(pod, cs.restart_count),
                    description: describe_container(&cs.name, state, &reason, &message),
                });
            }
        }
        _ => {}
    }
}

fn is_container_unhealthy(cs: &ContainerStatus, state: &str, reason: &str) -> bool {
    !cs.ready
        && (cs.restart_count > 0 || (state == "Waiting" && IMAGE_PULL_REASONS.contains(&reason)))
}

fn pending_summary(pod: &Pod) -> String {
    format!(
        "Pod `{}` in `{}` is stuck in a Pending state",
        pod_name(pod),
        pod_namespace(pod)
    )
}

fn restart_summary(pod: &Pod, restart_count: i32) -> String {
    format!(
        "Pod `{}` in `{}` has restarted `{}` times",
        pod_name(pod),
        pod_namespace(pod),
        restart_count
    )
}

fn describe_container(name: &str, state: &str, reason: &str, message: &str) -> String {
    format!(
        "Container `{}` is in state `{}` because of reason `{}`:\n```{}```\n",
        name, state, reason, message
    )
}

/// Flatten a container state into (state, reason, message), degrading to
/// Unknown when no variant is set.
fn container_state_details(state: Option<&ContainerState>) -> (&'static str, String, String) {
    if let Some(state) = state {
        if let Some(waiting) = state.waiting.as_ref() {
            return (
                "Waiting",
                waiting.reason.clone().unwrap_or_default(),
                waiting.message.clone().unwrap_or_default(),
            );
        }
        if state.running.is_some() {
            return ("Running", String::new(), String::new());
        }
        if let Some(terminated) = state.terminated.as_ref() {
            return (
                "Terminated",
                terminated.reason.clone().unwrap_or_default(),
                format!(
                    "{} (exit code {})",
                    terminated.message.clone().unwrap_or_default(),
                    terminated.exit_code
                ),
            );
        }
    }
    ("Unknown", "Unknown".to_string(), "None".to_string())
}

fn pod_name(pod: &Pod) -> &str {
    pod.metadata.name.as_deref().unwrap_or("")
}

fn pod_namespace(pod: &Pod) -> &str {
    pod.metadata.namespace.as_deref().unwrap_or("")
}

fn pod_phase(pod: &Pod) -> &str {
    pod.status
        .as_ref()
        .and_then(|s| s.phase.as_deref())
        .unwrap_or("")
}

fn container_statuses(pod: &Pod) -> &[ContainerStatus] {
    pod.status
        .as_ref()
        .and_then(|s| s.container_statuses.as_deref())
        .unwrap_or(&[])
}

fn pending_age_exceeded(pod: &Pod) -> bool {
    // Missing creation timestamps count as age zero, so such pods are never
    // flagged as stuck.
    let created = pod
        .metadata
        .creation_timestamp
        .as_ref()
        .map(|t| t.0)
        .unwrap_or_else(Utc::now);
    (Utc::now() - created) > Duration::minutes(PENDING_AGE_MINUTES)
}
