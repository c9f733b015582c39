use colored::Colorize;
use hilink_xml::describe_error_code;

use crate::automation::{Attempt, AttemptOutcome, RunReport};
use crate::dhcp::ChangePlan;

/// One line per attempt, coloured by outcome.
pub fn render_attempts(report: &RunReport) -> String {
    let mut out = Vec::new();
    out.push("attempts".to_string());
    for attempt in &report.attempts {
        out.push(render_attempt(attempt));
    }
    out.join("\n")
}

fn render_attempt(attempt: &Attempt) -> String {
    let backend = attempt.backend;
    match &attempt.outcome {
        AttemptOutcome::Success { .. } => format!("- {backend}: success").green().to_string(),
        AttemptOutcome::DeviceError { code, .. } => {
            let detail = match code {
                Some(code) => match describe_error_code(*code) {
                    Some(meaning) => format!(" code={code} ({meaning})"),
                    None => format!(" code={code}"),
                },
                None => String::new(),
            };
            format!("- {backend}: device error{detail}").red().to_string()
        }
        AttemptOutcome::BackendUnavailable { reason } => {
            format!("- {backend}: unavailable reason={reason}")
                .yellow()
                .to_string()
        }
        AttemptOutcome::UnexpectedFailure { reason } => {
            format!("- {backend}: failed reason={reason}")
                .magenta()
                .to_string()
        }
    }
}

/// Diagnostic printed once every backend has failed.
pub fn render_exhausted() -> String {
    [
        "❌ All browser automation attempts failed".red().to_string(),
        String::new(),
        "Possible reasons:".to_string(),
        "1. Device firmware doesn't support IP changes".to_string(),
        "2. Browser driver not installed (Chrome/Firefox/Edge)".to_string(),
        "3. Device requires different authentication".to_string(),
    ]
    .join("\n")
}

/// Step-by-step instructions for making the change from a browser console.
pub fn render_manual_fallback(plan: &ChangePlan, snippet: &str) -> String {
    [
        "Manual alternative:".cyan().to_string(),
        format!("1. Open {} in Chrome", plan.current_url()),
        "2. Press F12 for Developer Tools".to_string(),
        "3. Go to Console tab".to_string(),
        "4. Paste this command:".to_string(),
        String::new(),
        snippet.to_string(),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::{render_attempts, render_exhausted, render_manual_fallback};
    use crate::automation::{Attempt, AttemptOutcome, RunReport};
    use crate::browser::BrowserKind;
    use crate::defaults::DeviceDefaults;
    use crate::dhcp::ChangePlan;
    use std::net::Ipv4Addr;

    #[test]
    fn attempts_name_backend_and_outcome() {
        let report = RunReport {
            attempts: vec![
                Attempt {
                    backend: BrowserKind::Chrome,
                    outcome: AttemptOutcome::BackendUnavailable {
                        reason: "refused".to_string(),
                    },
                },
                Attempt {
                    backend: BrowserKind::Firefox,
                    outcome: AttemptOutcome::DeviceError {
                        response: String::new(),
                        code: Some(125002),
                    },
                },
                Attempt {
                    backend: BrowserKind::Edge,
                    outcome: AttemptOutcome::Success {
                        response: "OK".to_string(),
                    },
                },
            ],
        };
        let text = render_attempts(&report);
        assert!(text.contains("Chrome: unavailable reason=refused"));
        assert!(text.contains("Firefox: device error code=125002 (session error)"));
        assert!(text.contains("Edge: success"));
    }

    #[test]
    fn exhausted_lists_likely_causes() {
        let text = render_exhausted();
        assert!(text.contains("firmware doesn't support"));
        assert!(text.contains("Browser driver not installed"));
        assert!(text.contains("different authentication"));
    }

    #[test]
    fn fallback_points_at_current_address() {
        let defaults = DeviceDefaults::embedded().expect("defaults");
        let plan = ChangePlan::new(
            Ipv4Addr::new(192, 168, 8, 1),
            Ipv4Addr::new(10, 0, 0, 1),
            &defaults.dhcp,
        );
        let text = render_manual_fallback(&plan, "fetch(...)");
        assert!(text.contains("1. Open http://192.168.8.1 in Chrome"));
        assert!(text.ends_with("fetch(...)"));
    }
}
