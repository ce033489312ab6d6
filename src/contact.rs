use futures_util::future::LocalBoxFuture;
use serde_json::json;
use url::Url;

use crate::config::SiteConfig;
use crate::error::SiteError;
use crate::telemetry::{log_event, LogLevel};

pub const SUCCESS_MESSAGE: &str = "Thank you! Your message has been sent successfully.";
pub const ERROR_MESSAGE: &str = "There was an error sending your message. Please try again.";
pub const PENDING_LABEL: &str = "Sending...";
pub const DEFAULT_SUBMIT_LABEL: &str = "Send Message";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Sent,
    Failed,
}

impl SubmitOutcome {
    pub fn from_status(status: u16) -> Self {
        if (200..300).contains(&status) {
            Self::Sent
        } else {
            Self::Failed
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::Sent => SUCCESS_MESSAGE,
            Self::Failed => ERROR_MESSAGE,
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            Self::Sent => "success",
            Self::Failed => "error",
        }
    }

    pub fn resets_form(self) -> bool {
        matches!(self, Self::Sent)
    }
}

/// Reads a relay redirect result (`?success=true|false`) from the page URL.
pub fn outcome_from_location(href: &str) -> Option<SubmitOutcome> {
    let url = Url::parse(href).ok()?;
    let (_, value) = url.query_pairs().find(|(key, _)| key == "success")?;

    match value.as_ref() {
        "true" => Some(SubmitOutcome::Sent),
        "false" => Some(SubmitOutcome::Failed),
        _ => None,
    }
}

pub trait FormTransport {
    fn post<'a>(&'a self, endpoint: &'a str) -> LocalBoxFuture<'a, Result<u16, SiteError>>;
}

pub async fn deliver(config: &SiteConfig, transport: &impl FormTransport, endpoint: &str) -> SubmitOutcome {
    match transport.post(endpoint).await {
        Ok(status) => {
            let outcome = SubmitOutcome::from_status(status);
            let level = match outcome {
                SubmitOutcome::Sent => LogLevel::Info,
                SubmitOutcome::Failed => LogLevel::Warn,
            };
            log_event(config, level, "contact_submit_settled", json!({ "status": status }));
            outcome
        }
        Err(error) => {
            log_event(
                config,
                LogLevel::Error,
                "contact_submit_failed",
                json!({ "error": error.to_string() }),
            );
            SubmitOutcome::Failed
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormAction {
    Begin,
    Settle(SubmitOutcome),
    Redirected(SubmitOutcome),
    Dismiss,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormState {
    idle_label: String,
    pub button_label: String,
    pub button_disabled: bool,
    pub submitting: bool,
    pub outcome: Option<SubmitOutcome>,
    pub status_visible: bool,
    /// Bumped whenever the fields should be cleared.
    pub reset_generation: u32,
}

impl Default for FormState {
    fn default() -> Self {
        Self::with_label(DEFAULT_SUBMIT_LABEL)
    }
}

impl FormState {
    pub fn with_label(label: &str) -> Self {
        Self {
            idle_label: label.to_string(),
            button_label: label.to_string(),
            button_disabled: false,
            submitting: false,
            outcome: None,
            status_visible: false,
            reset_generation: 0,
        }
    }

    pub fn apply(mut self, action: FormAction) -> Self {
        match action {
            FormAction::Begin => {
                if self.submitting {
                    return self;
                }
                self.button_label = PENDING_LABEL.to_string();
                self.button_disabled = true;
                self.submitting = true;
            }
            FormAction::Settle(outcome) => {
                self.show(outcome);
                self.button_label = self.idle_label.clone();
                self.button_disabled = false;
                self.submitting = false;
            }
            FormAction::Redirected(outcome) => self.show(outcome),
            FormAction::Dismiss => {
                self.status_visible = false;
                self.outcome = None;
            }
        }

        self
    }

    fn show(&mut self, outcome: SubmitOutcome) {
        self.outcome = Some(outcome);
        self.status_visible = true;
        if outcome.resets_form() {
            self.reset_generation = self.reset_generation.wrapping_add(1);
        }
    }

    pub fn status_class(&self) -> String {
        match self.outcome {
            Some(outcome) => format!("form-status {}", outcome.class()),
            None => "form-status".to_string(),
        }
    }

    pub fn status_text(&self) -> &'static str {
        self.outcome.map(SubmitOutcome::message).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedStatus(Result<u16, &'static str>);

    impl FormTransport for FixedStatus {
        fn post<'a>(&'a self, _endpoint: &'a str) -> LocalBoxFuture<'a, Result<u16, SiteError>> {
            let result = self.0.map_err(|message| SiteError::Network(message.to_string()));
            Box::pin(async move { result })
        }
    }

    fn quiet_config() -> SiteConfig {
        SiteConfig {
            log_level: LogLevel::Error,
            ..SiteConfig::default()
        }
    }

    async fn submit(status: Result<u16, &'static str>) -> (FormState, FormState) {
        let idle = FormState::with_label("Send");
        let pending = idle.clone().apply(FormAction::Begin);
        let outcome = deliver(&quiet_config(), &FixedStatus(status), "https://relay.example.com/f/x").await;
        (pending.clone(), pending.apply(FormAction::Settle(outcome)))
    }

    #[tokio::test]
    async fn success_shows_message_resets_and_restores_button() {
        let (pending, settled) = submit(Ok(200)).await;

        assert_eq!(pending.button_label, PENDING_LABEL);
        assert!(pending.button_disabled);
        assert_eq!(settled.outcome, Some(SubmitOutcome::Sent));
        assert_eq!(settled.status_text(), SUCCESS_MESSAGE);
        assert_eq!(settled.reset_generation, 1);
        assert_eq!(settled.button_label, "Send");
        assert!(!settled.button_disabled);
        assert!(!settled.submitting);
    }

    #[tokio::test]
    async fn http_error_shows_error_without_reset() {
        let (_, settled) = submit(Ok(422)).await;

        assert_eq!(settled.outcome, Some(SubmitOutcome::Failed));
        assert_eq!(settled.status_class(), "form-status error");
        assert_eq!(settled.reset_generation, 0);
        assert_eq!(settled.button_label, "Send");
        assert!(!settled.button_disabled);
    }

    #[tokio::test]
    async fn network_error_restores_button_too() {
        let (_, settled) = submit(Err("offline")).await;

        assert_eq!(settled.status_text(), ERROR_MESSAGE);
        assert_eq!(settled.reset_generation, 0);
        assert_eq!(settled.button_label, "Send");
        assert!(!settled.button_disabled);
    }

    #[test]
    fn status_range_boundaries() {
        assert_eq!(SubmitOutcome::from_status(199), SubmitOutcome::Failed);
        assert_eq!(SubmitOutcome::from_status(204), SubmitOutcome::Sent);
        assert_eq!(SubmitOutcome::from_status(299), SubmitOutcome::Sent);
        assert_eq!(SubmitOutcome::from_status(302), SubmitOutcome::Failed);
    }

    #[test]
    fn dismiss_hides_the_status_line() {
        let state = FormState::default()
            .apply(FormAction::Redirected(SubmitOutcome::Failed))
            .apply(FormAction::Dismiss);

        assert!(!state.status_visible);
        assert_eq!(state.status_class(), "form-status");
        assert_eq!(state.status_text(), "");
    }

    #[test]
    fn double_begin_keeps_the_original_label() {
        let state = FormState::with_label("Send")
            .apply(FormAction::Begin)
            .apply(FormAction::Begin)
            .apply(FormAction::Settle(SubmitOutcome::Sent));

        assert_eq!(state.button_label, "Send");
    }

    #[test]
    fn redirect_query_is_recognised() {
        assert_eq!(
            outcome_from_location("https://alexmorgan.dev/?success=true#contact"),
            Some(SubmitOutcome::Sent)
        );
        assert_eq!(
            outcome_from_location("https://alexmorgan.dev/?ref=mail&success=false"),
            Some(SubmitOutcome::Failed)
        );
        assert_eq!(outcome_from_location("https://alexmorgan.dev/?success=maybe"), None);
        assert_eq!(outcome_from_location("https://alexmorgan.dev/"), None);
    }

    #[test]
    fn redirect_success_resets_like_a_live_submit() {
        let state = FormState::default().apply(FormAction::Redirected(SubmitOutcome::Sent));

        assert_eq!(state.reset_generation, 1);
        assert!(state.status_visible);
        assert!(!state.button_disabled);
    }
}
