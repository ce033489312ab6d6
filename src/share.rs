use futures_util::future::LocalBoxFuture;
use serde_json::json;

use crate::config::SiteConfig;
use crate::error::SiteError;
use crate::telemetry::{log_event, LogLevel};

pub const UNSUPPORTED_NOTICE: &str = "Share feature is not supported on your browser.";
pub const FAILED_NOTICE: &str = "Could not share at this time.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShareRequest {
    pub source_url: String,
    pub title: String,
    pub filename: String,
    pub page_url: String,
}

impl ShareRequest {
    pub fn file_text(&self) -> String {
        format!("Check out my certificate for {}.", self.title)
    }

    pub fn link_title(&self) -> &'static str {
        "Certificate"
    }

    pub fn link_text(&self) -> String {
        format!("Check out my certificate: {}", self.title)
    }
}

pub trait ShareStrategy {
    fn name(&self) -> &'static str;
    fn attempt<'a>(&'a self, request: &'a ShareRequest) -> LocalBoxFuture<'a, Result<(), SiteError>>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShareOutcome {
    Shared(&'static str),
    Unsupported,
    Failed,
}

impl ShareOutcome {
    pub fn notice(self) -> Option<&'static str> {
        match self {
            Self::Shared(_) => None,
            Self::Unsupported => Some(UNSUPPORTED_NOTICE),
            Self::Failed => Some(FAILED_NOTICE),
        }
    }
}

pub async fn share_with_fallbacks(
    config: &SiteConfig,
    share_available: bool,
    strategies: &[Box<dyn ShareStrategy>],
    request: &ShareRequest,
) -> ShareOutcome {
    if !share_available {
        log_event(
            config,
            LogLevel::Info,
            "share_unsupported",
            json!({ "title": request.title }),
        );
        return ShareOutcome::Unsupported;
    }

    for strategy in strategies {
        match strategy.attempt(request).await {
            Ok(()) => {
                log_event(
                    config,
                    LogLevel::Debug,
                    "share_completed",
                    json!({ "strategy": strategy.name(), "title": request.title }),
                );
                return ShareOutcome::Shared(strategy.name());
            }
            Err(error) => log_event(
                config,
                LogLevel::Warn,
                "share_strategy_failed",
                json!({ "strategy": strategy.name(), "error": error.to_string() }),
            ),
        }
    }

    ShareOutcome::Failed
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Scripted {
        name: &'static str,
        succeeds: bool,
        log: Rc<RefCell<Vec<&'static str>>>,
    }

    impl ShareStrategy for Scripted {
        fn name(&self) -> &'static str {
            self.name
        }

        fn attempt<'a>(&'a self, _request: &'a ShareRequest) -> LocalBoxFuture<'a, Result<(), SiteError>> {
            Box::pin(async move {
                self.log.borrow_mut().push(self.name);
                if self.succeeds {
                    Ok(())
                } else {
                    Err(SiteError::Share(format!("{} refused", self.name)))
                }
            })
        }
    }

    fn request() -> ShareRequest {
        ShareRequest {
            source_url: "/certificates/a.png".to_string(),
            title: "Hack for Good Winner".to_string(),
            filename: "hack_for_good_winner_certificate.png".to_string(),
            page_url: "https://alexmorgan.dev/".to_string(),
        }
    }

    fn strategies(
        outcomes: &[(&'static str, bool)],
        log: &Rc<RefCell<Vec<&'static str>>>,
    ) -> Vec<Box<dyn ShareStrategy>> {
        outcomes
            .iter()
            .map(|&(name, succeeds)| {
                Box::new(Scripted {
                    name,
                    succeeds,
                    log: Rc::clone(log),
                }) as Box<dyn ShareStrategy>
            })
            .collect()
    }

    fn quiet_config() -> SiteConfig {
        SiteConfig {
            log_level: LogLevel::Error,
            ..SiteConfig::default()
        }
    }

    #[tokio::test]
    async fn first_success_short_circuits() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let chain = strategies(&[("file", true), ("link", true)], &log);

        let outcome = share_with_fallbacks(&quiet_config(), true, &chain, &request()).await;

        assert_eq!(outcome, ShareOutcome::Shared("file"));
        assert_eq!(log.borrow().as_slice(), ["file"]);
        assert_eq!(outcome.notice(), None);
    }

    #[tokio::test]
    async fn file_failure_falls_back_to_link() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let chain = strategies(&[("file", false), ("link", true)], &log);

        let outcome = share_with_fallbacks(&quiet_config(), true, &chain, &request()).await;

        assert_eq!(outcome, ShareOutcome::Shared("link"));
        assert_eq!(log.borrow().as_slice(), ["file", "link"]);
    }

    #[tokio::test]
    async fn exhausted_chain_yields_failure_notice() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let chain = strategies(&[("file", false), ("link", false)], &log);

        let outcome = share_with_fallbacks(&quiet_config(), true, &chain, &request()).await;

        assert_eq!(outcome, ShareOutcome::Failed);
        assert_eq!(outcome.notice(), Some(FAILED_NOTICE));
    }

    #[tokio::test]
    async fn missing_capability_attempts_nothing() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let chain = strategies(&[("file", true)], &log);

        let outcome = share_with_fallbacks(&quiet_config(), false, &chain, &request()).await;

        assert_eq!(outcome, ShareOutcome::Unsupported);
        assert_eq!(outcome.notice(), Some(UNSUPPORTED_NOTICE));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn share_texts_mention_the_certificate_title() {
        let request = request();
        assert_eq!(request.file_text(), "Check out my certificate for Hack for Good Winner.");
        assert_eq!(request.link_text(), "Check out my certificate: Hack for Good Winner");
    }
}
