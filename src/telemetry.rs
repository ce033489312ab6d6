use serde_json::{Map, Number, Value};
use std::cmp::Ordering;

use crate::config::SiteConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl PartialOrd for LogLevel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LogLevel {
    fn cmp(&self, other: &Self) -> Ordering {
        fn rank(level: LogLevel) -> u8 {
            match level {
                LogLevel::Debug => 0,
                LogLevel::Info => 1,
                LogLevel::Warn => 2,
                LogLevel::Error => 3,
            }
        }

        rank(*self).cmp(&rank(*other))
    }
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

/// Emits one JSON line for `event` when `level` passes the configured minimum.
pub fn log_event(config: &SiteConfig, level: LogLevel, event: &str, fields: Value) {
    if level < config.log_level {
        return;
    }

    let line = event_payload(now_unix_millis(), level, event, fields);
    emit(level, &line.to_string());
}

fn event_payload(ts: u64, level: LogLevel, event: &str, fields: Value) -> Value {
    let mut payload = Map::new();
    payload.insert("ts".to_string(), Value::Number(Number::from(ts)));
    payload.insert("level".to_string(), Value::String(level.as_str().to_string()));
    payload.insert("event".to_string(), Value::String(event.to_string()));

    if let Value::Object(extra) = fields {
        for (key, value) in extra {
            payload.insert(key, value);
        }
    }

    Value::Object(payload)
}

#[cfg(target_arch = "wasm32")]
fn now_unix_millis() -> u64 {
    js_sys::Date::now().max(0.0) as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn now_unix_millis() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(target_arch = "wasm32")]
fn emit(level: LogLevel, line: &str) {
    let line = wasm_bindgen::JsValue::from_str(line);
    match level {
        LogLevel::Debug => web_sys::console::debug_1(&line),
        LogLevel::Info => web_sys::console::log_1(&line),
        LogLevel::Warn => web_sys::console::warn_1(&line),
        LogLevel::Error => web_sys::console::error_1(&line),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(_level: LogLevel, line: &str) {
    eprintln!("{line}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn levels_order_from_debug_to_error() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
    }

    #[test]
    fn level_parsing_accepts_aliases_and_rejects_noise() {
        assert_eq!(LogLevel::parse(" WARNING "), Some(LogLevel::Warn));
        assert_eq!(LogLevel::parse("debug"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse("verbose"), None);
    }

    #[test]
    fn payload_merges_extra_fields_after_envelope() {
        let payload = event_payload(
            42,
            LogLevel::Warn,
            "share_strategy_failed",
            json!({ "strategy": "file" }),
        );

        assert_eq!(payload["ts"], 42);
        assert_eq!(payload["level"], "warn");
        assert_eq!(payload["event"], "share_strategy_failed");
        assert_eq!(payload["strategy"], "file");
    }

    #[test]
    fn non_object_fields_are_ignored() {
        let payload = event_payload(1, LogLevel::Info, "boot", json!("loose"));

        assert_eq!(payload.as_object().map(|fields| fields.len()), Some(3));
    }
}
