use url::Url;

use crate::telemetry::LogLevel;

const DEFAULT_TYPING_SPEED_MS: u32 = 80;
const DEFAULT_TYPING_PAUSE_MS: u32 = 2_000;
const DEFAULT_TYPING_RESTART_MS: u32 = 500;
const DEFAULT_BADGE_INTERVAL_MS: u32 = 3_000;
const DEFAULT_BADGE_FADE_MS: u32 = 300;
const DEFAULT_PARTICLE_MAX: usize = 50;
const DEFAULT_LINK_DISTANCE: u32 = 100;
const DEFAULT_STATUS_DISMISS_MS: u32 = 5_000;
const DEFAULT_QUOTE_INTERVAL_MS: u32 = 5_000;
const DEFAULT_HEADER_OFFSET_PX: u32 = 80;
const DEFAULT_MODAL_EXIT_MS: u32 = 400;
const DEFAULT_FORM_ENDPOINT: &str = "https://formspree.io/f/portfolio-contact";
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

const TYPING_SPEED_MS_BOUNDS: (u32, u32) = (10, 1_000);
const TYPING_PAUSE_MS_BOUNDS: (u32, u32) = (100, 20_000);
const TYPING_RESTART_MS_BOUNDS: (u32, u32) = (0, 10_000);
const BADGE_INTERVAL_MS_BOUNDS: (u32, u32) = (500, 60_000);
const BADGE_FADE_MS_BOUNDS: (u32, u32) = (0, 2_000);
const PARTICLE_MAX_BOUNDS: (usize, usize) = (1, 50);
const LINK_DISTANCE_BOUNDS: (u32, u32) = (20, 400);
const STATUS_DISMISS_MS_BOUNDS: (u32, u32) = (1_000, 60_000);
const QUOTE_INTERVAL_MS_BOUNDS: (u32, u32) = (1_000, 60_000);
const HEADER_OFFSET_PX_BOUNDS: (u32, u32) = (0, 400);
const MODAL_EXIT_MS_BOUNDS: (u32, u32) = (50, 5_000);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BadgeMode {
    Typing,
    Color,
}

impl BadgeMode {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "typing" => Some(Self::Typing),
            "color" | "colour" => Some(Self::Color),
            _ => None,
        }
    }
}

/// Runtime knobs read from `data-*` attributes on the mount element.
#[derive(Clone, Debug, PartialEq)]
pub struct SiteConfig {
    pub typing_speed_ms: u32,
    pub typing_pause_ms: u32,
    pub typing_restart_ms: u32,
    pub badge_interval_ms: u32,
    pub badge_fade_ms: u32,
    pub badge_mode: BadgeMode,
    pub particle_max: usize,
    pub link_distance: f64,
    pub status_dismiss_ms: u32,
    pub quote_interval_ms: u32,
    pub header_offset_px: f64,
    pub modal_exit_ms: u32,
    pub form_endpoint: String,
    pub log_level: LogLevel,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            typing_speed_ms: DEFAULT_TYPING_SPEED_MS,
            typing_pause_ms: DEFAULT_TYPING_PAUSE_MS,
            typing_restart_ms: DEFAULT_TYPING_RESTART_MS,
            badge_interval_ms: DEFAULT_BADGE_INTERVAL_MS,
            badge_fade_ms: DEFAULT_BADGE_FADE_MS,
            badge_mode: BadgeMode::Typing,
            particle_max: DEFAULT_PARTICLE_MAX,
            link_distance: f64::from(DEFAULT_LINK_DISTANCE),
            status_dismiss_ms: DEFAULT_STATUS_DISMISS_MS,
            quote_interval_ms: DEFAULT_QUOTE_INTERVAL_MS,
            header_offset_px: f64::from(DEFAULT_HEADER_OFFSET_PX),
            modal_exit_ms: DEFAULT_MODAL_EXIT_MS,
            form_endpoint: DEFAULT_FORM_ENDPOINT.to_string(),
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

impl SiteConfig {
    /// Builds a config from an attribute lookup such as `Element::get_attribute`.
    /// Values that fail to parse or fall outside their bounds keep the default.
    pub fn from_attributes(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let typing_speed_ms = parse_u32_with_bounds(
            &lookup,
            "data-typing-speed-ms",
            DEFAULT_TYPING_SPEED_MS,
            TYPING_SPEED_MS_BOUNDS,
        );
        let typing_pause_ms = parse_u32_with_bounds(
            &lookup,
            "data-typing-pause-ms",
            DEFAULT_TYPING_PAUSE_MS,
            TYPING_PAUSE_MS_BOUNDS,
        );
        let typing_restart_ms = parse_u32_with_bounds(
            &lookup,
            "data-typing-restart-ms",
            DEFAULT_TYPING_RESTART_MS,
            TYPING_RESTART_MS_BOUNDS,
        );
        let badge_interval_ms = parse_u32_with_bounds(
            &lookup,
            "data-badge-interval-ms",
            DEFAULT_BADGE_INTERVAL_MS,
            BADGE_INTERVAL_MS_BOUNDS,
        );
        let badge_fade_ms = parse_u32_with_bounds(
            &lookup,
            "data-badge-fade-ms",
            DEFAULT_BADGE_FADE_MS,
            BADGE_FADE_MS_BOUNDS,
        )
        .min(badge_interval_ms / 2);
        let badge_mode = parse_non_empty_string(&lookup, "data-badge-mode")
            .and_then(|value| BadgeMode::parse(&value))
            .unwrap_or(BadgeMode::Typing);
        let particle_max = parse_usize_with_bounds(
            &lookup,
            "data-particle-max",
            DEFAULT_PARTICLE_MAX,
            PARTICLE_MAX_BOUNDS,
        );
        let link_distance = parse_u32_with_bounds(
            &lookup,
            "data-link-distance",
            DEFAULT_LINK_DISTANCE,
            LINK_DISTANCE_BOUNDS,
        );
        let status_dismiss_ms = parse_u32_with_bounds(
            &lookup,
            "data-status-dismiss-ms",
            DEFAULT_STATUS_DISMISS_MS,
            STATUS_DISMISS_MS_BOUNDS,
        );
        let quote_interval_ms = parse_u32_with_bounds(
            &lookup,
            "data-quote-interval-ms",
            DEFAULT_QUOTE_INTERVAL_MS,
            QUOTE_INTERVAL_MS_BOUNDS,
        );
        let header_offset_px = parse_u32_with_bounds(
            &lookup,
            "data-header-offset-px",
            DEFAULT_HEADER_OFFSET_PX,
            HEADER_OFFSET_PX_BOUNDS,
        );
        let modal_exit_ms = parse_u32_with_bounds(
            &lookup,
            "data-modal-exit-ms",
            DEFAULT_MODAL_EXIT_MS,
            MODAL_EXIT_MS_BOUNDS,
        );
        let form_endpoint = parse_http_url(&lookup, "data-form-endpoint")
            .map(|url| url.to_string())
            .unwrap_or_else(|| DEFAULT_FORM_ENDPOINT.to_string());
        let log_level = parse_non_empty_string(&lookup, "data-log-level")
            .and_then(|value| LogLevel::parse(&value))
            .unwrap_or(DEFAULT_LOG_LEVEL);

        Self {
            typing_speed_ms,
            typing_pause_ms,
            typing_restart_ms,
            badge_interval_ms,
            badge_fade_ms,
            badge_mode,
            particle_max,
            link_distance: f64::from(link_distance),
            status_dismiss_ms,
            quote_interval_ms,
            header_offset_px: f64::from(header_offset_px),
            modal_exit_ms,
            form_endpoint,
            log_level,
        }
    }
}

fn parse_u32_with_bounds(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: u32,
    bounds: (u32, u32),
) -> u32 {
    lookup(name)
        .and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_usize_with_bounds(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: usize,
    bounds: (usize, usize),
) -> usize {
    lookup(name)
        .and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_non_empty_string(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_http_url(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<Url> {
    let value = parse_non_empty_string(lookup, name)?;
    let parsed = Url::parse(&value).ok()?;

    if parsed.scheme() == "http" || parsed.scheme() == "https" {
        Some(parsed)
    } else {
        None
    }
}
