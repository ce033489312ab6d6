pub const PROGRESS_TICK_MS: u32 = 1_000;

pub const REQUEST_FULLSCREEN: [&str; 3] = [
    "requestFullscreen",
    "webkitRequestFullscreen",
    "msRequestFullscreen",
];
pub const EXIT_FULLSCREEN: [&str; 3] = ["exitFullscreen", "webkitExitFullscreen", "msExitFullscreen"];
pub const FULLSCREEN_ELEMENT: [&str; 3] = [
    "fullscreenElement",
    "webkitFullscreenElement",
    "msFullscreenElement",
];
pub const FULLSCREEN_CHANGE_EVENTS: [&str; 4] = [
    "fullscreenchange",
    "webkitfullscreenchange",
    "mozfullscreenchange",
    "MSFullscreenChange",
];

pub trait Player {
    fn is_paused(&self) -> bool;
    fn play(&self);
    fn pause(&self);
    fn set_muted(&self, muted: bool);
    fn seek_to(&self, seconds: f64);
    fn current_time(&self) -> f64;
    fn duration(&self) -> f64;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerState {
    Unstarted,
    Ended,
    Playing,
    Paused,
    Buffering,
    Cued,
}

impl PlayerState {
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            -1 => Some(Self::Unstarted),
            0 => Some(Self::Ended),
            1 => Some(Self::Playing),
            2 => Some(Self::Paused),
            3 => Some(Self::Buffering),
            5 => Some(Self::Cued),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProgressTimer {
    Start,
    Stop,
    Keep,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MediaSession {
    pub is_playing: bool,
    pub is_muted: bool,
    pub current_time: f64,
    pub duration: f64,
}

pub struct MediaControls<P: Player> {
    player: P,
    session: MediaSession,
    ready: bool,
    failed: bool,
}

impl<P: Player> MediaControls<P> {
    pub fn new(player: P) -> Self {
        Self {
            player,
            session: MediaSession::default(),
            ready: true,
            failed: false,
        }
    }

    /// For players whose methods only exist once they report ready. Every
    /// control is a no-op until [`MediaControls::mark_ready`].
    pub fn awaiting_ready(player: P) -> Self {
        Self {
            ready: false,
            ..Self::new(player)
        }
    }

    pub fn mark_ready(&mut self) {
        self.ready = true;
        self.sync();
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    fn accepts_input(&self) -> bool {
        self.ready && !self.failed
    }

    pub fn session(&self) -> MediaSession {
        self.session
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    pub fn is_failed(&self) -> bool {
        self.failed
    }

    pub fn sync(&mut self) {
        if !self.accepts_input() {
            return;
        }

        self.session.current_time = sanitize_seconds(self.player.current_time());
        self.session.duration = sanitize_seconds(self.player.duration());
        self.session.is_playing = !self.player.is_paused();
    }

    pub fn toggle_play_pause(&mut self) {
        if !self.accepts_input() {
            return;
        }

        if self.player.is_paused() {
            self.player.play();
        } else {
            self.player.pause();
        }
    }

    pub fn toggle_mute(&mut self) -> bool {
        if !self.accepts_input() {
            return self.session.is_muted;
        }

        self.session.is_muted = !self.session.is_muted;
        self.player.set_muted(self.session.is_muted);
        self.session.is_muted
    }

    /// Seeks to the time under a click at `offset_x` pixels into a bar `width` wide.
    pub fn seek(&mut self, offset_x: f64, width: f64) -> Option<f64> {
        if !self.accepts_input() {
            return None;
        }

        let duration = sanitize_seconds(self.player.duration());
        let fraction = seek_fraction(offset_x, width)?;
        if duration <= 0.0 {
            return None;
        }

        let target = fraction * duration;
        self.player.seek_to(target);
        self.session.current_time = target;
        self.session.duration = duration;
        Some(target)
    }

    pub fn apply_state(&mut self, state: PlayerState) -> ProgressTimer {
        if self.failed {
            return ProgressTimer::Stop;
        }
        if !self.ready {
            return ProgressTimer::Keep;
        }

        self.sync();
        match state {
            PlayerState::Playing => {
                self.session.is_playing = true;
                ProgressTimer::Start
            }
            PlayerState::Paused => {
                self.session.is_playing = false;
                ProgressTimer::Stop
            }
            PlayerState::Ended => {
                self.session.is_playing = false;
                ProgressTimer::Stop
            }
            PlayerState::Unstarted | PlayerState::Buffering | PlayerState::Cued => ProgressTimer::Keep,
        }
    }

    /// Rewinds the displayed progress to `0:00`. Native media does this when
    /// playback ends; the embedded player keeps its final position.
    pub fn reset_progress(&mut self) {
        self.session.current_time = 0.0;
    }

    pub fn fail(&mut self) {
        self.failed = true;
        self.session.is_playing = false;
    }

    pub fn progress_percent(&self) -> f64 {
        progress_percent(self.session.current_time, self.session.duration)
    }

    pub fn time_label(&self) -> String {
        time_label(self.session.current_time, self.session.duration)
    }
}

fn sanitize_seconds(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

pub fn format_time(seconds: f64) -> String {
    let total = sanitize_seconds(seconds).floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

pub fn time_label(current: f64, duration: f64) -> String {
    format!("{} / {}", format_time(current), format_time(duration))
}

pub fn progress_percent(current: f64, duration: f64) -> f64 {
    let duration = sanitize_seconds(duration);
    if duration <= 0.0 {
        return 0.0;
    }

    (sanitize_seconds(current) / duration * 100.0).clamp(0.0, 100.0)
}

pub fn seek_fraction(offset_x: f64, width: f64) -> Option<f64> {
    if !(width.is_finite() && width > 0.0) || !offset_x.is_finite() {
        return None;
    }

    Some((offset_x / width).clamp(0.0, 1.0))
}

pub fn play_icon(is_playing: bool) -> &'static str {
    if is_playing {
        "fas fa-pause"
    } else {
        "fas fa-play"
    }
}

pub fn mute_icon(is_muted: bool) -> &'static str {
    if is_muted {
        "fas fa-volume-mute"
    } else {
        "fas fa-volume-up"
    }
}

pub fn fullscreen_icon(is_fullscreen: bool) -> &'static str {
    if is_fullscreen {
        "fas fa-compress"
    } else {
        "fas fa-expand"
    }
}

pub fn first_supported<'a>(candidates: &[&'a str], mut attempt: impl FnMut(&str) -> bool) -> Option<&'a str> {
    candidates.iter().copied().find(|candidate| attempt(candidate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    #[derive(Default)]
    struct FakePlayer {
        paused: Cell<bool>,
        muted: Cell<bool>,
        time: Cell<f64>,
        length: Cell<f64>,
        calls: RefCell<Vec<String>>,
    }

    impl FakePlayer {
        fn with_duration(duration: f64) -> Self {
            let player = Self::default();
            player.paused.set(true);
            player.length.set(duration);
            player
        }
    }

    impl Player for FakePlayer {
        fn is_paused(&self) -> bool {
            self.paused.get()
        }

        fn play(&self) {
            self.paused.set(false);
            self.calls.borrow_mut().push("play".to_string());
        }

        fn pause(&self) {
            self.paused.set(true);
            self.calls.borrow_mut().push("pause".to_string());
        }

        fn set_muted(&self, muted: bool) {
            self.muted.set(muted);
        }

        fn seek_to(&self, seconds: f64) {
            self.time.set(seconds);
            self.calls.borrow_mut().push(format!("seek:{seconds}"));
        }

        fn current_time(&self) -> f64 {
            self.time.get()
        }

        fn duration(&self) -> f64 {
            self.length.get()
        }
    }

    #[test]
    fn formats_minutes_and_padded_seconds() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(9.9), "0:09");
        assert_eq!(format_time(65.0), "1:05");
        assert_eq!(format_time(3_600.0), "60:00");
        assert_eq!(format_time(f64::NAN), "0:00");
        assert_eq!(time_label(61.0, 200.0), "1:01 / 3:20");
    }

    #[test]
    fn midpoint_click_seeks_to_half_duration() {
        let mut controls = MediaControls::new(FakePlayer::with_duration(240.0));

        let target = controls.seek(150.0, 300.0).expect("seek should land");

        assert!((target - 120.0).abs() < 1e-9);
        assert_eq!(controls.player().current_time(), target);
    }

    #[test]
    fn seek_is_ignored_without_duration_or_width() {
        let mut controls = MediaControls::new(FakePlayer::with_duration(0.0));
        assert_eq!(controls.seek(10.0, 100.0), None);

        let mut controls = MediaControls::new(FakePlayer::with_duration(100.0));
        assert_eq!(controls.seek(10.0, 0.0), None);
        assert!(controls.player().calls.borrow().is_empty());
    }

    #[test]
    fn toggle_reads_live_paused_state_instead_of_cache() {
        let mut controls = MediaControls::new(FakePlayer::with_duration(100.0));
        controls.apply_state(PlayerState::Playing);
        controls.player().paused.set(true);

        controls.toggle_play_pause();

        assert_eq!(controls.player().calls.borrow().as_slice(), ["play"]);
    }

    #[test]
    fn mute_toggles_back_and_forth() {
        let mut controls = MediaControls::new(FakePlayer::with_duration(100.0));

        assert!(controls.toggle_mute());
        assert!(controls.player().muted.get());
        assert!(!controls.toggle_mute());
        assert!(!controls.player().muted.get());
    }

    #[test]
    fn timer_and_time_update_paths_agree() {
        let mut from_timer = MediaControls::new(FakePlayer::with_duration(180.0));
        let mut from_event = MediaControls::new(FakePlayer::with_duration(180.0));
        from_timer.player().time.set(75.4);
        from_event.player().time.set(75.4);

        from_timer.apply_state(PlayerState::Playing);
        from_event.sync();

        assert_eq!(from_timer.time_label(), from_event.time_label());
        assert_eq!(from_timer.progress_percent(), from_event.progress_percent());
        assert_eq!(from_timer.time_label(), "1:15 / 3:00");
    }

    #[test]
    fn state_changes_drive_the_progress_timer() {
        let mut controls = MediaControls::new(FakePlayer::with_duration(100.0));

        assert_eq!(controls.apply_state(PlayerState::Playing), ProgressTimer::Start);
        assert!(controls.session().is_playing);
        assert_eq!(controls.apply_state(PlayerState::Buffering), ProgressTimer::Keep);
        assert_eq!(controls.apply_state(PlayerState::Paused), ProgressTimer::Stop);
        assert_eq!(controls.apply_state(PlayerState::Ended), ProgressTimer::Stop);
    }

    #[test]
    fn ended_keeps_final_position_until_rewound() {
        let mut controls = MediaControls::new(FakePlayer::with_duration(180.0));
        controls.player().time.set(180.0);

        controls.apply_state(PlayerState::Ended);
        assert_eq!(controls.time_label(), "3:00 / 3:00");
        assert_eq!(controls.progress_percent(), 100.0);

        controls.reset_progress();
        assert_eq!(controls.time_label(), "0:00 / 3:00");
        assert_eq!(controls.progress_percent(), 0.0);
    }

    #[test]
    fn controls_ignore_input_until_player_is_ready() {
        let mut controls = MediaControls::awaiting_ready(FakePlayer::with_duration(120.0));
        controls.player().time.set(30.0);

        controls.toggle_play_pause();
        assert!(!controls.toggle_mute());
        assert_eq!(controls.seek(50.0, 100.0), None);
        assert_eq!(controls.apply_state(PlayerState::Playing), ProgressTimer::Keep);
        controls.sync();
        assert!(controls.player().calls.borrow().is_empty());
        assert!(!controls.player().muted.get());
        assert_eq!(controls.time_label(), "0:00 / 0:00");

        controls.mark_ready();
        assert!(controls.is_ready());
        assert_eq!(controls.time_label(), "0:30 / 2:00");
        controls.toggle_play_pause();
        assert_eq!(controls.player().calls.borrow().as_slice(), ["play"]);
    }

    #[test]
    fn failure_is_terminal() {
        let mut controls = MediaControls::new(FakePlayer::with_duration(100.0));
        controls.fail();

        controls.toggle_play_pause();
        assert_eq!(controls.seek(50.0, 100.0), None);
        assert_eq!(controls.apply_state(PlayerState::Playing), ProgressTimer::Stop);
        assert!(controls.player().calls.borrow().is_empty());
        assert!(controls.is_failed());
    }

    #[test]
    fn state_codes_map_to_player_states() {
        assert_eq!(PlayerState::from_code(1), Some(PlayerState::Playing));
        assert_eq!(PlayerState::from_code(-1), Some(PlayerState::Unstarted));
        assert_eq!(PlayerState::from_code(4), None);
    }

    #[test]
    fn fullscreen_fallbacks_are_tried_in_order() {
        let mut tried = Vec::new();

        let chosen = first_supported(&REQUEST_FULLSCREEN, |name| {
            tried.push(name.to_string());
            name.starts_with("webkit")
        });

        assert_eq!(chosen, Some("webkitRequestFullscreen"));
        assert_eq!(tried, ["requestFullscreen", "webkitRequestFullscreen"]);
        assert_eq!(first_supported(&EXIT_FULLSCREEN, |_| false), None);
    }

    #[test]
    fn progress_is_clamped_to_percent_range() {
        assert_eq!(progress_percent(50.0, 200.0), 25.0);
        assert_eq!(progress_percent(500.0, 200.0), 100.0);
        assert_eq!(progress_percent(10.0, 0.0), 0.0);
    }
}
