use crate::content::BadgeText;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypingTimings {
    pub speed_ms: u32,
    pub pause_ms: u32,
    pub restart_ms: u32,
}

impl TypingTimings {
    pub fn tick_ms(&self) -> u32 {
        (self.speed_ms / 2).max(1)
    }

    fn erase_ms(&self) -> u32 {
        (self.speed_ms / 2).max(1)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypingPhase {
    Growing,
    Pausing,
    Shrinking,
    Restarting,
}

#[derive(Clone, Debug)]
pub struct TypingEffect {
    texts: Vec<Vec<char>>,
    text_index: usize,
    shown: usize,
    phase: TypingPhase,
    clock_ms: u64,
    next_due_ms: u64,
    timings: TypingTimings,
}

impl TypingEffect {
    /// Returns `None` for an empty rotation; callers treat that as nothing to animate.
    pub fn new(texts: &[String], timings: TypingTimings) -> Option<Self> {
        if texts.is_empty() {
            return None;
        }

        Some(Self {
            texts: texts.iter().map(|text| text.chars().collect()).collect(),
            text_index: 0,
            shown: 0,
            phase: TypingPhase::Growing,
            clock_ms: 0,
            next_due_ms: 0,
            timings,
        })
    }

    pub fn phase(&self) -> TypingPhase {
        self.phase
    }

    pub fn text_index(&self) -> usize {
        self.text_index
    }

    pub fn displayed(&self) -> String {
        self.texts[self.text_index].iter().take(self.shown).collect()
    }

    pub fn advance(&mut self, elapsed_ms: u32) -> bool {
        self.clock_ms += u64::from(elapsed_ms);
        let before = (self.text_index, self.shown);

        while self.next_due_ms <= self.clock_ms {
            let delay = self.step();
            self.next_due_ms += u64::from(delay);
        }

        before != (self.text_index, self.shown)
    }

    fn step(&mut self) -> u32 {
        match self.phase {
            TypingPhase::Growing => self.grow(),
            TypingPhase::Pausing | TypingPhase::Shrinking => {
                self.phase = TypingPhase::Shrinking;
                self.shrink()
            }
            TypingPhase::Restarting => {
                self.phase = TypingPhase::Growing;
                self.grow()
            }
        }
    }

    fn grow(&mut self) -> u32 {
        let full = self.texts[self.text_index].len();
        if self.shown < full {
            self.shown += 1;
        }

        if self.shown >= full {
            self.phase = TypingPhase::Pausing;
            self.timings.pause_ms.max(1)
        } else {
            self.timings.speed_ms.max(1)
        }
    }

    fn shrink(&mut self) -> u32 {
        self.shown = self.shown.saturating_sub(1);

        if self.shown == 0 {
            self.phase = TypingPhase::Restarting;
            self.text_index = (self.text_index + 1) % self.texts.len();
            self.timings.restart_ms.max(1)
        } else {
            self.timings.erase_ms()
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BadgePhase {
    Displaying,
    FadingOut,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BadgeView {
    pub text: String,
    pub border_color: Option<String>,
    pub dot_color: Option<String>,
    pub visible: bool,
}

/// Swaps the badge text and accent colour on a fixed cadence with a fade between.
#[derive(Clone, Debug)]
pub struct BadgeRotation {
    entries: Vec<BadgeText>,
    index: usize,
    phase: BadgePhase,
    view: BadgeView,
    interval_ms: u32,
    fade_ms: u32,
    clock_ms: u64,
    next_due_ms: u64,
}

impl BadgeRotation {
    pub fn new(entries: &[BadgeText], interval_ms: u32, fade_ms: u32) -> Option<Self> {
        let first = entries.first()?;
        let interval_ms = interval_ms.max(2);
        let fade_ms = fade_ms.clamp(1, interval_ms / 2);

        Some(Self {
            entries: entries.to_vec(),
            index: 0,
            phase: BadgePhase::Displaying,
            view: BadgeView {
                text: first.text.clone(),
                border_color: None,
                dot_color: None,
                visible: true,
            },
            interval_ms,
            fade_ms,
            clock_ms: 0,
            next_due_ms: 0,
        })
    }

    pub fn phase(&self) -> BadgePhase {
        self.phase
    }

    pub fn view(&self) -> &BadgeView {
        &self.view
    }

    pub fn advance(&mut self, elapsed_ms: u32) -> bool {
        self.clock_ms += u64::from(elapsed_ms);
        let before = self.view.clone();

        while self.next_due_ms <= self.clock_ms {
            let delay = self.step();
            self.next_due_ms += u64::from(delay);
        }

        before != self.view
    }

    fn step(&mut self) -> u32 {
        let current = &self.entries[self.index];

        match self.phase {
            BadgePhase::Displaying => {
                self.view.visible = false;
                self.view.border_color = Some(current.color.clone());
                self.phase = BadgePhase::FadingOut;
                self.fade_ms
            }
            BadgePhase::FadingOut => {
                self.view.text = current.text.clone();
                self.view.dot_color = Some(current.color.clone());
                self.view.visible = true;
                self.index = (self.index + 1) % self.entries.len();
                self.phase = BadgePhase::Displaying;
                self.interval_ms - self.fade_ms
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuoteCycle {
    len: usize,
    active: usize,
}

impl QuoteCycle {
    pub fn new(len: usize) -> Option<Self> {
        (len > 0).then_some(Self { len, active: 0 })
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn advance(&mut self) -> usize {
        self.active = (self.active + 1) % self.len;
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timings(speed_ms: u32) -> TypingTimings {
        TypingTimings {
            speed_ms,
            pause_ms: 2_000,
            restart_ms: 500,
        }
    }

    fn badges() -> Vec<BadgeText> {
        vec![
            BadgeText {
                text: "first".to_string(),
                color: "#10b981".to_string(),
            },
            BadgeText {
                text: "second".to_string(),
                color: "#3b82f6".to_string(),
            },
        ]
    }

    #[test]
    fn empty_rotations_are_a_no_op() {
        assert!(TypingEffect::new(&[], timings(80)).is_none());
        assert!(BadgeRotation::new(&[], 3_000, 300).is_none());
        assert!(QuoteCycle::new(0).is_none());
    }

    #[test]
    fn hello_is_fully_typed_after_five_ticks() {
        let speed = 80;
        let mut effect = TypingEffect::new(&["Hello".to_string()], timings(speed)).expect("non-empty");

        effect.advance(5 * speed);

        assert_eq!(effect.displayed(), "Hello");
        assert_ne!(effect.phase(), TypingPhase::Growing);
    }

    #[test]
    fn typing_grows_one_character_per_tick() {
        let mut effect = TypingEffect::new(&["Hey".to_string()], timings(100)).expect("non-empty");

        assert!(effect.advance(0));
        assert_eq!(effect.displayed(), "H");
        assert!(!effect.advance(50));
        assert!(effect.advance(50));
        assert_eq!(effect.displayed(), "He");
    }

    #[test]
    fn erasing_runs_at_double_speed_then_moves_to_next_text() {
        let texts = vec!["ab".to_string(), "xyz".to_string()];
        let mut effect = TypingEffect::new(&texts, timings(100)).expect("non-empty");

        effect.advance(100);
        assert_eq!(effect.displayed(), "ab");
        assert_eq!(effect.phase(), TypingPhase::Pausing);

        effect.advance(1_999);
        assert_eq!(effect.displayed(), "ab");

        effect.advance(1);
        assert_eq!(effect.displayed(), "a");
        assert_eq!(effect.phase(), TypingPhase::Shrinking);

        effect.advance(50);
        assert_eq!(effect.displayed(), "");
        assert_eq!(effect.phase(), TypingPhase::Restarting);
        assert_eq!(effect.text_index(), 1);

        effect.advance(500);
        assert_eq!(effect.displayed(), "x");
        assert_eq!(effect.phase(), TypingPhase::Growing);
    }

    #[test]
    fn multibyte_text_is_typed_by_character() {
        let mut effect = TypingEffect::new(&["🚀 Go".to_string()], timings(10)).expect("non-empty");

        effect.advance(0);
        assert_eq!(effect.displayed(), "🚀");
        effect.advance(10);
        assert_eq!(effect.displayed(), "🚀 ");
    }

    #[test]
    fn empty_entries_inside_a_rotation_are_skipped_over() {
        let texts = vec![String::new(), "ok".to_string()];
        let mut effect = TypingEffect::new(&texts, timings(100)).expect("non-empty");

        effect.advance(0);
        assert_eq!(effect.phase(), TypingPhase::Pausing);
        effect.advance(2_000);
        assert_eq!(effect.text_index(), 1);
        effect.advance(500);
        assert_eq!(effect.displayed(), "o");
    }

    #[test]
    fn badge_fades_out_then_swaps_text_and_colour() {
        let mut rotation = BadgeRotation::new(&badges(), 3_000, 300).expect("non-empty");

        rotation.advance(0);
        assert!(!rotation.view().visible);
        assert_eq!(rotation.view().border_color.as_deref(), Some("#10b981"));
        assert_eq!(rotation.phase(), BadgePhase::FadingOut);

        rotation.advance(300);
        assert!(rotation.view().visible);
        assert_eq!(rotation.view().text, "first");
        assert_eq!(rotation.view().dot_color.as_deref(), Some("#10b981"));

        rotation.advance(2_700);
        assert_eq!(rotation.view().border_color.as_deref(), Some("#3b82f6"));
        rotation.advance(300);
        assert_eq!(rotation.view().text, "second");
    }

    #[test]
    fn badge_wraps_around_after_last_entry() {
        let mut rotation = BadgeRotation::new(&badges(), 3_000, 300).expect("non-empty");

        rotation.advance(6_300);

        assert_eq!(rotation.view().text, "first");
        assert_eq!(rotation.phase(), BadgePhase::Displaying);
    }

    #[test]
    fn quote_cycle_wraps() {
        let mut cycle = QuoteCycle::new(3).expect("non-empty");

        assert_eq!(cycle.active(), 0);
        assert_eq!(cycle.advance(), 1);
        assert_eq!(cycle.advance(), 2);
        assert_eq!(cycle.advance(), 0);
    }
}
