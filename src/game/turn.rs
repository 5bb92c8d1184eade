//! A single player's turn in progress, and the review that follows it
//!
//! Turn progress is deliberately kept out of the [`Snapshot`](super::Snapshot):
//! only the outcome is committed, through
//! [`Snapshot::finish_turn`](super::Snapshot::finish_turn).

use super::timer::{TimerEvent, TurnTimer};
use super::ReviewData;
use std::time::Duration;

/// Seconds counted down before the turn timer starts.
pub const COUNTDOWN_SECONDS: u32 = 3;

const ONE_SECOND: Duration = Duration::from_secs(1);

/// Where the turn stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnStage {
    /// Waiting for the player to start.
    Ready,
    /// Counting down to the start; holds seconds left.
    Countdown(u32),
    Running,
    Finished,
}

/// What the turn produced, handed to the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    /// Words cleared during the turn, in order.
    pub words: Vec<String>,
    /// The word on screen when time ran out.
    pub last_word: Option<String>,
    /// Seconds left when the pool ran out before the timer.
    pub remaining_time: Option<u32>,
}

/// Notifications from the turn, used to drive cues and the transition to review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnSignal {
    Started,
    Tick { remaining: u32 },
    Correct,
    Paused,
    Resumed,
    TimeUp,
    Finished(TurnOutcome),
}

#[derive(Debug, Clone)]
pub struct TurnSession {
    words: Vec<String>,
    index: usize,
    guessed: Vec<String>,
    timer: TurnTimer,
    stage: TurnStage,
    countdown_carry: Duration,
    showing_definition: bool,
    paused_by_lookup: bool,
}

impl TurnSession {
    /// A turn over `words` (the remaining pool, already shuffled) lasting `duration` seconds.
    pub fn new(words: Vec<String>, duration: u32) -> Self {
        Self {
            words,
            index: 0,
            guessed: Vec::new(),
            timer: TurnTimer::new(duration),
            stage: TurnStage::Ready,
            countdown_carry: Duration::ZERO,
            showing_definition: false,
            paused_by_lookup: false,
        }
    }

    /// Kick off the pre-turn countdown.
    pub fn begin_countdown(&mut self) -> bool {
        if self.stage != TurnStage::Ready {
            return false;
        }
        self.stage = TurnStage::Countdown(COUNTDOWN_SECONDS);
        true
    }

    /// Feed elapsed wall time to the countdown and timer.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<TurnSignal> {
        let mut signals = Vec::new();
        let mut elapsed = elapsed;

        if let TurnStage::Countdown(mut left) = self.stage {
            self.countdown_carry += elapsed;
            elapsed = Duration::ZERO;
            while left > 0 && self.countdown_carry >= ONE_SECOND {
                self.countdown_carry -= ONE_SECOND;
                left -= 1;
            }
            if left > 0 {
                self.stage = TurnStage::Countdown(left);
                return signals;
            }

            // Leftover time after the countdown counts toward the turn.
            elapsed = std::mem::take(&mut self.countdown_carry);
            self.stage = TurnStage::Running;
            signals.push(TurnSignal::Started);
            if let Some(TimerEvent::Expired) = self.timer.start() {
                self.expire(&mut signals);
                return signals;
            }
        }

        if self.stage == TurnStage::Running {
            for event in self.timer.advance(elapsed) {
                match event {
                    TimerEvent::Tick { remaining } => {
                        signals.push(TurnSignal::Tick { remaining })
                    }
                    TimerEvent::Expired => self.expire(&mut signals),
                }
            }
        }

        signals
    }

    /// The current word was explained. Ends the turn early if it was the last one.
    pub fn mark_guessed(&mut self) -> Vec<TurnSignal> {
        let mut signals = Vec::new();
        if self.stage != TurnStage::Running || !self.timer.is_running() {
            return signals;
        }
        let Some(word) = self.words.get(self.index).cloned() else {
            return signals;
        };

        self.guessed.push(word);
        self.index += 1;
        signals.push(TurnSignal::Correct);

        if self.index >= self.words.len() {
            self.timer.stop();
            self.stage = TurnStage::Finished;
            signals.push(TurnSignal::Finished(TurnOutcome {
                words: self.guessed.clone(),
                last_word: None,
                remaining_time: Some(self.timer.remaining()),
            }));
        }
        signals
    }

    /// Pause or resume a running turn.
    pub fn toggle_pause(&mut self) -> Option<TurnSignal> {
        if self.stage != TurnStage::Running {
            return None;
        }
        if self.timer.pause() {
            Some(TurnSignal::Paused)
        } else if self.timer.resume() {
            self.paused_by_lookup = false;
            Some(TurnSignal::Resumed)
        } else {
            None
        }
    }

    /// Show the definition panel, pausing the timer if it was running.
    pub fn show_definition(&mut self) -> Option<TurnSignal> {
        if self.stage != TurnStage::Running || self.showing_definition {
            return None;
        }
        self.showing_definition = true;
        self.paused_by_lookup = self.timer.pause();
        self.paused_by_lookup.then_some(TurnSignal::Paused)
    }

    /// Hide the definition panel, resuming only if opening it paused the timer.
    pub fn hide_definition(&mut self) -> Option<TurnSignal> {
        if !self.showing_definition {
            return None;
        }
        self.showing_definition = false;
        let resumed = std::mem::take(&mut self.paused_by_lookup) && self.timer.resume();
        resumed.then_some(TurnSignal::Resumed)
    }

    fn expire(&mut self, signals: &mut Vec<TurnSignal>) {
        self.stage = TurnStage::Finished;
        self.showing_definition = false;
        signals.push(TurnSignal::TimeUp);
        signals.push(TurnSignal::Finished(TurnOutcome {
            words: self.guessed.clone(),
            last_word: self.current_word().map(str::to_string),
            remaining_time: None,
        }));
    }

    pub fn current_word(&self) -> Option<&str> {
        self.words.get(self.index).map(String::as_str)
    }

    pub fn guessed(&self) -> &[String] {
        &self.guessed
    }

    pub fn words_left(&self) -> usize {
        self.words.len().saturating_sub(self.index)
    }

    pub fn stage(&self) -> TurnStage {
        self.stage
    }

    pub fn timer(&self) -> &TurnTimer {
        &self.timer
    }

    pub fn is_paused(&self) -> bool {
        self.timer.is_paused()
    }

    pub fn is_showing_definition(&self) -> bool {
        self.showing_definition
    }
}

/// Editable copy of a turn's words before they are committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewDraft {
    entries: Vec<(String, bool)>,
    last_word: Option<String>,
    last_word_added: bool,
}

impl ReviewDraft {
    /// All guessed words start confirmed; the buzzer word starts excluded.
    pub fn new(data: &ReviewData) -> Self {
        Self {
            entries: data.words.iter().map(|w| (w.clone(), true)).collect(),
            last_word: data.last_word.clone(),
            last_word_added: false,
        }
    }

    pub fn toggle(&mut self, index: usize) {
        if let Some((_, confirmed)) = self.entries.get_mut(index) {
            *confirmed = !*confirmed;
        }
    }

    /// The word in progress when time ran out was guessed in time after all.
    pub fn toggle_last_word(&mut self) {
        if self.last_word.is_some() {
            self.last_word_added = !self.last_word_added;
        }
    }

    pub fn entries(&self) -> &[(String, bool)] {
        &self.entries
    }

    pub fn last_word(&self) -> Option<&str> {
        self.last_word.as_deref()
    }

    pub fn is_last_word_added(&self) -> bool {
        self.last_word_added
    }

    /// Confirmed words in their original order, then the buzzer word if added.
    pub fn final_words(&self) -> Vec<String> {
        let mut words: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, confirmed)| *confirmed)
            .map(|(w, _)| w.clone())
            .collect();
        if self.last_word_added {
            if let Some(last) = &self.last_word {
                words.push(last.clone());
            }
        }
        words
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    fn running(list: &[&str], duration: u32) -> TurnSession {
        let mut turn = TurnSession::new(words(list), duration);
        turn.begin_countdown();
        let signals = turn.advance(Duration::from_secs(u64::from(COUNTDOWN_SECONDS)));
        assert_eq!(signals, vec![TurnSignal::Started]);
        turn
    }

    fn finished(signals: &[TurnSignal]) -> Option<&TurnOutcome> {
        signals.iter().find_map(|s| match s {
            TurnSignal::Finished(outcome) => Some(outcome),
            _ => None,
        })
    }

    #[test]
    fn test_ready_turn_ignores_input() {
        let mut turn = TurnSession::new(words(&["apple"]), 30);
        assert!(turn.mark_guessed().is_empty());
        assert!(turn.advance(Duration::from_secs(10)).is_empty());
        assert_eq!(turn.stage(), TurnStage::Ready);
    }

    #[test]
    fn test_countdown_then_running() {
        let mut turn = TurnSession::new(words(&["apple"]), 30);
        assert!(turn.begin_countdown());
        assert!(!turn.begin_countdown());
        turn.advance(Duration::from_secs(1));
        assert_eq!(turn.stage(), TurnStage::Countdown(2));
        let signals = turn.advance(Duration::from_millis(2500));
        assert_eq!(signals, vec![TurnSignal::Started]);
        assert_eq!(turn.stage(), TurnStage::Running);
        // The extra 500ms was carried into the turn
        assert_eq!(
            turn.advance(Duration::from_millis(500)),
            vec![TurnSignal::Tick { remaining: 29 }]
        );
    }

    #[test]
    fn test_exhausting_pool_reports_remaining_time() {
        let mut turn = running(&["apple", "river"], 30);
        turn.advance(Duration::from_secs(18));
        assert_eq!(turn.mark_guessed(), vec![TurnSignal::Correct]);
        let signals = turn.mark_guessed();
        let outcome = finished(&signals).unwrap();
        assert_eq!(outcome.words, words(&["apple", "river"]));
        assert_eq!(outcome.last_word, None);
        assert_eq!(outcome.remaining_time, Some(12));
        assert_eq!(turn.stage(), TurnStage::Finished);
    }

    #[test]
    fn test_timeout_reports_word_in_progress() {
        let mut turn = running(&["apple", "river", "cloud"], 5);
        turn.mark_guessed();
        let signals = turn.advance(Duration::from_secs(5));
        assert!(signals.contains(&TurnSignal::TimeUp));
        let outcome = finished(&signals).unwrap();
        assert_eq!(outcome.words, words(&["apple"]));
        assert_eq!(outcome.last_word.as_deref(), Some("river"));
        assert_eq!(outcome.remaining_time, None);
    }

    #[test]
    fn test_paused_turn_blocks_guessing_and_keeps_words() {
        let mut turn = running(&["apple", "river"], 30);
        turn.mark_guessed();
        assert_eq!(turn.toggle_pause(), Some(TurnSignal::Paused));
        assert!(turn.mark_guessed().is_empty());
        assert!(turn.advance(Duration::from_secs(60)).is_empty());
        assert_eq!(turn.guessed(), &words(&["apple"])[..]);
        assert_eq!(turn.toggle_pause(), Some(TurnSignal::Resumed));
        assert_eq!(turn.timer().remaining(), 30);
    }

    #[test]
    fn test_definition_pauses_and_resumes() {
        let mut turn = running(&["compass"], 30);
        assert_eq!(turn.show_definition(), Some(TurnSignal::Paused));
        assert!(turn.is_paused());
        assert_eq!(turn.hide_definition(), Some(TurnSignal::Resumed));
        assert!(!turn.is_paused());
    }

    #[test]
    fn test_definition_keeps_manual_pause() {
        let mut turn = running(&["compass"], 30);
        turn.toggle_pause();
        assert_eq!(turn.show_definition(), None);
        assert_eq!(turn.hide_definition(), None);
        assert!(turn.is_paused());
    }

    #[test]
    fn test_tick_signals_count_down() {
        let mut turn = running(&["apple"], 3);
        let signals = turn.advance(Duration::from_secs(2));
        assert_eq!(
            signals,
            vec![
                TurnSignal::Tick { remaining: 2 },
                TurnSignal::Tick { remaining: 1 }
            ]
        );
    }

    #[test]
    fn test_review_draft_defaults() {
        let draft = ReviewDraft::new(&ReviewData {
            words: words(&["apple", "river"]),
            last_word: Some("cloud".into()),
        });
        assert_eq!(draft.final_words(), words(&["apple", "river"]));
        assert!(!draft.is_last_word_added());
    }

    #[test]
    fn test_review_draft_toggles() {
        let mut draft = ReviewDraft::new(&ReviewData {
            words: words(&["apple", "river"]),
            last_word: Some("cloud".into()),
        });
        draft.toggle(0);
        draft.toggle_last_word();
        assert_eq!(draft.final_words(), words(&["river", "cloud"]));
        draft.toggle(0);
        draft.toggle(9);
        assert_eq!(draft.final_words(), words(&["apple", "river", "cloud"]));
    }

    #[test]
    fn test_review_last_word_toggle_without_last_word() {
        let mut draft = ReviewDraft::new(&ReviewData {
            words: words(&["apple"]),
            last_word: None,
        });
        draft.toggle_last_word();
        assert!(!draft.is_last_word_added());
        assert_eq!(draft.final_words(), words(&["apple"]));
    }
}
