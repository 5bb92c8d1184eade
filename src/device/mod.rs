//! Device collaborators: audio cues and keeping the display awake
//!
//! Both are best-effort. A failure is logged and the game carries on.

use std::io::Write;
use std::process::Child;

/// Short sounds played on game events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Correct,
    Tick,
    TimerEnd,
    Pause,
    Unpause,
}

/// Seconds-left threshold at and below which every tick is audible.
pub const TICK_CUE_THRESHOLD: u32 = 3;

pub trait CuePlayer {
    fn play(&mut self, cue: Cue);
}

/// Rings the terminal bell. Cues that warn the players ring more than once.
#[derive(Debug, Default)]
pub struct TerminalBell;

impl TerminalBell {
    fn rings(cue: Cue) -> usize {
        match cue {
            Cue::Correct | Cue::Tick | Cue::Pause | Cue::Unpause => 1,
            Cue::TimerEnd => 3,
        }
    }
}

impl CuePlayer for TerminalBell {
    fn play(&mut self, cue: Cue) {
        let bells = "\x07".repeat(Self::rings(cue));
        let mut stdout = std::io::stdout();
        if let Err(e) = stdout
            .write_all(bells.as_bytes())
            .and_then(|()| stdout.flush())
        {
            tracing::warn!(?cue, error = %e, "could not play cue");
        }
    }
}

/// Silent player for `--mute`.
#[derive(Debug, Default)]
pub struct Muted;

impl CuePlayer for Muted {
    fn play(&mut self, cue: Cue) {
        tracing::trace!(?cue, "cue muted");
    }
}

/// Records cues instead of playing them.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct CueLog {
    pub played: Vec<Cue>,
}

#[cfg(test)]
impl CuePlayer for CueLog {
    fn play(&mut self, cue: Cue) {
        self.played.push(cue);
    }
}

/// Holds an idle/sleep inhibitor for as long as it lives.
///
/// On Linux this runs `systemd-inhibit` around a long `sleep`; elsewhere the
/// request only logs that it is unsupported.
#[derive(Debug, Default)]
pub struct KeepAwake {
    child: Option<Child>,
}

impl KeepAwake {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the OS to keep the display on. Re-requesting while held is a no-op,
    /// so this is safe to call whenever the terminal regains focus.
    pub fn request(&mut self) {
        if self.is_held() {
            return;
        }
        match spawn_inhibitor() {
            Ok(child) => {
                tracing::debug!(pid = child.id(), "display keep-awake acquired");
                self.child = Some(child);
            }
            Err(e) => tracing::warn!(error = %e, "display keep-awake unavailable"),
        }
    }

    pub fn release(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
            tracing::debug!("display keep-awake released");
        }
    }

    pub fn is_held(&mut self) -> bool {
        match self.child.as_mut().map(Child::try_wait) {
            Some(Ok(None)) => true,
            Some(_) => {
                self.child = None;
                false
            }
            None => false,
        }
    }
}

impl Drop for KeepAwake {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(target_os = "linux")]
fn spawn_inhibitor() -> std::io::Result<Child> {
    use std::process::{Command, Stdio};

    Command::new("systemd-inhibit")
        .args([
            "--what=idle:sleep",
            "--who=hat",
            "--why=A game is in progress",
            "sleep",
            "infinity",
        ])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
}

#[cfg(not(target_os = "linux"))]
fn spawn_inhibitor() -> std::io::Result<Child> {
    Err(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        "no keep-awake mechanism on this platform",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_end_rings_longer() {
        assert!(TerminalBell::rings(Cue::TimerEnd) > TerminalBell::rings(Cue::Tick));
    }

    #[test]
    fn test_cue_log_records_in_order() {
        let mut log = CueLog::default();
        log.play(Cue::Tick);
        log.play(Cue::TimerEnd);
        assert_eq!(log.played, vec![Cue::Tick, Cue::TimerEnd]);
    }

    #[test]
    fn test_keep_awake_release_without_request() {
        let mut keep = KeepAwake::new();
        assert!(!keep.is_held());
        keep.release();
        assert!(!keep.is_held());
    }
}
