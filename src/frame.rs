//! One driver frame of game time.
//!
//! Elapsed time is fed to the session one gravity interval at a time and
//! drained after each slice, so a single frame never produces more
//! transitions than the session can buffer. A stalled frame (suspend, slow
//! terminal) counts as at most [`MAX_FRAME_MS`] of game time.

use std::io::Write;

use anyhow::Result;

use crate::core::GameSession;
use crate::journal::Journal;

pub const MAX_FRAME_MS: u32 = 1_000;

/// Advance `session` by `elapsed_ms`, journaling every transition.
///
/// Returns the number of gravity steps applied.
pub fn advance_frame<W: Write>(
    session: &mut GameSession,
    elapsed_ms: u32,
    mut journal: Option<&mut Journal<W>>,
) -> Result<u32> {
    let slice_ms = session.gravity().interval_ms().max(1);
    let mut remaining = elapsed_ms.min(MAX_FRAME_MS);
    let mut steps = 0;

    loop {
        let slice = remaining.min(slice_ms);
        steps += session.tick(slice);
        match journal.as_deref_mut() {
            Some(journal) => journal.record_session(session)?,
            None => session.drain_transitions().for_each(drop),
        }
        remaining -= slice;
        if remaining == 0 {
            return Ok(steps);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SessionConfig;

    fn events(journal: Journal<Vec<u8>>) -> Vec<String> {
        let text = String::from_utf8(journal.into_inner()).unwrap();
        text.lines()
            .map(|line| {
                let v: serde_json::Value = serde_json::from_str(line).unwrap();
                v["event"].as_str().unwrap().to_string()
            })
            .collect()
    }

    #[test]
    fn long_stall_loses_no_transitions() {
        let mut session = GameSession::new(SessionConfig {
            gravity_ms: 1,
            seed: 5,
        });
        session.start();
        let mut journal = Journal::new(Vec::new());

        let steps = advance_frame(&mut session, 100_000, Some(&mut journal)).unwrap();
        assert!(steps > 0 && steps <= MAX_FRAME_MS);
        assert_eq!(session.dropped_transitions(), 0);

        let events = events(journal);
        assert_eq!(events[0], "spawned");
        assert!(!events.iter().any(|e| e == "dropped"));

        // Every lock is followed by a spawn or by the end of the game.
        let count = |name: &str| events.iter().filter(|e| *e == name).count();
        assert!(count("merged") > 0);
        assert_eq!(count("spawned"), 1 + count("merged") - count("game_over"));
    }

    #[test]
    fn stall_is_clamped() {
        let mut session = GameSession::new(SessionConfig {
            gravity_ms: 100,
            seed: 9,
        });
        session.start();
        let steps = advance_frame::<Vec<u8>>(&mut session, 60_000, None).unwrap();
        assert_eq!(steps, MAX_FRAME_MS / 100);
        assert!(session.transitions().is_empty());
    }

    #[test]
    fn zero_elapsed_still_drains() {
        let mut session = GameSession::with_seed(3);
        session.start();
        let mut journal = Journal::new(Vec::new());
        assert_eq!(advance_frame(&mut session, 0, Some(&mut journal)).unwrap(), 0);
        assert_eq!(events(journal), vec!["spawned".to_string()]);
    }
}
