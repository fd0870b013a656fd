//! Terminal blockfall runner.
//!
//! crossterm for input, a diffing framebuffer renderer for output, and a
//! fixed frame that feeds elapsed milliseconds to the session's gravity.

use std::io::Write;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event};

use blockfall::core::{GameSession, GameSnapshot};
use blockfall::input::{handle_event, should_quit};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::TICK_MS;
use blockfall::{advance_frame, Config, Journal};

fn main() -> Result<()> {
    let config = Config::from_env()?;
    let mut journal = match &config.event_log {
        Some(path) => Some(Journal::open(path)?),
        None => None,
    };
    eprintln!(
        "[blockfall] seed={} gravity_ms={} journal={}",
        config.seed,
        config.gravity_ms,
        config
            .event_log
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "off".to_string())
    );

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config, journal.as_mut());

    // Always try to restore terminal state.
    let restored = term.exit();
    if let Some(journal) = journal.as_mut() {
        if let Err(err) = journal.flush() {
            eprintln!("[blockfall] {err:#}");
        }
    }
    let dropped = result?;
    restored?;

    if dropped > 0 {
        eprintln!("[blockfall] {dropped} transitions were discarded before they were drained");
    }

    if let Some(journal) = &journal {
        eprintln!("[blockfall] wrote {} journal records", journal.len());
    }
    Ok(())
}

fn run<W: Write>(
    term: &mut TerminalRenderer,
    config: &Config,
    mut journal: Option<&mut Journal<W>>,
) -> Result<u32> {
    let mut session = GameSession::new(config.session_config());
    session.start();

    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let mut shown: Option<(GameSnapshot, Viewport)> = None;

    let frame = Duration::from_millis(TICK_MS as u64);
    let mut last_frame = Instant::now();
    let mut carry = Duration::ZERO;

    loop {
        // Game time.
        let now = Instant::now();
        carry += now.duration_since(last_frame);
        last_frame = now;
        let elapsed_ms = carry.as_millis().min(u32::MAX as u128) as u32;
        carry -= Duration::from_millis(elapsed_ms as u64);
        advance_frame(&mut session, elapsed_ms, journal.as_deref_mut())?;

        // Render only when something visible changed.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        session.snapshot_into(&mut snap);
        if shown != Some((snap, viewport)) {
            view.render_into(&snap, viewport, &mut fb);
            term.draw_swap(&mut fb)?;
            shown = Some((snap, viewport));
        }

        // Input with timeout until next frame.
        let timeout = frame.saturating_sub(last_frame.elapsed());
        if event::poll(timeout)? {
            let ev = event::read()?;
            match &ev {
                Event::Key(key) if should_quit(*key) => return Ok(session.dropped_transitions()),
                Event::Resize(..) => {
                    term.invalidate();
                    shown = None;
                }
                _ => {}
            }
            if let Some(action) = handle_event(&ev) {
                session.apply_action(action);
            }
        }
    }
}
