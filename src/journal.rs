//! Transition journal: one JSON object per line.
//!
//! ```text
//! {"seq":0,"event":"spawned","kind":"t","next":"o"}
//! {"seq":7,"event":"merged","kind":"t","y":18,"height":2}
//! {"seq":8,"event":"rows_cleared","rows":[19]}
//! {"seq":9,"event":"dropped","count":3}
//! ```
//!
//! A `dropped` record marks transitions the session discarded before they
//! could be drained.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::{GameSession, Transition};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JournalRecord<'a> {
    pub seq: u64,
    pub event: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<i8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<&'a [u8]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

impl<'a> JournalRecord<'a> {
    pub fn new(seq: u64, transition: &'a Transition) -> Self {
        let mut rec = Self {
            seq,
            event: transition.as_str(),
            kind: None,
            next: None,
            y: None,
            height: None,
            rows: None,
            count: None,
        };
        match transition {
            Transition::Spawned { kind, next } => {
                rec.kind = Some(kind.as_str());
                rec.next = Some(next.as_str());
            }
            Transition::Merged { kind, y, height } => {
                rec.kind = Some(kind.as_str());
                rec.y = Some(*y);
                rec.height = Some(*height);
            }
            Transition::RowsCleared(rows) => rec.rows = Some(rows.as_slice()),
            Transition::Moved | Transition::GameOver => {}
        }
        rec
    }

    pub fn dropped(seq: u64, count: u32) -> Self {
        Self {
            seq,
            event: "dropped",
            kind: None,
            next: None,
            y: None,
            height: None,
            rows: None,
            count: Some(count),
        }
    }
}

pub struct Journal<W: Write> {
    out: W,
    seq: u64,
    buf: Vec<u8>,
    seen_dropped: u32,
}

impl Journal<BufWriter<File>> {
    /// Append to `path`, creating it if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("open event log {}", path.display()))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> Journal<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            seq: 0,
            buf: Vec::with_capacity(256),
            seen_dropped: 0,
        }
    }

    pub fn record(&mut self, transition: &Transition) -> Result<()> {
        self.write_record(&JournalRecord::new(self.seq, transition))
    }

    /// Drain `session` into the journal, then note any transitions it
    /// discarded since the last call.
    pub fn record_session(&mut self, session: &mut GameSession) -> Result<()> {
        for transition in session.drain_transitions() {
            self.record(&transition)?;
        }
        let dropped = session.dropped_transitions();
        let lost = dropped.wrapping_sub(self.seen_dropped);
        if lost > 0 {
            self.write_record(&JournalRecord::dropped(self.seq, lost))?;
            self.seen_dropped = dropped;
        }
        Ok(())
    }

    fn write_record(&mut self, rec: &JournalRecord<'_>) -> Result<()> {
        self.buf.clear();
        serde_json::to_writer(&mut self.buf, rec).context("encode journal record")?;
        self.buf.push(b'\n');
        self.out.write_all(&self.buf).context("write journal record")?;
        self.seq += 1;
        Ok(())
    }

    /// Records written so far.
    pub fn len(&self) -> u64 {
        self.seq
    }

    pub fn is_empty(&self) -> bool {
        self.seq == 0
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush().context("flush journal")
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
