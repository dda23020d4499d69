//! Trace Parsing.
//!
//! Reads the text trace format consumed by [`Replay`](super::Replay). Each
//! non-blank line holds one event; `#` starts a comment:
//!
//! ```text
//! # core kind address [outcome]
//! 0 R 0x1f40
//! 1 W 7fff0010
//! 0 B 0x400123 T
//! ```
//!
//! Addresses and program counters are hexadecimal with an optional `0x`
//! prefix. `R`/`W` are memory reads and writes, `B` is a conditional branch
//! resolved as taken (`T`) or not taken (`N`).

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::common::{AccessType, CoreId, TraceError};

/// One event of a replay trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraceEvent {
    /// A memory request at a byte address.
    Mem {
        /// Issuing core.
        core_id: CoreId,
        /// Read or write.
        kind: AccessType,
        /// Byte address.
        addr: u64,
    },
    /// A resolved conditional branch.
    Branch {
        /// Issuing core.
        core_id: CoreId,
        /// Address of the branch.
        pc: u64,
        /// Resolved direction.
        taken: bool,
    },
}

impl TraceEvent {
    /// Core that issued the event.
    pub fn core_id(&self) -> CoreId {
        match *self {
            Self::Mem { core_id, .. } | Self::Branch { core_id, .. } => core_id,
        }
    }
}

/// Parses a hexadecimal field, accepting an optional `0x`/`0X` prefix.
fn parse_hex(field: &str) -> Option<u64> {
    let digits = field
        .strip_prefix("0x")
        .or_else(|| field.strip_prefix("0X"))
        .unwrap_or(field);
    u64::from_str_radix(digits, 16).ok()
}

/// Parses a single non-empty, comment-stripped line.
fn parse_line(text: &str) -> Result<TraceEvent, String> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    let (core, kind, addr, rest) = match fields.as_slice() {
        [core, kind, addr, rest @ ..] => (*core, *kind, *addr, rest),
        _ => return Err(format!("expected `<core> <R|W|B> <addr>`, got `{text}`")),
    };

    let core_id: CoreId = core
        .parse()
        .map_err(|_| format!("invalid core id `{core}`"))?;
    let value = parse_hex(addr).ok_or_else(|| format!("invalid hex address `{addr}`"))?;

    match (kind, rest) {
        ("R" | "r", []) => Ok(TraceEvent::Mem {
            core_id,
            kind: AccessType::Read,
            addr: value,
        }),
        ("W" | "w", []) => Ok(TraceEvent::Mem {
            core_id,
            kind: AccessType::Write,
            addr: value,
        }),
        ("B" | "b", [outcome]) => {
            let taken = match *outcome {
                "T" | "t" | "1" => true,
                "N" | "n" | "0" => false,
                other => return Err(format!("invalid branch outcome `{other}`")),
            };
            Ok(TraceEvent::Branch {
                core_id,
                pc: value,
                taken,
            })
        }
        ("B" | "b", _) => Err("branch events take exactly one outcome (T|N)".to_owned()),
        ("R" | "r" | "W" | "w", _) => Err("memory events take no trailing fields".to_owned()),
        (other, _) => Err(format!("unknown event kind `{other}`")),
    }
}

/// Parses a whole trace.
///
/// # Errors
///
/// Returns [`TraceError::Parse`] for the first malformed line.
pub fn parse_trace(text: &str) -> Result<Vec<TraceEvent>, TraceError> {
    let mut events = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }
        let event = parse_line(line).map_err(|reason| TraceError::Parse {
            line: idx + 1,
            reason,
        })?;
        events.push(event);
    }
    Ok(events)
}

/// Reads and parses a trace file.
///
/// # Errors
///
/// Returns [`TraceError::Io`] if the file cannot be read and
/// [`TraceError::Parse`] for the first malformed line.
pub fn load_trace(path: impl AsRef<Path>) -> Result<Vec<TraceEvent>, TraceError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let events = parse_trace(&text)?;
    debug!(path = %path.display(), events = events.len(), "trace loaded");
    Ok(events)
}
