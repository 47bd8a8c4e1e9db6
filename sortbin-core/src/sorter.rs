//! Control-loop context
//!
//! [`Sorter`] owns every piece of mutable selector state: the line buffer,
//! the return timer and the last commanded position. One control cycle is:
//!
//! 1. drain received bytes, dispatching each completed line
//!    ([`Sorter::service_rx`]), and
//! 2. check the dwell and return to neutral when due ([`Sorter::poll`]).
//!
//! Every completed line produces exactly one [`Reply::Ack`], whether or not
//! it was recognized. `service_rx` stops after each completed line so the
//! caller can put the acknowledgment on the wire before the next line is
//! looked at.

use sortbin_protocol::{Command, Line, LineReceiver, Material, Reply};

use crate::config::{ConfigError, Position, SorterConfig};
use crate::rx::RxConsumer;
use crate::state::ReturnTimer;
use crate::traits::{Actuator, Clock};

/// Destination for outbound protocol lines
pub trait ReplySink {
    /// Queue or transmit one reply
    fn send(&mut self, reply: Reply);
}

impl<T: ReplySink + ?Sized> ReplySink for &mut T {
    fn send(&mut self, reply: Reply) {
        (**self).send(reply);
    }
}

/// Result of dispatching one line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// Recognized command; actuator commanded to `position`
    Moved {
        material: Material,
        position: Position,
    },
    /// Unrecognized (or overlong) line; no actuation
    Ignored { truncated: bool },
}

/// Running counters, for diagnostics only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SorterStats {
    /// Lines completed (equals acknowledgments sent)
    pub lines: u32,
    /// Lines that moved the actuator
    pub moves: u32,
    /// Lines ignored
    pub ignored: u32,
    /// Ignored lines that exceeded the line buffer
    pub truncated: u32,
    /// Automatic returns to neutral
    pub returns: u32,
}

/// The selector's control-loop context
pub struct Sorter<A: Actuator> {
    config: SorterConfig,
    actuator: A,
    receiver: LineReceiver,
    timer: ReturnTimer,
    position: Position,
    stats: SorterStats,
}

impl<A: Actuator> Sorter<A> {
    /// Create a selector context
    ///
    /// The actuator is not touched until [`Sorter::start`].
    pub fn new(config: SorterConfig, actuator: A) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            config,
            actuator,
            receiver: LineReceiver::new(),
            timer: ReturnTimer::new(config.dwell_ms),
            position: config.neutral(),
            stats: SorterStats::default(),
        })
    }

    /// Park at neutral and announce readiness
    pub fn start(&mut self, out: &mut impl ReplySink) {
        let neutral = self.config.neutral();
        self.actuator.move_to(neutral);
        self.position = neutral;
        self.timer.disarm();
        out.send(Reply::Ready {
            neutral: neutral.degrees(),
        });
    }

    /// Dispatch one completed line and acknowledge it
    pub fn dispatch(&mut self, line: &Line, now_ms: u64, out: &mut impl ReplySink) -> Outcome {
        self.stats.lines = self.stats.lines.wrapping_add(1);

        let outcome = match line.command() {
            Command::Sort(material) => {
                let position = self.config.position_for(material);
                self.move_to(position, now_ms);
                self.stats.moves = self.stats.moves.wrapping_add(1);
                Outcome::Moved { material, position }
            }
            Command::Unrecognized => {
                let truncated = line.is_truncated();
                self.stats.ignored = self.stats.ignored.wrapping_add(1);
                if truncated {
                    self.stats.truncated = self.stats.truncated.wrapping_add(1);
                }
                Outcome::Ignored { truncated }
            }
        };

        out.send(Reply::Ack);
        outcome
    }

    /// Feed one received byte, dispatching if it completes a line
    pub fn feed(&mut self, byte: u8, now_ms: u64, out: &mut impl ReplySink) -> Option<Outcome> {
        let line = self.receiver.feed(byte)?;
        Some(self.dispatch(&line, now_ms, out))
    }

    /// Drain queued bytes up to and including the next line terminator
    ///
    /// Returns the dispatch outcome if a line completed, or `None` once the
    /// queue is empty. Call repeatedly until `None` to drain everything.
    pub fn service_rx(
        &mut self,
        rx: &mut RxConsumer<'_>,
        now_ms: u64,
        out: &mut impl ReplySink,
    ) -> Option<Outcome> {
        while let Some(byte) = rx.dequeue() {
            if let Some(outcome) = self.feed(byte, now_ms, out) {
                return Some(outcome);
            }
        }
        None
    }

    /// Return to neutral if the dwell has elapsed
    ///
    /// Returns `true` if the actuator was moved.
    pub fn poll(&mut self, now_ms: u64, out: &mut impl ReplySink) -> bool {
        if !self.timer.poll(now_ms) {
            return false;
        }

        let neutral = self.config.neutral();
        self.actuator.move_to(neutral);
        self.position = neutral;
        self.stats.returns = self.stats.returns.wrapping_add(1);
        out.send(Reply::Returned {
            angle: neutral.degrees(),
        });
        true
    }

    /// Run one complete control cycle against a clock
    ///
    /// Drains every queued line, then polls the dwell. Returns the number of
    /// lines dispatched and whether an automatic return fired.
    pub fn cycle(
        &mut self,
        rx: &mut RxConsumer<'_>,
        clock: &impl Clock,
        out: &mut impl ReplySink,
    ) -> (u32, bool) {
        let mut lines = 0;
        while self.service_rx(rx, clock.now_ms(), out).is_some() {
            lines += 1;
        }
        let returned = self.poll(clock.now_ms(), out);
        (lines, returned)
    }

    /// Last commanded position
    pub fn position(&self) -> Position {
        self.position
    }

    /// Return timer
    pub fn timer(&self) -> &ReturnTimer {
        &self.timer
    }

    /// Active configuration
    pub fn config(&self) -> &SorterConfig {
        &self.config
    }

    /// Diagnostic counters
    pub fn stats(&self) -> SorterStats {
        self.stats
    }

    /// Bytes buffered for the current unterminated line
    pub fn pending_bytes(&self) -> usize {
        self.receiver.pending()
    }

    /// Borrow the actuator
    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    fn move_to(&mut self, position: Position, now_ms: u64) {
        self.actuator.move_to(position);
        self.position = position;

        // A pending return only exists while away from neutral
        if position == self.config.neutral() {
            self.timer.disarm();
        } else {
            self.timer.arm(now_ms);
        }
    }
}
