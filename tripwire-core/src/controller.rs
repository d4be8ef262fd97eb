//! Countdown controller
//!
//! Owns every collaborator of one installation and drives the cycle:
//!
//! ```text
//! Idle ─start─▶ WaitingForArm ─arm─▶ Counting ─▶ Expired  ─┐
//!                     ▲                  │                 │
//!                     │                  └──────▶ Disarmed ─┤
//!                     └─────────────── reset ──────────────┘
//! ```
//!
//! Edge waits block only while waiting for the arming trigger. During the
//! countdown the sense line is polled once per tick, so the two never
//! compete for the same line.

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use tripwire_hal::OutputPin;

use crate::config::ValidatedConfig;
use crate::countdown::{CountdownState, Digits, Tick};
use crate::segment;
use crate::state::{Event, Phase};
use crate::traits::{Edge, Line, LineWatcher, Notifier, NotifyOutcome, SegmentDisplay, WatchError};

/// Fixed tick interval
pub const TICK_MS: u32 = 1000;

/// Status LEDs
pub struct Indicators<R, A> {
    /// Lit while waiting to be armed
    pub ready: R,
    /// Lit once the wire is in, blinks with the seconds while counting
    pub armed: A,
}

impl<R: OutputPin, A: OutputPin> Indicators<R, A> {
    /// "Ready, not armed" pattern
    fn show_ready(&mut self) {
        self.ready.set_high();
        self.armed.set_low();
    }
}

/// Controller failure
///
/// Either variant aborts the current cycle; the controller is left in
/// [`Phase::WaitingForArm`] and may be run again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControllerError<E> {
    /// Display transport failed
    Display(E),
    /// Edge wait gave up
    Watch(WatchError),
}

impl<E> From<WatchError> for ControllerError<E> {
    fn from(e: WatchError) -> Self {
        ControllerError::Watch(e)
    }
}

impl<E: core::fmt::Display> core::fmt::Display for ControllerError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ControllerError::Display(e) => write!(f, "display error: {}", e),
            ControllerError::Watch(e) => write!(f, "input error: {}", e),
        }
    }
}

/// How a cycle ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleOutcome {
    /// Time ran out; the callback was attempted once
    Expired(NotifyOutcome),
    /// Sense wire opened before the callback went out
    Disarmed { seconds_remaining: u32 },
}

/// The countdown controller
pub struct Controller<D, W, R, A, N, T> {
    config: ValidatedConfig,
    display: D,
    lines: W,
    indicators: Indicators<R, A>,
    notifier: N,
    delay: T,
    phase: Phase,
    countdown: CountdownState,
}

impl<D, W, R, A, N, T> Controller<D, W, R, A, N, T>
where
    D: SegmentDisplay,
    W: LineWatcher,
    R: OutputPin,
    A: OutputPin,
    N: Notifier,
    T: DelayNs,
{
    /// Assemble a controller from an initialized display and the line bindings
    pub fn new(
        config: ValidatedConfig,
        display: D,
        lines: W,
        indicators: Indicators<R, A>,
        notifier: N,
        delay: T,
    ) -> Self {
        Self {
            config,
            display,
            lines,
            indicators,
            notifier,
            delay,
            phase: Phase::Idle,
            countdown: CountdownState::default(),
        }
    }

    /// Get current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Get countdown bookkeeping of the current cycle
    pub fn countdown(&self) -> &CountdownState {
        &self.countdown
    }

    /// Get the validated configuration
    pub fn config(&self) -> &ValidatedConfig {
        &self.config
    }

    /// Get the display driver
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Get the status LEDs
    pub fn indicators(&self) -> &Indicators<R, A> {
        &self.indicators
    }

    /// Apply display settings and show the "not armed" indicators
    pub fn start(&mut self) -> Result<(), ControllerError<D::Error>> {
        self.display
            .set_brightness(self.config.brightness)
            .map_err(ControllerError::Display)?;
        self.display
            .set_blink_rate(self.config.blink_rate)
            .map_err(ControllerError::Display)?;
        self.display.clear(true).map_err(ControllerError::Display)?;

        self.indicators.show_ready();
        self.transition(Event::Start);
        info!("countdown controller ready, {} s", self.config.duration_s);
        Ok(())
    }

    /// Block until the configured arming trigger completes
    ///
    /// On success the countdown is loaded with the configured duration.
    pub fn wait_for_arm(&mut self) -> Result<(), ControllerError<D::Error>> {
        let arm = self.config.arm;

        if arm.needs_sense() {
            if !self.lines.sense_intact() {
                debug!("waiting for sense wire");
                self.wait(Line::Sense, Edge::Falling)?;
            }
            self.indicators.armed.set_high();
        }

        if arm.needs_button() {
            debug!("waiting for button press");
            self.wait(Line::Button, Edge::Falling)?;
            self.wait(Line::Button, Edge::Rising)?;
        }

        self.indicators.ready.set_low();
        self.countdown = CountdownState::arm(self.config.duration_s);
        self.transition(Event::Armed);
        info!("armed, {} s", self.config.duration_s);
        Ok(())
    }

    /// Run one second of the countdown, without the delay
    ///
    /// The display is refreshed before the tick is committed, so a bus
    /// fault leaves the remaining time untouched and aborts the cycle.
    pub fn tick(&mut self) -> Result<Tick, ControllerError<D::Error>> {
        let sense_intact = self.lines.sense_intact();
        let mut next = self.countdown;
        let tick = next.tick(sense_intact);

        match tick {
            Tick::Display {
                digits,
                armed_led,
                expired,
            } => {
                if self.config.verbose {
                    let [a, b, c, d] = digits.as_array();
                    debug!("{}{}:{}{}", a, b, c, d);
                }
                if let Err(e) = segment::show_time(&mut self.display, digits) {
                    error!("display refresh failed, aborting cycle");
                    self.abort_cycle();
                    return Err(ControllerError::Display(e));
                }
                self.indicators.armed.set_state(armed_led);
                self.countdown = next;
                if expired {
                    self.transition(Event::TimeElapsed);
                }
            }
            Tick::Disarmed => {
                self.countdown = next;
                self.indicators.armed.set_low();
                self.transition(Event::SenseOpened);
            }
            Tick::Inactive => {}
        }

        Ok(tick)
    }

    /// Arm, count down and handle the outcome of one cycle
    pub fn run_cycle(&mut self) -> Result<CycleOutcome, ControllerError<D::Error>> {
        if self.phase == Phase::Idle {
            self.start()?;
        }
        if let Err(e) = self.wait_for_arm() {
            self.abort_cycle();
            return Err(e);
        }

        while self.phase.is_counting() {
            if let Tick::Display { .. } = self.tick()? {
                self.delay.delay_ms(TICK_MS);
            }
        }

        // The wire must still be in once the final second has passed
        if self.phase == Phase::Expired && !self.lines.sense_intact() {
            self.countdown.armed = false;
            self.countdown.expired = false;
            self.indicators.armed.set_low();
            self.transition(Event::SenseOpened);
        }

        let outcome = match self.phase {
            Phase::Expired => CycleOutcome::Expired(self.expire()?),
            _ => {
                warn!(
                    "disarmed with {} s remaining",
                    self.countdown.seconds_remaining
                );
                CycleOutcome::Disarmed {
                    seconds_remaining: self.countdown.seconds_remaining,
                }
            }
        };

        self.indicators.show_ready();
        self.transition(Event::CycleReset);
        Ok(outcome)
    }

    /// Run cycles forever
    ///
    /// Only returns on a fault.
    pub fn run(&mut self) -> Result<Infallible, ControllerError<D::Error>> {
        loop {
            self.run_cycle()?;
        }
    }

    /// Fire the callback exactly once, then show `00:00`
    ///
    /// A failed final refresh is reported after the callback went out.
    fn expire(&mut self) -> Result<NotifyOutcome, ControllerError<D::Error>> {
        self.indicators.armed.set_low();

        let outcome = self.notifier.notify(&self.config.url);
        match outcome {
            NotifyOutcome::Delivered { status } => info!("callback delivered ({})", status),
            NotifyOutcome::Rejected { status } => warn!("callback rejected ({})", status),
            NotifyOutcome::ConnectionFailed => warn!("callback connection failed"),
            NotifyOutcome::Unsupported => warn!("callback scheme not supported"),
        }

        if let Err(e) = segment::show_time(&mut self.display, Digits::from_seconds(0)) {
            error!("final refresh failed after the callback");
            self.abort_cycle();
            return Err(ControllerError::Display(e));
        }
        Ok(outcome)
    }

    fn wait(&mut self, line: Line, edge: Edge) -> Result<(), ControllerError<D::Error>> {
        let event = self.lines.wait_for_edge(line, edge, None)?;
        trace!("edge {:?} on {:?}", event.edge, event.line);
        Ok(())
    }

    /// Drop the current cycle and go back to waiting
    fn abort_cycle(&mut self) {
        self.countdown.armed = false;
        self.indicators.show_ready();
        self.transition(Event::Abort);
    }

    fn transition(&mut self, event: Event) {
        let next = self.phase.transition(event);
        if next != self.phase {
            info!("phase {:?} -> {:?}", self.phase, next);
        }
        self.phase = next;
    }
}
