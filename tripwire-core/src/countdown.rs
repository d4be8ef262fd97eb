//! Countdown accounting
//!
//! Pure bookkeeping for one arm/countdown cycle. The controller feeds it
//! the sense-line level once per second and acts on the returned [`Tick`].

/// Four display digits of an `MM:SS` readout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Digits {
    pub minute_tens: u8,
    pub minute_ones: u8,
    pub second_tens: u8,
    pub second_ones: u8,
}

impl Digits {
    /// Largest value a four digit readout can show (99:59)
    pub const MAX_SECONDS: u32 = 99 * 60 + 59;

    /// Split a second count into `MM:SS` digits
    ///
    /// Values past 99:59 saturate.
    pub fn from_seconds(seconds: u32) -> Self {
        let seconds = seconds.min(Self::MAX_SECONDS);
        let minutes = seconds / 60;
        let secs = seconds % 60;
        // Every quotient below is < 10
        Self {
            minute_tens: (minutes / 10) as u8,
            minute_ones: (minutes % 10) as u8,
            second_tens: (secs / 10) as u8,
            second_ones: (secs % 10) as u8,
        }
    }

    /// Digits left to right
    pub fn as_array(&self) -> [u8; 4] {
        [
            self.minute_tens,
            self.minute_ones,
            self.second_tens,
            self.second_ones,
        ]
    }

    /// Seconds represented by the readout
    pub fn total_seconds(&self) -> u32 {
        u32::from(self.minute_tens) * 600
            + u32::from(self.minute_ones) * 60
            + u32::from(self.second_tens) * 10
            + u32::from(self.second_ones)
    }
}

/// What one tick produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tick {
    /// Show `digits`; `armed_led` follows even parity of the shown second
    Display {
        digits: Digits,
        armed_led: bool,
        expired: bool,
    },
    /// Sense line found open; the cycle is over without expiry
    Disarmed,
    /// Not armed, or already finished
    Inactive,
}

/// Per-cycle countdown state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CountdownState {
    pub seconds_remaining: u32,
    pub armed: bool,
    pub expired: bool,
}

impl CountdownState {
    /// Fresh, armed state for a cycle of `total_s` seconds
    pub fn arm(total_s: u32) -> Self {
        Self {
            seconds_remaining: total_s,
            armed: true,
            expired: false,
        }
    }

    /// Whether the cycle still counts
    pub fn is_counting(&self) -> bool {
        self.armed && !self.expired
    }

    /// Advance one second
    ///
    /// The sense check comes first: an open line disarms without touching
    /// the remaining time. A zero-length countdown expires on its first tick.
    pub fn tick(&mut self, sense_intact: bool) -> Tick {
        if !self.is_counting() {
            return Tick::Inactive;
        }
        if !sense_intact {
            self.armed = false;
            return Tick::Disarmed;
        }

        let digits = Digits::from_seconds(self.seconds_remaining);
        let armed_led = self.seconds_remaining % 2 == 0;

        self.seconds_remaining = self.seconds_remaining.saturating_sub(1);
        if self.seconds_remaining == 0 {
            self.expired = true;
        }

        Tick::Display {
            digits,
            armed_led,
            expired: self.expired,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn shown(tick: Tick) -> [u8; 4] {
        match tick {
            Tick::Display { digits, .. } => digits.as_array(),
            other => panic!("expected display tick, got {:?}", other),
        }
    }

    #[test]
    fn test_digits() {
        assert_eq!(Digits::from_seconds(65).as_array(), [0, 1, 0, 5]);
        assert_eq!(Digits::from_seconds(3600).as_array(), [6, 0, 0, 0]);
        assert_eq!(Digits::from_seconds(0).as_array(), [0, 0, 0, 0]);
        assert_eq!(Digits::from_seconds(100_000).as_array(), [9, 9, 5, 9]);
    }

    #[test]
    fn test_sixty_five_seconds() {
        let mut state = CountdownState::arm(65);
        assert_eq!(shown(state.tick(true)), [0, 1, 0, 5]);
        for _ in 0..4 {
            state.tick(true);
        }
        assert_eq!(state.seconds_remaining, 60);
        assert_eq!(shown(state.tick(true)), [0, 1, 0, 0]);

        let mut ticks = 6;
        while !state.expired {
            state.tick(true);
            ticks += 1;
        }
        assert_eq!(ticks, 65);
        assert_eq!(state.seconds_remaining, 0);
        assert_eq!(state.tick(true), Tick::Inactive);
    }

    #[test]
    fn test_open_sense_disarms_without_decrement() {
        let mut state = CountdownState::arm(60);
        for _ in 0..30 {
            state.tick(true);
        }
        assert_eq!(state.tick(false), Tick::Disarmed);
        assert_eq!(state.seconds_remaining, 30);
        assert!(!state.expired);
        assert_eq!(state.tick(true), Tick::Inactive);
        assert_eq!(state.seconds_remaining, 30);
    }

    #[test]
    fn test_zero_duration_expires_immediately() {
        let mut state = CountdownState::arm(0);
        assert_eq!(
            state.tick(true),
            Tick::Display {
                digits: Digits::from_seconds(0),
                armed_led: true,
                expired: true,
            }
        );
    }

    #[test]
    fn test_armed_led_parity() {
        let mut state = CountdownState::arm(3);
        let leds: [bool; 3] = core::array::from_fn(|_| match state.tick(true) {
            Tick::Display { armed_led, .. } => armed_led,
            _ => unreachable!(),
        });
        assert_eq!(leds, [false, true, false]);
    }

    #[test]
    fn test_unarmed_state_is_inactive() {
        let mut state = CountdownState::default();
        assert_eq!(state.tick(true), Tick::Inactive);
    }

    proptest! {
        #[test]
        fn prop_digit_decomposition(seconds in 0u32..=3600) {
            let digits = Digits::from_seconds(seconds);
            prop_assert_eq!(digits.total_seconds(), seconds);
            for d in digits.as_array() {
                prop_assert!(d <= 9);
            }
        }

        #[test]
        fn prop_remaining_never_increases(total in 0u32..=3600, open_at in 0u32..4000) {
            let mut state = CountdownState::arm(total);
            let mut last = state.seconds_remaining;
            for i in 0..=total {
                state.tick(i != open_at);
                prop_assert!(state.seconds_remaining <= last);
                last = state.seconds_remaining;
            }
            prop_assert!(!state.expired || state.armed);
        }
    }
}
