//! Countdown state machine
//!
//! The controller's phase is a function of the previous phase and an
//! event. Nothing here touches hardware.

use super::events::Event;

/// Controller phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Constructed, display not yet configured
    Idle,
    /// Ready LED lit, waiting for the arming trigger
    WaitingForArm,
    /// Armed, ticking once per second
    Counting,
    /// Countdown reached zero with the wire intact
    Expired,
    /// Sense wire opened before the callback went out
    Disarmed,
}

impl Phase {
    /// Check if the countdown is running
    pub fn is_counting(&self) -> bool {
        matches!(self, Phase::Counting)
    }

    /// Check if the current cycle has finished
    pub fn is_cycle_end(&self) -> bool {
        matches!(self, Phase::Expired | Phase::Disarmed)
    }

    /// Process an event and return the next phase
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use Phase::*;

        match (self, event) {
            (Idle, Start) => WaitingForArm,

            (WaitingForArm, Armed) => Counting,

            (Counting, SenseOpened) => Disarmed,
            (Counting, TimeElapsed) => Expired,
            // Wire cut during the final second
            (Expired, SenseOpened) => Disarmed,

            // Both endings loop back for the next cycle
            (Expired, CycleReset) => WaitingForArm,
            (Disarmed, CycleReset) => WaitingForArm,

            // Faults drop the cycle without an outcome
            (Counting | Expired | Disarmed, Abort) => WaitingForArm,

            // Default: stay in current phase
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_path() {
        let phase = Phase::Idle.transition(Event::Start);
        assert_eq!(phase, Phase::WaitingForArm);

        let phase = phase.transition(Event::Armed);
        assert!(phase.is_counting());

        let phase = phase.transition(Event::TimeElapsed);
        assert_eq!(phase, Phase::Expired);
        assert!(phase.is_cycle_end());

        assert_eq!(phase.transition(Event::CycleReset), Phase::WaitingForArm);
    }

    #[test]
    fn test_disarm_path() {
        let phase = Phase::Counting.transition(Event::SenseOpened);
        assert_eq!(phase, Phase::Disarmed);
        assert_eq!(phase.transition(Event::CycleReset), Phase::WaitingForArm);
    }

    #[test]
    fn test_finished_cycle_ignores_countdown_events() {
        for phase in [Phase::Expired, Phase::Disarmed] {
            assert_eq!(phase.transition(Event::TimeElapsed), phase);
            assert_eq!(phase.transition(Event::Armed), phase);
        }
        assert_eq!(Phase::Disarmed.transition(Event::SenseOpened), Phase::Disarmed);
    }

    #[test]
    fn test_wire_cut_after_last_tick_disarms() {
        let phase = Phase::Counting
            .transition(Event::TimeElapsed)
            .transition(Event::SenseOpened);
        assert_eq!(phase, Phase::Disarmed);
        assert_eq!(phase.transition(Event::CycleReset), Phase::WaitingForArm);
    }

    #[test]
    fn test_abort_returns_to_waiting() {
        for phase in [Phase::WaitingForArm, Phase::Counting, Phase::Expired, Phase::Disarmed] {
            assert_eq!(phase.transition(Event::Abort), Phase::WaitingForArm);
        }
        assert_eq!(Phase::Idle.transition(Event::Abort), Phase::Idle);
    }

    #[test]
    fn test_invalid_events_hold_phase() {
        assert_eq!(Phase::Idle.transition(Event::Armed), Phase::Idle);
        assert_eq!(
            Phase::WaitingForArm.transition(Event::TimeElapsed),
            Phase::WaitingForArm
        );
        assert_eq!(Phase::Counting.transition(Event::Start), Phase::Counting);
    }
}
