//! Button and sense lines bound to concrete pins

use tripwire_core::traits::{EdgeEvent, Line, LineWatcher, WatchError};
use tripwire_hal::{Edge, EdgeInput, Monotonic};

use super::watcher::{EdgeWatcher, RetryPolicy};

/// The two input lines the controller watches
pub struct InputLines<B, S, C> {
    button: EdgeWatcher<B, C>,
    sense: EdgeWatcher<S, C>,
}

impl<B, S, C> InputLines<B, S, C>
where
    B: EdgeInput,
    S: EdgeInput,
    C: Monotonic + Clone,
{
    /// Bind both lines under the same retry policy
    pub fn new(button: B, sense: S, clock: C, policy: RetryPolicy) -> Self {
        Self {
            button: EdgeWatcher::new(button, clock.clone(), policy),
            sense: EdgeWatcher::new(sense, clock, policy),
        }
    }

    /// Give the pins back
    pub fn release(self) -> (B, S) {
        (self.button.release(), self.sense.release())
    }
}

impl<B, S, C> LineWatcher for InputLines<B, S, C>
where
    B: EdgeInput,
    S: EdgeInput,
    C: Monotonic + Clone,
{
    fn wait_for_edge(
        &mut self,
        line: Line,
        edge: Edge,
        timeout_ms: Option<u32>,
    ) -> Result<EdgeEvent, WatchError> {
        match line {
            Line::Button => self.button.wait_within(edge, timeout_ms)?,
            Line::Sense => self.sense.wait_within(edge, timeout_ms)?,
        }
        Ok(EdgeEvent { line, edge })
    }

    fn read_level(&mut self, line: Line) -> bool {
        match line {
            Line::Button => self.button.is_high(),
            Line::Sense => self.sense.is_high(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::input::watcher::mock::{ScriptedPin, Step, StepClock};
    use super::*;

    #[test]
    fn test_lines_are_routed() {
        let clock = StepClock::new(0);
        let mut lines = InputLines::new(
            ScriptedPin::new(true, &[]),
            ScriptedPin::new(true, &[Step::Fault]),
            &clock,
            RetryPolicy::UNBOUNDED,
        );

        assert!(!lines.sense_intact());
        assert_eq!(
            lines.wait_for_edge(Line::Sense, Edge::Falling, None),
            Ok(EdgeEvent {
                line: Line::Sense,
                edge: Edge::Falling
            })
        );
        assert!(lines.sense_intact());
        assert!(lines.read_level(Line::Button));

        let (button, sense) = lines.release();
        assert!(button.waits.is_empty());
        assert_eq!(sense.waits.len(), 2);
    }

    #[test]
    fn test_call_timeout_reaches_the_pin() {
        let clock = StepClock::new(0);
        let mut lines = InputLines::new(
            ScriptedPin::new(true, &[Step::Timeout]),
            ScriptedPin::new(true, &[]),
            &clock,
            RetryPolicy::UNBOUNDED.with_timeout_ms(10_000),
        );

        assert_eq!(
            lines.wait_for_edge(Line::Button, Edge::Falling, Some(500)),
            Err(WatchError::TimedOut)
        );
        let (button, _) = lines.release();
        assert_eq!(button.waits, vec![(Edge::Falling, Some(500))]);
    }
}
