//! Expiry notification trait

/// Result of the expiry callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NotifyOutcome {
    /// Endpoint answered 2xx
    Delivered { status: u16 },
    /// Endpoint answered with any other status
    Rejected { status: u16 },
    /// No usable response (connect, write or read failed)
    ConnectionFailed,
    /// Notifier cannot speak the endpoint's scheme
    Unsupported,
}

impl NotifyOutcome {
    /// Classify an HTTP status code
    pub fn from_status(status: u16) -> Self {
        if (200..300).contains(&status) {
            NotifyOutcome::Delivered { status }
        } else {
            NotifyOutcome::Rejected { status }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, NotifyOutcome::Delivered { .. })
    }
}

/// Trait for the outbound expiry call
///
/// Called at most once per countdown cycle. Implementations report the
/// outcome and never retry.
pub trait Notifier {
    fn notify(&mut self, url: &str) -> NotifyOutcome;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert!(NotifyOutcome::from_status(200).is_success());
        assert!(NotifyOutcome::from_status(204).is_success());
        assert_eq!(
            NotifyOutcome::from_status(302),
            NotifyOutcome::Rejected { status: 302 }
        );
        assert!(!NotifyOutcome::from_status(500).is_success());
        assert!(!NotifyOutcome::ConnectionFailed.is_success());
    }
}
