//! Per-operation timeout table.

use std::collections::HashMap;
use std::time::Duration;

use crate::Operation;

/// Budget for probing the remote root on `/health`.
pub const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

/// Timeouts applied to outbound calls.
///
/// Defaults to [`Operation::default_timeout`] for each operation and
/// [`HEALTH_TIMEOUT`] for the health check. Entries can be overridden, which
/// is how tests run against a slow mock remote without waiting minutes.
#[derive(Debug, Clone)]
pub struct Timeouts {
    overrides: HashMap<Operation, Duration>,
    health: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            overrides: HashMap::new(),
            health: HEALTH_TIMEOUT,
        }
    }
}

impl Timeouts {
    /// Returns the timeout for an operation.
    pub fn for_operation(&self, op: Operation) -> Duration {
        self.overrides
            .get(&op)
            .copied()
            .unwrap_or_else(|| op.default_timeout())
    }

    /// Returns the health check timeout.
    pub fn health(&self) -> Duration {
        self.health
    }

    pub fn with_operation(mut self, op: Operation, timeout: Duration) -> Self {
        self.overrides.insert(op, timeout);
        self
    }

    pub fn with_health(mut self, timeout: Duration) -> Self {
        self.health = timeout;
        self
    }

    /// Overrides every operation and the health check with one budget.
    pub fn uniform(timeout: Duration) -> Self {
        Operation::ALL
            .into_iter()
            .fold(Self::default(), |t, op| t.with_operation(op, timeout))
            .with_health(timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_operations() {
        let timeouts = Timeouts::default();
        for op in Operation::ALL {
            assert_eq!(timeouts.for_operation(op), op.default_timeout());
        }
        assert_eq!(timeouts.health(), Duration::from_secs(5));
    }

    #[test]
    fn overrides_apply_per_operation() {
        let timeouts =
            Timeouts::default().with_operation(Operation::AnimateImage, Duration::from_millis(10));
        assert_eq!(
            timeouts.for_operation(Operation::AnimateImage),
            Duration::from_millis(10)
        );
        assert_eq!(
            timeouts.for_operation(Operation::GenerateAvatar),
            Duration::from_secs(600)
        );
    }

    #[test]
    fn uniform_overrides_everything() {
        let timeouts = Timeouts::uniform(Duration::from_millis(300));
        for op in Operation::ALL {
            assert_eq!(timeouts.for_operation(op), Duration::from_millis(300));
        }
        assert_eq!(timeouts.health(), Duration::from_millis(300));
    }
}
