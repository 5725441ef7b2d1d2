//! Stop request fan-out.

use tokio::sync::broadcast;

/// One-shot stop request shared between the signal listener and the retry driver.
///
/// Receivers must subscribe before [`Shutdown::trigger`]; a request sent
/// with no subscribers is lost. Dropping the `Shutdown` closes the channel,
/// which the driver treats as "never stop early".
#[derive(Debug)]
pub struct Shutdown {
    stop: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (stop, _) = broadcast::channel(1);
        Self { stop }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.stop.subscribe()
    }

    /// Ask every subscriber to stop. Repeated calls are harmless.
    pub fn trigger(&self) {
        let _ = self.stop.send(());
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::broadcast::error::RecvError;

    #[tokio::test]
    async fn test_trigger_reaches_every_subscriber() {
        let shutdown = Shutdown::new();
        let mut driver = shutdown.subscribe();
        let mut other = shutdown.subscribe();

        shutdown.trigger();
        assert_eq!(driver.recv().await, Ok(()));
        assert_eq!(other.recv().await, Ok(()));
    }

    #[tokio::test]
    async fn test_drop_closes_channel() {
        let shutdown = Shutdown::default();
        let mut rx = shutdown.subscribe();
        drop(shutdown);
        assert_eq!(rx.recv().await, Err(RecvError::Closed));
    }

    #[test]
    fn test_trigger_without_subscribers() {
        let shutdown = Shutdown::new();
        shutdown.trigger();
        shutdown.trigger();
    }
}
