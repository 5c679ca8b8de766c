//! Single in-flight send gate.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::client::UploadReceipt;
use super::{Transport, TransportError};

/// Shared "sending" flag.
///
/// Cloning shares the flag, so a front end can disable its controls while
/// a send is outstanding.
#[derive(Debug, Clone, Default)]
pub struct SendGate {
    sending: Arc<AtomicBool>,
}

impl SendGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the gate, or `None` if a send is already in flight.
    pub fn try_acquire(&self) -> Option<SendGuard> {
        self.sending
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| SendGuard {
                sending: Arc::clone(&self.sending),
            })
    }

    pub fn is_sending(&self) -> bool {
        self.sending.load(Ordering::SeqCst)
    }
}

/// Held for the duration of one send; releases the gate on drop.
#[derive(Debug)]
pub struct SendGuard {
    sending: Arc<AtomicBool>,
}

impl Drop for SendGuard {
    fn drop(&mut self) {
        self.sending.store(false, Ordering::SeqCst);
    }
}

/// Result of asking the dispatcher to send.
#[derive(Debug, Clone, PartialEq)]
pub enum SendOutcome {
    /// The transport accepted the image
    Sent(UploadReceipt),
    /// Another send was in flight; nothing was sent
    Skipped,
}

/// Wraps a transport so at most one send is outstanding.
///
/// A send requested while another is in flight is a no-op, not queued.
#[derive(Debug)]
pub struct Dispatcher<T> {
    transport: T,
    gate: SendGate,
}

impl<T: Transport> Dispatcher<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            gate: SendGate::new(),
        }
    }

    pub fn gate(&self) -> &SendGate {
        &self.gate
    }

    pub fn is_sending(&self) -> bool {
        self.gate.is_sending()
    }

    /// Send unless another send is outstanding.
    pub async fn send(&self, jpeg: Vec<u8>, filename: &str) -> Result<SendOutcome, TransportError> {
        let Some(_guard) = self.gate.try_acquire() else {
            log::debug!("Send already in flight, ignoring request");
            return Ok(SendOutcome::Skipped);
        };
        let receipt = self.transport.send(jpeg, filename).await?;
        Ok(SendOutcome::Sent(receipt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    struct SlowTransport {
        calls: Arc<AtomicUsize>,
    }

    impl Transport for SlowTransport {
        async fn send(&self, jpeg: Vec<u8>, _filename: &str) -> Result<UploadReceipt, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            Ok(UploadReceipt {
                success: true,
                message: None,
                size: Some(jpeg.len() as u64),
                error: None,
            })
        }
    }

    struct FailingTransport;

    impl Transport for FailingTransport {
        async fn send(&self, _jpeg: Vec<u8>, _filename: &str) -> Result<UploadReceipt, TransportError> {
            Err(TransportError::Status {
                status: 500,
                body: "boom".to_string(),
            })
        }
    }

    #[test]
    fn test_gate_is_exclusive() {
        let gate = SendGate::new();
        let guard = gate.try_acquire();
        assert!(guard.is_some());
        assert!(gate.is_sending());
        assert!(gate.try_acquire().is_none());
        drop(guard);
        assert!(!gate.is_sending());
        assert!(gate.try_acquire().is_some());
    }

    #[tokio::test]
    async fn test_second_send_while_in_flight_is_skipped() {
        let calls = Arc::new(AtomicUsize::new(0));
        let dispatcher = Dispatcher::new(SlowTransport {
            calls: Arc::clone(&calls),
        });

        let (first, second) = tokio::join!(
            dispatcher.send(vec![1, 2, 3], "photo.jpg"),
            dispatcher.send(vec![4, 5, 6], "photo.jpg"),
        );

        assert!(matches!(first.unwrap(), SendOutcome::Sent(_)));
        assert_eq!(second.unwrap(), SendOutcome::Skipped);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(!dispatcher.is_sending());
    }

    #[tokio::test]
    async fn test_gate_released_after_failure() {
        let dispatcher = Dispatcher::new(FailingTransport);
        assert!(dispatcher.send(vec![1], "photo.jpg").await.is_err());
        assert!(!dispatcher.is_sending());
    }
}
