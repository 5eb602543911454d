//! The delivery dispatcher — queue handoff plus a retrying worker task.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::error::DeliveryError;
use crate::mailer::Mailer;
use vox_types::{EmailAddress, ServiceParams, Timestamp, VerificationCode};
use vox_verification::CodeDelivery;

/// One queued delivery.
#[derive(Clone, Debug)]
struct DeliveryRequest {
    address: EmailAddress,
    code: VerificationCode,
    enqueued_at: Timestamp,
}

/// Fixed-backoff retry policy for the worker.
#[derive(Clone, Copy, Debug)]
pub struct RetryPolicy {
    /// Delay between attempts.
    pub backoff: Duration,
    /// Retries after the first attempt before dead-lettering.
    pub max_retries: u32,
}

impl RetryPolicy {
    pub fn from_params(params: &ServiceParams) -> Self {
        Self {
            backoff: Duration::from_secs(params.delivery_retry_delay_secs),
            max_retries: params.delivery_max_retries,
        }
    }
}

/// Spawns and owns the delivery worker.
pub struct Dispatcher;

impl Dispatcher {
    /// Spawn the worker on the current tokio runtime and return the
    /// cloneable enqueue handle. The worker runs until every handle is
    /// dropped and the queue drains.
    pub fn spawn(mailer: Arc<dyn Mailer>, policy: RetryPolicy) -> DispatcherHandle {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(worker_loop(rx, mailer, policy));
        DispatcherHandle { tx }
    }
}

/// Cloneable enqueue side of the dispatcher. Implements the verification
/// service's delivery seam.
#[derive(Clone)]
pub struct DispatcherHandle {
    tx: mpsc::UnboundedSender<DeliveryRequest>,
}

impl CodeDelivery for DispatcherHandle {
    fn enqueue(&self, address: &EmailAddress, code: &VerificationCode) {
        let request = DeliveryRequest {
            address: address.clone(),
            code: code.clone(),
            enqueued_at: Timestamp::now(),
        };
        // A closed channel means the process is shutting down; the pending
        // code will simply expire.
        if self.tx.send(request).is_err() {
            tracing::warn!(address = %address, "delivery queue closed; dropping request");
        }
    }
}

async fn worker_loop(
    mut rx: mpsc::UnboundedReceiver<DeliveryRequest>,
    mailer: Arc<dyn Mailer>,
    policy: RetryPolicy,
) {
    while let Some(request) = rx.recv().await {
        deliver_with_retries(&*mailer, &request, policy).await;
    }
    tracing::debug!("delivery worker stopped: queue closed");
}

/// Attempt one delivery, retrying transient failures with a fixed backoff.
async fn deliver_with_retries(mailer: &dyn Mailer, request: &DeliveryRequest, policy: RetryPolicy) {
    let mut attempt = 0u32;
    loop {
        attempt += 1;
        match mailer.send_code(&request.address, &request.code) {
            Ok(()) => {
                tracing::debug!(address = %request.address, attempt, "verification email delivered");
                return;
            }
            Err(DeliveryError::Permanent(reason)) => {
                tracing::error!(
                    address = %request.address,
                    enqueued_at = %request.enqueued_at,
                    %reason,
                    "delivery dead-lettered: permanent failure"
                );
                return;
            }
            Err(DeliveryError::Transient(reason)) => {
                if attempt > policy.max_retries {
                    tracing::error!(
                        address = %request.address,
                        enqueued_at = %request.enqueued_at,
                        attempts = attempt,
                        %reason,
                        "delivery dead-lettered: retries exhausted"
                    );
                    return;
                }
                tracing::warn!(
                    address = %request.address,
                    attempt,
                    backoff_secs = policy.backoff.as_secs_f64(),
                    %reason,
                    "delivery failed; retrying"
                );
                tokio::time::sleep(policy.backoff).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    fn addr() -> EmailAddress {
        EmailAddress::parse("a@x.com").unwrap()
    }

    fn code() -> VerificationCode {
        VerificationCode::parse("654874", 6).unwrap()
    }

    fn fast_policy(max_retries: u32) -> RetryPolicy {
        RetryPolicy {
            backoff: Duration::from_millis(5),
            max_retries,
        }
    }

    /// Scriptable mailer: fails the first `failures` attempts with a
    /// transient error, then succeeds. Records every attempt.
    struct FlakyMailer {
        failures: AtomicU32,
        attempts: AtomicU32,
        delivered: Mutex<Vec<(EmailAddress, VerificationCode)>>,
    }

    impl FlakyMailer {
        fn new(failures: u32) -> Self {
            Self {
                failures: AtomicU32::new(failures),
                attempts: AtomicU32::new(0),
                delivered: Mutex::new(Vec::new()),
            }
        }
    }

    impl Mailer for FlakyMailer {
        fn send_code(
            &self,
            address: &EmailAddress,
            code: &VerificationCode,
        ) -> Result<(), DeliveryError> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            if self
                .failures
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |f| f.checked_sub(1))
                .is_ok()
            {
                return Err(DeliveryError::Transient("smtp timeout".into()));
            }
            self.delivered
                .lock()
                .unwrap()
                .push((address.clone(), code.clone()));
            Ok(())
        }
    }

    struct AlwaysPermanent;

    impl Mailer for AlwaysPermanent {
        fn send_code(
            &self,
            _address: &EmailAddress,
            _code: &VerificationCode,
        ) -> Result<(), DeliveryError> {
            Err(DeliveryError::Permanent("recipient rejected".into()))
        }
    }

    #[tokio::test]
    async fn clean_delivery_goes_through_once() {
        let mailer = Arc::new(FlakyMailer::new(0));
        let request = DeliveryRequest {
            address: addr(),
            code: code(),
            enqueued_at: Timestamp::new(1000),
        };

        deliver_with_retries(&*mailer, &request, fast_policy(3)).await;

        assert_eq!(mailer.attempts.load(Ordering::SeqCst), 1);
        assert_eq!(mailer.delivered.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn transient_failures_retry_then_succeed() {
        let mailer = Arc::new(FlakyMailer::new(2));
        let request = DeliveryRequest {
            address: addr(),
            code: code(),
            enqueued_at: Timestamp::new(1000),
        };

        deliver_with_retries(&*mailer, &request, fast_policy(3)).await;

        // Two failures plus the success.
        assert_eq!(mailer.attempts.load(Ordering::SeqCst), 3);
        let delivered = mailer.delivered.lock().unwrap();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].1.as_str(), "654874");
    }

    #[tokio::test]
    async fn retry_ceiling_dead_letters() {
        let mailer = Arc::new(FlakyMailer::new(u32::MAX));
        let request = DeliveryRequest {
            address: addr(),
            code: code(),
            enqueued_at: Timestamp::new(1000),
        };

        deliver_with_retries(&*mailer, &request, fast_policy(2)).await;

        // First attempt + 2 retries, then give up.
        assert_eq!(mailer.attempts.load(Ordering::SeqCst), 3);
        assert!(mailer.delivered.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn permanent_failure_skips_retries() {
        let request = DeliveryRequest {
            address: addr(),
            code: code(),
            enqueued_at: Timestamp::new(1000),
        };
        // Would hang for a long time if retried with a real backoff.
        deliver_with_retries(
            &AlwaysPermanent,
            &request,
            RetryPolicy {
                backoff: Duration::from_secs(3600),
                max_retries: 10,
            },
        )
        .await;
    }

    #[tokio::test]
    async fn enqueue_returns_immediately_and_worker_delivers() {
        let mailer = Arc::new(FlakyMailer::new(1));
        let handle = Dispatcher::spawn(mailer.clone(), fast_policy(3));

        handle.enqueue(&addr(), &code());

        // Enqueue is fire-and-forget; poll the mailer for completion.
        for _ in 0..200 {
            if !mailer.delivered.lock().unwrap().is_empty() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        let delivered = mailer.delivered.lock().unwrap();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].0.as_str(), "a@x.com");
    }
}
