use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tcore::ProviderError;
use tokio::time::Instant;
use tutorkit_provider::BackoffPolicy;

fn policy() -> BackoffPolicy {
    BackoffPolicy {
        max_attempts: 3,
        base: Duration::from_secs(2),
    }
}

#[tokio::test]
async fn success_needs_no_retry() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();

    let result = policy()
        .run(|| {
            counter.fetch_add(1, Ordering::Relaxed);
            async { Ok::<_, ProviderError>(42) }
        })
        .await;

    assert_eq!(result.unwrap(), 42);
    assert_eq!(calls.load(Ordering::Relaxed), 1);
}

#[tokio::test(start_paused = true)]
async fn rate_limits_retry_with_growing_waits() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let start = Instant::now();

    let result = policy()
        .run(|| {
            let n = counter.fetch_add(1, Ordering::Relaxed);
            async move {
                if n < 2 {
                    Err(ProviderError::RateLimit)
                } else {
                    Ok("through")
                }
            }
        })
        .await;

    assert_eq!(result.unwrap(), "through");
    assert_eq!(calls.load(Ordering::Relaxed), 3);
    // 2s after the first attempt, 4s after the second.
    assert_eq!(start.elapsed(), Duration::from_secs(6));
}

#[tokio::test(start_paused = true)]
async fn persistent_rate_limit_spends_the_attempt_budget() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();

    let result = policy()
        .run(|| {
            counter.fetch_add(1, Ordering::Relaxed);
            async { Err::<(), _>(ProviderError::RateLimit) }
        })
        .await;

    assert!(matches!(result, Err(ProviderError::RateLimit)));
    assert_eq!(calls.load(Ordering::Relaxed), 3);
}

#[tokio::test(start_paused = true)]
async fn other_errors_surface_immediately() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let start = Instant::now();

    let result = policy()
        .run(|| {
            counter.fetch_add(1, Ordering::Relaxed);
            async {
                Err::<(), _>(ProviderError::Status {
                    status: 500,
                    body: "boom".into(),
                })
            }
        })
        .await;

    assert!(matches!(result, Err(ProviderError::Status { status: 500, .. })));
    assert_eq!(calls.load(Ordering::Relaxed), 1);
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test]
async fn single_attempt_policy_never_sleeps() {
    let policy = BackoffPolicy {
        max_attempts: 1,
        base: Duration::from_secs(2),
    };
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();

    let result = policy
        .run(|| {
            counter.fetch_add(1, Ordering::Relaxed);
            async { Err::<(), _>(ProviderError::RateLimit) }
        })
        .await;

    assert!(matches!(result, Err(ProviderError::RateLimit)));
    assert_eq!(calls.load(Ordering::Relaxed), 1);
}
