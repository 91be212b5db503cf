//! Timeout policy for external calls.

use std::future::Future;
use std::time::Duration;

use crate::error::EngineError;

/// Run a dependency call under `timeout`.
///
/// Errors are converted into [`EngineError`]; an elapsed timeout becomes
/// `DependencyUnavailable`. Failures are logged with full detail here so
/// callers can return the generic public message.
pub async fn call_dependency<T, E, F>(
    dependency: &'static str,
    timeout: Duration,
    call: F,
) -> Result<T, EngineError>
where
    F: Future<Output = Result<T, E>>,
    E: Into<EngineError>,
{
    match tokio::time::timeout(timeout, call).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => {
            let err = err.into();
            if !err.code().is_caller_error() {
                tracing::error!(dependency, error = %err, "Dependency call failed");
            }
            Err(err)
        }
        Err(_) => {
            tracing::error!(
                dependency,
                timeout_ms = timeout.as_millis() as u64,
                "Dependency call timed out"
            );
            Err(EngineError::unavailable(
                dependency,
                format!("timed out after {}ms", timeout.as_millis()),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::PriceFeedError;
    use crate::error::ErrorCode;

    #[tokio::test]
    async fn passes_through_success() {
        let result: Result<u32, EngineError> = call_dependency(
            "test",
            Duration::from_millis(100),
            async { Ok::<_, PriceFeedError>(7) },
        )
        .await;
        assert_eq!(result, Ok(7));
    }

    #[tokio::test]
    async fn converts_errors() {
        let result: Result<u32, EngineError> = call_dependency(
            "price feed",
            Duration::from_millis(100),
            async {
                Err(PriceFeedError::Unavailable {
                    message: "down".to_string(),
                })
            },
        )
        .await;
        assert_eq!(result.unwrap_err().code(), ErrorCode::DependencyUnavailable);
    }

    #[tokio::test]
    async fn timeout_is_dependency_unavailable() {
        let result: Result<u32, EngineError> =
            call_dependency("slow store", Duration::from_millis(50), async {
                tokio::time::sleep(Duration::from_secs(10)).await;
                Ok::<_, PriceFeedError>(1)
            })
            .await;

        let err = result.unwrap_err();
        assert_eq!(err.code(), ErrorCode::DependencyUnavailable);
        assert!(err.to_string().contains("timed out"));
    }
}
