//! Logging around every unary call.

/// Records the method before each call and the outcome after it.
///
/// Runs inside the client's span, so every line carries the client's fields.
#[derive(Clone, Copy, Debug, Default)]
pub struct LoggingInterceptor;

impl LoggingInterceptor {
    pub async fn intercept<F, T>(&self, method: &'static str, call: F) -> Result<T, tonic::Status>
    where
        F: Future<Output = Result<T, tonic::Status>>,
    {
        tracing::info!(rpc = method, "starting rpc");
        let result = call.await;
        match &result {
            Ok(_) => tracing::info!(rpc = method, "finished rpc"),
            Err(status) => tracing::error!(
                rpc = method,
                code = ?status.code(),
                message = status.message(),
                "rpc failed"
            ),
        }
        result
    }
}
