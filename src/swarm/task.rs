use async_trait::async_trait;

use crate::args::DEFAULT_FUNCTION;

use super::client::UserClient;
use super::payload::InvocationRequest;

/// One unit of behavior a simulated user repeats.
///
/// Implementations must not fail: anything that goes wrong is reported
/// through the client's metrics and the user carries on.
#[async_trait]
pub trait Task: Send + Sync {
    fn name(&self) -> &str;

    async fn run(&self, client: &UserClient);
}

/// Invokes one function on the platform with a fixed request body.
#[derive(Debug, Clone)]
pub struct InvokeTask {
    path: String,
    request: InvocationRequest,
}

impl InvokeTask {
    #[must_use]
    pub fn new(function: &str, request: InvocationRequest) -> Self {
        Self {
            path: format!("/invoke/{}", function),
            request,
        }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub const fn request(&self) -> &InvocationRequest {
        &self.request
    }

    /// Sends `POST /invoke/<function>` once. No retries, no response checks.
    pub async fn invoke(&self, client: &UserClient) {
        if let Some(status) = client.post_json(&self.path, &self.request).await {
            tracing::trace!("Invocation of {} answered {}", self.path, status);
        }
    }
}

impl Default for InvokeTask {
    fn default() -> Self {
        Self::new(DEFAULT_FUNCTION, InvocationRequest::default())
    }
}

#[async_trait]
impl Task for InvokeTask {
    fn name(&self) -> &str {
        &self.path
    }

    async fn run(&self, client: &UserClient) {
        self.invoke(client).await;
    }
}
