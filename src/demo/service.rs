//! Service-layer entry point for the delay-only demo path.

use crate::demo::operation::{AbortPolicy, DemoOperation};
use crate::demo::types::{DemoRequestPayload, DemoResponsePayload, OperationError};
use crate::envelope::ResponseEnvelope;

/// Builds the envelope returned by the service path.
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoHelper;

impl DemoHelper {
    /// An empty envelope: no header, no payload.
    pub fn response(&self) -> ResponseEnvelope<DemoResponsePayload> {
        ResponseEnvelope::empty()
    }
}

/// Delay-only variant of the demo operation behind a helper.
///
/// The timing payload produced by the shared operation is discarded; callers
/// always receive the helper's envelope.
#[derive(Clone)]
pub struct DemoService {
    operation: DemoOperation,
    helper: DemoHelper,
    policy: AbortPolicy,
}

impl DemoService {
    pub fn new(operation: DemoOperation, policy: AbortPolicy) -> Self {
        Self {
            operation,
            helper: DemoHelper,
            policy,
        }
    }

    /// Sleep for the requested delay and return the helper's envelope.
    pub async fn run(
        &self,
        request: &DemoRequestPayload,
    ) -> Result<ResponseEnvelope<DemoResponsePayload>, OperationError> {
        let delay = u64::try_from(request.delay).unwrap_or(0);

        match self.operation.perform_delayed_operation(delay, 0).await {
            Ok(_discarded) => Ok(self.helper.response()),
            Err(e) => match self.policy {
                AbortPolicy::Propagate => Err(e),
                AbortPolicy::LogAndDefault => {
                    tracing::error!(error = %e, "Demo service failed; returning default response");
                    Ok(self.helper.response())
                }
            },
        }
    }
}
