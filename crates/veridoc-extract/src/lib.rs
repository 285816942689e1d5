//! Boundary to the remote extraction service: transport, payload adaptation,
//! and recovery-guarded convenience wrapper.

pub mod adapt;
pub mod client;

use veridoc_core::Snapshot;
use veridoc_recovery::{FrozenFailure, Guarded, Sleeper, run_guarded};

pub use adapt::adapt_payload;
pub use client::{ExtractError, ExtractionClient};

/// Extract a document and adapt the payload into a snapshot, with every
/// failure routed through classification and the recovery policy.
///
/// Transient transport failures are retried with backoff; compliance-style
/// refusals halt with a final message; security/system failures freeze and
/// propagate. The returned snapshot is ready for `VersionLedger::commit`.
pub async fn extract_snapshot(
    client: &ExtractionClient,
    document: &[u8],
    document_type_hint: Option<&str>,
    sleeper: &dyn Sleeper,
) -> Result<Guarded<Snapshot>, FrozenFailure> {
    run_guarded(
        || async move {
            let raw = client.extract(document.to_vec(), document_type_hint).await?;
            adapt_payload(&raw)
        },
        "extraction",
        sleeper,
    )
    .await
}
