//! Bulk operation coordinator.
//!
//! Applies a per-item operation across a client-selected set of entry
//! names, sequentially and in selection order. Policy: best-effort — an
//! item's failure is recorded and the pass continues to the next item.
//! Nothing runs concurrently and nothing is retried.

use std::future::Future;

use dataroom_core::error::AppError;

/// One failed item of a bulk pass.
#[derive(Debug)]
pub struct BulkFailure {
    /// The selected entry name.
    pub name: String,
    /// Why it failed.
    pub error: AppError,
}

/// Result of a full bulk pass.
#[derive(Debug, Default)]
pub struct BulkOutcome {
    /// Names whose operation completed.
    pub succeeded: Vec<String>,
    /// Names whose operation failed, with the per-item error.
    pub failed: Vec<BulkFailure>,
}

impl BulkOutcome {
    /// Whether every item succeeded.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Apply `op` to every name in selection order.
pub async fn run<F, Fut>(names: &[String], mut op: F) -> BulkOutcome
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<(), AppError>>,
{
    let mut outcome = BulkOutcome::default();

    for name in names {
        match op(name.clone()).await {
            Ok(()) => outcome.succeeded.push(name.clone()),
            Err(error) => {
                tracing::warn!(name = %name, error = %error, "Bulk item failed, continuing");
                outcome.failed.push(BulkFailure {
                    name: name.clone(),
                    error,
                });
            }
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[tokio::test]
    async fn all_items_succeed() {
        let names = selection(&["a.pdf", "b.pdf"]);
        let outcome = run(&names, |_name| async { Ok(()) }).await;
        assert_eq!(outcome.succeeded, names);
        assert!(outcome.is_complete());
    }

    #[tokio::test]
    async fn failure_does_not_stop_the_pass() {
        let names = selection(&["a.pdf", "b.pdf", "c.pdf"]);
        let outcome = run(&names, |name| async move {
            if name == "b.pdf" {
                Err(AppError::storage("simulated backend error"))
            } else {
                Ok(())
            }
        })
        .await;

        assert_eq!(outcome.succeeded, selection(&["a.pdf", "c.pdf"]));
        assert_eq!(outcome.failed.len(), 1);
        assert_eq!(outcome.failed[0].name, "b.pdf");
    }

    #[tokio::test]
    async fn items_run_in_selection_order() {
        let order = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
        let names = selection(&["z.pdf", "a.pdf", "m.pdf"]);
        let recorder = order.clone();
        run(&names, move |name| {
            let recorder = recorder.clone();
            async move {
                recorder.lock().unwrap().push(name);
                Ok(())
            }
        })
        .await;

        assert_eq!(*order.lock().unwrap(), names);
    }
}
