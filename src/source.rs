//! Remote record source seam
//!
//! The engine never talks HTTP itself; it is handed an implementation of
//! [`RecordSource`] and treats it as an opaque async call. Error payloads are
//! `anyhow::Error`, leaving transports free to carry whatever they have.

use crate::core::record::Record;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use uuid::Uuid;

/// Asynchronous provider of records for a scope (e.g. one child's sessions)
#[async_trait]
pub trait RecordSource<R: Record>: Send + Sync {
    /// Fetch all records for the given scope key
    async fn fetch(&self, scope: Uuid) -> Result<Vec<R>>;
}

/// Decode a JSON array payload into records, for transport implementations
pub fn decode_payload<R: Record + DeserializeOwned>(payload: &str) -> Result<Vec<R>> {
    serde_json::from_str(payload).context("malformed record payload")
}

/// Observable state of the store's backing fetch
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Failed(String),
    Succeeded,
}

impl FetchStatus {
    /// Terminal states: the store contents are settled and derivation may run
    pub fn is_terminal(&self) -> bool {
        matches!(self, FetchStatus::Failed(_) | FetchStatus::Succeeded)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FetchStatus::Loading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::TreatmentSession;
    use std::sync::Mutex;

    struct CannedSource {
        responses: Mutex<Vec<Result<Vec<TreatmentSession>>>>,
    }

    #[async_trait]
    impl RecordSource<TreatmentSession> for CannedSource {
        async fn fetch(&self, _scope: Uuid) -> Result<Vec<TreatmentSession>> {
            self.responses
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Ok(vec![]))
        }
    }

    #[tokio::test]
    async fn test_source_trait_is_object_safe() {
        let source: Box<dyn RecordSource<TreatmentSession>> = Box::new(CannedSource {
            responses: Mutex::new(vec![Ok(vec![])]),
        });
        let records = source.fetch(Uuid::new_v4()).await.unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_decode_payload() {
        let id = Uuid::new_v4();
        let child = Uuid::new_v4();
        let payload = format!(
            r#"[{{"id":"{id}","child_id":"{child}","rating":4,"summary":"notes"}}]"#
        );
        let records: Vec<TreatmentSession> =
            decode_payload(&payload).expect("valid payload should decode");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, id);
        assert_eq!(records[0].rating, Some(4));

        assert!(decode_payload::<TreatmentSession>("not json").is_err());
    }

    #[test]
    fn test_status_terminality() {
        assert!(!FetchStatus::Idle.is_terminal());
        assert!(!FetchStatus::Loading.is_terminal());
        assert!(FetchStatus::Succeeded.is_terminal());
        assert!(FetchStatus::Failed("boom".to_string()).is_terminal());
        assert!(FetchStatus::Loading.is_loading());
    }
}
