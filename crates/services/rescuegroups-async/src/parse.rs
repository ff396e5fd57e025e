//! Turns validated envelopes into typed pages.
//!
//! Parsing never fails: errors are classified by the transport before an
//! envelope gets here, and a record that does not fit its type is skipped.

use serde::de::DeserializeOwned;

use crate::types::envelope::{EnvelopeStatus, ResponseEnvelope};
use crate::types::page::Page;

/// Decodes the records of an envelope, keeping upstream order
///
/// A record that does not match `T` is dropped with a warning.
#[must_use]
pub fn records<T: DeserializeOwned>(envelope: ResponseEnvelope) -> Vec<T> {
    envelope
        .data
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(key, record)| match T::deserialize(&record) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                tracing::warn!(record = %key, error = %e, "skipping undecodable record");
                None
            }
        })
        .collect()
}

/// Warning texts of an envelope; `None` unless the status is `warning`
#[must_use]
pub fn warnings(envelope: &ResponseEnvelope) -> Option<Vec<String>> {
    match envelope.status {
        EnvelopeStatus::Warning => Some(envelope.general_message_texts()),
        EnvelopeStatus::Ok => {
            let discarded = envelope.general_message_texts();
            if !discarded.is_empty() {
                tracing::debug!(
                    count = discarded.len(),
                    "discarding informational messages on ok response"
                );
            }
            None
        }
        EnvelopeStatus::Error => None,
    }
}

/// Builds the page for an envelope produced by a request at `offset`/`limit`
#[must_use]
pub fn page<T: DeserializeOwned>(envelope: ResponseEnvelope, offset: u32, limit: u32) -> Page<T> {
    let total = envelope.found_rows.unwrap_or(0);
    let warnings = warnings(&envelope);
    let data = records(envelope);

    Page::new(data, total, offset, limit, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::animal::Animal;
    use serde_json::json;

    fn envelope(value: serde_json::Value) -> ResponseEnvelope {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn missing_data_is_empty_page() {
        let page: Page<Animal> = page(envelope(json!({"status": "ok"})), 0, 20);
        assert!(page.is_empty());
        assert_eq!(page.total, 0);
        assert!(!page.has_more);
        assert_eq!(page.warnings, None);
    }

    #[test]
    fn records_keep_upstream_order() {
        let page: Page<Animal> = page(
            envelope(json!({
                "status": "ok",
                "foundRows": 50,
                "data": {
                    "9": {"animalID": "9", "animalName": "Zed"},
                    "2": {"animalID": "2", "animalName": "Amy"}
                }
            })),
            10,
            2,
        );

        let ids: Vec<&str> = page.data.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, ["9", "2"]);
        assert_eq!(page.total, 50);
        assert_eq!(page.offset, 10);
        assert_eq!(page.limit, 2);
        assert!(page.has_more);
    }

    #[test]
    fn warning_status_surfaces_general_messages() {
        let page: Page<Animal> = page(
            envelope(json!({
                "status": "warning",
                "messages": {"generalMessages": [
                    {"messageText": "Field animalFoo ignored"},
                    {"messageText": "Results truncated"}
                ]},
                "foundRows": 0
            })),
            0,
            20,
        );

        assert_eq!(
            page.warnings,
            Some(vec![
                "Field animalFoo ignored".to_string(),
                "Results truncated".to_string()
            ])
        );
    }

    #[test]
    fn ok_status_discards_messages() {
        let env = envelope(json!({
            "status": "ok",
            "messages": {"generalMessages": [{"messageText": "FYI"}]}
        }));
        assert_eq!(warnings(&env), None);
    }

    #[test]
    fn loosely_typed_records_decode() {
        let page: Page<Animal> = page(
            envelope(json!({"status": "ok", "foundRows": 2, "data": {
                "1": {"animalID": "1"},
                "2": {"animalID": 2, "animalPictures": null}
            }})),
            0,
            20,
        );

        let ids: Vec<&str> = page.data.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, ["1", "2"]);
        assert!(page.data[1].pictures.is_empty());
    }

    #[test]
    fn undecodable_record_is_skipped() {
        let page: Page<Animal> = page(
            envelope(json!({"status": "ok", "foundRows": 3, "data": {
                "1": {"animalID": "1"},
                "2": {"animalName": "No id"},
                "3": {"animalID": "3"}
            }})),
            0,
            20,
        );

        let ids: Vec<&str> = page.data.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, ["1", "3"]);
        assert_eq!(page.total, 3);
    }
}
