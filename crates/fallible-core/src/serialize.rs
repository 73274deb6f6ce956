//! Serde support, enabled by the `serde` feature.
//!
//! A result serializes as an internally tagged map:
//! `{"status": "ok", "value": ...}` or `{"status": "err", "error": ...}`.
//! The empty slot is never written.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::sync_result::{err_sync, ok_sync, SyncResult};

#[derive(Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum Repr<O, E> {
    Ok { value: O },
    Err { error: E },
}

impl<O: Serialize, E: Serialize> Serialize for SyncResult<O, E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let repr = self
            .as_ref()
            .match_with(|value| Repr::Ok { value }, |error| Repr::Err { error });
        repr.serialize(serializer)
    }
}

impl<'de, O: Deserialize<'de>, E: Deserialize<'de>> Deserialize<'de> for SyncResult<O, E> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Repr::deserialize(deserializer)? {
            Repr::Ok { value } => ok_sync(value),
            Repr::Err { error } => err_sync(error),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_serialize_tracks() {
        let ok: SyncResult<u32, String> = ok_sync(5);
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            json!({"status": "ok", "value": 5})
        );

        let err: SyncResult<u32, String> = err_sync("gone".to_string());
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            json!({"status": "err", "error": "gone"})
        );
    }

    #[test]
    fn test_deserialize_tracks() {
        let ok: SyncResult<Option<u32>, String> =
            serde_json::from_value(json!({"status": "ok", "value": null})).unwrap();
        assert_eq!(ok, ok_sync(None));

        let err: SyncResult<u32, String> =
            serde_json::from_str(r#"{"status":"err","error":"gone"}"#).unwrap();
        assert_eq!(err, err_sync("gone".to_string()));
    }

    #[test]
    fn test_deserialize_rejects_unknown_status() {
        let result = serde_json::from_value::<SyncResult<u32, String>>(json!({"status": "maybe"}));
        assert!(result.is_err());
    }
}
