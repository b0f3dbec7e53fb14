//! JSON projection of stored documents.
//!
//! Documents are returned to callers as plain JSON: ObjectIds become their
//! hex string, datetimes become RFC 3339 strings, and every other BSON value
//! uses relaxed extended JSON.

use mongodb::bson::{Bson, Document};
use serde_json::Value;

/// Project a stored document into the JSON returned by the API.
pub fn to_json(document: Document) -> Value {
    Value::Object(
        document
            .into_iter()
            .map(|(key, value)| (key, bson_to_json(value)))
            .collect(),
    )
}

fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => match dt.try_to_rfc3339_string() {
            Ok(formatted) => Value::String(formatted),
            Err(_) => Bson::DateTime(dt).into_relaxed_extjson(),
        },
        Bson::Document(doc) => to_json(doc),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{DateTime, doc, oid::ObjectId};
    use serde_json::json;

    #[test]
    fn test_object_id_and_dates_become_strings() {
        let oid = ObjectId::parse_str("65a1f0c2e4b0a1b2c3d4e5f6").unwrap();
        let created = DateTime::from_millis(1_704_067_200_000);
        let document = doc! {
            "_id": oid,
            "createdAt": created,
            "rigor_rank": 3_i64,
            "attendees": [],
        };

        let value = to_json(document);
        assert_eq!(value["_id"], "65a1f0c2e4b0a1b2c3d4e5f6");
        assert_eq!(value["rigor_rank"], 3);
        assert_eq!(value["attendees"], json!([]));

        let created_at = value["createdAt"].as_str().unwrap();
        let parsed = chrono::DateTime::parse_from_rfc3339(created_at).unwrap();
        assert_eq!(parsed.timestamp_millis(), 1_704_067_200_000);
    }

    #[test]
    fn test_nested_values_are_projected() {
        let oid = ObjectId::new();
        let document = doc! {
            "schedule": { "start": "09:00" },
            "attendees": [oid, "guest"],
            "uid": null,
        };

        let value = to_json(document);
        assert_eq!(value["schedule"]["start"], "09:00");
        assert_eq!(value["attendees"][0], oid.to_hex());
        assert_eq!(value["attendees"][1], "guest");
        assert!(value["uid"].is_null());
    }
}
