//! Conversions between [`Data`] trees, serde types, and JSON.
//!
//! Serde types travel through `serde_json::Value`, so the JSON bridge below
//! is the only place the tree's shape is mapped onto an encoding.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Number, Value as Json};

use crate::{Data, Error, Result};

/// Decode a tree into any deserializable type.
pub fn from_data<T: DeserializeOwned>(data: &Data) -> Result<T> {
    serde_json::from_value(Json::from(data)).map_err(|e| Error::decode(e.to_string()))
}

/// Encode any serializable type as a tree.
pub fn to_data<T: Serialize + ?Sized>(value: &T) -> Result<Data> {
    serde_json::to_value(value)
        .map(Data::from)
        .map_err(|e| Error::encode(e.to_string()))
}

impl From<&Data> for Json {
    /// Non-finite floats have no JSON form and become `null`.
    fn from(data: &Data) -> Self {
        match data {
            Data::Null => Json::Null,
            Data::Bool(b) => Json::Bool(*b),
            Data::Integer(i) => Json::from(*i),
            Data::Float(f) => Number::from_f64(*f).map_or(Json::Null, Json::Number),
            Data::String(s) => Json::String(s.clone()),
            Data::List(items) => items.iter().map(Json::from).collect(),
            Data::Map(map) => Json::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), Json::from(v)))
                    .collect::<Map<_, _>>(),
            ),
        }
    }
}

impl From<Json> for Data {
    /// Integral numbers that fit `i64` stay integers; everything else
    /// numeric becomes a float.
    fn from(json: Json) -> Self {
        match json {
            Json::Null => Data::Null,
            Json::Bool(b) => Data::Bool(b),
            Json::Number(n) => match n.as_i64() {
                Some(i) => Data::Integer(i),
                None => n.as_f64().map_or(Data::Null, Data::Float),
            },
            Json::String(s) => Data::String(s),
            Json::Array(items) => Data::List(items.into_iter().map(Data::from).collect()),
            Json::Object(map) => Data::Map(map.into_iter().map(|(k, v)| (k, Data::from(v))).collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Snapshot {
        item: String,
        meta: i32,
    }

    #[test]
    fn struct_encodes_as_container() {
        let data = to_data(&Snapshot {
            item: "dandelion".to_string(),
            meta: 0,
        })
        .unwrap();

        assert_eq!(data.get(&query!("item")), Some(&Data::from("dandelion")));
        assert_eq!(data.get(&query!("meta")), Some(&Data::Integer(0)));
        assert_eq!(
            from_data::<Snapshot>(&data).unwrap(),
            Snapshot {
                item: "dandelion".to_string(),
                meta: 0
            }
        );
    }

    #[test]
    fn decode_mismatch_is_error() {
        let err = from_data::<Snapshot>(&Data::Integer(3)).unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }

    #[test]
    fn json_numbers_keep_integer_precision() {
        let data = Data::from(json!({"StuckArrows": 2147483647, "Scale": 0.5}));
        assert_eq!(
            data.get(&query!("StuckArrows")),
            Some(&Data::Integer(2147483647))
        );
        assert_eq!(data.get(&query!("Scale")), Some(&Data::Float(0.5)));
    }

    #[test]
    fn non_finite_floats_render_as_null() {
        assert_eq!(Json::from(&Data::Float(f64::NAN)), Json::Null);
        assert_eq!(
            Json::from(&Data::List(vec![Data::Bool(true), Data::Float(f64::INFINITY)])),
            json!([true, null])
        );
    }
}
