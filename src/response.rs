//! JSON views of stored records, served when the client asks for `application/json`.

use crate::model::{EntityDescriptor, Record};
use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// `{ "entity", "data": [record, ...], "meta": { "count", "fields" } }`.
#[derive(Debug, Serialize)]
pub struct RecordList {
    pub entity: &'static str,
    pub data: Vec<Record>,
    pub meta: ListMeta,
}

/// Records serialize as maps, so `fields` carries the declared column order.
#[derive(Debug, Serialize)]
pub struct ListMeta {
    pub count: usize,
    pub fields: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct RecordView {
    pub entity: &'static str,
    pub data: Record,
}

impl RecordList {
    pub fn new(entity: &EntityDescriptor, data: Vec<Record>) -> Self {
        RecordList {
            entity: entity.name,
            meta: ListMeta {
                count: data.len(),
                fields: entity.field_names().collect(),
            },
            data,
        }
    }
}

impl RecordView {
    pub fn new(entity: &EntityDescriptor, data: Record) -> Self {
        RecordView {
            entity: entity.name,
            data,
        }
    }
}

impl IntoResponse for RecordList {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

impl IntoResponse for RecordView {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FieldValues, ROUTER};

    #[test]
    fn list_meta_counts_rows_and_keeps_field_order() {
        let mut values = FieldValues::new();
        values.insert("router_name".into(), Some("R1".into()));
        let list = RecordList::new(&ROUTER, vec![Record { id: 3, values }]);

        let json = serde_json::to_value(&list).unwrap();
        assert_eq!(json["entity"], "Router");
        assert_eq!(json["meta"]["count"], 1);
        assert_eq!(json["meta"]["fields"][0], "department");
        assert_eq!(json["meta"]["fields"].as_array().unwrap().len(), ROUTER.fields.len());
        assert_eq!(json["data"][0]["router_name"], "R1");
    }
}
