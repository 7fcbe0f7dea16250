//! Canonical client record and the key-casing normalization contract.
//!
//! Raw rows arrive keyed by whatever the store (or an older endpoint) used:
//! `id`/`ID`/`Id`/`IdCliente`, `nome`/`Nome`, `idade`/`Idade`, `uf`/`UF`.
//! Anything that hands a client to a consumer goes through [`normalize_row`],
//! [`normalize_rows`] or [`normalize_single`] first, so consumers only ever see
//! the four canonical keys.
//!
//! # Invariants
//! - For each field the first acceptable key holding a non-null value wins,
//!   even when that value is `0` or `""`.
//! - A field with no acceptable key is `None` (serialized as `null`), never a
//!   default value.
//! - Normalization is pure: no I/O, no logging.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Raw row as produced by a persistence gateway or an HTTP payload.
pub type RawRow = Value;

/// Acceptable source keys for the identifier, in priority order.
pub const ID_KEYS: &[&str] = &["id", "ID", "Id", "IdCliente"];
/// Acceptable source keys for the name.
pub const NOME_KEYS: &[&str] = &["nome", "Nome"];
/// Acceptable source keys for the age.
pub const IDADE_KEYS: &[&str] = &["idade", "Idade"];
/// Acceptable source keys for the region code.
pub const UF_KEYS: &[&str] = &["uf", "UF"];

/// Opaque client identifier. Stores assign integers today, but the contract
/// does not promise that, so textual ids pass through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClientId {
    Number(i64),
    Text(String),
}

impl ClientId {
    /// Integer view of the id, parsing textual ids when they look numeric.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ClientId::Number(n) => Some(*n),
            ClientId::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientId::Number(n) => write!(f, "{n}"),
            ClientId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i32> for ClientId {
    fn from(value: i32) -> Self {
        ClientId::Number(i64::from(value))
    }
}

impl From<i64> for ClientId {
    fn from(value: i64) -> Self {
        ClientId::Number(value)
    }
}

/// Canonical client shape returned to every consumer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: Option<ClientId>,
    pub nome: Option<String>,
    pub idade: Option<i64>,
    pub uf: Option<String>,
}

/// Write body for create and update. Wire keys are `name`, `age`, `uf`
/// whatever casing the read side uses. Values stay loosely typed here so that
/// a wrong type surfaces as a validation failure rather than a decode error;
/// form bodies deliver every value as a string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uf: Option<Value>,
}

impl ClientInput {
    pub fn new(name: impl Into<String>, age: i64, uf: impl Into<String>) -> Self {
        Self {
            name: Some(Value::String(name.into())),
            age: Some(Value::from(age)),
            uf: Some(Value::String(uf.into())),
        }
    }
}

/// Result of an update. `affected_rows == 0` means no record had that id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateOutcome {
    pub id: ClientId,
    pub affected_rows: u64,
    pub client: Option<Client>,
}

/// Result of a delete. Deleting an unknown id is a no-op, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteOutcome {
    pub id: ClientId,
    pub affected_rows: u64,
    pub removed: bool,
}

fn first_present<'a>(row: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .find_map(|key| row.get(*key).filter(|value| !value.is_null()))
}

fn coerce_id(value: &Value) -> Option<ClientId> {
    match value {
        Value::Number(n) => Some(
            n.as_i64()
                .map(ClientId::Number)
                .unwrap_or_else(|| ClientId::Text(n.to_string())),
        ),
        Value::String(s) => Some(ClientId::Text(s.clone())),
        _ => None,
    }
}

fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            // some drivers hand back integral floats (30.0)
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Normalizes one JSON object, whatever casing its keys use.
pub fn normalize_object(row: &Map<String, Value>) -> Client {
    Client {
        id: first_present(row, ID_KEYS).and_then(coerce_id),
        nome: first_present(row, NOME_KEYS).and_then(coerce_text),
        idade: first_present(row, IDADE_KEYS).and_then(coerce_int),
        uf: first_present(row, UF_KEYS).and_then(coerce_text),
    }
}

/// Normalizes a raw row. Returns `None` when the row is not a JSON object.
pub fn normalize_row(row: &RawRow) -> Option<Client> {
    row.as_object().map(normalize_object)
}

/// Normalizes list results one row at a time, skipping non-object entries.
pub fn normalize_rows<'a, I>(rows: I) -> Vec<Client>
where
    I: IntoIterator<Item = &'a RawRow>,
{
    rows.into_iter().filter_map(normalize_row).collect()
}

/// Normalizes a payload that should describe a single record.
///
/// A list-shaped payload collapses to its first element; an empty list, `null`
/// or a scalar is treated as absence.
pub fn normalize_single(payload: &Value) -> Option<Client> {
    match payload {
        Value::Array(items) => items.first().and_then(normalize_row),
        Value::Object(map) => Some(normalize_object(map)),
        _ => None,
    }
}

/// Normalizes a payload that should describe a collection. A lone object is
/// read as a one-element list.
pub fn normalize_many(payload: &Value) -> Vec<Client> {
    match payload {
        Value::Array(items) => normalize_rows(items),
        Value::Object(map) => vec![normalize_object(map)],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ana(id: i64) -> Client {
        Client {
            id: Some(ClientId::Number(id)),
            nome: Some("Ana".into()),
            idade: Some(30),
            uf: Some("SP".into()),
        }
    }

    #[test]
    fn every_casing_variant_yields_the_same_client() {
        let variants = [
            json!({"id": 7, "nome": "Ana", "idade": 30, "uf": "SP"}),
            json!({"ID": 7, "Nome": "Ana", "Idade": 30, "UF": "SP"}),
            json!({"Id": 7, "nome": "Ana", "Idade": 30, "uf": "SP"}),
            json!({"IdCliente": 7, "Nome": "Ana", "idade": 30, "UF": "SP"}),
        ];
        for raw in &variants {
            assert_eq!(normalize_row(raw), Some(ana(7)), "variant {raw}");
        }
    }

    #[test]
    fn earlier_key_wins_over_later_key() {
        let raw = json!({"Id": 2, "id": 1, "ID": 3, "Nome": "B", "nome": "A"});
        let c = normalize_row(&raw).unwrap();
        assert_eq!(c.id, Some(ClientId::Number(1)));
        assert_eq!(c.nome.as_deref(), Some("A"));
    }

    #[test]
    fn zero_and_empty_string_count_as_present() {
        let raw = json!({"id": 0, "nome": "", "Nome": "fallback", "idade": 0, "Idade": 99, "uf": ""});
        let c = normalize_row(&raw).unwrap();
        assert_eq!(c.id, Some(ClientId::Number(0)));
        assert_eq!(c.nome.as_deref(), Some(""));
        assert_eq!(c.idade, Some(0));
        assert_eq!(c.uf.as_deref(), Some(""));
    }

    #[test]
    fn null_falls_through_to_next_key() {
        let raw = json!({"id": null, "ID": 5, "nome": null, "Nome": "Caio"});
        let c = normalize_row(&raw).unwrap();
        assert_eq!(c.id, Some(ClientId::Number(5)));
        assert_eq!(c.nome.as_deref(), Some("Caio"));
    }

    #[test]
    fn absent_fields_stay_missing_and_serialize_as_null() {
        let c = normalize_row(&json!({"ID": 1})).unwrap();
        assert_eq!(c.nome, None);
        assert_eq!(c.idade, None);
        assert_eq!(c.uf, None);
        let out = serde_json::to_value(&c).unwrap();
        assert_eq!(out, json!({"id": 1, "nome": null, "idade": null, "uf": null}));
    }

    #[test]
    fn value_coercions() {
        let raw = json!({"id": "abc-1", "nome": 42, "idade": " 31 ", "uf": "rj"});
        let c = normalize_row(&raw).unwrap();
        assert_eq!(c.id, Some(ClientId::Text("abc-1".into())));
        assert_eq!(c.nome.as_deref(), Some("42"));
        assert_eq!(c.idade, Some(31));
        assert_eq!(c.uf.as_deref(), Some("rj"));

        let c = normalize_row(&json!({"idade": 30.0})).unwrap();
        assert_eq!(c.idade, Some(30));

        // the winning key holds garbage: the field is missing, not taken from a later key
        let c = normalize_row(&json!({"idade": "trinta", "Idade": 30})).unwrap();
        assert_eq!(c.idade, None);
    }

    #[test]
    fn single_payload_collapses_lists() {
        let list = json!([{"ID": 7, "Nome": "Ana", "Idade": 30, "UF": "SP"}, {"id": 8}]);
        assert_eq!(normalize_single(&list), Some(ana(7)));
        assert_eq!(normalize_single(&json!([])), None);
        assert_eq!(normalize_single(&Value::Null), None);
        assert_eq!(normalize_single(&json!("nope")), None);
        let obj = json!({"id": 7, "nome": "Ana", "idade": 30, "uf": "SP"});
        assert_eq!(normalize_single(&obj), Some(ana(7)));
    }

    #[test]
    fn many_payload_accepts_object_or_list() {
        let list = json!([{"id": 1}, 3, {"Id": 2}]);
        let ids: Vec<_> = normalize_many(&list).into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![Some(ClientId::Number(1)), Some(ClientId::Number(2))]);
        assert_eq!(normalize_many(&json!({"id": 9})).len(), 1);
        assert!(normalize_many(&Value::Null).is_empty());
    }

    #[test]
    fn client_id_views() {
        assert_eq!(ClientId::Text(" 12 ".into()).as_i64(), Some(12));
        assert_eq!(ClientId::Text("x".into()).as_i64(), None);
        assert_eq!(ClientId::from(4i32).to_string(), "4");
    }
}
