use common::client::ClientInput;
use serde_json::Value;

use crate::errors::ServiceError;

/// Store-level key of a client row.
pub type ClientKey = i32;

/// A write that passed validation: all three fields present and well typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClient {
    pub nome: String,
    pub idade: i32,
    pub uf: String,
}

impl NewClient {
    /// Checks presence and type of `name`, `age` and `uf`.
    ///
    /// Missing fields (absent, `null` or blank) are all reported together;
    /// type errors are reported only once every field is present.
    pub fn validate(input: &ClientInput) -> Result<Self, ServiceError> {
        let missing: Vec<&str> = [
            ("name", input.name.as_ref()),
            ("age", input.age.as_ref()),
            ("uf", input.uf.as_ref()),
        ]
        .into_iter()
        .filter(|(_, value)| is_blank(*value))
        .map(|(field, _)| field)
        .collect();
        if !missing.is_empty() {
            return Err(ServiceError::Validation(format!(
                "missing required field(s): {}",
                missing.join(", ")
            )));
        }

        let nome = text_field("name", input.name.as_ref())?;
        let idade = age_field(input.age.as_ref())?;
        let uf = text_field("uf", input.uf.as_ref())?;
        Ok(Self { nome, idade, uf })
    }
}

fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

fn text_field(field: &str, value: Option<&Value>) -> Result<String, ServiceError> {
    match value {
        Some(Value::String(s)) => Ok(s.clone()),
        _ => Err(ServiceError::Validation(format!("{field} must be a string"))),
    }
}

fn age_field(value: Option<&Value>) -> Result<i32, ServiceError> {
    let wide = match value {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
    .ok_or_else(|| ServiceError::Validation("age must be an integer".into()))?;
    i32::try_from(wide).map_err(|_| ServiceError::Validation("age is out of range".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn input(v: Value) -> ClientInput {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn accepts_json_and_form_shaped_values() {
        let from_json = NewClient::validate(&input(json!({"name": "Ana", "age": 30, "uf": "SP"}))).unwrap();
        let from_form = NewClient::validate(&input(json!({"name": "Ana", "age": "30", "uf": "SP"}))).unwrap();
        assert_eq!(from_json, from_form);
        assert_eq!(from_json, NewClient { nome: "Ana".into(), idade: 30, uf: "SP".into() });
    }

    #[test]
    fn reports_every_missing_field() {
        let err = NewClient::validate(&input(json!({"name": "  ", "uf": null}))).unwrap_err();
        match err {
            ServiceError::Validation(msg) => assert_eq!(msg, "missing required field(s): name, age, uf"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn zero_age_is_present() {
        let ok = NewClient::validate(&ClientInput::new("Bia", 0, "RJ")).unwrap();
        assert_eq!(ok.idade, 0);
    }

    #[test]
    fn rejects_wrong_types() {
        for body in [
            json!({"name": "Ana", "age": 30.5, "uf": "SP"}),
            json!({"name": "Ana", "age": "thirty", "uf": "SP"}),
            json!({"name": 7, "age": 30, "uf": "SP"}),
            json!({"name": "Ana", "age": 30, "uf": ["SP"]}),
            json!({"name": "Ana", "age": 9_000_000_000i64, "uf": "SP"}),
        ] {
            let err = NewClient::validate(&input(body.clone())).unwrap_err();
            assert!(matches!(err, ServiceError::Validation(_)), "{body}");
        }
    }

    #[test]
    fn keeps_values_as_provided() {
        let ok = NewClient::validate(&ClientInput::new("Ana Souza", 41, "sp")).unwrap();
        assert_eq!(ok.uf, "sp");
        assert_eq!(ok.nome, "Ana Souza");
    }
}
