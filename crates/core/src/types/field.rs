use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};
use time::macros::format_description;

use crate::error::FieldError;

/// The closed set of form element kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldType {
    Text,
    Date,
    Signature,
    Checkbox,
}

impl FieldType {
    pub const ALL: [FieldType; 4] = [
        FieldType::Text,
        FieldType::Date,
        FieldType::Signature,
        FieldType::Checkbox,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::Text => "TEXT",
            FieldType::Date => "DATE",
            FieldType::Signature => "SIGNATURE",
            FieldType::Checkbox => "CHECKBOX",
        }
    }

    /// The kind of value a contract field of this type holds.
    pub fn value_kind(self) -> ValueKind {
        match self {
            FieldType::Checkbox => ValueKind::Boolean,
            FieldType::Text | FieldType::Date | FieldType::Signature => ValueKind::Text,
        }
    }

    /// Value given to a freshly instantiated contract field.
    pub fn default_value(self) -> FieldValue {
        match self.value_kind() {
            ValueKind::Boolean => FieldValue::Checked(false),
            ValueKind::Text => FieldValue::Text(String::new()),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!("unknown field type '{s}' (expected TEXT, DATE, SIGNATURE or CHECKBOX)")
            })
    }
}

/// String-valued or boolean-valued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Text,
    Boolean,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Text => f.write_str("string"),
            ValueKind::Boolean => f.write_str("boolean"),
        }
    }
}

/// The value held by a contract field.
///
/// Serialized untagged: a JSON string for TEXT/DATE/SIGNATURE fields and a
/// JSON boolean for CHECKBOX fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Checked(bool),
}

impl FieldValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            FieldValue::Text(_) => ValueKind::Text,
            FieldValue::Checked(_) => ValueKind::Boolean,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Checked(_) => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Checked(b) => Some(*b),
            FieldValue::Text(_) => None,
        }
    }

    /// Read user input as a value for `field`.
    ///
    /// Checkboxes accept `true`/`false`; dates accept `YYYY-MM-DD` or the
    /// empty string; text and signature fields take the input verbatim.
    pub fn parse_for(field: &FieldDef, raw: &str) -> Result<FieldValue, FieldError> {
        let invalid = |reason: String| FieldError::InvalidValue {
            field_id: field.id.clone(),
            field_type: field.field_type,
            reason,
        };
        match field.field_type {
            FieldType::Checkbox => match raw.trim().to_ascii_lowercase().as_str() {
                "true" => Ok(FieldValue::Checked(true)),
                "false" => Ok(FieldValue::Checked(false)),
                other => Err(invalid(format!("expected true or false, got '{other}'"))),
            },
            FieldType::Date if !raw.is_empty() => {
                let format = format_description!("[year]-[month]-[day]");
                time::Date::parse(raw, format)
                    .map_err(|e| invalid(format!("expected YYYY-MM-DD: {e}")))?;
                Ok(FieldValue::Text(raw.to_string()))
            }
            FieldType::Text | FieldType::Date | FieldType::Signature => {
                Ok(FieldValue::Text(raw.to_string()))
            }
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Checked(b) => write!(f, "{b}"),
        }
    }
}

/// Layout position inside the blueprint preview area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Preview area is 300 wide and 80 tall.
    pub const MAX_X: i32 = 300;
    pub const MAX_Y: i32 = 80;

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// A random spot inside the preview area.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self {
            x: rng.gen_range(0..Self::MAX_X),
            y: rng.gen_range(0..Self::MAX_Y),
        }
    }
}

/// A field as declared on a blueprint: no value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    pub id: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    pub position: Position,
}

impl FieldDef {
    pub fn new(
        id: impl Into<String>,
        field_type: FieldType,
        label: impl Into<String>,
        position: Position,
    ) -> Self {
        Self {
            id: id.into(),
            field_type,
            label: label.into(),
            position,
        }
    }
}

/// A field on a contract: a blueprint field plus a value of the matching kind.
///
/// The value/type agreement is checked on construction, on every update and
/// when decoding stored JSON, so a `ContractField` can never hold a boolean
/// in a text field or the reverse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawContractField")]
pub struct ContractField {
    #[serde(flatten)]
    def: FieldDef,
    value: FieldValue,
}

#[derive(Deserialize)]
struct RawContractField {
    #[serde(flatten)]
    def: FieldDef,
    value: FieldValue,
}

impl TryFrom<RawContractField> for ContractField {
    type Error = FieldError;

    fn try_from(raw: RawContractField) -> Result<Self, Self::Error> {
        ContractField::new(raw.def, raw.value)
    }
}

impl ContractField {
    pub fn new(def: FieldDef, value: FieldValue) -> Result<Self, FieldError> {
        check_kind(&def, &value)?;
        Ok(Self { def, value })
    }

    /// A field holding its type's default value.
    pub fn with_default(def: FieldDef) -> Self {
        let value = def.field_type.default_value();
        Self { def, value }
    }

    pub fn id(&self) -> &str {
        &self.def.id
    }

    pub fn field_type(&self) -> FieldType {
        self.def.field_type
    }

    pub fn label(&self) -> &str {
        &self.def.label
    }

    pub fn position(&self) -> Position {
        self.def.position
    }

    pub fn definition(&self) -> &FieldDef {
        &self.def
    }

    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    pub fn set_value(&mut self, value: FieldValue) -> Result<(), FieldError> {
        check_kind(&self.def, &value)?;
        self.value = value;
        Ok(())
    }
}

fn check_kind(def: &FieldDef, value: &FieldValue) -> Result<(), FieldError> {
    let expected = def.field_type.value_kind();
    if value.kind() != expected {
        return Err(FieldError::KindMismatch {
            field_id: def.id.clone(),
            field_type: def.field_type,
            expected,
            got: value.kind(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn def(field_type: FieldType) -> FieldDef {
        FieldDef::new("f1", field_type, "Label", Position::new(10, 20))
    }

    #[test]
    fn field_types_serialize_upper_case() {
        assert_eq!(serde_json::to_value(FieldType::Signature).unwrap(), json!("SIGNATURE"));
        let parsed: FieldType = serde_json::from_value(json!("CHECKBOX")).unwrap();
        assert_eq!(parsed, FieldType::Checkbox);
    }

    #[test]
    fn field_type_from_str_is_case_insensitive() {
        assert_eq!("date".parse::<FieldType>().unwrap(), FieldType::Date);
        assert!("radio".parse::<FieldType>().is_err());
    }

    #[test]
    fn checkbox_rejects_text_value() {
        let err = ContractField::new(def(FieldType::Checkbox), FieldValue::Text("yes".into()))
            .unwrap_err();
        assert_eq!(
            err,
            FieldError::KindMismatch {
                field_id: "f1".into(),
                field_type: FieldType::Checkbox,
                expected: ValueKind::Boolean,
                got: ValueKind::Text,
            }
        );
    }

    #[test]
    fn set_value_keeps_old_value_on_mismatch() {
        let mut field = ContractField::with_default(def(FieldType::Text));
        assert!(field.set_value(FieldValue::Checked(true)).is_err());
        assert_eq!(field.value(), &FieldValue::Text(String::new()));
        field.set_value(FieldValue::Text("Acme".into())).unwrap();
        assert_eq!(field.value().as_text(), Some("Acme"));
    }

    #[test]
    fn contract_field_json_is_flat() {
        let field = ContractField::with_default(def(FieldType::Checkbox));
        assert_eq!(
            serde_json::to_value(&field).unwrap(),
            json!({
                "id": "f1",
                "type": "CHECKBOX",
                "label": "Label",
                "position": {"x": 10, "y": 20},
                "value": false
            })
        );
    }

    #[test]
    fn decoding_rejects_mismatched_stored_value() {
        let stored = json!({
            "id": "f1",
            "type": "DATE",
            "label": "Effective",
            "position": {"x": 0, "y": 0},
            "value": true
        });
        assert!(serde_json::from_value::<ContractField>(stored).is_err());
    }

    #[test]
    fn blueprint_field_has_no_value_key() {
        let encoded = serde_json::to_value(def(FieldType::Text)).unwrap();
        assert!(encoded.get("value").is_none());
    }

    #[test]
    fn parse_for_reads_checkbox_and_date() {
        let checkbox = def(FieldType::Checkbox);
        assert_eq!(
            FieldValue::parse_for(&checkbox, "TRUE").unwrap(),
            FieldValue::Checked(true)
        );
        assert!(FieldValue::parse_for(&checkbox, "maybe").is_err());

        let date = def(FieldType::Date);
        assert_eq!(
            FieldValue::parse_for(&date, "2025-02-28").unwrap(),
            FieldValue::Text("2025-02-28".into())
        );
        assert_eq!(
            FieldValue::parse_for(&date, "").unwrap(),
            FieldValue::Text(String::new())
        );
        assert!(FieldValue::parse_for(&date, "2025-02-30").is_err());
        assert!(FieldValue::parse_for(&date, "28/02/2025").is_err());
    }

    #[test]
    fn random_position_stays_in_preview() {
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let p = Position::random(&mut rng);
            assert!((0..Position::MAX_X).contains(&p.x));
            assert!((0..Position::MAX_Y).contains(&p.y));
        }
    }
}
