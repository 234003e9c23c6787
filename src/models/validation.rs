use serde_json::{Map, Value};

const REQUIRED_FIELDS: [&str; 11] = [
    "resellerId",
    "notificationType",
    "clientId",
    "creatorId",
    "expertId",
    "complaintId",
    "complaintNumber",
    "consumptionId",
    "consumptionNumber",
    "agreementNumber",
    "date",
];

/// Outcome of validating a raw request payload.
///
/// `is_valid` is true only when `errors` is empty. `validated` can still hold
/// coerced values next to a non-empty error list: integer coercion runs
/// whenever at least one field validated, even if others failed. Existing
/// callers rely on that partial map, so it is kept as-is.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub validated: Map<String, Value>,
}

/// Checks every required field against the loose emptiness rule and copies
/// the ones that pass into the validated map. resellerId and notificationType
/// are coerced to integers afterwards.
pub fn validate_return_data(data: &Map<String, Value>) -> ValidationResult {
    let mut errors = Vec::new();
    let mut validated = Map::new();

    for field in REQUIRED_FIELDS {
        match data.get(field) {
            Some(value) if !is_empty_value(value) => {
                validated.insert(field.to_string(), value.clone());
            }
            _ => errors.push(format!("Empty {}", field)),
        }
    }

    if !validated.is_empty() {
        for field in ["resellerId", "notificationType"] {
            if let Some(coerced) = validated.get(field).and_then(as_int_loose) {
                validated.insert(field.to_string(), Value::from(coerced));
            }
        }
    }

    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
        validated,
    }
}

/// Loose emptiness: null, false, zero, empty string, the string "0",
/// empty array or object.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().map(|f| f == 0.0).unwrap_or(false),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Integer view of a value that may arrive as a number or a numeric string.
pub fn as_int_loose(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .ok()
            .or_else(|| s.trim().parse::<f64>().ok().map(|f| f as i64)),
        _ => None,
    }
}

/// String view of a scalar value; numbers render without formatting.
pub fn as_string_loose(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
