//! Row coercion
//!
//! Turns untyped input into typed rows. CSV rows arrive as positional string
//! fields, batch records as JSON objects. Blank values become `NULL`, except
//! for `id` which every table needs.
//!
//! Coercion never fails the whole load: every error here is a per-row
//! [`CoerceError`] that the caller records and skips.

use roster_common::{types::EMPLOYEE_RECORD_KEYS, EntityKind};
use serde_json::{Map, Value};

/// A hired employee ready for insertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeRow {
    pub id: i32,
    pub name: Option<String>,
    /// Passed through untouched; PostgreSQL parses it on insert
    pub hired_at: Option<String>,
    pub department_id: Option<i32>,
    pub job_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentRow {
    pub id: i32,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRow {
    pub id: i32,
    pub title: Option<String>,
}

/// Typed row for any of the three tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoercedRow {
    Employee(EmployeeRow),
    Department(DepartmentRow),
    Job(JobRow),
}

impl CoercedRow {
    pub fn id(&self) -> i32 {
        match self {
            CoercedRow::Employee(row) => row.id,
            CoercedRow::Department(row) => row.id,
            CoercedRow::Job(row) => row.id,
        }
    }
}

/// Why a single row or record was skipped
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoerceError {
    #[error("Conversion error - {field} is not a valid {expected}: {value}")]
    Conversion {
        field: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("Conversion error - id cannot be empty")]
    MissingId,

    #[error("Missing keys - {}", .0.join(", "))]
    MissingKeys(Vec<&'static str>),

    #[error("Conversion error - record is not a JSON object")]
    NotAnObject,
}

// ============================================================================
// Scalar helpers
// ============================================================================

fn optional_int(field: &'static str, raw: &str) -> Result<Option<i32>, CoerceError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<i32>()
        .map(Some)
        .map_err(|_| CoerceError::Conversion {
            field,
            expected: "integer",
            value: raw.to_string(),
        })
}

fn optional_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn required_id(id: Option<i32>) -> Result<i32, CoerceError> {
    id.ok_or(CoerceError::MissingId)
}

fn json_int(field: &'static str, value: &Value) -> Result<Option<i32>, CoerceError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => optional_int(field, s),
        Value::Number(n) => n
            .as_i64()
            .and_then(|v| i32::try_from(v).ok())
            .map(Some)
            .ok_or_else(|| CoerceError::Conversion {
                field,
                expected: "integer",
                value: n.to_string(),
            }),
        other => Err(CoerceError::Conversion {
            field,
            expected: "integer",
            value: other.to_string(),
        }),
    }
}

fn json_text(field: &'static str, value: &Value) -> Result<Option<String>, CoerceError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(optional_text(s)),
        other => Err(CoerceError::Conversion {
            field,
            expected: "string",
            value: other.to_string(),
        }),
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Coerce one positional CSV row
///
/// Short rows are treated as if padded with empty strings; extra trailing
/// fields are ignored.
pub fn coerce_row<S: AsRef<str>>(kind: EntityKind, fields: &[S]) -> Result<CoercedRow, CoerceError> {
    let field = |i: usize| fields.get(i).map(|s| s.as_ref()).unwrap_or("");

    match kind {
        EntityKind::HiredEmployees => Ok(CoercedRow::Employee(EmployeeRow {
            id: required_id(optional_int("id", field(0))?)?,
            name: optional_text(field(1)),
            hired_at: optional_text(field(2)),
            department_id: optional_int("department_id", field(3))?,
            job_id: optional_int("job_id", field(4))?,
        })),
        EntityKind::Departments => Ok(CoercedRow::Department(DepartmentRow {
            id: required_id(optional_int("id", field(0))?)?,
            name: optional_text(field(1)),
        })),
        EntityKind::Jobs => Ok(CoercedRow::Job(JobRow {
            id: required_id(optional_int("id", field(0))?)?,
            title: optional_text(field(1)),
        })),
    }
}

/// Coerce one employee record from a batch payload
///
/// All of `id`, `name`, `datetime`, `department_id` and `job_id` must be
/// present (their values may be null or blank).
pub fn coerce_record(record: &Value) -> Result<EmployeeRow, CoerceError> {
    let object: &Map<String, Value> = record.as_object().ok_or(CoerceError::NotAnObject)?;

    let missing: Vec<&'static str> = EMPLOYEE_RECORD_KEYS
        .iter()
        .copied()
        .filter(|key| !object.contains_key(*key))
        .collect();
    if !missing.is_empty() {
        return Err(CoerceError::MissingKeys(missing));
    }

    Ok(EmployeeRow {
        id: required_id(json_int("id", &object["id"])?)?,
        name: json_text("name", &object["name"])?,
        hired_at: json_text("datetime", &object["datetime"])?,
        department_id: json_int("department_id", &object["department_id"])?,
        job_id: json_int("job_id", &object["job_id"])?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_employee_row() {
        let row = coerce_row(
            EntityKind::HiredEmployees,
            &["4535", " Marcelo Gonzalez ", "2021-07-27T16:02:08Z", "1", "2"],
        )
        .unwrap();

        assert_eq!(
            row,
            CoercedRow::Employee(EmployeeRow {
                id: 4535,
                name: Some("Marcelo Gonzalez".to_string()),
                hired_at: Some("2021-07-27T16:02:08Z".to_string()),
                department_id: Some(1),
                job_id: Some(2),
            })
        );
    }

    #[test]
    fn test_short_employee_row_is_padded_with_nulls() {
        let row = coerce_row(EntityKind::HiredEmployees, &["7", "Ana"]).unwrap();
        assert_eq!(
            row,
            CoercedRow::Employee(EmployeeRow {
                id: 7,
                name: Some("Ana".to_string()),
                hired_at: None,
                department_id: None,
                job_id: None,
            })
        );
    }

    #[test]
    fn test_blank_fields_become_null() {
        let row = coerce_row(EntityKind::HiredEmployees, &["8", "  ", "", " ", ""]).unwrap();
        let CoercedRow::Employee(employee) = row else {
            panic!("expected an employee row");
        };
        assert_eq!(employee.name, None);
        assert_eq!(employee.hired_at, None);
        assert_eq!(employee.department_id, None);
        assert_eq!(employee.job_id, None);
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let row = coerce_row(EntityKind::Jobs, &["3", "Recruiter", "unexpected"]).unwrap();
        assert_eq!(
            row,
            CoercedRow::Job(JobRow {
                id: 3,
                title: Some("Recruiter".to_string()),
            })
        );
    }

    #[test]
    fn test_department_with_blank_id_is_rejected() {
        let err = coerce_row(EntityKind::Departments, &["", "Engineering"]).unwrap_err();
        assert_eq!(err, CoerceError::MissingId);
    }

    #[test]
    fn test_department_with_id_is_accepted() {
        let row = coerce_row(EntityKind::Departments, &["3", "Engineering"]).unwrap();
        assert_eq!(row.id(), 3);
        assert_eq!(
            row,
            CoercedRow::Department(DepartmentRow {
                id: 3,
                name: Some("Engineering".to_string()),
            })
        );
    }

    #[test]
    fn test_non_numeric_ids_are_conversion_errors() {
        let cases: [(&[&str], &str); 3] = [
            (&["abc", "x", "", "1", "1"], "id"),
            (&["1", "x", "", "dept", "1"], "department_id"),
            (&["1", "x", "", "1", "4.5"], "job_id"),
        ];
        for (fields, expected_field) in cases {
            match coerce_row(EntityKind::HiredEmployees, fields) {
                Err(CoerceError::Conversion { field, .. }) => assert_eq!(field, expected_field),
                other => panic!("expected conversion error for {expected_field}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_integer_overflow_is_conversion_error() {
        let err = coerce_row(EntityKind::Jobs, &["99999999999", "Analyst"]).unwrap_err();
        assert!(matches!(err, CoerceError::Conversion { field: "id", .. }));
    }

    #[test]
    fn test_integers_are_trimmed() {
        let row = coerce_row(EntityKind::Jobs, &[" 12 ", "Analyst"]).unwrap();
        assert_eq!(row.id(), 12);
    }

    #[test]
    fn test_conversion_error_message_echoes_value() {
        let err = coerce_row(EntityKind::Departments, &["x1", "Sales"]).unwrap_err();
        assert_eq!(err.to_string(), "Conversion error - id is not a valid integer: x1");
    }

    #[test]
    fn test_record_with_all_keys() {
        let record = json!({
            "id": 5001,
            "name": "Test User",
            "datetime": "2021-08-01T10:00:00Z",
            "department_id": 1,
            "job_id": "1"
        });
        assert_eq!(
            coerce_record(&record).unwrap(),
            EmployeeRow {
                id: 5001,
                name: Some("Test User".to_string()),
                hired_at: Some("2021-08-01T10:00:00Z".to_string()),
                department_id: Some(1),
                job_id: Some(1),
            }
        );
    }

    #[test]
    fn test_record_with_blank_values() {
        let record = json!({
            "id": "5002",
            "name": "",
            "datetime": "",
            "department_id": "",
            "job_id": null
        });
        let row = coerce_record(&record).unwrap();
        assert_eq!(row.id, 5002);
        assert_eq!(row.name, None);
        assert_eq!(row.hired_at, None);
        assert_eq!(row.department_id, None);
        assert_eq!(row.job_id, None);
    }

    #[test]
    fn test_record_missing_job_id() {
        let record = json!({
            "id": 1,
            "name": "No Job",
            "datetime": "2021-01-01T00:00:00Z",
            "department_id": 1
        });
        let err = coerce_record(&record).unwrap_err();
        assert_eq!(err, CoerceError::MissingKeys(vec!["job_id"]));
        assert_eq!(err.to_string(), "Missing keys - job_id");
    }

    #[test]
    fn test_record_missing_several_keys_lists_them_in_order() {
        let err = coerce_record(&json!({ "name": "x" })).unwrap_err();
        assert_eq!(
            err,
            CoerceError::MissingKeys(vec!["id", "datetime", "department_id", "job_id"])
        );
    }

    #[test]
    fn test_record_with_null_id_is_rejected() {
        let record = json!({
            "id": null,
            "name": "x",
            "datetime": "",
            "department_id": 1,
            "job_id": 1
        });
        assert_eq!(coerce_record(&record).unwrap_err(), CoerceError::MissingId);
    }

    #[test]
    fn test_record_with_wrong_types() {
        let fractional = json!({
            "id": 1.5, "name": "x", "datetime": "", "department_id": 1, "job_id": 1
        });
        assert!(matches!(
            coerce_record(&fractional),
            Err(CoerceError::Conversion { field: "id", .. })
        ));

        let numeric_name = json!({
            "id": 1, "name": 42, "datetime": "", "department_id": 1, "job_id": 1
        });
        assert!(matches!(
            coerce_record(&numeric_name),
            Err(CoerceError::Conversion { field: "name", expected: "string", .. })
        ));

        let boolean_dept = json!({
            "id": 1, "name": "x", "datetime": "", "department_id": true, "job_id": 1
        });
        assert!(matches!(
            coerce_record(&boolean_dept),
            Err(CoerceError::Conversion { field: "department_id", .. })
        ));
    }

    #[test]
    fn test_non_object_record() {
        assert_eq!(coerce_record(&json!([1, 2, 3])).unwrap_err(), CoerceError::NotAnObject);
        assert_eq!(coerce_record(&json!("row")).unwrap_err(), CoerceError::NotAnObject);
    }
}
