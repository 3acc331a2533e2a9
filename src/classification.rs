//! Inspection of the `Status` envelope returned by lookup endpoints.
//!
//! A parsed response is turned into an [`AttemptOutcome`], which tells the
//! retry loop whether to return the body, fail right away, or try again.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::datasets::EntityType;
use crate::errors::BigDataError;

/// Login sub-status code meaning the subscription has expired.
pub const EXPIRED_LOGIN_CODE: i64 = -101;

/// How nonzero dataset status codes are turned into errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationMode {
    /// Map codes onto the full error taxonomy by numeric range.
    #[default]
    RangeClassified,
    /// Legacy behaviour: every nonzero code is an invalid document.
    InvalidDocument,
}

/// Result of inspecting one attempt's response.
#[derive(Debug, Clone, PartialEq)]
pub enum AttemptOutcome {
    /// Status code 0, carries the full response body.
    Matched(Value),
    /// Classified failure; must not be retried.
    Rejected(BigDataError),
    /// Unusable response; the text is recorded and the attempt retried.
    Retry(String),
}

/// Range a nonzero dataset status code falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Success,
    InvalidInput,
    LoginProblem,
    ApiProblem,
    OnDemandQueries,
    MonitoringApi,
    Unmapped,
}

pub fn classify_code(code: i64) -> StatusClass {
    match code {
        0 => StatusClass::Success,
        -202..=-100 => StatusClass::InvalidInput,
        -1002..=-1000 => StatusClass::LoginProblem,
        -2999..=-2000 => StatusClass::ApiProblem,
        -1999..=-1200 => StatusClass::OnDemandQueries,
        c if c <= -3000 => StatusClass::MonitoringApi,
        _ => StatusClass::Unmapped,
    }
}

/// Inspects a decoded lookup response for `dataset`.
pub fn inspect_response(
    body: Value,
    entity: EntityType,
    dataset: &str,
    document: &str,
    mode: ClassificationMode,
) -> AttemptOutcome {
    let status_data = match body.get("Status") {
        Some(status) => status,
        None => return AttemptOutcome::Retry("response is missing 'Status'".to_string()),
    };

    if entity == EntityType::People {
        if let Some(validation) = status_data.get("date_of_birth_validation") {
            let payload = validation.get(0).unwrap_or(validation).clone();
            return AttemptOutcome::Rejected(BigDataError::MinorDocument(payload));
        }
    }

    if let Some(login) = status_data.get("login") {
        if first_code(login) == Some(EXPIRED_LOGIN_CODE) {
            return AttemptOutcome::Rejected(BigDataError::LoginProblem {
                message: "BigBoost user has expired".to_string(),
                payload: json!({ "login": login[0].clone() }),
            });
        }
    }

    let status = match status_data.get(dataset).and_then(|entries| entries.get(0)) {
        Some(status) => status.clone(),
        None => {
            return AttemptOutcome::Retry(format!("response has no status for '{}'", dataset))
        }
    };
    let code = match status.get("Code").and_then(Value::as_i64) {
        Some(code) => code,
        None => {
            return AttemptOutcome::Retry(format!(
                "status for '{}' has no integer 'Code'",
                dataset
            ))
        }
    };

    if code == 0 {
        return AttemptOutcome::Matched(body);
    }

    let mut payload = serde_json::Map::new();
    payload.insert("bigdata_status".to_string(), status);
    payload.insert(entity.document_label().to_string(), json!(document));
    let payload = Value::Object(payload);

    let error = match mode {
        ClassificationMode::InvalidDocument => BigDataError::InvalidDocument {
            message: format!("{} is invalid", entity.document_label()),
            payload,
        },
        ClassificationMode::RangeClassified => match classify_code(code) {
            StatusClass::InvalidInput => BigDataError::InvalidInput(payload),
            StatusClass::LoginProblem => BigDataError::LoginProblem {
                message: "error related to login problem".to_string(),
                payload,
            },
            StatusClass::ApiProblem => BigDataError::ApiProblem(payload),
            StatusClass::OnDemandQueries => BigDataError::OnDemandQueries(payload),
            StatusClass::MonitoringApi => BigDataError::MonitoringApi(payload),
            // Success was handled above
            StatusClass::Unmapped | StatusClass::Success => BigDataError::Unmapped(payload),
        },
    };

    AttemptOutcome::Rejected(error)
}

fn first_code(entries: &Value) -> Option<i64> {
    entries.get(0)?.get("Code")?.as_i64()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(dataset: &str, code: i64) -> Value {
        json!({
            "Result": [{ "MatchKeys": "doc{123}" }],
            "Status": { dataset: [{ "Code": code, "Message": "msg" }] }
        })
    }

    fn inspect(body: Value, entity: EntityType) -> AttemptOutcome {
        inspect_response(
            body,
            entity,
            "basic_data",
            "123",
            ClassificationMode::RangeClassified,
        )
    }

    #[test]
    fn test_classify_code_ranges() {
        assert_eq!(classify_code(0), StatusClass::Success);
        assert_eq!(classify_code(-100), StatusClass::InvalidInput);
        assert_eq!(classify_code(-150), StatusClass::InvalidInput);
        assert_eq!(classify_code(-202), StatusClass::InvalidInput);
        assert_eq!(classify_code(-203), StatusClass::Unmapped);
        assert_eq!(classify_code(-99), StatusClass::Unmapped);
        assert_eq!(classify_code(-1000), StatusClass::LoginProblem);
        assert_eq!(classify_code(-1002), StatusClass::LoginProblem);
        assert_eq!(classify_code(-1003), StatusClass::Unmapped);
        assert_eq!(classify_code(-1200), StatusClass::OnDemandQueries);
        assert_eq!(classify_code(-1999), StatusClass::OnDemandQueries);
        assert_eq!(classify_code(-2000), StatusClass::ApiProblem);
        assert_eq!(classify_code(-2999), StatusClass::ApiProblem);
        assert_eq!(classify_code(-3000), StatusClass::MonitoringApi);
        assert_eq!(classify_code(-99999), StatusClass::MonitoringApi);
        assert_eq!(classify_code(1), StatusClass::Unmapped);
    }

    #[test]
    fn test_success_returns_full_body() {
        let body = response("basic_data", 0);
        assert_eq!(
            inspect(body.clone(), EntityType::People),
            AttemptOutcome::Matched(body)
        );
    }

    #[test]
    fn test_invalid_input_payload() {
        match inspect(response("basic_data", -150), EntityType::People) {
            AttemptOutcome::Rejected(BigDataError::InvalidInput(payload)) => {
                assert_eq!(payload["bigdata_status"]["Code"], -150);
                assert_eq!(payload["cpf"], "123");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_company_payload_uses_cnpj_key() {
        match inspect(response("basic_data", -2500), EntityType::Companies) {
            AttemptOutcome::Rejected(BigDataError::ApiProblem(payload)) => {
                assert_eq!(payload["cnpj"], "123");
                assert!(payload.get("cpf").is_none());
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_minor_validation_wins_over_success_code() {
        let mut body = response("basic_data", 0);
        body["Status"]["date_of_birth_validation"] = json!([{ "Code": -1, "Message": "minor" }]);
        match inspect(body, EntityType::People) {
            AttemptOutcome::Rejected(BigDataError::MinorDocument(payload)) => {
                assert_eq!(payload["Message"], "minor");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_minor_validation_ignored_for_companies() {
        let mut body = response("basic_data", 0);
        body["Status"]["date_of_birth_validation"] = json!([{ "Code": -1 }]);
        assert!(matches!(
            inspect(body, EntityType::Companies),
            AttemptOutcome::Matched(_)
        ));
    }

    #[test]
    fn test_expired_login() {
        let mut body = response("basic_data", 0);
        body["Status"]["login"] = json!([{ "Code": EXPIRED_LOGIN_CODE }]);
        match inspect(body, EntityType::Companies) {
            AttemptOutcome::Rejected(err @ BigDataError::LoginProblem { .. }) => {
                assert_eq!(err.message(), "BigBoost user has expired");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_other_login_codes_fall_through() {
        let mut body = response("basic_data", 0);
        body["Status"]["login"] = json!([{ "Code": 0 }]);
        assert!(matches!(
            inspect(body, EntityType::People),
            AttemptOutcome::Matched(_)
        ));
    }

    #[test]
    fn test_malformed_envelopes_are_retried() {
        let bodies = [
            json!({}),
            json!({ "Status": {} }),
            json!({ "Status": { "basic_data": [] } }),
            json!({ "Status": { "basic_data": [{ "Message": "no code" }] } }),
            json!({ "Status": { "basic_data": [{ "Code": "0" }] } }),
        ];
        for body in bodies {
            assert!(
                matches!(inspect(body.clone(), EntityType::People), AttemptOutcome::Retry(_)),
                "expected retry for {}",
                body
            );
        }
    }

    #[test]
    fn test_legacy_mode_collapses_codes() {
        for code in [-150, -1001, -2500, -5000, 7] {
            let outcome = inspect_response(
                response("basic_data", code),
                EntityType::People,
                "basic_data",
                "123",
                ClassificationMode::InvalidDocument,
            );
            match outcome {
                AttemptOutcome::Rejected(err @ BigDataError::InvalidDocument { .. }) => {
                    assert_eq!(err.message(), "cpf is invalid");
                    assert_eq!(err.payload()["bigdata_status"]["Code"], code);
                }
                other => panic!("unexpected outcome for {}: {:?}", code, other),
            }
        }
    }
}
