use fedclient_protocol::*;
use serde_json::json;

fn sample_detail() -> serde_json::Value {
    json!({
        "session_data": {
            "organisation_name": "Acme Health",
            "model_name": "MLP",
            "model_info": {"optimizer": "sgd", "layers": [784, 200, 10]},
            "dataset_info": {"about_dataset": "digits"}
        },
        "test_results": {
            "round 0": {"a": 1, "b": 2},
            "round 1": {"a": 3, "b": 4}
        }
    })
}

#[test]
fn test_completed_trainings_decode() {
    let body = json!({
        "results": [
            {"session_id": "s-1", "org_name": "Acme"},
            {"session_id": "s-2", "org_name": "Globex"}
        ]
    });
    let trainings: CompletedTrainings = serde_json::from_value(body).unwrap();
    assert_eq!(trainings.results.len(), 2);
    assert_eq!(trainings.results[1].session_id, "s-2");
}

#[test]
fn test_completed_trainings_missing_results_is_empty() {
    let trainings: CompletedTrainings = serde_json::from_value(json!({})).unwrap();
    assert!(trainings.results.is_empty());
}

#[test]
fn test_found_detail_payload() {
    let payload = DetailPayload::from_value(sample_detail()).unwrap();
    let DetailPayload::Found(detail) = payload else {
        panic!("expected a session detail");
    };
    assert_eq!(detail.session_data.organisation_name, "Acme Health");
    assert_eq!(detail.session_data.model_name, "MLP");
    assert_eq!(detail.test_results.len(), 2);
    assert_eq!(detail.test_results.first().unwrap().metric("b"), Some(2.0));
}

#[test]
fn test_missing_info_defaults_to_null() {
    let payload = DetailPayload::from_value(json!({
        "session_data": {"organisation_name": "Acme", "model_name": "CNN"},
        "test_results": {}
    }))
    .unwrap();
    let DetailPayload::Found(detail) = payload else {
        panic!("expected a session detail");
    };
    assert!(detail.session_data.model_info.is_null());
    assert!(detail.session_data.dataset_info.is_null());
    assert!(detail.test_results.is_empty());
}

#[test]
fn test_round_must_be_object() {
    let err = DetailPayload::from_value(json!({
        "session_data": {"organisation_name": "Acme", "model_name": "CNN"},
        "test_results": {"round 0": 0.5}
    }))
    .unwrap_err();
    assert!(err.to_string().contains("round 0"), "error should name the round: {err}");
}
