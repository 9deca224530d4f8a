#![allow(dead_code)]

use fedclient_protocol::{DetailPayload, SessionDetail, TestResults};
use serde_json::{json, Value};

pub fn two_rounds() -> TestResults {
    serde_json::from_value(json!({
        "round 0": {"a": 1, "b": 2},
        "round 1": {"a": 3, "b": 4}
    }))
    .unwrap()
}

pub fn detail_value() -> Value {
    json!({
        "session_data": {
            "organisation_name": "Acme Health",
            "model_name": "MLP",
            "model_info": {"optimizer": "sgd", "layers": [784, {"units": 10}]},
            "dataset_info": {"about_dataset": "digits", "rows": null}
        },
        "test_results": {
            "round 0": {"a": 1, "b": 2},
            "round 1": {"a": 3, "b": 4}
        }
    })
}

pub fn detail() -> SessionDetail {
    match DetailPayload::from_value(detail_value()).unwrap() {
        DetailPayload::Found(detail) => *detail,
        DetailPayload::Missing => panic!("fixture must not be empty"),
    }
}
