use serde::Deserialize;
use serde_json::{json, Value};

use super::*;

struct GetTargets;

#[derive(Debug, Deserialize, PartialEq)]
struct GetTargetsResult {
    #[serde(rename = "targetInfos")]
    target_infos: Vec<Value>,
}

impl Command for GetTargets {
    type Return = GetTargetsResult;

    fn request(&self) -> CdpRequestBody {
        CdpRequestBody {
            method: "Target.getTargets",
            params: None,
        }
    }

    fn decode(&self, value: Value) -> Result<Self::Return, CdpError> {
        serde_json::from_value(value).map_err(CdpError::from)
    }
}

struct Navigate {
    url: String,
}

#[derive(Debug, Deserialize, PartialEq)]
struct NavigateResult {
    #[serde(rename = "frameId")]
    frame_id: String,
}

impl Command for Navigate {
    type Return = NavigateResult;

    fn request(&self) -> CdpRequestBody {
        CdpRequestBody {
            method: "Page.navigate",
            params: Some(json!({ "url": self.url })),
        }
    }

    fn decode(&self, value: Value) -> Result<Self::Return, CdpError> {
        serde_json::from_value(value).map_err(CdpError::from)
    }
}

#[test]
fn parameterless_command_has_no_params() {
    let cmd = GetTargets;
    let req = cmd.request();
    assert_eq!(req.method, "Target.getTargets");
    assert!(req.params.is_none());
}

#[test]
fn parameterized_command_encodes_its_arguments() {
    let cmd = Navigate {
        url: "https://example.com".to_string(),
    };
    let req = cmd.request();
    assert_eq!(req.method, "Page.navigate");
    assert_eq!(req.params, Some(json!({ "url": "https://example.com" })));
}

#[test]
fn decode_maps_result_into_typed_return() {
    let cmd = Navigate {
        url: "https://example.com".to_string(),
    };
    let decoded = cmd
        .decode(json!({ "frameId": "F1" }))
        .expect("decode should succeed");
    assert_eq!(
        decoded,
        NavigateResult {
            frame_id: "F1".to_string()
        }
    );
}

#[test]
fn decode_surfaces_json_errors() {
    let cmd = Navigate {
        url: "https://example.com".to_string(),
    };
    let err = cmd.decode(json!({ "wrongField": 1 })).unwrap_err();
    assert!(matches!(err, CdpError::Json(_)));
}

#[test]
fn same_command_value_is_reusable_across_calls() {
    let cmd = GetTargets;
    let first = cmd.request();
    let second = cmd.request();
    assert_eq!(first.method, second.method);
}
