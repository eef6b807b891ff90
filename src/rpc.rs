use crate::ApportionmentInput;
use bs58::encode;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const METHOD_CALCULATE: &str = "calculate";

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonRPCRequest {
    jsonrpc: String,
    #[serde(default)]
    id: String,
    method: String,
    #[serde(default)]
    params: Value,
}

impl JsonRPCRequest {
    pub fn new(input: &ApportionmentInput) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id: "".to_string(),
            method: METHOD_CALCULATE.to_string(),
            params: json!(input),
        }
    }

    pub fn id(&self) -> String {
        self.id.to_string()
    }

    pub fn input(&self) -> Result<ApportionmentInput, serde_json::Error> {
        serde_json::from_value(self.params.to_owned())
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonRPCResponse {
    jsonrpc: String,
    id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<Value>,
}

impl JsonRPCResponse {
    pub fn new(id: &str) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id: id.to_string(),
            result: None,
            error: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.result.is_some()
    }

    pub fn result(&mut self, r: &Value) {
        self.result = Some(r.to_owned());
    }

    pub fn error(&mut self, error: &str) {
        let value: Value = json!(error);
        self.error = Some(value);
    }
}

/// Base58 of the input hash, used as the response id when the caller sent
/// none.
pub fn fingerprint(input: &ApportionmentInput) -> String {
    encode(input.hash()).into_string()
}

pub fn calculate(request: &JsonRPCRequest) -> JsonRPCResponse {
    if request.method != METHOD_CALCULATE {
        let mut response = JsonRPCResponse::new(&request.id());
        response.error(&format!("unknown method: {}", request.method));
        return response;
    }

    let input = match request.input() {
        Ok(input) => input,
        Err(err) => {
            let mut response = JsonRPCResponse::new(&request.id());
            response.error(&format!("invalid input: {}", err));
            return response;
        }
    };

    let id = match request.id.is_empty() {
        true => fingerprint(&input),
        false => request.id(),
    };
    debug!("calculate {}", &id);

    let mut response = JsonRPCResponse::new(&id);
    match input.apportion() {
        Ok(apportionment) => {
            info!(
                "{}: quota {}, {} parties",
                &id,
                apportionment.quota,
                apportionment.results.len()
            );
            response.result(&json!(apportionment));
        }
        Err(err) => response.error(&err.to_string()),
    }
    response
}

#[cfg(test)]
mod rpc_test {

    use super::*;

    #[test]
    fn simple() {
        let request = JsonRPCRequest::new(&ApportionmentInput::dummy());
        let response = calculate(&request);

        assert!(response.is_success());
        assert_eq!(response.jsonrpc, "2.0");
        let result = response.result.unwrap();
        assert_eq!(result["quota"], 167);
        assert_eq!(result["totals"]["totalSeats"], 5);
    }

    #[test]
    fn id_from_fingerprint() {
        let input = ApportionmentInput::dummy();
        let first = calculate(&JsonRPCRequest::new(&input));
        let second = calculate(&JsonRPCRequest::new(&input));

        assert_eq!(first.id, fingerprint(&input));
        assert_eq!(first.id, second.id);
        assert_eq!(first.result, second.result);
    }

    #[test]
    fn keeps_caller_id() {
        let request: JsonRPCRequest = serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "id": "district-7",
            "method": "calculate",
            "params": {"totalValidVotes": 10, "seats": 1, "tally": {"A": 10}}
        }))
        .unwrap();
        let response = calculate(&request);
        assert_eq!(response.id, "district-7");
        assert!(response.is_success());
    }

    #[test]
    fn negative_seats() {
        let request: JsonRPCRequest = serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "method": "calculate",
            "params": {"totalValidVotes": 10, "seats": -1, "tally": {"A": 10}}
        }))
        .unwrap();
        let response = calculate(&request);
        assert!(!response.is_success());
        assert_eq!(
            response.error,
            Some(json!("invalid input: seat count must be >= 0, got -1"))
        );
    }

    #[test]
    fn bad_params() {
        let request: JsonRPCRequest = serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "id": "1",
            "method": "calculate",
            "params": {"totalValidVotes": 10, "seats": 1, "tally": {"A": 2.5}}
        }))
        .unwrap();
        let response = calculate(&request);
        assert!(!response.is_success());
        assert_eq!(response.id, "1");
        assert!(response.error.is_some());
    }

    #[test]
    fn unknown_method() {
        let request: JsonRPCRequest = serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "id": "1",
            "method": "tabulate",
        }))
        .unwrap();
        let response = calculate(&request);
        assert_eq!(response.error, Some(json!("unknown method: tabulate")));
    }

    #[test]
    fn response_json_omits_empty_fields() {
        let mut response = JsonRPCResponse::new("1");
        response.error("nope");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json, json!({"jsonrpc": "2.0", "id": "1", "error": "nope"}));
    }
}
