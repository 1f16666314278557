//! In-memory transport for client tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use rsuite_client::{ClientError, Request, Result, Transport};
use serde_json::Value;

/// Answers requests from canned responses keyed by resource
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<HashMap<String, std::result::Result<Value, String>>>,
    requests: Mutex<Vec<Request>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, resource: &str, body: Value) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(resource.to_string(), Ok(body));
        self
    }

    /// Answer `resource` with an API error document
    pub fn fail(self, resource: &str, code: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(resource.to_string(), Err(code.to_string()));
        self
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self, resource: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.resource == resource)
            .count()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: &Request) -> Result<Value> {
        self.requests.lock().unwrap().push(request.clone());

        match self.responses.lock().unwrap().get(&request.resource) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(code)) => Err(ClientError::Api {
                status: 400,
                code: code.clone(),
                message: "mock failure".to_string(),
                error_id: None,
            }),
            None => Err(ClientError::UnexpectedResponse(format!(
                "no mock response for {}",
                request.resource
            ))),
        }
    }
}
