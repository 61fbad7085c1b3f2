//! In-memory [`Gateway`] serving canned responses, for unit tests.

use super::Gateway;
use crate::error::{Error, Result};
use reqwest::{Method, StatusCode};
use std::sync::Mutex;

/// One recorded call: method, path and query pairs
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl Call {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

struct Route {
    method: Method,
    path: String,
    search: Option<String>,
    status: StatusCode,
    body: String,
}

/// Routes match on method, path and (optionally) the `search` query value.
#[derive(Default)]
pub struct FakeGateway {
    routes: Vec<Route>,
    calls: Mutex<Vec<Call>>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(
        mut self,
        method: Method,
        path: &str,
        search: Option<&str>,
        status: u16,
        body: impl Into<String>,
    ) -> Self {
        self.routes.push(Route {
            method,
            path: path.to_string(),
            search: search.map(str::to_string),
            status: StatusCode::from_u16(status).unwrap(),
            body: body.into(),
        });
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

impl Gateway for FakeGateway {
    async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&[u8]>,
    ) -> Result<Vec<u8>> {
        let call = Call {
            method: method.clone(),
            path: path.to_string(),
            query: query
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body: body.map(<[u8]>::to_vec),
        };
        let search = call.param("search").map(str::to_string);
        self.calls.lock().unwrap().push(call);

        let route = self.routes.iter().find(|r| {
            r.method == method
                && r.path == path
                && (r.search.is_none() || r.search == search)
        });
        let (status, body) = match route {
            Some(route) => (route.status, route.body.clone()),
            None => (StatusCode::NOT_FOUND, format!("no route for {} {}", method, path)),
        };

        if !status.is_success() {
            return Err(Error::Api {
                method,
                path: path.to_string(),
                status,
                body,
            });
        }
        Ok(body.into_bytes())
    }
}
