use log::{debug, warn};
use reqwest::blocking::Client;
use reqwest::Method;
use serde_json::{json, Value};

use super::Browser;
use crate::error::UploadError;

pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:4444";

/// W3C identifier under which element references are returned.
const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

/// Minimal blocking W3C WebDriver client running a headless Firefox session.
#[derive(Debug)]
pub struct WebDriver {
    client: Client,
    session_url: String,
}

impl WebDriver {
    pub fn connect(base_url: &str) -> Result<Self, UploadError> {
        let client = Client::new();
        let capabilities = json!({
            "capabilities": {
                "alwaysMatch": {
                    "browserName": "firefox",
                    "moz:firefoxOptions": { "args": ["-headless"] }
                }
            }
        });

        let url = format!("{}/session", base_url.trim_end_matches('/'));
        let value = send(&client, Method::POST, &url, Some(capabilities))?;
        let session_id = value
            .get("sessionId")
            .and_then(Value::as_str)
            .ok_or_else(|| UploadError::Protocol("no session id in response".to_string()))?;
        debug!("started webdriver session {}", session_id);

        Ok(WebDriver {
            session_url: format!("{}/{}", url, session_id),
            client,
        })
    }

    fn command(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value, UploadError> {
        send(&self.client, method, &format!("{}{}", self.session_url, path), body)
    }
}

impl Browser for WebDriver {
    type Element = String;

    fn goto(&mut self, url: &str) -> Result<(), UploadError> {
        self.command(Method::POST, "/url", Some(json!({ "url": url })))?;
        Ok(())
    }

    fn title(&mut self) -> Result<String, UploadError> {
        let value = self.command(Method::GET, "/title", None)?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    fn find_all(&mut self, xpath: &str) -> Result<Vec<String>, UploadError> {
        let value = self.command(
            Method::POST,
            "/elements",
            Some(json!({ "using": "xpath", "value": xpath })),
        )?;
        let elements = value
            .as_array()
            .map(|elements| {
                elements
                    .iter()
                    .filter_map(|element| element.get(ELEMENT_KEY).and_then(Value::as_str))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        Ok(elements)
    }

    fn send_keys(&mut self, element: &String, text: &str) -> Result<(), UploadError> {
        self.command(
            Method::POST,
            &format!("/element/{}/value", element),
            Some(json!({ "text": text })),
        )?;
        Ok(())
    }

    fn click(&mut self, element: &String) -> Result<(), UploadError> {
        self.command(Method::POST, &format!("/element/{}/click", element), Some(json!({})))?;
        Ok(())
    }
}

impl Drop for WebDriver {
    fn drop(&mut self) {
        if let Err(err) = self.command(Method::DELETE, "", None) {
            warn!("failed to close webdriver session: {}", err);
        }
    }
}

fn send(client: &Client, method: Method, url: &str, body: Option<Value>) -> Result<Value, UploadError> {
    let mut request = client.request(method, url);
    if let Some(body) = body {
        request = request.json(&body);
    }
    let response = request.send()?;
    let status = response.status();
    let mut payload: Value = response.json()?;
    let value = payload.get_mut("value").map(Value::take).unwrap_or(Value::Null);

    if !status.is_success() {
        let message = value
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("unknown error");
        return Err(UploadError::Protocol(format!("{}: {}", status, message)));
    }
    Ok(value)
}
