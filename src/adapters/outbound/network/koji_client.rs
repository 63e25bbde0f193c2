use super::xmlrpc::{self, MethodResponse, Value};
use crate::ports::outbound::BuildTracker;
use crate::shared::error::DiffError;
use crate::shared::security::{validate_size, MAX_RESPONSE_SIZE};
use crate::shared::Result;
use crate::version_diff::domain::{Build, BuildId};
use std::collections::BTreeMap;
use std::time::Duration;

/// KojiClient adapter for the Koji hub XML-RPC API
///
/// This adapter implements the BuildTracker port with blocking HTTP
/// requests. Transport errors, error statuses and faults are retried with
/// a linear back-off before being reported.
pub struct KojiClient {
    client: reqwest::blocking::Client,
    hub_url: String,
    max_retries: u32,
    retry_delay: Duration,
}

impl KojiClient {
    /// Creates a client for the hub at `hub_url`
    ///
    /// # Arguments
    /// * `hub_url` - XML-RPC endpoint (e.g., "https://koji.fedoraproject.org/kojihub")
    /// * `timeout` - Per-request timeout
    /// * `max_retries` - Attempts per call, at least one is always made
    pub fn new(hub_url: impl Into<String>, timeout: Duration, max_retries: u32) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("distro-diff/{}", version);
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            hub_url: hub_url.into(),
            max_retries: max_retries.max(1),
            retry_delay: Duration::from_millis(100),
        })
    }

    /// Overrides the base back-off delay (attempt `n` waits `n * delay`)
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    pub fn hub_url(&self) -> &str {
        &self.hub_url
    }

    /// Resolves a tag to its first inheritance parent
    ///
    /// `rawhide` is an alias whose first parent is the versioned tag
    /// (e.g., `f42`). Tags without parents resolve to themselves.
    pub fn resolve_inherited_tag(&self, tag: &str) -> Result<String> {
        let response = self.call("getFullInheritance", &[Value::from(tag)])?;
        let parent = response
            .as_array()
            .and_then(|parents| parents.first())
            .and_then(|first| first.get("name"))
            .and_then(Value::as_str);

        match parent {
            Some(name) => {
                tracing::debug!("Resolved tag {} to {}", tag, name);
                Ok(name.to_string())
            }
            None => Ok(tag.to_string()),
        }
    }

    /// Issues one XML-RPC call with retries
    fn call(&self, method: &str, params: &[Value]) -> Result<Value> {
        let body = xmlrpc::encode_call(method, params)?;
        let mut last_error = None;

        for attempt in 1..=self.max_retries {
            match self.call_once(method, &body) {
                Ok(value) => return Ok(value),
                Err(e) => {
                    tracing::debug!(
                        "{} attempt {}/{} failed: {:#}",
                        method,
                        attempt,
                        self.max_retries,
                        e
                    );
                    last_error = Some(e);
                    if attempt < self.max_retries {
                        std::thread::sleep(self.retry_delay * attempt);
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| anyhow::anyhow!("{} was never attempted", method)))
    }

    fn call_once(&self, method: &str, body: &str) -> Result<Value> {
        let response = self
            .client
            .post(&self.hub_url)
            .header(reqwest::header::CONTENT_TYPE, "text/xml")
            .body(body.to_string())
            .send()?;

        if !response.status().is_success() {
            anyhow::bail!("Koji hub returned status code {} for {}", response.status(), method);
        }
        if let Some(length) = response.content_length() {
            validate_size(length, "Koji response", MAX_RESPONSE_SIZE)?;
        }

        let text = response.text()?;
        validate_size(text.len() as u64, "Koji response", MAX_RESPONSE_SIZE)?;

        match xmlrpc::decode_response(&text)? {
            MethodResponse::Success(value) => Ok(value),
            MethodResponse::Fault { code, message } => Err(DiffError::XmlRpcFault {
                endpoint: self.hub_url.clone(),
                code,
                message,
            }
            .into()),
        }
    }

    fn build_from_value(value: &Value) -> Result<Build> {
        let text = |key: &str| -> Result<String> {
            value
                .get(key)
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| anyhow::anyhow!("Build record is missing '{}'", key))
        };

        let build_id = value
            .get("build_id")
            .or_else(|| value.get("id"))
            .and_then(Value::as_i64)
            .ok_or_else(|| anyhow::anyhow!("Build record is missing 'build_id'"))?;
        let epoch = value.get("epoch").and_then(Value::as_i64);

        let mut build = Build::new(text("name")?, text("version")?, text("release")?, BuildId::new(build_id))?
            .with_epoch(epoch);
        if let Some(nvr) = value.get("nvr").and_then(Value::as_str) {
            build = build.with_nvr(nvr.to_string());
        }
        Ok(build)
    }
}

impl BuildTracker for KojiClient {
    fn list_latest_tagged(&self, tag: &str, package: Option<&str>) -> Result<Vec<Build>> {
        // Keyword arguments travel as a trailing struct flagged with __starstar
        let mut kwargs = BTreeMap::new();
        kwargs.insert("__starstar".to_string(), Value::Bool(true));
        kwargs.insert("latest".to_string(), Value::Bool(true));
        if let Some(package) = package {
            kwargs.insert("package".to_string(), Value::from(package));
        }

        let response = self.call("listTagged", &[Value::from(tag), Value::Struct(kwargs)])?;
        let records = response
            .as_array()
            .ok_or_else(|| anyhow::anyhow!("listTagged did not return an array"))?;

        records.iter().map(Self::build_from_value).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    const LIST_TAGGED_RESPONSE: &str = r#"<?xml version='1.0'?>
<methodResponse><params><param><value><array><data>
<value><struct>
<member><name>build_id</name><value><int>2501</int></value></member>
<member><name>name</name><value><string>bash</string></value></member>
<member><name>version</name><value><string>5.2.26</string></value></member>
<member><name>release</name><value><string>3.fc42</string></value></member>
<member><name>nvr</name><value><string>bash-5.2.26-3.fc42</string></value></member>
<member><name>epoch</name><value><nil/></value></member>
</struct></value>
</data></array></value></param></params></methodResponse>"#;

    fn client(server: &Server, retries: u32) -> KojiClient {
        KojiClient::new(server.url(), Duration::from_secs(5), retries)
            .unwrap()
            .with_retry_delay(Duration::from_millis(1))
    }

    #[test]
    fn test_list_latest_tagged_for_package() {
        let mut server = Server::new();
        let mock = server
            .mock("POST", "/")
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex("<methodName>listTagged</methodName>".to_string()),
                Matcher::Regex("<name>package</name><value><string>bash</string>".to_string()),
                Matcher::Regex("<name>__starstar</name>".to_string()),
            ]))
            .with_status(200)
            .with_header("content-type", "text/xml")
            .with_body(LIST_TAGGED_RESPONSE)
            .create();

        let builds = client(&server, 1).list_latest_tagged("f42", Some("bash")).unwrap();

        mock.assert();
        assert_eq!(builds.len(), 1);
        assert_eq!(builds[0].name(), "bash");
        assert_eq!(builds[0].nvr(), "bash-5.2.26-3.fc42");
        assert_eq!(builds[0].build_id(), BuildId::new(2501));
        assert_eq!(builds[0].epoch(), None);
    }

    #[test]
    fn test_empty_listing_is_not_an_error() {
        let mut server = Server::new();
        let _mock = server
            .mock("POST", "/")
            .with_status(200)
            .with_body("<methodResponse><params><param><value><array><data></data></array></value></param></params></methodResponse>")
            .create();

        let builds = client(&server, 1).list_latest_tagged("eln", Some("nope")).unwrap();
        assert!(builds.is_empty());
    }

    #[test]
    fn test_server_error_is_retried_then_reported() {
        let mut server = Server::new();
        let mock = server.mock("POST", "/").with_status(503).expect(3).create();

        let err = client(&server, 3).list_latest_tagged("eln", None).unwrap_err();

        mock.assert();
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn test_fault_becomes_xmlrpc_fault_error() {
        let mut server = Server::new();
        let _mock = server
            .mock("POST", "/")
            .with_status(200)
            .with_body(
                "<methodResponse><fault><value><struct>\
                 <member><name>faultCode</name><value><int>1000</int></value></member>\
                 <member><name>faultString</name><value><string>No such tagInfo: 'nope'</string></value></member>\
                 </struct></value></fault></methodResponse>",
            )
            .create();

        let err = client(&server, 1).list_latest_tagged("nope", None).unwrap_err();
        match err.downcast_ref::<DiffError>() {
            Some(DiffError::XmlRpcFault { code, message, .. }) => {
                assert_eq!(*code, 1000);
                assert!(message.contains("No such tagInfo"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_resolve_inherited_tag() {
        let mut server = Server::new();
        let _mock = server
            .mock("POST", "/")
            .match_body(Matcher::Regex("getFullInheritance".to_string()))
            .with_status(200)
            .with_body(
                "<methodResponse><params><param><value><array><data>\
                 <value><struct><member><name>name</name><value><string>f42</string></value></member></struct></value>\
                 </data></array></value></param></params></methodResponse>",
            )
            .create();

        assert_eq!(client(&server, 1).resolve_inherited_tag("rawhide").unwrap(), "f42");
    }

    #[test]
    fn test_resolve_tag_without_parents() {
        let mut server = Server::new();
        let _mock = server
            .mock("POST", "/")
            .with_status(200)
            .with_body("<methodResponse><params><param><value><array><data></data></array></value></param></params></methodResponse>")
            .create();

        assert_eq!(client(&server, 1).resolve_inherited_tag("eln").unwrap(), "eln");
    }

    #[test]
    fn test_malformed_build_record() {
        let mut server = Server::new();
        let _mock = server
            .mock("POST", "/")
            .with_status(200)
            .with_body(
                "<methodResponse><params><param><value><array><data>\
                 <value><struct><member><name>name</name><value><string>bash</string></value></member></struct></value>\
                 </data></array></value></param></params></methodResponse>",
            )
            .create();

        let err = client(&server, 1).list_latest_tagged("eln", None).unwrap_err();
        assert!(err.to_string().contains("missing"));
    }
}
