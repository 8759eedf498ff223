use crate::config_xml::encoding::{decode_xml, encode_xml};
use crate::jenkins::error::{classify_status, JenkinsApiError};
use crate::jenkins::jenkins_endpoint::get_crumb::GetCrumb;
use crate::jenkins::jenkins_endpoint::ping::{Ping, PingResult};
use crate::jenkins::jenkins_model::crumb::Crumb;
use base64::Engine;
use jenkins_sdk::client::AsyncClient;
use jenkins_sdk::{AsyncQuery, Endpoint, JenkinsError};
use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;

const USER_AGENT: &str = "jenkins-api-client-rust";

/// Body of an outgoing request.
#[derive(Debug, Clone, Copy)]
pub enum RequestBody<'a> {
    Empty,
    Form(&'a [(&'a str, &'a str)]),
    Xml(&'a [u8]),
}

/// # Jac Jenkins Client
///
/// Asynchronous client authenticated by username plus password or api token.
///
/// Statuses are classified (see [`classify_status`]) before any body is
/// handed back, so callers only ever see 2xx/3xx content.
pub struct JacJenkinsClient {
    url: String,
    username: String,
    secret: String,
    client: Client,
    crumb: Option<Crumb>,
}

impl JacJenkinsClient {
    /// Creates a new asynchronous Jenkins API client.
    ///
    /// # Arguments
    ///
    /// * `url` - Base URL of the Jenkins server.
    /// * `username` - Username for authentication.
    /// * `secret` - Password or API token.
    pub fn new(url: &str, username: &str, secret: &str) -> Result<Self, JenkinsApiError> {
        Ok(Self {
            url: url.trim_end_matches('/').to_string(),
            username: username.into(),
            secret: secret.into(),
            client: Client::builder().cookie_store(true).build()?,
            crumb: None,
        })
    }

    /// Client for a local test server, bypassing any proxy from the environment.
    #[cfg(test)]
    pub(crate) fn local(url: &str) -> Self {
        Self {
            url: url.trim_end_matches('/').to_string(),
            username: "tester".into(),
            secret: "s3cret".into(),
            client: Client::builder()
                .cookie_store(true)
                .no_proxy()
                .build()
                .unwrap(),
            crumb: None,
        }
    }

    pub fn server_url(&self) -> &str {
        &self.url
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn has_crumb(&self) -> bool {
        self.crumb.is_some()
    }

    /// Fetches a CSRF crumb that is then sent with every request.
    ///
    /// A 404 from the crumb issuer means CSRF protection is off.
    pub async fn attach_crumb(&mut self) -> Result<(), JenkinsApiError> {
        match self.query::<Crumb>(&GetCrumb).await {
            Ok(crumb) => {
                debug!("attached crumb for header {}", crumb.crumb_request_field);
                self.crumb = Some(crumb);
                Ok(())
            }
            Err(JenkinsApiError::NotFound { .. }) => {
                debug!("crumb issuer not available, csrf protection is off");
                self.crumb = None;
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    pub(crate) fn url_for(&self, endpoint: &str) -> String {
        format!("{}/{}", self.url, endpoint.trim_start_matches('/'))
    }

    fn auth_header(&self) -> String {
        format!(
            "Basic {}",
            base64::prelude::BASE64_STANDARD
                .encode(format!("{}:{}", self.username, self.secret).as_bytes())
        )
    }

    fn request_builder(
        &self,
        method: Method,
        endpoint: &str,
    ) -> Result<RequestBuilder, JenkinsApiError> {
        let mut req = self
            .client
            .request(method, self.url_for(endpoint))
            .header(AUTHORIZATION, self.auth_header())
            .header("User-Agent", USER_AGENT);

        if let Some(ref crumb) = self.crumb {
            req = req.header(
                crumb.crumb_request_field.as_str(),
                HeaderValue::from_str(&crumb.crumb)
                    .map_err(|e| JenkinsApiError::uncategorized(endpoint, e))?,
            );
        }
        Ok(req)
    }

    /// Sends one request and returns status plus body of a successful response.
    pub async fn send(
        &self,
        method: Method,
        endpoint: &str,
        body: RequestBody<'_>,
    ) -> Result<(u16, String), JenkinsApiError> {
        let (status, bytes) = self.send_raw(method, endpoint, body).await?;
        Ok((status, String::from_utf8_lossy(&bytes).into_owned()))
    }

    /// Like [`send`](Self::send) but leaves the body undecoded.
    pub async fn send_raw(
        &self,
        method: Method,
        endpoint: &str,
        body: RequestBody<'_>,
    ) -> Result<(u16, Vec<u8>), JenkinsApiError> {
        debug!("{} {}", method, endpoint);
        let req = self.request_builder(method, endpoint)?;
        let req = match body {
            RequestBody::Empty => req,
            RequestBody::Form(form) => req.form(&form),
            RequestBody::Xml(xml) => req
                .header(CONTENT_TYPE, "application/xml")
                .body(xml.to_vec()),
        };

        let resp = req.send().await?;
        let status = resp.status().as_u16();
        let bytes = resp.bytes().await?.to_vec();
        classify_status(endpoint, status, &String::from_utf8_lossy(&bytes))?;
        Ok((status, bytes))
    }

    /// Raw body of an endpoint.
    pub async fn raw_query<E: Endpoint + Sync>(
        &self,
        endpoint: &E,
    ) -> Result<String, JenkinsApiError> {
        let path = endpoint.endpoint();
        let method = parse_method(endpoint.method(), &path)?;
        self.send(method, &path, RequestBody::Empty)
            .await
            .map(|(_, text)| text)
    }

    /// JSON body of an endpoint decoded into `T`.
    pub async fn query<T: DeserializeOwned>(
        &self,
        endpoint: &(impl Endpoint + Sync),
    ) -> Result<T, JenkinsApiError> {
        let path = endpoint.endpoint();
        let text = self.raw_query(endpoint).await?;
        serde_json::from_str(&text).map_err(|e| JenkinsApiError::decode(&path, e))
    }

    /// POSTs to an action endpoint, returns the status code.
    pub async fn post(
        &self,
        endpoint: &(impl Endpoint + Sync),
        form: Option<&[(&str, &str)]>,
    ) -> Result<u16, JenkinsApiError> {
        let body = match form {
            Some(form) => RequestBody::Form(form),
            None => RequestBody::Empty,
        };
        self.send(Method::POST, &endpoint.endpoint(), body)
            .await
            .map(|(status, _)| status)
    }

    /// # fetch config
    ///
    /// `config.xml` of a job, node or view resource path, decoded with the
    /// charset its declaration names.
    pub async fn fetch_config(&self, resource_path: &str) -> Result<String, JenkinsApiError> {
        let endpoint = format!("{}/config.xml", resource_path);
        let (_, bytes) = self
            .send_raw(Method::GET, &endpoint, RequestBody::Empty)
            .await?;
        Ok(decode_xml(&bytes)?)
    }

    /// # push config
    ///
    /// Uploads `xml` as the new `config.xml` of the resource, encoded in the
    /// charset its declaration names. Not retried.
    pub async fn push_config(
        &self,
        resource_path: &str,
        xml: &str,
    ) -> Result<u16, JenkinsApiError> {
        let endpoint = format!("{}/config.xml", resource_path);
        let bytes = encode_xml(xml)?;
        self.send(Method::POST, &endpoint, RequestBody::Xml(&bytes))
            .await
            .map(|(status, _)| status)
    }

    /// Checks the server is reachable with these credentials.
    pub async fn ping(&self) -> Result<(), JenkinsApiError> {
        AsyncQuery::<PingResult>::query(&Ping, self).await?;
        Ok(())
    }
}

fn parse_method(method: &str, endpoint: &str) -> Result<Method, JenkinsApiError> {
    Method::from_bytes(method.as_bytes()).map_err(|e| JenkinsApiError::uncategorized(endpoint, e))
}

#[async_trait::async_trait]
impl AsyncClient for JacJenkinsClient {
    /// Sends an asynchronous HTTP request to the Jenkins server.
    async fn request(
        &self,
        method: &str,
        endpoint: &str,
        params: Option<&[(&str, &str)]>,
    ) -> Result<String, JenkinsError> {
        let method = parse_method(method, endpoint)
            .map_err(|e| JenkinsError::RequestError(e.to_string()))?;
        let body = match params {
            Some(p) => RequestBody::Form(p),
            None => RequestBody::Empty,
        };

        self.send(method, endpoint, body)
            .await
            .map(|(_, text)| text)
            .map_err(|e| JenkinsError::RequestError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_and_auth() {
        let client = JacJenkinsClient::new("https://ci.example.com/", "alice", "s3cret").unwrap();

        assert_eq!(client.server_url(), "https://ci.example.com");
        assert_eq!(
            client.url_for("/crumbIssuer/api/json"),
            "https://ci.example.com/crumbIssuer/api/json"
        );
        assert_eq!(
            client.url_for("job/api/config.xml"),
            "https://ci.example.com/job/api/config.xml"
        );
        assert_eq!(client.auth_header(), "Basic YWxpY2U6czNjcmV0");
        assert!(!client.has_crumb());
    }

    #[test]
    fn test_parse_method() {
        assert_eq!(parse_method("POST", "x").unwrap(), Method::POST);
        assert!(parse_method("BAD METHOD", "x").is_err());
    }
}
