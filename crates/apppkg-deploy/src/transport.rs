use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Post,
    Put,
}

impl Display for HttpMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpMethod::Post => write!(f, "POST"),
            HttpMethod::Put => write!(f, "PUT"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryResponse {
    pub status: u16,
    pub body: String,
}

impl RegistryResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request to the application package registry. Non-2xx
/// statuses are returned as responses; only transport failures are errors.
pub trait RegistryTransport: Send + Sync {
    fn send(&self, request: RegistryRequest) -> Result<RegistryResponse, String>;
}

pub struct ReqwestRegistryTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestRegistryTransport {
    pub fn new() -> Result<Self, String> {
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(|error| format!("build registry http client failed: {error}"))?;
        Ok(Self { client })
    }
}

impl RegistryTransport for ReqwestRegistryTransport {
    fn send(&self, request: RegistryRequest) -> Result<RegistryResponse, String> {
        let method = match request.method {
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
        };

        let mut builder = self.client.request(method, request.url.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder
            .body(request.body)
            .send()
            .map_err(|error| format!("{} {} failed: {error}", request.method, request.url))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|error| format!("read registry response body failed: {error}"))?;
        Ok(RegistryResponse { status, body })
    }
}
