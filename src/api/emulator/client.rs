use reqwest::Client as HttpClient;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use super::models::{EmulatorError, TransferParameters, ALLOWED_PARAMETERS};
use crate::config::EmulatorConfig;
use crate::models::ParsedTransfer;
use crate::services::response_parser;
use tracing::{debug, info, warn};

/// Client for the wallet transfer emulator
pub struct EmulatorClient {
    http_client: HttpClient,
    config: EmulatorConfig,
}

impl EmulatorClient {
    const FORM_CONTENT_TYPE: &'static str = "application/x-www-form-urlencoded; charset=UTF-8";

    pub fn new(config: EmulatorConfig) -> Self {
        Self {
            http_client: HttpClient::new(),
            config,
        }
    }

    pub fn config(&self) -> &EmulatorConfig {
        &self.config
    }

    /// Headers the emulator expects on every form post
    fn create_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(Self::FORM_CONTENT_TYPE));
        headers.insert(
            HeaderName::from_static("x-requested-with"),
            HeaderValue::from_static("XMLHttpRequest"),
        );
        headers
    }

    fn invalid_response() -> EmulatorError {
        EmulatorError::TransportError("Invalid response from remote server".to_string())
    }

    /// Check the configured method and the parameter set before sending
    ///
    /// # Returns
    /// * `Ok(())` - Parameters can be sent as-is
    /// * `Err(EmulatorError::InvalidInput)` - Method is not POST, or the parameter
    ///   set is empty, too large, has an unknown key, lacks a required one or
    ///   has a blank receiver
    pub fn validate_parameters(&self, parameters: &TransferParameters) -> Result<(), EmulatorError> {
        if self.config.method != Method::POST {
            return Err(EmulatorError::InvalidInput("Method of query is incorrect".to_string()));
        }
        if parameters.is_empty() {
            return Err(EmulatorError::InvalidInput("Array of parameters is empty".to_string()));
        }
        if parameters.len() > ALLOWED_PARAMETERS.len() {
            return Err(EmulatorError::InvalidInput(
                "Count of allowed parameters is invalid".to_string(),
            ));
        }

        if let Some(name) = parameters.names().find(|name| !ALLOWED_PARAMETERS.contains(name)) {
            return Err(EmulatorError::InvalidInput(format!(
                "Parameter \"{}\" is not in allowed list: [{}]",
                name,
                ALLOWED_PARAMETERS.join(", ")
            )));
        }

        if let Some(name) = ALLOWED_PARAMETERS.iter().find(|name| parameters.get(name).is_none()) {
            return Err(EmulatorError::InvalidInput(format!("Parameter \"{}\" is required", name)));
        }

        if parameters.receiver().is_some_and(|receiver| receiver.trim().is_empty()) {
            return Err(EmulatorError::InvalidInput("Parameter \"receiver\" is empty".to_string()));
        }

        Ok(())
    }

    /// POST the transfer form to the emulator
    ///
    /// The emulator answers errors as plain text too, so the status code is only
    /// logged. An empty body or a failed exchange is a transport error.
    pub async fn do_request(&self, parameters: &TransferParameters) -> Result<String, EmulatorError> {
        self.validate_parameters(parameters)?;

        debug!("POST {} with {:?}", self.config.endpoint, parameters);

        // form() sets its own content type, the explicit headers must come after it
        let response = self.http_client
            .post(&self.config.endpoint)
            .form(parameters)
            .headers(Self::create_headers())
            .send()
            .await
            .map_err(|e| {
                warn!("Emulator request failed: {}", e);
                Self::invalid_response()
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Emulator answered with status {}", status);
        }

        let body = response
            .text()
            .await
            .map_err(|e| {
                warn!("Failed to read emulator response: {}", e);
                Self::invalid_response()
            })?;

        if self.config.verbose {
            info!("Emulator response ({}): {:?}", status, body);
        }

        if body.is_empty() {
            return Err(Self::invalid_response());
        }

        Ok(body)
    }

    /// Send a transfer and parse the confirmation
    ///
    /// # Returns
    /// * `Ok(ParsedTransfer)` - Fields recognized in the emulator's answer
    /// * `Err(EmulatorError)` - Invalid input, transport failure or malformed answer
    pub async fn get_response(&self, parameters: &TransferParameters) -> Result<ParsedTransfer, EmulatorError> {
        let body = self.do_request(parameters).await?;
        let receiver = parameters.receiver().unwrap_or_default();

        response_parser::parse_response(&body, receiver)
    }
}
