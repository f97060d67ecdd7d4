use std::time::{Duration, Instant};

use chrono::{SecondsFormat, Utc};
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::args::{DEFAULT_USER_AGENT, HttpMethod};
use crate::error::{AppError, AppResult, HttpError, ValidationError};

use super::descriptor::ProbeDescriptor;
use super::result::{CallResult, ResultLog};

/// Shared settings for one probe run.
#[derive(Debug, Clone)]
pub struct RunnerSettings {
    pub base_url: String,
    pub headers: Vec<(String, String)>,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

pub struct ProbeRunner {
    client: Client,
    base_url: String,
    headers: Vec<(String, String)>,
}

impl ProbeRunner {
    /// Builds a runner around an explicit base URL and client settings.
    ///
    /// # Errors
    ///
    /// Returns an error when the base URL does not parse or the HTTP client
    /// cannot be constructed.
    pub fn new(settings: &RunnerSettings) -> AppResult<Self> {
        let base_url = settings.base_url.trim_end_matches('/').to_owned();
        Url::parse(&base_url).map_err(|source| {
            AppError::validation(ValidationError::InvalidBaseUrl {
                url: base_url.clone(),
                source,
            })
        })?;

        let client = Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .timeout(settings.request_timeout)
            .connect_timeout(settings.connect_timeout)
            .build()
            .map_err(|source| AppError::http(HttpError::BuildClientFailed { source }))?;

        Ok(Self {
            client,
            base_url,
            headers: settings.headers.clone(),
        })
    }

    /// Plays the descriptors in declaration order, one call in flight at a
    /// time, echoing each call to stdout as it completes.
    ///
    /// Every HTTP response is recorded whatever its status code; only a
    /// transport-level fault (refused connection, timeout, body read
    /// failure) stops the run.
    ///
    /// # Errors
    ///
    /// Returns an error when a probe URL does not parse or a call fails at
    /// the transport level.
    pub async fn run(&self, plan: &[ProbeDescriptor]) -> AppResult<ResultLog> {
        let mut log = ResultLog::default();
        for descriptor in plan {
            let result = self.send(descriptor).await?;
            log.record(&descriptor.endpoint, result);
        }
        Ok(log)
    }

    async fn send(&self, descriptor: &ProbeDescriptor) -> AppResult<CallResult> {
        let target = format!("{}/{}", self.base_url, descriptor.endpoint);
        let url = Url::parse(&target).map_err(|source| {
            AppError::http(HttpError::InvalidProbeUrl {
                url: target.clone(),
                source,
            })
        })?;

        let mut request = match descriptor.method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
            HttpMethod::Patch => self.client.patch(url),
            HttpMethod::Put => self.client.put(url),
            HttpMethod::Delete => self.client.delete(url),
        };
        for (key, value) in &self.headers {
            request = request.header(key, value);
        }
        if let Some(body) = &descriptor.body {
            request = request.body(body.clone());
        }

        println!(
            "[{}] {} {}",
            Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            descriptor.method.as_str(),
            target
        );

        let start = Instant::now();
        let response = request.send().await.map_err(|source| {
            AppError::http(HttpError::ProbeRequestFailed {
                url: target.clone(),
                source,
            })
        })?;
        let status_code = response.status().as_u16();
        let content = response.text().await.map_err(|source| {
            AppError::http(HttpError::ReadBodyFailed {
                url: target.clone(),
                source,
            })
        })?;
        let request_time = start.elapsed().as_secs_f64();

        println!("{}", content);
        println!("{} in {:.3}s", status_code, request_time);
        println!();

        debug!(
            endpoint = %descriptor.endpoint,
            status = status_code,
            elapsed_s = request_time,
            "probe completed"
        );

        Ok(CallResult {
            status_code,
            content,
            request_time,
        })
    }
}
