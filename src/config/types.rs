use std::time::Duration;

use serde::Deserialize;

use crate::args::HttpMethod;
use crate::args::parsers::{parse_duration_arg, parse_header};
use crate::error::{AppError, AppResult, ConfigError};
use crate::probe::ProbeDescriptor;

#[derive(Debug, Default, Deserialize)]
pub struct PlanFile {
    pub base_url: Option<String>,
    pub headers: Option<Vec<String>>,
    pub timeout: Option<DurationValue>,
    pub connect_timeout: Option<DurationValue>,
    #[serde(default)]
    pub probes: Vec<ProbeEntry>,
}

#[derive(Debug, Default, Deserialize, Clone)]
pub struct ProbeEntry {
    pub method: Option<HttpMethod>,
    pub endpoint: Option<String>,
    pub data: Option<String>,
}

impl PlanFile {
    /// Converts the raw probe entries into run-ready descriptors.
    ///
    /// # Errors
    ///
    /// Returns an error when the plan has no probes or a probe lacks an
    /// endpoint.
    pub fn descriptors(&self) -> AppResult<Vec<ProbeDescriptor>> {
        if self.probes.is_empty() {
            return Err(AppError::config(ConfigError::PlanMissingProbes));
        }

        let mut descriptors = Vec::with_capacity(self.probes.len());
        for (index, entry) in self.probes.iter().enumerate() {
            let endpoint = entry
                .endpoint
                .as_deref()
                .ok_or_else(|| AppError::config(ConfigError::ProbeMissingEndpoint { index }))?;
            descriptors.push(ProbeDescriptor {
                method: entry.method.unwrap_or(HttpMethod::Get),
                endpoint: endpoint.to_owned(),
                body: entry.data.clone(),
            });
        }
        Ok(descriptors)
    }

    /// Parses the plan's shared `Key: Value` header lines.
    ///
    /// # Errors
    ///
    /// Returns an error when a header line is not in `Key: Value` form.
    pub fn parsed_headers(&self) -> AppResult<Vec<(String, String)>> {
        let lines = match self.headers.as_deref() {
            Some(lines) => lines,
            None => return Ok(Vec::new()),
        };
        let mut headers = Vec::with_capacity(lines.len());
        for line in lines {
            let header = parse_header(line)
                .map_err(|source| AppError::config(ConfigError::InvalidHeader { source }))?;
            headers.push(header);
        }
        Ok(headers)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    /// Resolves the raw value to a concrete duration.
    ///
    /// # Errors
    ///
    /// Returns an error for zero, malformed, or overflowing values.
    pub fn to_duration(&self) -> AppResult<Duration> {
        let duration = match self {
            DurationValue::Seconds(secs) => Duration::from_secs(*secs),
            DurationValue::Text(text) => parse_duration_arg(text)
                .map_err(|source| AppError::config(ConfigError::InvalidDuration { source }))?,
        };
        if duration.as_millis() == 0 {
            return Err(AppError::config(ConfigError::InvalidDuration {
                source: crate::error::ValidationError::DurationZero,
            }));
        }
        Ok(duration)
    }
}
