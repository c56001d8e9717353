use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;

use crate::args::{OutputFormat, parse_duration_arg, parse_wait_arg};
use crate::error::ValidationError;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub host: Option<String>,
    pub function: Option<String>,
    pub params: Option<BTreeMap<String, String>>,
    #[serde(rename = "async")]
    pub invoke_async: Option<bool>,
    pub users: Option<usize>,
    pub spawn_rate: Option<usize>,
    pub run_time: Option<DurationValue>,
    pub wait_min: Option<DurationValue>,
    pub wait_max: Option<DurationValue>,
    pub timeout: Option<DurationValue>,
    pub connect_timeout: Option<DurationValue>,
    pub status: Option<u16>,
    pub output_format: Option<OutputFormat>,
}

/// A duration given either as integer seconds or as a string with a unit suffix.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, ValidationError> {
        match self {
            DurationValue::Seconds(0) => Err(ValidationError::DurationZero),
            DurationValue::Seconds(secs) => Ok(Duration::from_secs(*secs)),
            DurationValue::Text(text) => parse_duration_arg(text),
        }
    }

    pub(crate) fn to_wait(&self) -> Result<Duration, ValidationError> {
        match self {
            DurationValue::Seconds(secs) => Ok(Duration::from_secs(*secs)),
            DurationValue::Text(text) => parse_wait_arg(text),
        }
    }
}
