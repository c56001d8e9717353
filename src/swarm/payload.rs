use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::args::{DEFAULT_PARAM_NAME, DEFAULT_PARAM_VALUE};

/// Body of `POST /invoke/<function>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationRequest {
    #[serde(rename = "Params")]
    pub params: BTreeMap<String, String>,
    #[serde(rename = "Async")]
    pub is_async: bool,
}

impl InvocationRequest {
    #[must_use]
    pub fn new<I>(params: I, is_async: bool) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self {
            params: params.into_iter().collect(),
            is_async,
        }
    }
}

impl Default for InvocationRequest {
    fn default() -> Self {
        Self::new(
            [(DEFAULT_PARAM_NAME.to_owned(), DEFAULT_PARAM_VALUE.to_owned())],
            false,
        )
    }
}
