mod locks;
mod provisioner;
mod registry;

pub use locks::*;
pub use provisioner::*;
pub use registry::*;

use crate::error::{self, Result};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// The statement pair that defines a practice table.
///
/// Stored JSON encoded on the owning question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QueryPair {
    #[validate(length(min = 1))]
    pub create_table: String,
    #[validate(length(min = 1))]
    pub add_data: String,
}

impl QueryPair {
    pub fn decode(raw: &str) -> Result<Self> {
        let pair: Self = serde_json::from_str(raw).map_err(|err| {
            warn!("stored query pair is not valid json: {}", err);
            error::INVALID_QUERY_PAIR
        })?;

        pair.validate().map_err(|_| error::INVALID_QUERY_PAIR)?;

        Ok(pair)
    }

    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
