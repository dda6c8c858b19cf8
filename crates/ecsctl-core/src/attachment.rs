//! Network details carried by a task attachment.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::record::{Attachment, KeyValuePair};

/// Detail key holding the elastic network interface id.
pub const DETAIL_NETWORK_INTERFACE_ID: &str = "networkInterfaceId";

/// Detail key holding the subnet id.
pub const DETAIL_SUBNET_ID: &str = "subnetId";

/// Network identifiers of a task. Either side may be unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkBinding {
    pub eni_id: Option<String>,
    pub subnet_id: Option<String>,
}

impl NetworkBinding {
    /// Look up the interface and subnet ids by exact key; other keys are ignored.
    pub fn from_details(details: &[KeyValuePair]) -> Self {
        let lookup: HashMap<&str, &str> = details
            .iter()
            .filter_map(|d| Some((d.name.as_deref()?, d.value.as_deref()?)))
            .collect();

        Self {
            eni_id: lookup.get(DETAIL_NETWORK_INTERFACE_ID).map(|v| v.to_string()),
            subnet_id: lookup.get(DETAIL_SUBNET_ID).map(|v| v.to_string()),
        }
    }

    /// Binding for an optional attachment; `None` yields an empty binding.
    pub fn from_attachment(attachment: Option<&Attachment>) -> Self {
        attachment
            .map(|a| Self::from_details(&a.details))
            .unwrap_or_default()
    }
}
