use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GatehouseError;

/// One of the two parallel access-control flows.
///
/// Everything downstream of the router is keyed by this: page dispatch, the
/// hand-off store, and the module name the upload panel forwards to the
/// external access-control contracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureFamily {
    Allowlist,
    Subscription,
}

impl FeatureFamily {
    pub const ALL: [FeatureFamily; 2] = [FeatureFamily::Allowlist, FeatureFamily::Subscription];

    /// Module name forwarded to external collaborators.
    pub const fn module_name(self) -> &'static str {
        match self {
            FeatureFamily::Allowlist => "allowlist",
            FeatureFamily::Subscription => "subscription",
        }
    }

    /// Top-level route prefix the family is mounted under.
    pub const fn route_prefix(self) -> &'static str {
        match self {
            FeatureFamily::Allowlist => "allowlist-example",
            FeatureFamily::Subscription => "subscription-example",
        }
    }
}

impl fmt::Display for FeatureFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.module_name())
    }
}

impl FromStr for FeatureFamily {
    type Err = GatehouseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "allowlist" => Ok(FeatureFamily::Allowlist),
            "subscription" => Ok(FeatureFamily::Subscription),
            other => Err(GatehouseError::UnknownFamily(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_names_round_trip() {
        for family in FeatureFamily::ALL {
            assert_eq!(family.module_name().parse::<FeatureFamily>().unwrap(), family);
        }
    }

    #[test]
    fn test_unknown_family_is_rejected() {
        assert!("ratelimit".parse::<FeatureFamily>().is_err());
    }
}
