use std::fmt::Display;

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const HTTP_SCHEME: &str = "http";
pub const HTTPS_SCHEME: &str = "https";

/// Subset of the OpenShift `route.openshift.io/v1` Route that's needed to reach the exposed service
#[derive(CustomResource, Deserialize, Serialize, Clone, Debug, Default, JsonSchema)]
#[kube(group = "route.openshift.io", version = "v1", kind = "Route", namespaced)]
#[serde(rename_all = "camelCase")]
pub struct RouteSpec {
    /// alias/DNS that points to the service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    /// path that the router watches for, to route traffic to the service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// TLS configuration of the route
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls: Option<TlsConfig>,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TlsConfig {
    /// edge, passthrough or reencrypt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub termination: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteInfo {
    pub host: String,
    pub path: String,
    pub tls_enabled: bool,
}

impl RouteInfo {
    pub fn scheme(&self) -> &'static str {
        if self.tls_enabled {
            HTTPS_SCHEME
        } else {
            HTTP_SCHEME
        }
    }

    /// Host and path are copied verbatim, only a missing leading slash of a
    /// non-empty path gets filled in.
    pub fn address(&self) -> String {
        let scheme = self.scheme();
        let host = &self.host;
        let separator = if self.path.is_empty() || self.path.starts_with('/') {
            ""
        } else {
            "/"
        };
        let path = &self.path;

        format!("{scheme}://{host}{separator}{path}")
    }
}

impl Display for RouteInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.address())
    }
}

impl From<&Route> for RouteInfo {
    fn from(value: &Route) -> Self {
        let tls_enabled = value
            .spec
            .tls
            .as_ref()
            .and_then(|tls| tls.termination.as_deref())
            .map_or(false, |termination| !termination.is_empty());

        RouteInfo {
            host: value.spec.host.clone().unwrap_or_default(),
            path: value.spec.path.clone().unwrap_or_default(),
            tls_enabled,
        }
    }
}
