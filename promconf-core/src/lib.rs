pub mod config;
pub mod endpoint;
pub mod helpers;
pub mod kubernetes;
pub mod materializer;
pub mod resources;

pub const DEFAULT_NAMESPACE: &str = "openshift-monitoring";
pub const DEFAULT_ROUTE_NAME: &str = "prometheus-k8s";
pub const DEFAULT_TOKEN_PREFIX: &str = "prometheus-k8s-token";
pub const DEFAULT_TOKEN_KEY: &str = "token";

pub const DEFAULT_ADDRESS_PLACEHOLDER: &str = "PROMETHEUS_ADDRESS";
pub const DEFAULT_TOKEN_PLACEHOLDER: &str = "PROMETHEUS_TOKEN";
pub const DEFAULT_TEMPLATE_SUFFIX: &str = ".template";
