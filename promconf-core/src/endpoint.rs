use log::{debug, info, warn};
use thiserror::Error;

use crate::{
    config::PrometheusTarget,
    kubernetes::operations::{RouteReader, SecretLister},
    resources::{
        route::RouteInfo,
        secret::{count_token_secrets, find_token_secret, read_token},
    },
};

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Couldn't get the '{name}' route from the '{namespace}' namespace! Reason: {source}")]
    RouteLookup {
        namespace: String,
        name: String,
        source: kube::Error,
    },
    #[error("Couldn't list secrets in the '{namespace}' namespace (resolved address: {address})! Reason: {source}")]
    SecretList {
        namespace: String,
        address: String,
        source: kube::Error,
    },
}

impl ResolveError {
    /// Address computed before the failure, if the route lookup got that far
    pub fn address(&self) -> Option<&str> {
        match self {
            ResolveError::RouteLookup { .. } => None,
            ResolveError::SecretList { address, .. } => Some(address.as_str()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedEndpoint {
    pub address: String,
    /// opaque secret bytes, not necessarily UTF-8
    pub token: Vec<u8>,
}

pub struct EndpointResolver<'a, C> {
    client: &'a C,
    target: &'a PrometheusTarget,
}

impl<'a, C> EndpointResolver<'a, C>
where
    C: RouteReader + SecretLister,
{
    pub fn new(client: &'a C, target: &'a PrometheusTarget) -> Self {
        Self { client, target }
    }

    pub async fn resolve(&self) -> Result<ResolvedEndpoint, ResolveError> {
        let address = self.resolve_address().await?;
        let token = self.resolve_token(&address).await?;

        Ok(ResolvedEndpoint { address, token })
    }

    async fn resolve_address(&self) -> Result<String, ResolveError> {
        let PrometheusTarget {
            namespace,
            route_name,
            ..
        } = self.target;

        let route = self
            .client
            .get_route(namespace, route_name)
            .await
            .map_err(|source| ResolveError::RouteLookup {
                namespace: namespace.to_owned(),
                name: route_name.to_owned(),
                source,
            })?;

        let route_info = RouteInfo::from(&route);
        info!("Resolved '{route_name}' route address: {route_info}");

        Ok(route_info.address())
    }

    async fn resolve_token(&self, address: &str) -> Result<Vec<u8>, ResolveError> {
        let PrometheusTarget {
            namespace,
            token_prefix,
            token_key,
            ..
        } = self.target;

        let secrets = self.client.list_secrets(namespace).await.map_err(|source| {
            ResolveError::SecretList {
                namespace: namespace.to_owned(),
                address: address.to_owned(),
                source,
            }
        })?;

        let secret = match find_token_secret(&secrets, token_prefix) {
            Some(secret) => secret,
            None => {
                debug!("No secret matching '{token_prefix}' in '{namespace}', using an empty token");
                return Ok(Vec::new());
            }
        };

        let secret_name = secret.metadata.name.as_deref().unwrap_or_default();
        if count_token_secrets(&secrets, token_prefix) > 1 {
            warn!("There are multiple secrets matching '{token_prefix}'! Using '{secret_name}', the first one returned by the cluster.");
        } else {
            debug!("Using the token from the '{secret_name}' secret");
        }

        Ok(read_token(secret, token_key))
    }
}
