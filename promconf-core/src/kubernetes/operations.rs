use async_trait::async_trait;
use k8s_openapi::api::core::v1::Secret;
use kube::{
    api::ListParams,
    config::{KubeConfigOptions, Kubeconfig},
    Api, Client, Config,
};
use log::debug;

use crate::{helpers::pretty_type_name, resources::route::Route};

/// Fetches a single named route.
#[async_trait]
pub trait RouteReader: Send + Sync {
    async fn get_route(&self, namespace: &str, name: &str) -> Result<Route, kube::Error>;
}

/// Lists every secret in a namespace, in the order the API server returns them.
#[async_trait]
pub trait SecretLister: Send + Sync {
    async fn list_secrets(&self, namespace: &str) -> Result<Vec<Secret>, kube::Error>;
}

#[async_trait]
impl RouteReader for Client {
    async fn get_route(&self, namespace: &str, name: &str) -> Result<Route, kube::Error> {
        debug!(
            "Fetching '{name}' {} from the '{namespace}' namespace...",
            pretty_type_name::<Route>()
        );

        let route_api: Api<Route> = Api::namespaced(self.clone(), namespace);

        route_api.get(name).await
    }
}

#[async_trait]
impl SecretLister for Client {
    async fn list_secrets(&self, namespace: &str) -> Result<Vec<Secret>, kube::Error> {
        debug!(
            "Listing {} resources in the '{namespace}' namespace...",
            pretty_type_name::<Secret>()
        );

        let secret_api: Api<Secret> = Api::namespaced(self.clone(), namespace);
        let secrets = secret_api.list(&ListParams::default()).await?;

        Ok(secrets.items)
    }
}

/// How the client configuration gets built
#[derive(Debug, PartialEq, Eq)]
pub enum ClientConfigSource<'a> {
    /// local kubeconfig first, in-cluster service account otherwise
    Inferred,
    DefaultKubeconfig { context: Option<&'a str> },
    CustomKubeconfig {
        path: &'a str,
        context: Option<&'a str>,
    },
}

impl<'a> ClientConfigSource<'a> {
    pub fn select(config_path: Option<&'a str>, context_name: Option<&'a str>) -> Self {
        match (config_path, context_name) {
            (Some(path), context) => ClientConfigSource::CustomKubeconfig { path, context },
            (None, Some(context)) => ClientConfigSource::DefaultKubeconfig {
                context: Some(context),
            },
            (None, None) => ClientConfigSource::Inferred,
        }
    }
}

pub async fn create_local_client(
    config_path: &Option<String>,
    context_name: &Option<String>,
) -> anyhow::Result<Client> {
    let source = ClientConfigSource::select(config_path.as_deref(), context_name.as_deref());
    debug!("Building k8s client configuration from {source:?}");

    let config = match source {
        ClientConfigSource::Inferred => Config::infer().await?,
        ClientConfigSource::DefaultKubeconfig { context } => {
            Config::from_kubeconfig(&kubeconfig_options(context)).await?
        }
        ClientConfigSource::CustomKubeconfig { path, context } => {
            let kubeconfig = Kubeconfig::read_from(path)?;
            Config::from_custom_kubeconfig(kubeconfig, &kubeconfig_options(context)).await?
        }
    };

    let client = Client::try_from(config)?;

    Ok(client)
}

fn kubeconfig_options(context: Option<&str>) -> KubeConfigOptions {
    KubeConfigOptions {
        context: context.map(str::to_owned),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::ClientConfigSource;

    #[test]
    fn no_overrides_infers_the_config() {
        assert_eq!(
            ClientConfigSource::select(None, None),
            ClientConfigSource::Inferred
        );
    }

    #[test]
    fn context_override_reads_the_default_kubeconfig() {
        assert_eq!(
            ClientConfigSource::select(None, Some("admin")),
            ClientConfigSource::DefaultKubeconfig {
                context: Some("admin")
            }
        );
    }

    #[test]
    fn kubeconfig_path_wins() {
        assert_eq!(
            ClientConfigSource::select(Some("/tmp/kubeconfig"), None),
            ClientConfigSource::CustomKubeconfig {
                path: "/tmp/kubeconfig",
                context: None
            }
        );
        assert_eq!(
            ClientConfigSource::select(Some("/tmp/kubeconfig"), Some("admin")),
            ClientConfigSource::CustomKubeconfig {
                path: "/tmp/kubeconfig",
                context: Some("admin")
            }
        );
    }
}
