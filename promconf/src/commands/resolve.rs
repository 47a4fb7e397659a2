use std::borrow::Cow;

use kube::Client;
use promconf_core::endpoint::{EndpointResolver, ResolvedEndpoint};
use serde::Serialize;

use crate::{
    cli::{GlobalArgs, ResolveArgs},
    output::{CliPrint, TableOutputRow},
};

const MASKED_TOKEN: &str = "<hidden>";

pub async fn resolve(
    global_args: GlobalArgs,
    args: ResolveArgs,
    client: Client,
) -> anyhow::Result<()> {
    let config = global_args.load_config()?;
    config.validate()?;

    let endpoint = EndpointResolver::new(&client, &config.target)
        .resolve()
        .await?;
    let view = EndpointView::new(
        &config.target.namespace,
        &config.target.route_name,
        &endpoint,
        args.show_token,
    );

    vec![view].print(args.output)?;

    Ok(())
}

#[derive(Serialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
struct EndpointView<'a> {
    pub namespace: &'a str,
    pub route: &'a str,
    pub address: &'a str,
    pub token: Cow<'a, str>,
}

impl<'a> EndpointView<'a> {
    fn new(
        namespace: &'a str,
        route: &'a str,
        endpoint: &'a ResolvedEndpoint,
        show_token: bool,
    ) -> Self {
        let token = if show_token || endpoint.token.is_empty() {
            String::from_utf8_lossy(&endpoint.token)
        } else {
            Cow::Borrowed(MASKED_TOKEN)
        };

        EndpointView {
            namespace,
            route,
            address: &endpoint.address,
            token,
        }
    }
}

impl TableOutputRow for EndpointView<'_> {
    fn print_header() {
        println!("NAMESPACE\tROUTE\tADDRESS\tTOKEN");
    }

    fn print_row(&self) {
        let token = if self.token.is_empty() { "-" } else { &*self.token };

        println!("{}\t{}\t{}\t{token}", self.namespace, self.route, self.address);
    }
}
