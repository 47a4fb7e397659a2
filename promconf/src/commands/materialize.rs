use std::io::{self, Write};

use anyhow::Context;
use kube::Client;
use log::debug;
use promconf_core::{endpoint::EndpointResolver, materializer::ConfigMaterializer};

use crate::cli::{GlobalArgs, MaterializeArgs};

pub async fn materialize(
    global_args: GlobalArgs,
    args: MaterializeArgs,
    client: Client,
) -> anyhow::Result<()> {
    let mut config = global_args.load_config()?;
    args.apply_overrides(&mut config);
    config.validate()?;

    debug!("Materializing with {config:?}");

    let resolver = EndpointResolver::new(&client, &config.target);
    let materializer = ConfigMaterializer::from(&config);
    let output = args.output.as_path();

    if args.stdout {
        let rendered = materializer.render_for(output, &resolver).await?;

        io::stdout()
            .write_all(&rendered)
            .context("Couldn't write the configuration to stdout!")?;
    } else {
        materializer
            .materialize(output, &resolver)
            .await
            .context(format!("Couldn't materialize {}", output.display()))?;
    }

    Ok(())
}
