use std::{
    fs::{self, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
};

use log::{debug, info};
use thiserror::Error;

use crate::{
    config::{MaterializerConfig, Placeholders},
    endpoint::{EndpointResolver, ResolveError, ResolvedEndpoint},
    helpers::{replace_all_bytes, With},
    kubernetes::operations::{RouteReader, SecretLister},
};

/// Subject to the process umask
pub const OUTPUT_FILE_MODE: u32 = 0o666;

#[derive(Debug, Error)]
pub enum MaterializeError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error("Couldn't read the template file {path:?}! Reason: {source}")]
    TemplateRead { path: PathBuf, source: io::Error },
    #[error("Couldn't write the configuration file {path:?}! Reason: {source}")]
    OutputWrite { path: PathBuf, source: io::Error },
}

pub struct ConfigMaterializer {
    placeholders: Placeholders,
    template_suffix: String,
}

impl From<&MaterializerConfig> for ConfigMaterializer {
    fn from(value: &MaterializerConfig) -> Self {
        ConfigMaterializer::new(value.placeholders.clone(), value.template_suffix.clone())
    }
}

impl ConfigMaterializer {
    pub fn new(placeholders: Placeholders, template_suffix: String) -> Self {
        Self {
            placeholders,
            template_suffix,
        }
    }

    /// `config.yaml` reads its template from `config.yaml.template`
    pub fn template_path(&self, output_path: &Path) -> PathBuf {
        output_path
            .as_os_str()
            .to_owned()
            .with(|p| p.push(&self.template_suffix))
            .into()
    }

    /// Address placeholders are replaced first, token placeholders second.
    pub fn render(&self, template: &[u8], endpoint: &ResolvedEndpoint) -> Vec<u8> {
        let with_address = replace_all_bytes(
            template,
            self.placeholders.address.as_bytes(),
            endpoint.address.as_bytes(),
        );

        replace_all_bytes(
            &with_address,
            self.placeholders.token.as_bytes(),
            &endpoint.token,
        )
    }

    /// Resolves the endpoint and renders the template next to `output_path` without writing anything.
    pub async fn render_for<C>(
        &self,
        output_path: &Path,
        resolver: &EndpointResolver<'_, C>,
    ) -> Result<Vec<u8>, MaterializeError>
    where
        C: RouteReader + SecretLister,
    {
        let endpoint = resolver.resolve().await?;
        let template_path = self.template_path(output_path);

        debug!("Reading the template from {template_path:?}");
        let template = fs::read(&template_path).map_err(|source| MaterializeError::TemplateRead {
            path: template_path,
            source,
        })?;

        Ok(self.render(&template, &endpoint))
    }

    pub async fn materialize<C>(
        &self,
        output_path: &Path,
        resolver: &EndpointResolver<'_, C>,
    ) -> Result<(), MaterializeError>
    where
        C: RouteReader + SecretLister,
    {
        let output = self.render_for(output_path, resolver).await?;

        write_output(output_path, &output).map_err(|source| MaterializeError::OutputWrite {
            path: output_path.to_owned(),
            source,
        })?;

        info!("Configuration written to {output_path:?}");

        Ok(())
    }
}

fn write_output(path: &Path, content: &[u8]) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;

        options.mode(OUTPUT_FILE_MODE);
    }

    let mut file = options.open(path)?;
    file.write_all(content)?;

    Ok(())
}
