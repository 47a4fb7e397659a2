use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use promconf_core::config::MaterializerConfig;

#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
    #[command(flatten)]
    pub global_args: GlobalArgs,
}

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// override default kubeconfig
    #[arg(long, global = true)]
    pub kube_config: Option<String>,
    /// override default kubeconfig context
    #[arg(long, global = true)]
    pub kube_context: Option<String>,
    /// YAML file with the target and placeholder settings (flags take precedence)
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,
    /// namespace containing the Prometheus route and token secret [default: openshift-monitoring]
    #[arg(short = 'n', long, global = true)]
    pub namespace: Option<String>,
    /// name of the Prometheus route [default: prometheus-k8s]
    #[arg(long, global = true)]
    pub route: Option<String>,
    /// the first secret whose name contains this string provides the token [default: prometheus-k8s-token]
    #[arg(long, global = true)]
    pub token_prefix: Option<String>,
    /// secret data key holding the token [default: token]
    #[arg(long, global = true)]
    pub token_key: Option<String>,
    /// enable verbose output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose_logging: bool,
    /// enable trace output (more detailed than verbose, overrides it if present)
    #[arg(long = "trace", global = true)]
    pub trace_logging: bool,
}

impl GlobalArgs {
    pub fn get_log_level(&self) -> LogLevel {
        if self.trace_logging {
            return LogLevel::Trace;
        }

        if self.verbose_logging {
            return LogLevel::Verbose;
        }

        LogLevel::Normal
    }

    /// Loads the config file (or the defaults) and applies the target flags on top of it
    pub fn load_config(&self) -> anyhow::Result<MaterializerConfig> {
        let mut config = MaterializerConfig::load_or_default(self.config.as_deref())
            .context("Couldn't load the configuration file!")?;

        self.apply_target_overrides(&mut config);

        Ok(config)
    }

    pub fn apply_target_overrides(&self, config: &mut MaterializerConfig) {
        override_with(&mut config.target.namespace, &self.namespace);
        override_with(&mut config.target.route_name, &self.route);
        override_with(&mut config.target.token_prefix, &self.token_prefix);
        override_with(&mut config.target.token_key, &self.token_key);
    }
}

pub fn override_with(value: &mut String, new_value: &Option<String>) {
    if let Some(new_value) = new_value {
        *value = new_value.to_owned();
    }
}

pub enum LogLevel {
    Normal,
    Verbose,
    Trace,
}

#[derive(Debug, Subcommand)]
#[command(arg_required_else_help = true)]
pub enum Commands {
    /// render <OUTPUT>.template into <OUTPUT> using the Prometheus route and token
    #[command(alias = "m")]
    Materialize(MaterializeArgs),
    /// print the Prometheus address and token without touching any files
    #[command(alias = "r")]
    Resolve(ResolveArgs),
}

#[derive(Debug, Args)]
pub struct MaterializeArgs {
    /// path of the configuration file to produce
    pub output: PathBuf,
    /// suffix appended to OUTPUT to locate the template [default: .template]
    #[arg(long)]
    pub template_suffix: Option<String>,
    /// marker replaced with the Prometheus address [default: PROMETHEUS_ADDRESS]
    #[arg(long)]
    pub address_placeholder: Option<String>,
    /// marker replaced with the bearer token [default: PROMETHEUS_TOKEN]
    #[arg(long)]
    pub token_placeholder: Option<String>,
    /// print the rendered configuration to stdout instead of writing OUTPUT
    #[arg(long)]
    pub stdout: bool,
}

impl MaterializeArgs {
    pub fn apply_overrides(&self, config: &mut MaterializerConfig) {
        override_with(&mut config.template_suffix, &self.template_suffix);
        override_with(&mut config.placeholders.address, &self.address_placeholder);
        override_with(&mut config.placeholders.token, &self.token_placeholder);
    }
}

#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// output format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,
    /// print the token instead of masking it
    #[arg(long)]
    pub show_token: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    TableWithHeaders,
    Json,
    JsonPretty,
    Yaml,
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::Parser;
    use promconf_core::config::MaterializerConfig;

    use super::{Cli, Commands, OutputFormat};

    #[test]
    fn materialize_defaults_leave_config_untouched() {
        let cli = Cli::try_parse_from(["promconf", "materialize", "/etc/adapter/config.yaml"])
            .unwrap();
        let mut config = MaterializerConfig::default();

        cli.global_args.apply_target_overrides(&mut config);
        let Commands::Materialize(args) = cli.command else {
            panic!("expected the materialize command");
        };
        args.apply_overrides(&mut config);

        assert_eq!(args.output, Path::new("/etc/adapter/config.yaml"));
        assert!(!args.stdout);
        assert_eq!(config, MaterializerConfig::default());
    }

    #[test]
    fn flags_override_config_values() {
        let cli = Cli::try_parse_from([
            "promconf",
            "m",
            "out.yaml",
            "--namespace",
            "monitoring",
            "--route",
            "thanos-querier",
            "--token-prefix",
            "thanos-token",
            "--token-placeholder",
            "BEARER",
            "--stdout",
        ])
        .unwrap();
        let mut config = MaterializerConfig::default();

        cli.global_args.apply_target_overrides(&mut config);
        let Commands::Materialize(args) = cli.command else {
            panic!("expected the materialize command");
        };
        args.apply_overrides(&mut config);

        assert!(args.stdout);
        assert_eq!(config.target.namespace, "monitoring");
        assert_eq!(config.target.route_name, "thanos-querier");
        assert_eq!(config.target.token_prefix, "thanos-token");
        assert_eq!(config.target.token_key, "token");
        assert_eq!(config.placeholders.address, "PROMETHEUS_ADDRESS");
        assert_eq!(config.placeholders.token, "BEARER");
    }

    #[test]
    fn resolve_parses_output_format() {
        let cli = Cli::try_parse_from(["promconf", "-v", "resolve", "-o", "json-pretty"]).unwrap();

        assert!(cli.global_args.verbose_logging);
        let Commands::Resolve(args) = cli.command else {
            panic!("expected the resolve command");
        };
        assert!(matches!(args.output, OutputFormat::JsonPretty));
        assert!(!args.show_token);
    }

    #[test]
    fn materialize_requires_an_output_path() {
        assert!(Cli::try_parse_from(["promconf", "materialize"]).is_err());
    }
}
