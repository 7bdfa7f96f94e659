use anyhow::Context;
use herald_app::{AppConfig, build_pipeline};
use herald_infra::WriterSink;
use herald_users::RegisterUser;

const DEFAULT_NAME: &str = "Ada Lovelace";
const DEFAULT_EMAIL: &str = "ada@example.com";

fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("reading configuration")?;
    herald_observability::init(config.log_format);

    let mut args = std::env::args().skip(1);
    let name = args.next().unwrap_or_else(|| DEFAULT_NAME.to_string());
    let email = args.next().unwrap_or_else(|| DEFAULT_EMAIL.to_string());

    let pipeline = build_pipeline(&config, WriterSink::stdout());
    tracing::info!(
        command_handlers = ?pipeline.command_handlers(),
        event_handlers = ?pipeline.event_handlers(),
        "pipeline ready"
    );

    pipeline
        .submit(RegisterUser::new(name, email))
        .context("registering user")?;

    Ok(())
}
