use waitlist::configuration::get_configuration;
use waitlist::startup::Application;
use waitlist::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("waitlist".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let configuration = get_configuration()?;
    let application = Application::build(configuration).await?;
    tracing::info!(port = application.port(), "Waitlist service is listening");
    application.run_until_stopped().await?;

    Ok(())
}
