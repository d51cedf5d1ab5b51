use data_balance::configuration;
use data_balance::error::BizErrorEnum;
use data_balance::startup::Application;
use data_balance::telemetry;

#[tokio::main]
async fn main() -> Result<(), BizErrorEnum> {
    let subscriber =
        telemetry::get_subscriber("data-balance".into(), "info".into(), std::io::stdout);
    telemetry::init_subscriber(subscriber)?;

    let config = configuration::get_configuration()?;
    let application = Application::build(config)?;
    application.run_until_stopped().await?;

    Ok(())
}
