use anyhow::Context;
use clientes_service::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("loading configuration")?;
    init_tracing(&config).context("initializing tracing")?;

    let auth = JwtAuth::new(&config.jwt).context("building JWT verifier")?;

    match config.database_url() {
        Some(url) => {
            let repository = connect_repository(url, &config.database)
                .await
                .context("preparing the customer database")?;
            run(config, repository, auth).await
        }
        None => {
            tracing::warn!("No database URL configured, customers are kept in memory");
            run(config, InMemoryCustomerRepository::new(), auth).await
        }
    }
}

async fn run<R: CustomerRepository>(config: Config, repository: R, auth: JwtAuth) -> anyhow::Result<()> {
    let state = AppState::new(config.clone(), repository, auth);
    Server::new(config).serve(router(state)).await?;
    Ok(())
}
