mod error;
mod page;
mod routes;

use std::{error::Error, net::SocketAddr, process};

use airsat::{domain::Predictor, infrastructure::GradientBoostingModel, AirsatConfig};
use axum_server::tls_rustls::RustlsConfig;
use tracing::{error, info, Level};

use crate::routes::AppState;

#[tokio::main]
async fn main() {
    match AirsatConfig::load() {
        Ok(config) => {
            tracing_subscriber::fmt()
                .with_max_level(Level::from(&config.logger.level))
                .init();
            if let Err(error) = serve(&config).await {
                error!("アプリケーションエラー: {}", error);
                process::exit(1);
            }
        }
        Err(error) => {
            tracing_subscriber::fmt::init();
            error!("設定読み込みエラー: {}", error);
            process::exit(1);
        }
    }
}

async fn serve(config: &AirsatConfig) -> Result<(), Box<dyn Error>> {
    // モデルは起動時に一度だけ読み込む
    let model = GradientBoostingModel::load(&config.model.path)?;
    let app = routes::router(AppState::new(Predictor::new(model)));
    let addr: SocketAddr = config.server.address.parse()?;
    match &config.tls {
        Some(tls) => {
            let rustls = RustlsConfig::from_pem_file(&tls.cert, &tls.key).await?;
            info!("HTTPSサーバーを起動します: {}", addr);
            axum_server::bind_rustls(addr, rustls)
                .serve(app.into_make_service())
                .await?;
        }
        None => {
            info!("HTTPサーバーを起動します: {}", addr);
            axum_server::bind(addr)
                .serve(app.into_make_service())
                .await?;
        }
    }
    Ok(())
}
