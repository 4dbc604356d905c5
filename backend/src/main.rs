use actix_files::Files;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use backend::config::Config;
use backend::store::AppState;
use backend::{configure_app, services};
use env_logger::Env;
use log::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e));
        }
    };

    let state = AppState::new(config.max_upload_bytes);
    let json_limit = config.json_limit_bytes;
    let static_dir = config.static_dir.clone();

    let (host, port) = config.bind_address();
    info!("Server running at http://{}:{}", host, port);
    if let Some(dir) = &static_dir {
        info!("Serving static files from {}", dir.display());
    }

    HttpServer::new(move || {
        let mut app = App::new()
            .wrap(Logger::default())
            .configure(configure_app(state.clone(), json_limit));
        if let Some(dir) = &static_dir {
            app = app.service(Files::new("/", dir.clone()).index_file("index.html"));
        }
        app.default_service(web::route().to(services::not_found))
    })
    .bind((host, port))?
    .run()
    .await
}
