//! Smush Backend Server
//!
//! Wires the authentication core, the relational store, and the mail
//! transport into a single actix-web server. Auth routes live outside the
//! gate; everything else under `/api` requires a valid session.
use actix_cors::Cors;
use actix_web::App;
use actix_web::HttpResponse;
use actix_web::HttpServer;
use actix_web::Responder;
use actix_web::middleware::Logger;
use actix_web::web;
use std::sync::Arc;
use tokio_postgres::Client;

async fn health(client: web::Data<Arc<Client>>) -> impl Responder {
    match client
        .execute("SELECT 1", &[])
        .await
        .inspect_err(|e| log::error!("health check failed: {}", e))
    {
        Ok(_) => HttpResponse::Ok().body("ok"),
        Err(_) => HttpResponse::ServiceUnavailable().body("database unavailable"),
    }
}

/// Route tree, shared between [`run`] and integration tests.
#[rustfmt::skip]
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health))
        .service(
            web::scope("/api")
                .service(
                    web::scope("/auth")
                        .route("/register", web::post().to(smush_auth::register))
                        .route("/login", web::post().to(smush_auth::login))
                        .route("/logout", web::post().to(smush_auth::logout))
                        .route("/refresh", web::post().to(smush_auth::refresh))
                        .route("/forgot-password", web::post().to(smush_auth::forgot_password))
                        .route("/reset-password", web::post().to(smush_auth::reset_password)),
                )
                .service(
                    web::scope("/user")
                        .wrap(smush_auth::Gate)
                        .route("/me", web::get().to(smush_auth::me)),
                )
                .service(
                    web::scope("/role")
                        .wrap(smush_auth::Gate)
                        .route("/{user}", web::get().to(smush_auth::roles)),
                ),
        );
}

pub async fn run() -> Result<(), std::io::Error> {
    let client = smush_database::db().await;
    smush_auth::migrate(&client)
        .await
        .expect("database migration failed");
    let crypto = web::Data::new(smush_auth::Crypto::from_env());
    let reset = web::Data::new(smush_auth::Reset::from_env());
    let mailer: Arc<dyn smush_auth::Emailer> = Arc::new(smush_auth::Smtp::from_env());
    let mailer = web::Data::from(mailer);
    let database: Arc<dyn smush_auth::Database> = client.clone();
    let database = web::Data::from(database);
    let client = web::Data::new(client);
    log::info!("starting smush server");
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::new("%r %s %Ts"))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header(),
            )
            .app_data(crypto.clone())
            .app_data(reset.clone())
            .app_data(mailer.clone())
            .app_data(database.clone())
            .app_data(client.clone())
            .configure(routes)
    })
    .workers(6)
    .bind(std::env::var("BIND_ADDR").expect("BIND_ADDR must be set"))?
    .run()
    .await
}
