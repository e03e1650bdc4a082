use std::env;
use std::sync::Arc;

use actix_web::{App, HttpServer, middleware, web};
use dotenvy::dotenv;

use ironpress::db::establish_connection_pool;
use ironpress::repository::DieselRepository;
use ironpress::routes::bills::{add_bill, delete_bill, edit_bill, show_bill, show_bills};
use ironpress::routes::categories::{
    add_category, delete_category, edit_category, show_categories,
};
use ironpress::routes::customers::{add_customer, show_customer, show_customers};
use ironpress::routes::dashboard::show_dashboard;
use ironpress::routes::notifications::{send_notification, show_notifications};
use ironpress::routes::settings::{edit_settings, show_settings};
use ironpress::routes::stores::{add_store, edit_store_status, show_store};
use ironpress::senders::{GatewayProviders, MessageSender, ProviderConfig};
use ironpress::services::notifications::{NotificationTrigger, SpawnedNotifier};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let database_url = env::var("DATABASE_URL").unwrap_or("app.db".to_string());
    let port = env::var("PORT").unwrap_or("8080".to_string());
    let port = port.parse::<u16>().unwrap_or(8080);
    let address = env::var("ADDRESS").unwrap_or("127.0.0.1".to_string());

    let pool = match establish_connection_pool(&database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);

    let providers: Arc<GatewayProviders> =
        Arc::new(GatewayProviders::new(ProviderConfig::from_env()));
    let notifier = Arc::new(SpawnedNotifier::new(
        Arc::new(repo.clone()),
        Arc::clone(&providers),
    ));

    let sender_data: web::Data<dyn MessageSender> =
        web::Data::from(providers as Arc<dyn MessageSender>);
    let trigger_data: web::Data<dyn NotificationTrigger> =
        web::Data::from(notifier as Arc<dyn NotificationTrigger>);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(
                web::scope("/api")
                    .service(add_store)
                    .service(edit_store_status)
                    .service(show_dashboard)
                    .service(add_bill)
                    .service(show_bills)
                    .service(show_bill)
                    .service(edit_bill)
                    .service(delete_bill)
                    .service(send_notification)
                    .service(show_notifications)
                    .service(add_category)
                    .service(show_categories)
                    .service(edit_category)
                    .service(delete_category)
                    .service(add_customer)
                    .service(show_customers)
                    .service(show_customer)
                    .service(show_settings)
                    .service(edit_settings)
                    .service(show_store),
            )
            .app_data(web::Data::new(repo.clone()))
            .app_data(sender_data.clone())
            .app_data(trigger_data.clone())
    })
    .bind((address, port))?
    .run()
    .await
}
