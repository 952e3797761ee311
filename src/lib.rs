pub mod application;
pub mod auth;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod schema;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use auth::AuthConfig;
pub use db::{create_pool, DbPool};

use application::assignment_service::AssignmentService;
use application::order_service::OrderService;
use infrastructure::delivery_repo::DieselDeliveryRepository;
use infrastructure::order_repo::DieselOrderRepository;

pub type AppOrderService = OrderService<DieselOrderRepository>;
pub type AppAssignmentService = AssignmentService<DieselOrderRepository, DieselDeliveryRepository>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) {
    let mut conn = pool.get().expect("Failed to get DB connection for migrations");
    conn.run_pending_migrations(MIGRATIONS)
        .expect("Failed to run database migrations");
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::orders::create_order,
        handlers::orders::get_order,
        handlers::orders::list_orders,
        handlers::orders::confirm_payment,
        handlers::orders::undo_payment,
        handlers::orders::start_processing,
        handlers::orders::assign_delivery,
        handlers::orders::complete,
        handlers::orders::confirm_delivery,
        handlers::orders::cancel,
        handlers::delivery::assignments,
        handlers::delivery::assign,
        handlers::delivery::update_location,
        handlers::delivery::set_availability,
    ),
    components(schemas(
        handlers::orders::CreateOrderRequest,
        handlers::orders::OrderResponse,
        handlers::orders::AssignDeliveryRequest,
        handlers::orders::ListOrdersResponse,
        handlers::delivery::AssignmentFeedResponse,
        handlers::delivery::NearbyOrderResponse,
        handlers::delivery::CourierProfileResponse,
        handlers::delivery::ClaimRequest,
        handlers::delivery::LocationUpdateRequest,
        handlers::delivery::AvailabilityRequest,
        domain::lifecycle::OrderStatus,
        domain::lifecycle::PaymentStatus,
        domain::order::PaymentMethod,
        domain::courier::ProfileStatus,
        domain::courier::Availability,
        domain::geo::GeoPoint,
    )),
    tags(
        (name = "orders", description = "Order creation and lifecycle"),
        (name = "delivery", description = "Courier assignment and profile"),
    )
)]
struct ApiDoc;

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    pool: DbPool,
    auth: AuthConfig,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    Ok(HttpServer::new(move || {
        let orders = AppOrderService::new(DieselOrderRepository::new(pool.clone()));
        let assignments = AppAssignmentService::new(
            DieselOrderRepository::new(pool.clone()),
            DieselDeliveryRepository::new(pool.clone()),
        );
        App::new()
            .app_data(web::Data::new(auth.clone()))
            .app_data(web::Data::new(orders))
            .app_data(web::Data::new(assignments))
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
            .service(
                web::scope("/orders")
                    .route("", web::post().to(handlers::orders::create_order))
                    .route("", web::get().to(handlers::orders::list_orders))
                    .route("/{id}", web::get().to(handlers::orders::get_order))
                    .route(
                        "/{id}/confirm-payment",
                        web::patch().to(handlers::orders::confirm_payment),
                    )
                    .route(
                        "/{id}/undo-payment",
                        web::patch().to(handlers::orders::undo_payment),
                    )
                    .route(
                        "/{id}/start-processing",
                        web::patch().to(handlers::orders::start_processing),
                    )
                    .route(
                        "/{id}/assign-delivery",
                        web::patch().to(handlers::orders::assign_delivery),
                    )
                    .route("/{id}/complete", web::patch().to(handlers::orders::complete))
                    .route(
                        "/{id}/confirm-delivery",
                        web::patch().to(handlers::orders::confirm_delivery),
                    )
                    .route("/{id}/cancel", web::patch().to(handlers::orders::cancel)),
            )
            .service(
                web::scope("/delivery")
                    .route(
                        "/assignments",
                        web::get().to(handlers::delivery::assignments),
                    )
                    .route("/assign", web::patch().to(handlers::delivery::assign))
                    .route(
                        "/location",
                        web::patch().to(handlers::delivery::update_location),
                    )
                    .route(
                        "/availability",
                        web::patch().to(handlers::delivery::set_availability),
                    ),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
