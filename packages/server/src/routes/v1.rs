use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/categories", category_routes())
        .nest("/okrs", objective_routes())
        .nest("/key-results", key_result_routes())
        .nest("/roadmap-items", roadmap_item_routes())
        .nest("/educational-roadmap", educational_roadmap_routes())
        .nest("/educational-resources", educational_resource_routes())
        .nest("/educational-trail", educational_trail_routes())
        .nest("/trail-activities", trail_activity_routes())
}

fn category_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::category::list_categories,
            handlers::category::create_category
        ))
        .routes(routes!(
            handlers::category::get_category,
            handlers::category::update_category,
            handlers::category::delete_category
        ))
}

fn objective_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::objective::list_objectives,
            handlers::objective::create_objective
        ))
        .routes(routes!(
            handlers::objective::get_objective,
            handlers::objective::update_objective,
            handlers::objective::delete_objective
        ))
        .routes(routes!(handlers::objective::generate_objective_key_results))
        .routes(routes!(handlers::objective::list_objective_key_results))
}

fn key_result_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::key_result::list_key_results,
            handlers::key_result::create_key_result
        ))
        .routes(routes!(
            handlers::key_result::get_key_result,
            handlers::key_result::update_key_result,
            handlers::key_result::delete_key_result
        ))
        .routes(routes!(
            handlers::key_result::create_roadmap,
            handlers::key_result::get_roadmap,
            handlers::key_result::delete_roadmap
        ))
}

fn roadmap_item_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::roadmap_item::update_roadmap_item))
        .routes(routes!(handlers::educational_roadmap::get_educational_roadmap))
        .routes(routes!(
            handlers::educational_trail::get_educational_trail,
            handlers::educational_trail::delete_educational_trail
        ))
}

fn educational_roadmap_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(
        handlers::educational_roadmap::create_educational_roadmap
    ))
}

fn educational_resource_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(
        handlers::educational_roadmap::update_educational_resource
    ))
}

fn educational_trail_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::educational_trail::create_educational_trail))
        .routes(routes!(handlers::educational_trail::create_draft_trail))
}

fn trail_activity_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(handlers::educational_trail::update_trail_activity))
}
