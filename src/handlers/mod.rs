pub mod auth;
pub mod projects;
pub mod taxonomies;
pub mod transfer;
pub mod users;

use actix_web::web;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // ── Session routes (protected by JWT via the AuthenticatedUser extractor) ──
    cfg.service(
        web::scope("/auth")
            .route("/me", web::get().to(auth::me))
            .route("/session", web::get().to(auth::session)),
    );

    // ── Project routes; static segments come before `/{id}` ──
    cfg.service(
        web::scope("/projects")
            .route("", web::get().to(projects::get_projects))
            .route("", web::post().to(projects::create_project))
            .route("/import", web::post().to(transfer::import_projects))
            .route("/export", web::get().to(transfer::export_projects))
            .route("/bulk-delete", web::post().to(projects::bulk_delete_projects))
            .route("/{id}", web::get().to(projects::get_project))
            .route("/{id}", web::put().to(projects::update_project))
            .route("/{id}", web::delete().to(projects::delete_project)),
    );

    // ── Taxonomy routes: categories, technologies, tags, industries ──
    cfg.service(
        web::scope("/taxonomies")
            .route("/{kind}", web::get().to(taxonomies::get_terms))
            .route("/{kind}", web::post().to(taxonomies::create_term))
            .route("/{kind}/{id}", web::put().to(taxonomies::rename_term))
            .route("/{kind}/{id}", web::delete().to(taxonomies::delete_term)),
    );

    // ── User routes ──
    cfg.service(
        web::resource("/users")
            .route(web::get().to(users::get_users)),
    );
    cfg.service(
        web::resource("/users/{id}")
            .route(web::get().to(users::get_user))
            .route(web::put().to(users::update_user))
            .route(web::delete().to(users::delete_user)),
    );
}
