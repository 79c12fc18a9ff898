use actix_web::http::StatusCode;
use actix_web::middleware::ErrorHandlers;
use actix_web::web;
use actix_web_httpauth::middleware::HttpAuthentication;

use crate::types::error::AppError;
use crate::utils::webutils::{render_unauthorized, validate_admin_token};

pub mod admin;
pub mod auth;
pub mod buyers;
pub mod credentials;
pub mod health;
pub mod inquiries;
pub mod proposals;
pub mod reference;
pub mod suppliers;
pub mod tenders;

/// Malformed bodies, queries and paths all come back in the usual error shape.
fn extractor_configs(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _| AppError::BadRequest(err.to_string()).into()),
    );
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    let admin_auth = HttpAuthentication::bearer(validate_admin_token);

    extractor_configs(cfg);
    cfg.service(
        web::scope("/api")
            .wrap(ErrorHandlers::new().handler(StatusCode::UNAUTHORIZED, render_unauthorized))
            .service(
                web::scope("/admin")
                    .wrap(admin_auth)
                    .service(admin::create_domain)
                    .service(admin::create_sub_domain)
                    .service(admin::create_region)
                    .service(admin::create_city)
                    .service(admin::create_license)
                    .service(admin::create_certificate)
                    .service(admin::expire_tenders),
            )
            .service(health::health)
            .service(
                web::scope("/auth")
                    .service(auth::login::buyer_login)
                    .service(auth::login::supplier_login)
                    .service(auth::otp::send_otp)
                    .service(auth::session::logout)
                    .service(auth::session::me),
            )
            .service(reference::domains)
            .service(reference::sub_domains)
            .service(reference::regions)
            .service(reference::cities)
            .service(reference::licenses)
            .service(reference::certificates)
            .service(buyers::register)
            .service(buyers::list)
            .service(buyers::show)
            .service(buyers::update)
            .service(buyers::remove)
            .service(buyers::tenders)
            .service(suppliers::register)
            .service(suppliers::list)
            .service(suppliers::show)
            .service(suppliers::update)
            .service(suppliers::remove)
            .service(suppliers::proposals)
            .service(suppliers::inquiries)
            .service(credentials::list_licenses)
            .service(credentials::attach_license)
            .service(credentials::detach_license)
            .service(credentials::list_certificates)
            .service(credentials::attach_certificate)
            .service(credentials::detach_certificate)
            .service(tenders::crud::list)
            .service(tenders::crud::create)
            .service(tenders::crud::show)
            .service(tenders::crud::update)
            .service(tenders::crud::remove)
            .service(tenders::lifecycle::finish)
            .service(tenders::lifecycle::award)
            .service(tenders::lifecycle::awarded_supplier)
            .service(proposals::submit)
            .service(proposals::list_for_tender)
            .service(proposals::download_file)
            .service(inquiries::ask)
            .service(inquiries::answer)
            .service(inquiries::list_public)
            .service(inquiries::list_all),
    );
}
