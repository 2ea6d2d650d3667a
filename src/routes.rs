use crate::{
    api::{attendance, deduction, leave, payslip, staff},
    auth::{handlers, middleware::auth_middleware},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::from_fn, web};
use std::sync::Arc;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    let login_limiter = Arc::new(build_limiter(config.rate_login_per_min));
    let register_limiter = Arc::new(build_limiter(config.rate_register_per_min));
    let refresh_limiter = Arc::new(build_limiter(config.rate_refresh_per_min));
    let protected_limiter = Arc::new(build_limiter(config.rate_protected_per_min));

    // Public routes
    cfg.service(
        web::scope("/auth")
            .service(
                web::resource("/login")
                    .wrap(login_limiter.clone())
                    .route(web::post().to(handlers::login)),
            )
            .service(
                web::resource("/register")
                    .wrap(register_limiter.clone())
                    .route(web::post().to(handlers::register)),
            )
            .service(
                web::resource("/refresh")
                    .wrap(refresh_limiter.clone())
                    .route(web::post().to(handlers::refresh_token)),
            )
            .service(
                web::resource("/logout")
                    .wrap(login_limiter.clone())
                    .route(web::post().to(handlers::logout)),
            ),
    );

    // Protected routes
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(from_fn(auth_middleware)) // authentication
            .wrap(protected_limiter) // rate limiting
            .service(handlers::whoami)
            .service(
                web::scope("/staff")
                    // /staff
                    .service(
                        web::resource("")
                            .route(web::post().to(staff::create_staff))
                            .route(web::get().to(staff::list_staff)),
                    )
                    // /staff/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::put().to(staff::update_staff))
                            .route(web::get().to(staff::get_staff))
                            .route(web::delete().to(staff::delete_staff)),
                    ),
            )
            .service(
                web::scope("/leave")
                    // /leave/types
                    .service(web::resource("/types").route(web::get().to(leave::list_leave_types)))
                    // /leave/balance/{staff_ref}
                    .service(
                        web::resource("/balance/{staff_ref}")
                            .route(web::get().to(leave::get_balance)),
                    )
                    // /leave/applications
                    .service(
                        web::resource("/applications")
                            .route(web::get().to(leave::list_applications))
                            .route(web::post().to(leave::create_application)),
                    )
                    // /leave/applications/{id}
                    .service(
                        web::resource("/applications/{id}")
                            .route(web::get().to(leave::get_application))
                            .route(web::delete().to(leave::cancel_application)),
                    )
                    // /leave/applications/{id}/approve
                    .service(
                        web::resource("/applications/{id}/approve")
                            .route(web::put().to(leave::approve_application)),
                    )
                    // /leave/applications/{id}/reject
                    .service(
                        web::resource("/applications/{id}/reject")
                            .route(web::put().to(leave::reject_application)),
                    ),
            )
            .service(
                web::scope("/attendance")
                    // /attendance/mark
                    .service(web::resource("/mark").route(web::post().to(attendance::mark)))
                    // /attendance/records/{id}
                    .service(
                        web::resource("/records/{id}")
                            .route(web::put().to(attendance::update_record)),
                    )
                    // /attendance/bulk-update
                    .service(
                        web::resource("/bulk-update")
                            .route(web::post().to(attendance::bulk_update)),
                    )
                    // /attendance/summary/{staff_ref}
                    .service(
                        web::resource("/summary/{staff_ref}")
                            .route(web::get().to(attendance::summary)),
                    )
                    // /attendance/{staff_ref}/{year}/{month}
                    .service(
                        web::resource("/{staff_ref}/{year}/{month}")
                            .route(web::get().to(attendance::month_records)),
                    ),
            )
            .service(
                web::scope("/payslip")
                    // /payslip/calculate
                    .service(web::resource("/calculate").route(web::post().to(payslip::calculate)))
                    // /payslip/generate/{staff_ref}/{year}/{month}
                    .service(
                        web::resource("/generate/{staff_ref}/{year}/{month}")
                            .route(web::post().to(payslip::regenerate_payslip)),
                    )
                    // /payslip/history/{staff_ref}
                    .service(
                        web::resource("/history/{staff_ref}")
                            .route(web::get().to(payslip::history)),
                    )
                    // /payslip/{staff_ref}/{year}/{month}/document
                    .service(
                        web::resource("/{staff_ref}/{year}/{month}/document")
                            .route(web::get().to(payslip::payslip_document)),
                    )
                    // /payslip/{staff_ref}/{year}/{month}
                    .service(
                        web::resource("/{staff_ref}/{year}/{month}")
                            .route(web::get().to(payslip::get_payslip)),
                    ),
            )
            .service(
                web::scope("/deductions")
                    // /deductions/{staff_ref}
                    .service(
                        web::resource("/{staff_ref}")
                            .route(web::get().to(deduction::get_schedule))
                            .route(web::put().to(deduction::put_schedule)),
                    ),
            ),
    );
}

// LOGIN
//  ├─ access_token (15 min)
//  └─ refresh_token (7 days)
//
// API REQUEST
//  └─ Authorization: Bearer access_token
//
// ACCESS EXPIRED
//  └─ POST /refresh with refresh_token
//       └─ returns new access_token
