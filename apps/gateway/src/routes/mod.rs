//! Gateway route table.
//!
//! Every entry forwards to the user service. Protected entries are
//! wrapped in `AuthGate`; public ones reach the proxy directly.

use actix_web::http::Method;
use actix_web::{guard, web};
use auth_token::SecurityConfig;

use crate::error::AppError;
use crate::middleware::AuthGate;
use crate::proxy::forward;

pub mod health;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pub method: Method,
    pub path: &'static str,
    pub protected: bool,
}

impl RouteEntry {
    const fn public(method: Method, path: &'static str) -> Self {
        Self {
            method,
            path,
            protected: false,
        }
    }

    const fn protected(method: Method, path: &'static str) -> Self {
        Self {
            method,
            path,
            protected: true,
        }
    }
}

/// Literal paths come before `{id}` so `/api/users/login` is never
/// captured as an id.
pub const ROUTES: [RouteEntry; 7] = [
    RouteEntry::public(Method::POST, "/api/users/login"),
    RouteEntry::public(Method::POST, "/api/users/register"),
    RouteEntry::protected(Method::GET, "/api/users"),
    RouteEntry::protected(Method::POST, "/api/users"),
    RouteEntry::protected(Method::GET, "/api/users/{id}"),
    RouteEntry::protected(Method::PUT, "/api/users/{id}"),
    RouteEntry::protected(Method::DELETE, "/api/users/{id}"),
];

/// A single actix resource: one path, one protection level, its methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceGroup {
    pub path: &'static str,
    pub protected: bool,
    pub methods: Vec<Method>,
}

/// Group entries by `(path, protected)`, keeping first-seen order.
pub fn group_routes(routes: &[RouteEntry]) -> Vec<ResourceGroup> {
    let mut groups: Vec<ResourceGroup> = Vec::new();

    for entry in routes {
        match groups
            .iter_mut()
            .find(|g| g.path == entry.path && g.protected == entry.protected)
        {
            Some(group) => group.methods.push(entry.method.clone()),
            None => groups.push(ResourceGroup {
                path: entry.path,
                protected: entry.protected,
                methods: vec![entry.method.clone()],
            }),
        }
    }

    groups
}

fn method_guard(methods: Vec<Method>) -> impl guard::Guard {
    guard::fn_guard(move |ctx| methods.contains(&ctx.head().method))
}

/// Register health plus the proxied route table.
///
/// The 404 fallback is attached to the `App` with
/// `default_service(web::to(route_not_found))`.
pub fn configure(cfg: &mut web::ServiceConfig, security: &SecurityConfig) {
    cfg.configure(health::configure_routes);

    for group in group_routes(&ROUTES) {
        let resource = web::resource(group.path)
            .guard(method_guard(group.methods))
            .route(web::route().to(forward));

        if group.protected {
            cfg.service(resource.wrap(AuthGate::new(security.clone())));
        } else {
            cfg.service(resource);
        }
    }
}

pub async fn route_not_found() -> Result<actix_web::HttpResponse, AppError> {
    Err(AppError::RouteNotFound)
}
