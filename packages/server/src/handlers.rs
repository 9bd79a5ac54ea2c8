//! HTTP handler functions for the `/api` endpoints.

use actix_web::cookie::Cookie;
use actix_web::{HttpRequest, HttpResponse, web};
use gorod_api_models::{ApiHealth, ApiResponse, LoginRequest, Statement, StatementStatus};
use gorod_district_models::District;

use crate::session::SESSION_COOKIE;
use crate::validate::validate;
use crate::{AppState, ServerError, analytics};

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

fn internal_error(context: &str, e: &ServerError) -> HttpResponse {
    log::error!("{context}: {e}");
    HttpResponse::InternalServerError().json(ApiResponse::error(e.to_string()))
}

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error("authentication required"))
}

fn not_found(id: u64) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error(format!("statement {id} not found")))
}

async fn is_admin(req: &HttpRequest, state: &AppState) -> bool {
    match req.cookie(SESSION_COOKIE) {
        Some(cookie) => state.sessions.contains(cookie.value()).await,
        None => false,
    }
}

/// `GET /api/analitic/district`
pub async fn district_analytics(state: web::Data<AppState>) -> HttpResponse {
    match state.store.list().await {
        Ok(statements) => HttpResponse::Ok().json(analytics::by_district(&statements)),
        Err(e) => internal_error("Failed to count by district", &e),
    }
}

/// `GET /api/analitic/period`
pub async fn period_analytics(state: web::Data<AppState>) -> HttpResponse {
    match state.store.list().await {
        Ok(statements) => HttpResponse::Ok().json(analytics::by_period(&statements)),
        Err(e) => internal_error("Failed to count by period", &e),
    }
}

/// `GET /api/analitic/categories/{districtId}`
pub async fn category_analytics(
    state: web::Data<AppState>,
    path: web::Path<u8>,
) -> HttpResponse {
    let id = path.into_inner();
    let Some(district) = District::from_id(id) else {
        return HttpResponse::NotFound().json(ApiResponse::error(format!("unknown district {id}")));
    };
    match state.store.list().await {
        Ok(statements) => HttpResponse::Ok().json(analytics::by_category(&statements, district)),
        Err(e) => internal_error("Failed to count by category", &e),
    }
}

/// `GET /api/statement`
///
/// Statements awaiting review. Requires an administrator session.
pub async fn list_statements(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    if !is_admin(&req, &state).await {
        return unauthorized();
    }
    match state.store.list().await {
        Ok(statements) => {
            let pending: Vec<Statement> = statements.into_iter().filter(|s| s.admin).collect();
            HttpResponse::Ok().json(pending)
        }
        Err(e) => internal_error("Failed to list statements", &e),
    }
}

/// `POST /api/statement`
///
/// Body is an array of statements. Either all are stored or none.
pub async fn create_statements(
    state: web::Data<AppState>,
    body: web::Json<Vec<Statement>>,
) -> HttpResponse {
    let mut statements = body.into_inner();
    if statements.is_empty() {
        return HttpResponse::BadRequest().json(ApiResponse::error("no statements given"));
    }

    for statement in &mut statements {
        if let Err(message) = validate(statement) {
            log::warn!("Rejected statement: {message}");
            return HttpResponse::BadRequest().json(ApiResponse::error(message));
        }
        statement.admin = true;
        statement.status = StatementStatus::New;
    }

    let mut created = Vec::with_capacity(statements.len());
    for statement in statements {
        match state.store.insert(statement).await {
            Ok(stored) => created.push(stored),
            Err(e) => return internal_error("Failed to store statement", &e),
        }
    }
    log::info!("Received {} statements", created.len());
    HttpResponse::Created().json(created)
}

/// `PATCH /api/statement/{id}`
///
/// Body is a one-element array holding the updated record; the path id
/// wins over the body's. Requires an administrator session.
pub async fn update_statement(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<u64>,
    body: web::Json<Vec<Statement>>,
) -> HttpResponse {
    if !is_admin(&req, &state).await {
        return unauthorized();
    }
    let id = path.into_inner();
    let Some(mut statement) = body.into_inner().into_iter().next() else {
        return HttpResponse::BadRequest().json(ApiResponse::error("no statement given"));
    };
    if let Err(message) = validate(&mut statement) {
        return HttpResponse::BadRequest().json(ApiResponse::error(message));
    }

    let existing = match state.store.get(id).await {
        Ok(Some(existing)) => existing,
        Ok(None) => return not_found(id),
        Err(e) => return internal_error("Failed to load statement", &e),
    };
    statement.created_at = existing.created_at;

    match state.store.update(id, statement).await {
        Ok(Some(updated)) => {
            log::info!("Statement #{id} updated (status {})", updated.status);
            HttpResponse::Ok().json([updated])
        }
        Ok(None) => not_found(id),
        Err(e) => internal_error("Failed to update statement", &e),
    }
}

/// `DELETE /api/statement/{id}`
///
/// Requires an administrator session.
pub async fn delete_statement(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<u64>,
) -> HttpResponse {
    if !is_admin(&req, &state).await {
        return unauthorized();
    }
    let id = path.into_inner();
    match state.store.delete(id).await {
        Ok(true) => {
            log::info!("Statement #{id} deleted");
            HttpResponse::NoContent().finish()
        }
        Ok(false) => not_found(id),
        Err(e) => internal_error("Failed to delete statement", &e),
    }
}

/// `POST /api/auth/login`
pub async fn login(state: web::Data<AppState>, body: web::Json<LoginRequest>) -> HttpResponse {
    if !state.config.check_admin(&body.username, &body.password) {
        log::warn!("Rejected login for {:?}", body.username);
        return HttpResponse::Unauthorized()
            .json(ApiResponse::error("invalid username or password"));
    }

    let token = state.sessions.open().await;
    log::info!("Administrator {} logged in", body.username);
    HttpResponse::Ok()
        .cookie(
            Cookie::build(SESSION_COOKIE, token)
                .path("/")
                .http_only(true)
                .finish(),
        )
        .json(ApiResponse::ok())
}
