use actix_web::{http::header::LOCATION, web, HttpResponse, Responder};
use log::{debug, info};
use serde_json::json;

use crate::{errors::AppError, models::CreateUrlDto, services::UrlService};

type Result<T> = std::result::Result<T, AppError>;

/// Create shortened URL route handler
pub async fn create_handler(
    dto: web::Json<CreateUrlDto>,
    service: web::Data<UrlService>,
) -> Result<impl Responder> {
    let url = service.create(dto.into_inner()).await?;
    Ok(HttpResponse::Created().json(json!({
        "data": url,
        "message": "Successfully created alias",
    })))
}

/// Delete URL route handler
pub async fn delete_handler(
    path: web::Path<String>,
    service: web::Data<UrlService>,
) -> Result<impl Responder> {
    let alias = path.into_inner();
    service.delete(&alias).await?;
    Ok(HttpResponse::Ok().json(json!({
        "deleted_alias": &alias,
        "message": format!("Successfully deleted URL with alias '{}'", alias),
    })))
}

/// Redirect route handler
pub async fn redirect_handler(
    path: web::Path<String>,
    service: web::Data<UrlService>,
) -> Result<impl Responder> {
    let alias = path.into_inner();
    debug!("Redirect requested for alias: {}", alias);

    // Resolve the alias, it should fail if not found
    let url = service.resolve(&alias).await?;

    // Log the successful redirect
    info!("Redirecting '{}' to '{}'", alias, url);

    // Return redirect response
    Ok(HttpResponse::TemporaryRedirect()
        .insert_header((LOCATION, url))
        .finish())
}
