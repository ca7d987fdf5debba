use actix_web::{http::header::ContentType, web, HttpResponse, Result};

use product_openapi::ApiDocuments;

/// OpenAPI document as JSON
pub async fn openapi_json(docs: web::Data<ApiDocuments>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok()
        .content_type(ContentType::json())
        .body(docs.json().to_owned()))
}

/// OpenAPI document as YAML
pub async fn openapi_yaml(docs: web::Data<ApiDocuments>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok()
        .content_type("application/yaml")
        .body(docs.yaml().to_owned()))
}
