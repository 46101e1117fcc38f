//! Post handlers - CRUD, publishing, and slug lookup.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::content::{CreatePost, UpdatePost};
use quill_shared::{ApiResponse, CreatePostRequest, PostResponse, UpdatePostRequest};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let post = state
        .post_service
        .create_post(
            &identity.scope(),
            CreatePost {
                title: req.title,
                content: req.content,
                attached_file_ids: req.attached_file_ids,
            },
        )
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(PostResponse::from(post))))
}

/// GET /api/posts - posts authored by the authenticated user.
pub async fn list_posts(
    state: web::Data<AppState>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    let posts = state.post_service.list_by_author(&identity.scope()).await?;
    let responses: Vec<PostResponse> = posts.into_iter().map(PostResponse::from).collect();

    Ok(HttpResponse::Ok().json(ApiResponse::ok(responses)))
}

/// GET /api/posts/{slug}
pub async fn get_post_by_slug(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let slug = path.into_inner();
    let post = state
        .post_service
        .get_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post with slug '{}' not found", slug)))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(PostResponse::from(post))))
}

/// PATCH /api/posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let post = state
        .post_service
        .update_post(
            &identity.scope(),
            path.into_inner(),
            UpdatePost {
                title: req.title,
                content: req.content,
                attached_file_ids: req.attached_file_ids,
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(PostResponse::from(post))))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state
        .post_service
        .delete_post(&identity.scope(), path.into_inner())
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

/// POST /api/posts/{id}/publish
pub async fn publish_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state
        .post_service
        .publish_post(&identity.scope(), path.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(PostResponse::from(post))))
}

/// DELETE /api/posts/{id}/publish
pub async fn unpublish_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state
        .post_service
        .unpublish_post(&identity.scope(), path.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(PostResponse::from(post))))
}
