//! Admin panel pages.

use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::{PageQuery, base_context, redirect, render_template, session_rejected};
use crate::services::{ServiceError, admin as admin_service};

const ADMIN_URL: &str = "/users/admin";

fn not_authorized() -> HttpResponse {
    FlashMessage::error("Not authorized to access this page.").send();
    redirect("/users/profile")
}

#[get("/admin")]
pub async fn show_users(
    user: AuthenticatedUser,
    params: web::Query<PageQuery>,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match admin_service::list_users(repo.get_ref(), &user, params.page) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, Some(&user), "admin");
            context.insert("users", &data.users);
            render_template(&tera, "admin/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => session_rejected(),
        Err(ServiceError::Forbidden) => not_authorized(),
        Err(err) => {
            log::error!("Failed to list users: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/admin/users/{user_id}")]
pub async fn show_user(
    user_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match admin_service::view_user(repo.get_ref(), &user, user_id.into_inner()) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, Some(&user), "admin");
            context.insert("user", &data.user);
            context.insert("posts", &data.posts);
            render_template(&tera, "admin/user.html", &context)
        }
        Err(ServiceError::Unauthorized) => session_rejected(),
        Err(ServiceError::Forbidden) => not_authorized(),
        Err(ServiceError::NotFound) => {
            FlashMessage::error("User not found.").send();
            redirect(ADMIN_URL)
        }
        Err(err) => {
            log::error!("Failed to load user: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/admin/users/{user_id}/delete")]
pub async fn delete_user(
    user_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let user_id = user_id.into_inner();

    match admin_service::delete_user(repo.get_ref(), &user, user_id) {
        Ok(()) => {
            FlashMessage::success("User and their posts deleted.").send();
            redirect(ADMIN_URL)
        }
        Err(ServiceError::Unauthorized) => session_rejected(),
        Err(ServiceError::Forbidden) => not_authorized(),
        Err(ServiceError::NotFound) => {
            FlashMessage::error("User not found.").send();
            redirect(ADMIN_URL)
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(ADMIN_URL)
        }
        Err(err) => {
            log::error!("Failed to delete user {user_id}: {err}");
            FlashMessage::error("There was a problem deleting the user.").send();
            redirect(ADMIN_URL)
        }
    }
}

#[post("/admin/posts/{post_id}/delete")]
pub async fn delete_post(
    post_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let post_id = post_id.into_inner();

    match admin_service::delete_post(repo.get_ref(), &user, post_id) {
        Ok(author_id) => {
            FlashMessage::success("Post deleted.").send();
            redirect(&format!("{ADMIN_URL}/users/{author_id}"))
        }
        Err(ServiceError::Unauthorized) => session_rejected(),
        Err(ServiceError::Forbidden) => not_authorized(),
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Post not found.").send();
            redirect(ADMIN_URL)
        }
        Err(err) => {
            log::error!("Failed to delete post {post_id}: {err}");
            FlashMessage::error("There was a problem deleting the post.").send();
            redirect(ADMIN_URL)
        }
    }
}
