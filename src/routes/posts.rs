//! Profile page and the signed-in user's own posts.

use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::forms::posts::PostForm;
use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::{PageQuery, base_context, redirect, render_template, session_rejected};
use crate::services::{ServiceError, auth as auth_service, posts as posts_service};

#[get("/profile")]
pub async fn show_profile(
    user: AuthenticatedUser,
    params: web::Query<PageQuery>,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match posts_service::load_profile(repo.get_ref(), &user, params.page) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, Some(&user), "profile");
            context.insert("user", &data.user);
            context.insert("posts", &data.posts);
            render_template(&tera, "users/profile.html", &context)
        }
        Err(ServiceError::Unauthorized) => session_rejected(),
        Err(err) => {
            log::error!("Failed to load profile: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/posts/new")]
pub async fn show_new_post(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match auth_service::current_user(repo.get_ref(), &user) {
        Ok(_) => {
            let context = base_context(&flash_messages, Some(&user), "new_post");
            render_template(&tera, "posts/new.html", &context)
        }
        Err(ServiceError::Unauthorized) => session_rejected(),
        Err(err) => {
            log::error!("Failed to load the new post page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/posts/new")]
pub async fn create_post(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<PostForm>,
) -> impl Responder {
    match posts_service::create_post(repo.get_ref(), &user, form) {
        Ok(_) => {
            FlashMessage::success("Post published.").send();
            redirect("/users/profile")
        }
        Err(ServiceError::Unauthorized) => session_rejected(),
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/users/posts/new")
        }
        Err(err) => {
            log::error!("Failed to create a post: {err}");
            FlashMessage::error("An error occurred with your post.").send();
            redirect("/users/posts/new")
        }
    }
}

#[get("/posts/{post_id}/edit")]
pub async fn show_edit_post(
    post_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match posts_service::load_post_for_edit(repo.get_ref(), &user, post_id.into_inner()) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, Some(&user), "edit_post");
            context.insert("post", &data.post);
            render_template(&tera, "posts/edit.html", &context)
        }
        Err(ServiceError::Unauthorized) => session_rejected(),
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Post not found.").send();
            redirect("/users/profile")
        }
        Err(err) => {
            log::error!("Failed to load post for editing: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/posts/{post_id}/edit")]
pub async fn save_post(
    post_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<PostForm>,
) -> impl Responder {
    let post_id = post_id.into_inner();

    match posts_service::update_post(repo.get_ref(), &user, post_id, form) {
        Ok(_) => {
            FlashMessage::success("Post updated.").send();
            redirect("/users/profile")
        }
        Err(ServiceError::Unauthorized) => session_rejected(),
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Post not found.").send();
            redirect("/users/profile")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(&format!("/users/posts/{post_id}/edit"))
        }
        Err(err) => {
            log::error!("Failed to update post {post_id}: {err}");
            FlashMessage::error("There was a problem updating the post.").send();
            redirect("/users/profile")
        }
    }
}

#[post("/posts/{post_id}/delete")]
pub async fn delete_post(
    post_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let post_id = post_id.into_inner();

    match posts_service::delete_post(repo.get_ref(), &user, post_id) {
        Ok(()) => {
            FlashMessage::success("Post deleted.").send();
            redirect("/users/profile")
        }
        Err(ServiceError::Unauthorized) => session_rejected(),
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Post not found.").send();
            redirect("/users/profile")
        }
        Err(err) => {
            log::error!("Failed to delete post {post_id}: {err}");
            FlashMessage::error("There was a problem deleting your post.").send();
            redirect("/users/profile")
        }
    }
}
