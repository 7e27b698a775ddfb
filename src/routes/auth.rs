//! Signup, login and logout pages.

use actix_identity::Identity;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use chrono::Duration;
use tera::Tera;

use crate::forms::auth::{LoginForm, SignupForm};
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::{ServiceError, auth as auth_service};

#[get("/")]
pub async fn index() -> impl Responder {
    redirect("/users/profile")
}

#[get("/signup")]
pub async fn show_signup(
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = base_context(&flash_messages, None, "signup");
    render_template(&tera, "users/signup.html", &context)
}

#[post("/signup")]
pub async fn signup(
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<SignupForm>,
) -> impl Responder {
    match auth_service::signup(repo.get_ref(), form) {
        Ok(_) => {
            FlashMessage::success("Account created. Please log in.").send();
            redirect("/users/login")
        }
        Err(ServiceError::Conflict(message)) | Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/users/signup")
        }
        Err(err) => {
            log::error!("Failed to sign up a user: {err}");
            FlashMessage::error("Signup failed, please try again.").send();
            redirect("/users/signup")
        }
    }
}

#[get("/login")]
pub async fn show_login(
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = base_context(&flash_messages, None, "login");
    render_template(&tera, "users/login.html", &context)
}

#[post("/login")]
pub async fn login(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    web::Form(form): web::Form<LoginForm>,
) -> impl Responder {
    let ttl = Duration::hours(server_config.session_ttl_hours());

    match auth_service::login(repo.get_ref(), form, &server_config.secret, ttl) {
        Ok(token) => match Identity::login(&req.extensions(), token) {
            Ok(_) => redirect("/users/profile"),
            Err(err) => {
                log::error!("Failed to store the session identity: {err}");
                HttpResponse::InternalServerError().finish()
            }
        },
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Login failed.").send();
            redirect("/users/login")
        }
        Err(ServiceError::Forbidden) => {
            FlashMessage::error("Login failed: see your administrator for details.").send();
            redirect("/users/login")
        }
        Err(err) => {
            log::error!("Failed to log in: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/logout")]
pub async fn logout(identity: Option<Identity>) -> impl Responder {
    if let Some(identity) = identity {
        identity.logout();
    }
    redirect("/users/login")
}
