mod callback;
mod health;
mod pages;
mod session;
mod signin;

pub use callback::oauth_callback;
pub use health::health_check;
pub use pages::{index, login_page};
pub use session::{get_session, signout};
pub use signin::signin;

use axum_extra::extract::cookie::{Cookie, SameSite};

pub const SESSION_COOKIE: &str = "portal_session";

pub(crate) fn session_cookie(token: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, token);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie
}

pub(crate) fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::from(SESSION_COOKIE);
    cookie.set_path("/");
    cookie
}
