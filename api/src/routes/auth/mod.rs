//! Authentication route handlers: register, login, logout, refresh.

pub mod login;
pub mod logout;
pub mod refresh;
pub mod register;

pub use login::login;
pub use logout::logout;
pub use refresh::refresh;
pub use register::register;

use actix_web::cookie::{time::Duration, Cookie, SameSite};

use crate::middleware::auth::AUTH_COOKIE_NAME;

/// Session cookie carrying the access token. Max-Age matches the token
/// lifetime so the browser drops it the moment the token dies.
pub(crate) fn auth_cookie(token: &str, max_age_secs: i64, secure: bool) -> Cookie<'static> {
    Cookie::build(AUTH_COOKIE_NAME, token.to_string())
        .path("/")
        .max_age(Duration::seconds(max_age_secs))
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .finish()
}

/// Expired empty cookie that makes the browser delete the session.
pub(crate) fn removal_cookie(secure: bool) -> Cookie<'static> {
    let mut cookie = Cookie::build(AUTH_COOKIE_NAME, "")
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .finish();
    cookie.make_removal();
    cookie
}
