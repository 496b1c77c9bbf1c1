use actix_web::{
    cookie::{Cookie, CookieJar, Key, SameSite},
    HttpRequest,
};

/// Builds a `Path=/`, `HttpOnly`, `SameSite=Lax` cookie whose value is signed with `key`.
pub fn sign(name: &'static str, value: &str, key: &Key) -> Cookie<'static> {
    let cookie = Cookie::build(name, value.to_owned())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish();

    let mut jar = CookieJar::new();
    jar.signed_mut(key).add(cookie.clone());
    jar.get(name).cloned().unwrap_or(cookie)
}

/// Value of the cookie `name`, only when its signature checks out against `key`.
pub fn verified_value(req: &HttpRequest, name: &str, key: &Key) -> Option<String> {
    let cookie = req.cookie(name)?;

    let mut jar = CookieJar::new();
    jar.add_original(cookie);

    let verified = jar.signed(key).get(name)?;
    Some(verified.value().to_owned())
}

pub fn removal(name: &'static str) -> Cookie<'static> {
    let mut cookie = Cookie::build(name, "").path("/").finish();
    cookie.make_removal();
    cookie
}
