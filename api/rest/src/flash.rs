use actix_web::{
    cookie::{Cookie, Key},
    HttpRequest,
};

use crate::{
    page::{Notice, NoticeLevel},
    util::signed_cookie,
};

pub const FLASH_COOKIE: &str = "flash";

/// One-shot notices carried across a redirect in a signed cookie.
///
/// Only the notice code travels in the cookie; the text is resolved here.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Flash {
    ContactSent,
}

impl Flash {
    fn code(&self) -> &'static str {
        match self {
            Self::ContactSent => "contact_sent",
        }
    }

    fn from_code(code: &str) -> Option<Self> {
        match code {
            "contact_sent" => Some(Self::ContactSent),
            _ => None,
        }
    }

    pub fn notice(&self) -> Notice {
        match self {
            Self::ContactSent => Notice::new(
                NoticeLevel::Success,
                "Votre message a été envoyé avec succès.",
            ),
        }
    }

    pub fn to_cookie(self, key: &Key) -> Cookie<'static> {
        signed_cookie::sign(FLASH_COOKIE, self.code(), key)
    }
}

/// Reads the flash left by the previous response, if it carries a valid signature.
pub fn read(req: &HttpRequest, key: &Key) -> Option<Flash> {
    let code = signed_cookie::verified_value(req, FLASH_COOKIE, key)?;
    Flash::from_code(&code)
}

pub fn removal_cookie() -> Cookie<'static> {
    signed_cookie::removal(FLASH_COOKIE)
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;

    use super::*;

    fn key() -> Key {
        Key::derive_from(b"0123456789abcdef0123456789abcdef")
    }

    #[test]
    fn signed_cookie_reads_back() {
        let key = key();
        let cookie = Flash::ContactSent.to_cookie(&key);
        assert_ne!(cookie.value(), "contact_sent");

        let req = TestRequest::default().cookie(cookie).to_http_request();
        assert_eq!(read(&req, &key), Some(Flash::ContactSent));
    }

    #[test]
    fn unsigned_or_foreign_cookies_are_ignored() {
        let key = key();

        let forged = Cookie::new(FLASH_COOKIE, "contact_sent");
        let req = TestRequest::default().cookie(forged).to_http_request();
        assert_eq!(read(&req, &key), None);

        let other_key = Key::derive_from(b"fedcba9876543210fedcba9876543210");
        let foreign = Flash::ContactSent.to_cookie(&other_key);
        let req = TestRequest::default().cookie(foreign).to_http_request();
        assert_eq!(read(&req, &key), None);
    }

    #[test]
    fn removal_cookie_expires_immediately() {
        let cookie = removal_cookie();
        assert_eq!(cookie.name(), FLASH_COOKIE);
        assert_eq!(cookie.value(), "");
        assert!(cookie.max_age().is_some_and(|age| age.is_zero()));
    }
}
