use actix_web::cookie::time::Duration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::{HttpRequest, HttpResponse};
use tracing::{info, warn};

use crate::model::OwnerId;

pub const OWNER_COOKIE: &str = "caddie_owner";
const COOKIE_DAYS: i64 = 400;

/// Who is asking. `fresh` means the token was minted for this request and the
/// response must carry the cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visitor {
    pub owner: OwnerId,
    pub fresh: bool,
}

/// The owner named by the request cookie, if it holds a well-formed token.
#[must_use]
pub fn owner_from_request(req: &HttpRequest) -> Option<OwnerId> {
    req.cookie(OWNER_COOKIE)
        .and_then(|c| OwnerId::parse(c.value()))
}

/// Read the owner cookie, minting a new owner for first-time visitors.
#[must_use]
pub fn visitor(req: &HttpRequest) -> Visitor {
    match owner_from_request(req) {
        Some(owner) => Visitor {
            owner,
            fresh: false,
        },
        None => {
            let owner = OwnerId::mint();
            info!(owner = %owner, "new visitor");
            Visitor { owner, fresh: true }
        }
    }
}

#[must_use]
pub fn owner_cookie(owner: &OwnerId) -> Cookie<'static> {
    Cookie::build(OWNER_COOKIE, owner.as_str().to_owned())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(Duration::days(COOKIE_DAYS))
        .finish()
}

/// Attach the cookie when the visitor is new.
#[must_use]
pub fn remember(mut resp: HttpResponse, visitor: &Visitor) -> HttpResponse {
    if visitor.fresh {
        if let Err(e) = resp.add_cookie(&owner_cookie(&visitor.owner)) {
            warn!("Failed to set owner cookie: {e}");
        }
    }
    resp
}
