//! Gateway-injected identity headers extractor.

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use http::StatusCode;
use http::request::Parts;

pub const USER_ID_HEADER: &str = "x-foodgram-user-id";
pub const USER_STAFF_HEADER: &str = "x-foodgram-user-staff";

/// Caller identity injected by the gateway via `x-foodgram-user-id` and
/// `x-foodgram-user-staff`.
///
/// As a required extractor it rejects with 401 when the id header is absent or
/// malformed. As `Option<IdentityHeaders>` an absent id yields `None` (anonymous)
/// while a malformed one is still a 401. The staff header is optional and
/// defaults to `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentityHeaders {
    pub user_id: i32,
    pub is_staff: bool,
}

impl IdentityHeaders {
    /// Author-or-staff check used by write endpoints on owned resources.
    pub fn can_modify(&self, owner_id: i32) -> bool {
        self.is_staff || self.user_id == owner_id
    }
}

enum Parsed {
    Absent,
    Malformed,
    Present(IdentityHeaders),
}

fn parse(parts: &Parts) -> Parsed {
    let Some(raw_id) = parts.headers.get(USER_ID_HEADER) else {
        return Parsed::Absent;
    };
    let Some(user_id) = raw_id
        .to_str()
        .ok()
        .and_then(|s| s.trim().parse::<i32>().ok())
    else {
        return Parsed::Malformed;
    };
    let is_staff = match parts.headers.get(USER_STAFF_HEADER) {
        None => false,
        Some(v) => match v.to_str().map(str::trim) {
            Ok("true" | "1") => true,
            Ok("false" | "0") => false,
            _ => return Parsed::Malformed,
        },
    };
    Parsed::Present(IdentityHeaders { user_id, is_staff })
}

impl<S> FromRequestParts<S> for IdentityHeaders
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    // axum-core 0.5 declares `fn -> impl Future + Send`; parse synchronously and
    // return a 'static async block so no borrow of `parts` is captured.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let parsed = parse(parts);
        async move {
            match parsed {
                Parsed::Present(identity) => Ok(identity),
                Parsed::Absent | Parsed::Malformed => Err(StatusCode::UNAUTHORIZED),
            }
        }
    }
}

impl<S> OptionalFromRequestParts<S> for IdentityHeaders
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Option<Self>, Self::Rejection>> + Send {
        let parsed = parse(parts);
        async move {
            match parsed {
                Parsed::Present(identity) => Ok(Some(identity)),
                Parsed::Absent => Ok(None),
                Parsed::Malformed => Err(StatusCode::UNAUTHORIZED),
            }
        }
    }
}
