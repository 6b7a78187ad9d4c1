//! Account resolution behind an account token.
//!
//! This is the thin layer an HTTP handler calls: it takes the `token` query
//! variable, validates it, asks an [`AccountLookup`] for the account and
//! turns the outcome into a status code and JSON body. Credential failures
//! map to 400, lookup failures to 500.

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, error};

use crate::core::clock::Clock;
use crate::core::codec::Codec;
use crate::core::token::TokenIssuer;
use crate::core::types::Identity;
use crate::error::{Error, LookupError, TokenError};

/// A resolved account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: Identity,
    pub name: String,
    pub email: String,
}

/// Storage collaborator that maps identities to accounts.
pub trait AccountLookup {
    /// # Errors
    ///
    /// `LookupError::NotFound` if no account has this id,
    /// `LookupError::Unavailable` if the store cannot be reached.
    fn find(&self, id: Identity) -> std::result::Result<Account, LookupError>;
}

/// URL variables accepted by the account endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountQuery {
    pub token: Option<String>,
}

/// Status code plus JSON body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reply {
    pub status: u16,
    pub body: serde_json::Value,
}

impl Reply {
    fn ok(account: &Account) -> Self {
        Self {
            status: 200,
            body: json!({ "status": 0, "data": account }),
        }
    }

    fn failure(err: &Error) -> Self {
        let status = err.status();
        Self {
            status,
            body: json!({ "status": status, "message": err.to_string() }),
        }
    }
}

/// Validate the query token and look up its account.
pub fn resolve_account<C, K, L>(
    issuer: &TokenIssuer<C, K>,
    lookup: &L,
    query: &AccountQuery,
) -> Reply
where
    C: Codec,
    K: Clock,
    L: AccountLookup + ?Sized,
{
    let Some(token) = query.token.as_deref().filter(|t| !t.is_empty()) else {
        let err: Error = TokenError::Invalid {
            reason: "missing token".to_string(),
            plaintext: None,
        }
        .into();
        return Reply::failure(&err);
    };

    let claims = match issuer.validate(token) {
        Ok(claims) => claims,
        Err(e) => {
            error!(error = %e, token, "token validation failed");
            return Reply::failure(&e);
        }
    };

    match lookup.find(claims.identity) {
        Ok(account) => {
            debug!(token, id = %account.id, "account resolved");
            Reply::ok(&account)
        }
        Err(e) => {
            let e = Error::from(e);
            error!(error = %e, id = %claims.identity, issued_at = %claims.issued_at, "account lookup failed");
            Reply::failure(&e)
        }
    }
}
