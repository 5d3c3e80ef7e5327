//! Faithluna wallet auth gateway.
//!
//! Endpoints:
//! - POST /request-message: issue a challenge message for a wallet
//! - POST /verify: verify a signed challenge, set the `jwt` session cookie
//! - GET  /authenticate: return the claims of the current session
//! - POST /get-nft/{address}: list the NFTs held by a wallet
//! - GET  /logout: clear the session cookie

pub mod middleware;
pub mod routes;
pub mod state;
