//! Domain entities representing core business objects.

pub mod pending_challenge;

#[cfg(test)]
mod tests;

pub use pending_challenge::{
    PendingChallenge, CODE_LENGTH, DEFAULT_EXPIRATION_MINUTES, MAX_ATTEMPTS,
};
