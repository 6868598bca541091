//! User registration, credential checks, profile updates, and transfers.

use openreview_ledger::{Directory, StateTxn, load_user, store_user};
use openreview_settlement::record_mint;
use openreview_types::{CredentialHash, EngineConfig, OpenreviewError, Result, User};
use rust_decimal::Decimal;

/// Register a new user and grant the initial token balance.
///
/// The grant is recorded as a mint in the supply ledger — registration is
/// the only place tokens enter the economy.
///
/// # Errors
/// Returns `DuplicateName` if the name is taken.
pub fn register_user(
    txn: &mut StateTxn<'_>,
    config: &EngineConfig,
    name: &str,
    credential: &str,
    email: &str,
    research_areas: Vec<String>,
) -> Result<User> {
    let mut directory = Directory::load(txn)?;
    let user = User::new(name, credential, email, research_areas, config.initial_balance);
    directory.insert(name, user.id)?;
    directory.store(txn)?;
    store_user(txn, &user)?;
    record_mint(txn, config.initial_balance)?;

    tracing::info!(user = %user.id, name, "user registered");
    Ok(user)
}

/// Check a credential against the stored salted hash.
///
/// # Errors
/// Returns `UserNotFound` for unregistered names. A wrong credential is a
/// `false` result, not an error — callers decide how to react.
pub fn validate_user(txn: &mut StateTxn<'_>, name: &str, credential: &str) -> Result<bool> {
    let directory = Directory::load(txn)?;
    let user = load_user(txn, directory.resolve(name)?)?;
    Ok(user.credential.matches(credential))
}

/// Update credential, email, and research areas.
///
/// # Errors
/// Returns `WrongCredential` if the old credential does not match.
pub fn update_profile(
    txn: &mut StateTxn<'_>,
    name: &str,
    old_credential: &str,
    new_credential: &str,
    email: &str,
    research_areas: Vec<String>,
) -> Result<User> {
    let directory = Directory::load(txn)?;
    let mut user = load_user(txn, directory.resolve(name)?)?;

    if !user.credential.matches(old_credential) {
        return Err(OpenreviewError::WrongCredential {
            name: name.to_string(),
        });
    }

    user.credential = CredentialHash::derive(name, new_credential);
    user.email = email.to_string();
    user.set_research_areas(research_areas);
    store_user(txn, &user)?;
    Ok(user)
}

/// Move tokens directly between two users.
///
/// # Errors
/// `UserNotFound` for either name; `InsufficientBalance` if the sender is
/// short (nothing moves on failure).
pub fn transfer(
    txn: &mut StateTxn<'_>,
    from_name: &str,
    to_name: &str,
    amount: Decimal,
) -> Result<(User, User)> {
    let directory = Directory::load(txn)?;
    let from_id = directory.resolve(from_name)?;
    let to_id = directory.resolve(to_name)?;

    let mut from = load_user(txn, from_id)?;
    from.debit(amount)?;
    store_user(txn, &from)?;

    // Read-your-writes: a self-transfer sees the debit and nets to zero.
    let mut to = load_user(txn, to_id)?;
    to.credit(amount);
    store_user(txn, &to)?;

    tracing::debug!(%from_id, %to_id, %amount, "tokens transferred");
    Ok((load_user(txn, from_id)?, to))
}
