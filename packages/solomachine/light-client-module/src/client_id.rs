//! Client identifier validation for the module surface.

use solomachine_utils::ensure;

use crate::ModuleError;

/// The client type tag this module serves.
pub const SOLOMACHINE_CLIENT_TYPE: &str = "06-solomachine";

/// Validates that a client identifier is well formed and names a solo
/// machine client. Identifiers are `{client-type}-{counter}`; allocation of
/// the counter is the host's concern.
///
/// # Errors
/// Returns an error if the identifier cannot be parsed or carries a
/// different client type.
pub fn validate_client_id(client_id: &str) -> Result<(), ModuleError> {
    let (client_type, counter) = client_id
        .rsplit_once('-')
        .ok_or_else(|| ModuleError::InvalidClientIdentifier(client_id.to_string()))?;

    ensure!(
        !counter.is_empty() && counter.bytes().all(|b| b.is_ascii_digit()),
        ModuleError::InvalidClientIdentifier(client_id.to_string())
    );

    ensure!(
        client_type == SOLOMACHINE_CLIENT_TYPE,
        ModuleError::InvalidClientType {
            expected: SOLOMACHINE_CLIENT_TYPE,
            found: client_type.to_string(),
        }
    );

    Ok(())
}
