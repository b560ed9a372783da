// Trait definitions for the three backends the form talks to.
//
// These are INFRASTRUCTURE traits only - normalization, locking and the
// save-once rule live in the form and guard, not behind these seams.
//
// Naming convention: Base* for trait names (e.g., BaseIdentityVerifier)

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Address, Member, ResolvedAddress};

// =============================================================================
// Identity Verification Trait
// =============================================================================

#[async_trait]
pub trait BaseIdentityVerifier: Send + Sync {
    /// Look up a member by CPF or matrícula (digits only)
    async fn verify(&self, identity: &str) -> Result<Member>;
}

// =============================================================================
// Postal Lookup Trait
// =============================================================================

#[async_trait]
pub trait BasePostalLookup: Send + Sync {
    /// Resolve an 8-digit CEP.
    ///
    /// Returns `Ok(None)` when the service says the code does not exist.
    async fn lookup(&self, postal_code: &str) -> Result<Option<ResolvedAddress>>;
}

// =============================================================================
// Address Persistence Trait
// =============================================================================

#[async_trait]
pub trait BaseAddressRepository: Send + Sync {
    /// Store `address` for the member identified by `matricula`
    async fn save(&self, matricula: &str, address: &Address) -> Result<()>;
}
