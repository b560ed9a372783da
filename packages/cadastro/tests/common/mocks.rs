// Mock backends - record every call so tests can assert on traffic.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use cadastro::{
    Address, BaseAddressRepository, BaseIdentityVerifier, BasePostalLookup, CadastroError, Member,
    ResolvedAddress, Result,
};

// =============================================================================
// Mock Identity Verifier
// =============================================================================

#[derive(Default)]
pub struct MockIdentityVerifier {
    members: Mutex<HashMap<String, Member>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockIdentityVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Member returned when `identity` is verified
    pub fn with_member(self, identity: &str, member: Member) -> Self {
        self.members
            .lock()
            .unwrap()
            .insert(identity.to_string(), member);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseIdentityVerifier for MockIdentityVerifier {
    async fn verify(&self, identity: &str) -> Result<Member> {
        self.calls.lock().unwrap().push(identity.to_string());
        self.members
            .lock()
            .unwrap()
            .get(identity)
            .cloned()
            .ok_or_else(|| CadastroError::MemberNotFound(identity.to_string()))
    }
}

// =============================================================================
// Mock Postal Lookup
// =============================================================================

#[derive(Default)]
pub struct MockPostalLookup {
    addresses: Mutex<HashMap<String, ResolvedAddress>>,
    failing: AtomicBool,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockPostalLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_address(self, postal_code: &str, resolved: ResolvedAddress) -> Self {
        self.addresses
            .lock()
            .unwrap()
            .insert(postal_code.to_string(), resolved);
        self
    }

    /// Every lookup errors as if the network were down
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BasePostalLookup for MockPostalLookup {
    async fn lookup(&self, postal_code: &str) -> Result<Option<ResolvedAddress>> {
        self.calls.lock().unwrap().push(postal_code.to_string());
        if self.failing.load(Ordering::SeqCst) {
            return Err(CadastroError::Api {
                status: 503,
                message: "ViaCEP unavailable".to_string(),
            });
        }
        Ok(self.addresses.lock().unwrap().get(postal_code).cloned())
    }
}

// =============================================================================
// Mock Address Repository
// =============================================================================

/// Arguments captured from a save call
#[derive(Debug, Clone)]
pub struct SaveCall {
    pub matricula: String,
    pub address: Address,
}

#[derive(Default)]
pub struct MockAddressRepository {
    failing: AtomicBool,
    calls: Arc<Mutex<Vec<SaveCall>>>,
}

impl MockAddressRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<SaveCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseAddressRepository for MockAddressRepository {
    async fn save(&self, matricula: &str, address: &Address) -> Result<()> {
        self.calls.lock().unwrap().push(SaveCall {
            matricula: matricula.to_string(),
            address: address.clone(),
        });
        if self.failing.load(Ordering::SeqCst) {
            return Err(CadastroError::Api {
                status: 500,
                message: "internal error".to_string(),
            });
        }
        Ok(())
    }
}
