//! Test harness wiring mock backends into address forms.
//!
//! Forms built from the same harness share one marker store, so building a
//! second form behaves like reopening the page in a new session.

use std::sync::Arc;

use cadastro::{AddressForm, Member, MemoryStore, ResolvedAddress};

use super::{MockAddressRepository, MockIdentityVerifier, MockPostalLookup};

pub fn member(matricula: &str, nome: &str) -> Member {
    Member {
        matricula: matricula.to_string(),
        nome: nome.to_string(),
        atividade: "Membro".to_string(),
        congregacao: "Sede".to_string(),
    }
}

pub fn resolved(street: &str, neighborhood: &str, city: &str, region: &str) -> ResolvedAddress {
    ResolvedAddress {
        street: street.to_string(),
        neighborhood: neighborhood.to_string(),
        city: city.to_string(),
        region: region.to_string(),
    }
}

pub struct TestHarness {
    pub identity: Arc<MockIdentityVerifier>,
    pub postal: Arc<MockPostalLookup>,
    pub repository: Arc<MockAddressRepository>,
    pub store: Arc<MemoryStore>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_backends(MockIdentityVerifier::new(), MockPostalLookup::new())
    }

    pub fn with_backends(identity: MockIdentityVerifier, postal: MockPostalLookup) -> Self {
        // Run tests with: RUST_LOG=debug cargo test -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        Self {
            identity: Arc::new(identity),
            postal: Arc::new(postal),
            repository: Arc::new(MockAddressRepository::new()),
            store: Arc::new(MemoryStore::new()),
        }
    }

    /// Members "12345" and "99988877766" are known; CEPs 01001000 and 01310930 resolve.
    pub fn standard() -> Self {
        let identity = MockIdentityVerifier::new()
            .with_member("12345", member("12345", "Ana Souza"))
            .with_member("99988877766", member("99988877766", "João Lima"));
        let postal = MockPostalLookup::new()
            .with_address("01001000", resolved("praça da sé", "Sé", "São Paulo", "SP"))
            .with_address(
                "01310930",
                resolved("AVENIDA PAULISTA", "Bela Vista", "São Paulo", "SP"),
            );
        Self::with_backends(identity, postal)
    }

    pub fn form(&self) -> AddressForm {
        AddressForm::guarded(
            self.identity.clone(),
            self.postal.clone(),
            self.repository.clone(),
            self.store.clone(),
        )
    }

    pub fn unguarded_form(&self) -> AddressForm {
        AddressForm::unguarded(
            self.identity.clone(),
            self.postal.clone(),
            self.repository.clone(),
        )
    }

    /// Guarded form with `identity` already verified
    pub async fn signed_in(&self, identity: &str) -> AddressForm {
        let mut form = self.form();
        form.set_identity(identity);
        form.verify_identity()
            .await
            .expect("member should verify");
        form
    }
}
