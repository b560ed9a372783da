//! Address form controller.
//!
//! Owns the pending login, the verified member, the address being edited,
//! the save state and the status line. Every mutation goes through here so
//! normalization, CEP autofill and the read-only lock apply uniformly.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::catalog::RegionCatalog;
use crate::clients::{CensoClient, EnderecoClient, ViaCepLookup};
use crate::config::Config;
use crate::error::{CadastroError, Result};
use crate::guard::{DirectSubmit, SaveGuard, SaveState, SubmitOutcome, Submitter};
use crate::lookup::{PostalLookupAdapter, PostalMatch};
use crate::normalize::{normalize_field, normalize_identity};
use crate::storage::{JsonFileStore, KeyValueStore};
use crate::traits::{BaseAddressRepository, BaseIdentityVerifier, BasePostalLookup};
use crate::types::{Address, AddressField, Member};

pub mod messages {
    pub const MEMBER_NOT_FOUND: &str = "CPF ou Matrícula não encontrado.";
    pub const SAVED: &str = "Endereço salvo com sucesso!";
    pub const ALREADY_SAVED: &str = "Endereço já foi salvo. Não é possível salvar novamente.";
    pub const SAVE_FAILED: &str = "Erro ao salvar endereço. Tente novamente.";
    pub const INCOMPLETE: &str = "Preencha todos os campos obrigatórios.";

    pub const SUBMIT_LABEL: &str = "Salvar Endereço";
    pub const ALREADY_SAVED_LABEL: &str = "Endereço já salvo";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    /// Retryable; the form stays usable
    Error,
    /// Must be acknowledged before continuing (failed verification)
    Blocking,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    fn new(kind: StatusKind, text: &str) -> Self {
        Self {
            kind,
            text: text.to_string(),
        }
    }
}

/// Which screen the form shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormView {
    IdentityEntry,
    AddressEntry,
}

pub struct AddressForm {
    identity: Arc<dyn BaseIdentityVerifier>,
    lookup: PostalLookupAdapter,
    submitter: Box<dyn Submitter>,
    catalog: &'static RegionCatalog,

    login: String,
    member: Option<Member>,
    address: Address,
    save_state: SaveState,
    status: Option<StatusMessage>,
}

impl AddressForm {
    pub fn new(
        identity: Arc<dyn BaseIdentityVerifier>,
        lookup: Arc<dyn BasePostalLookup>,
        submitter: Box<dyn Submitter>,
    ) -> Self {
        Self {
            identity,
            lookup: PostalLookupAdapter::new(lookup),
            submitter,
            catalog: RegionCatalog::global(),
            login: String::new(),
            member: None,
            address: Address::default(),
            save_state: SaveState::Unsaved,
            status: None,
        }
    }

    /// Form that refuses a second save for a member with a stored marker.
    pub fn guarded(
        identity: Arc<dyn BaseIdentityVerifier>,
        lookup: Arc<dyn BasePostalLookup>,
        repository: Arc<dyn BaseAddressRepository>,
        store: Arc<dyn KeyValueStore>,
    ) -> Self {
        let submitter = SaveGuard::new(DirectSubmit::new(repository), store);
        Self::new(identity, lookup, Box::new(submitter))
    }

    /// Form that submits every time and never locks.
    pub fn unguarded(
        identity: Arc<dyn BaseIdentityVerifier>,
        lookup: Arc<dyn BasePostalLookup>,
        repository: Arc<dyn BaseAddressRepository>,
    ) -> Self {
        Self::new(identity, lookup, Box::new(DirectSubmit::new(repository)))
    }

    /// Wire the HTTP backends and, if enabled, the file-backed guard.
    pub fn from_config(config: &Config) -> Result<Self> {
        // One connection pool for all three backends
        let http = reqwest::Client::new();
        let identity = Arc::new(CensoClient::from_config(config).with_client(http.clone()));
        let lookup = Arc::new(ViaCepLookup::from_config(config).with_client(http.clone()));
        let repository = Arc::new(EnderecoClient::from_config(config).with_client(http));

        if config.save_guard {
            let store = Arc::new(JsonFileStore::open(&config.store_path)?);
            Ok(Self::guarded(identity, lookup, repository, store))
        } else {
            Ok(Self::unguarded(identity, lookup, repository))
        }
    }

    // -------------------------------------------------------------------------
    // Identity
    // -------------------------------------------------------------------------

    pub fn set_identity(&mut self, raw: &str) {
        self.login = normalize_identity(raw);
    }

    pub fn login(&self) -> &str {
        &self.login
    }

    /// Verify the pending login. On failure the member stays unset and a
    /// blocking notice is shown.
    pub async fn verify_identity(&mut self) -> Result<&Member> {
        let identity = self.login.trim().to_string();
        if identity.is_empty() {
            self.sign_out();
            self.status = Some(StatusMessage::new(
                StatusKind::Blocking,
                messages::MEMBER_NOT_FOUND,
            ));
            return Err(CadastroError::EmptyIdentity);
        }

        match self.identity.verify(&identity).await {
            Ok(member) => {
                let switched = self
                    .member
                    .as_ref()
                    .is_some_and(|current| current.identity() != member.identity());
                if switched {
                    debug!(matricula = %member.matricula, "Member changed, clearing address");
                    self.address = Address::default();
                }
                self.save_state = self.submitter.initial_state(member.identity());
                info!(
                    matricula = %member.matricula,
                    saved = self.save_state == SaveState::Saved,
                    "Member verified"
                );
                self.status = None;
                Ok(self.member.insert(member))
            }
            Err(e) => {
                warn!(identity = %identity, error = %e, "Identity verification failed");
                self.sign_out();
                self.status = Some(StatusMessage::new(
                    StatusKind::Blocking,
                    messages::MEMBER_NOT_FOUND,
                ));
                Err(e)
            }
        }
    }

    /// Back to identity entry. The address belongs to the member who left.
    fn sign_out(&mut self) {
        self.member = None;
        self.address = Address::default();
        self.save_state = SaveState::Unsaved;
    }

    pub fn member(&self) -> Option<&Member> {
        self.member.as_ref()
    }

    pub fn view(&self) -> FormView {
        if self.member.is_some() {
            FormView::AddressEntry
        } else {
            FormView::IdentityEntry
        }
    }

    // -------------------------------------------------------------------------
    // Fields
    // -------------------------------------------------------------------------

    /// Normalize and merge one field. Editing the CEP may autofill the rest.
    pub async fn update_field(&mut self, field: AddressField, raw: &str) {
        if self.is_locked() {
            debug!(field = %field, "Ignoring edit on saved address");
            return;
        }

        let value = normalize_field(field, raw);

        if field != AddressField::PostalCode {
            self.address.set(field, value);
            return;
        }

        if value.is_empty() {
            self.address = Address::default();
            return;
        }

        self.address.postal_code = value.clone();
        if let Some(found) = self.lookup.resolve(&value).await {
            self.apply_lookup(&found);
        }
    }

    /// Apply a lookup result. A result for a CEP other than the current one
    /// is dropped.
    pub fn apply_lookup(&mut self, found: &PostalMatch) -> bool {
        if self.is_locked() {
            return false;
        }
        found.apply_to(&mut self.address)
    }

    /// Choosing a region always clears the city.
    pub fn select_region(&mut self, region: &str) {
        if self.is_locked() {
            return;
        }
        self.address.region = region.to_string();
        self.address.city.clear();
    }

    pub fn select_city(&mut self, city: &str) {
        if self.is_locked() {
            return;
        }
        self.address.city = city.to_string();
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn is_complete(&self) -> bool {
        self.address.is_complete()
    }

    pub fn region_options(&self) -> Vec<&'static str> {
        self.catalog.regions()
    }

    pub fn city_options(&self) -> Vec<String> {
        self.catalog
            .city_options(&self.address.region, &self.address.city)
    }

    /// The city selector is disabled until a region is chosen.
    pub fn city_selectable(&self) -> bool {
        !self.is_locked() && !self.address.region.is_empty()
    }

    // -------------------------------------------------------------------------
    // Submit
    // -------------------------------------------------------------------------

    pub fn save_state(&self) -> SaveState {
        self.save_state
    }

    /// Fields are read-only once the guard recorded a save.
    pub fn is_locked(&self) -> bool {
        self.save_state == SaveState::Saved
    }

    pub fn can_submit(&self) -> bool {
        self.member.is_some() && !self.is_locked() && self.is_complete()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_locked() {
            messages::ALREADY_SAVED_LABEL
        } else {
            messages::SUBMIT_LABEL
        }
    }

    pub async fn submit(&mut self) -> Result<SubmitOutcome> {
        let identity = match &self.member {
            Some(member) => member.identity().to_string(),
            None => return Err(CadastroError::NotAuthenticated),
        };

        let outcome = self
            .submitter
            .submit(&identity, self.save_state, &self.address)
            .await;

        self.status = Some(match &outcome {
            SubmitOutcome::Saved => {
                self.save_state = self.submitter.state_after_save();
                StatusMessage::new(StatusKind::Success, messages::SAVED)
            }
            SubmitOutcome::AlreadySaved => {
                self.save_state = SaveState::Saved;
                StatusMessage::new(StatusKind::Info, messages::ALREADY_SAVED)
            }
            SubmitOutcome::Incomplete => {
                StatusMessage::new(StatusKind::Error, messages::INCOMPLETE)
            }
            SubmitOutcome::Failed(_) => {
                StatusMessage::new(StatusKind::Error, messages::SAVE_FAILED)
            }
        });

        Ok(outcome)
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }
}
