//! Member address registration.
//!
//! A member signs in with their CPF or matrícula, then fills in a postal
//! address. Typing a complete CEP autofills street, neighborhood, city and
//! state from ViaCEP. With the save guard enabled a member can save once;
//! afterwards the form opens read-only for that member, across sessions.
//!
//! # Example
//!
//! ```rust,ignore
//! use cadastro::{AddressField, AddressForm, Config};
//!
//! let config = Config::from_env()?;
//! let mut form = AddressForm::from_config(&config)?;
//!
//! form.set_identity("999.888.777-66");
//! form.verify_identity().await?;
//!
//! form.update_field(AddressField::PostalCode, "01001-000").await;
//! form.update_field(AddressField::Number, "100").await;
//!
//! if form.can_submit() {
//!     form.submit().await?;
//! }
//! ```

pub mod catalog;
pub mod clients;
pub mod config;
pub mod error;
pub mod form;
pub mod guard;
pub mod lookup;
pub mod normalize;
pub mod storage;
pub mod traits;
pub mod types;

pub use catalog::RegionCatalog;
pub use clients::{CensoClient, EnderecoClient, ViaCepLookup};
pub use config::Config;
pub use error::{CadastroError, Result};
pub use form::{messages, AddressForm, FormView, StatusKind, StatusMessage};
pub use guard::{marker_key, DirectSubmit, SaveGuard, SaveState, SubmitOutcome, Submitter};
pub use lookup::{PostalLookupAdapter, PostalMatch};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore};
pub use traits::{BaseAddressRepository, BaseIdentityVerifier, BasePostalLookup};
pub use types::{Address, AddressField, Member, ResolvedAddress};
