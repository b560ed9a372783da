//! Full registration flow, from identity entry to a locked saved address.

mod common;

use crate::common::TestHarness;
use cadastro::{marker_key, AddressField, FormView, KeyValueStore, SaveState, SubmitOutcome};

#[tokio::test]
async fn member_registers_address_once() {
    let ctx = TestHarness::standard();
    let mut form = ctx.form();
    assert_eq!(form.view(), FormView::IdentityEntry);

    form.set_identity("99988877766");
    form.verify_identity().await.unwrap();
    assert_eq!(form.view(), FormView::AddressEntry);
    assert_eq!(form.save_state(), SaveState::Unsaved);

    form.select_region("SP");
    assert!(form.city_options().iter().any(|c| c == "São Paulo"));

    form.update_field(AddressField::PostalCode, "01001000").await;
    let address = form.address();
    assert_eq!(address.region, "SP");
    assert_eq!(address.city, "São Paulo");
    assert_eq!(address.street, "Praça da sé");
    assert_eq!(address.neighborhood, "Sé");

    form.update_field(AddressField::Number, "100").await;
    assert!(form.is_complete());
    assert!(form.can_submit());

    assert_eq!(form.submit().await.unwrap(), SubmitOutcome::Saved);
    assert_eq!(form.save_state(), SaveState::Saved);

    let calls = ctx.repository.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].matricula, "99988877766");
    assert_eq!(calls[0].address.postal_code, "01001000");
    assert_eq!(calls[0].address.number, "100");

    assert_eq!(
        ctx.store.get(&marker_key("99988877766")).unwrap().as_deref(),
        Some("true")
    );
    assert_eq!(
        ctx.store.get("endereco_salvo_99988877766").unwrap().as_deref(),
        Some("true")
    );
    assert_eq!(ctx.postal.calls(), vec!["01001000".to_string()]);
}
