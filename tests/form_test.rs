//! Scope form tests: validation, save and navigation

mod common;

use common::{Call, MockApi, WAIT, admin_for, admin_on_list};
use scope_admin::api::ApiError;
use scope_admin::views::{AdminAction, Route};

#[test]
fn test_empty_value_is_not_saved() {
    let api = MockApi::default();
    let mut admin = admin_on_list(&api);

    admin.apply(AdminAction::NewScope);
    assert_eq!(admin.form().unwrap().fields().value, "");
    admin.apply(AdminAction::SaveForm);

    assert_eq!(admin.dispatcher().outstanding(), 0);
    assert!(admin.form().is_some_and(|f| f.saving().is_none()));
    assert_eq!(admin.route(), Route::New);
    assert!(admin.store().borrow().is_empty());
    assert_eq!(api.calls(), vec![Call::List]);
}

#[test]
fn test_blank_value_is_not_saved() {
    let api = MockApi::default();
    let mut admin = admin_on_list(&api);

    admin.apply(AdminAction::NewScope);
    admin.form_mut().unwrap().fields_mut().value = "   ".to_string();
    admin.apply(AdminAction::SaveForm);

    assert_eq!(admin.dispatcher().outstanding(), 0);
    assert_eq!(admin.route(), Route::New);
    assert!(admin.store().borrow().is_empty());
    assert_eq!(api.calls(), vec![Call::List]);
}

#[test]
fn test_new_scope_saved_once_and_back_to_list() {
    let api = MockApi::default();
    let mut admin = admin_on_list(&api);

    admin.apply(AdminAction::NewScope);
    {
        let fields = admin.form_mut().unwrap().fields_mut();
        fields.value = "read_profile".to_string();
        fields.description = "Read your profile".to_string();
    }
    admin.apply(AdminAction::SaveForm);
    // A second press while the first is in flight is ignored
    admin.apply(AdminAction::SaveForm);
    admin.pump_blocking(WAIT);

    assert_eq!(admin.route(), Route::List);
    assert!(admin.form().is_none());

    let store = admin.store().borrow();
    assert_eq!(store.len(), 1);
    let saved = store.find_by_value("read_profile").expect("saved scope");
    assert_eq!(saved.id(), Some(1));

    let creates = api
        .calls()
        .into_iter()
        .filter(|c| matches!(c, Call::Create(_)))
        .count();
    assert_eq!(creates, 1);
}

#[test]
fn test_save_failure_alerts_and_stays_on_form() {
    let api = MockApi::default();
    let mut admin = admin_on_list(&api);

    admin.apply(AdminAction::NewScope);
    admin.form_mut().unwrap().fields_mut().value = "openid".to_string();
    api.fail_next(ApiError::MalformedErrorBody {
        status: 500,
        body: "<html>Internal error</html>".to_string(),
    });
    admin.apply(AdminAction::SaveForm);
    admin.pump_blocking(WAIT);

    let alert = admin.alert().expect("alert shown");
    assert_eq!(alert.title, "http_500");
    assert_eq!(alert.body, "<html>Internal error</html>");
    assert_eq!(admin.route(), Route::New);
    assert!(admin.form().is_some_and(|f| f.saving().is_none()));
    assert!(admin.store().borrow().is_empty());
}

#[test]
fn test_edit_updates_existing_scope() {
    let api = MockApi::with_scopes(&["email"]);
    let mut admin = admin_on_list(&api);
    let model = admin.store().borrow().get(1).expect("scope 1");

    admin.apply(AdminAction::EditScope(1));
    assert_eq!(admin.route(), Route::Edit(1));
    assert_eq!(admin.form().unwrap().title(), "Edit Scope: email");

    admin.apply(AdminAction::OpenIconPicker);
    assert!(admin.form().unwrap().is_icon_picker_open());
    admin.apply(AdminAction::SelectIcon("star".to_string()));
    assert!(!admin.form().unwrap().is_icon_picker_open());
    assert_eq!(admin.form().unwrap().fields().icon, "star");
    assert_eq!(admin.dispatcher().outstanding(), 0);
    assert_eq!(api.calls(), vec![Call::List]);
    admin.apply(AdminAction::SetStructured(true));
    assert!(admin.form().unwrap().is_structured_param_visible());
    admin
        .form_mut()
        .unwrap()
        .fields_mut()
        .structured_param_description = "Address kind".to_string();

    admin.apply(AdminAction::SaveForm);
    admin.pump_blocking(WAIT);

    assert_eq!(admin.route(), Route::List);
    let record = model.snapshot();
    assert_eq!(record.icon.as_deref(), Some("star"));
    assert!(record.structured);
    assert_eq!(record.structured_param_description.as_deref(), Some("Address kind"));
    assert_eq!(admin.store().borrow().len(), 1);
    assert!(api.calls().iter().any(|c| matches!(c, Call::Update(1, _))));
}

#[test]
fn test_edit_route_loads_store_first() {
    let api = MockApi::with_scopes(&["openid", "profile"]);
    let mut admin = admin_for(&api);

    admin.navigate(Route::Edit(2));
    assert!(admin.form().is_none());
    assert!(admin.list().loading().is_visible());

    admin.pump_blocking(WAIT);
    assert_eq!(admin.form().unwrap().fields().value, "profile");
}

#[test]
fn test_cancel_returns_to_list_without_saving() {
    let api = MockApi::with_scopes(&["openid"]);
    let mut admin = admin_on_list(&api);

    admin.apply(AdminAction::EditScope(1));
    admin.form_mut().unwrap().fields_mut().value = "changed".to_string();
    admin.apply(AdminAction::CancelForm);

    assert_eq!(admin.route(), Route::List);
    assert_eq!(admin.store().borrow().get(1).unwrap().value(), "openid");
    assert_eq!(api.calls(), vec![Call::List]);
}

#[test]
fn test_save_finishing_after_leaving_form_still_reaches_store() {
    let api = MockApi::default();
    let mut admin = admin_on_list(&api);

    admin.apply(AdminAction::NewScope);
    admin.form_mut().unwrap().fields_mut().value = "offline_access".to_string();
    admin.apply(AdminAction::SaveForm);
    admin.apply(AdminAction::CancelForm);
    admin.pump_blocking(WAIT);

    assert_eq!(admin.route(), Route::List);
    assert!(admin.store().borrow().find_by_value("offline_access").is_ok());
}
