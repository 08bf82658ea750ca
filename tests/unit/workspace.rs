use trajan::db::models::workspace::{CreateWorkspaceRequest, UpdateWorkspaceRequest};
use trajan::validation::workspace::{validate_create_workspace, validate_update_workspace};

#[test]
fn validate_create_workspace_rules() {
    let ok = |name: &str| {
        validate_create_workspace(&CreateWorkspaceRequest {
            name: name.to_string(),
            ..Default::default()
        })
    };
    assert!(ok("Acme").is_ok());
    assert!(ok("acme-platform").is_ok());
    assert!(ok(" ").is_err());
    assert!(ok("").is_err());
    assert!(ok(&"a".repeat(256)).is_err());
}

#[test]
fn validate_update_workspace_rules() {
    assert!(validate_update_workspace(&UpdateWorkspaceRequest::default()).is_ok());

    let clear_icon: UpdateWorkspaceRequest = serde_json::from_str(r#"{"icon": null}"#).unwrap();
    assert!(validate_update_workspace(&clear_icon).is_ok());

    let long_icon = UpdateWorkspaceRequest {
        icon: Some(Some("i".repeat(101))),
        ..Default::default()
    };
    assert!(validate_update_workspace(&long_icon).is_err());
}
