#![allow(clippy::unwrap_used, clippy::expect_used)]

use sso_security::{
    Assertion, Attributes, Authentication, AuthenticationResultBuilder, Principal,
    RegisteredService, Service,
};

#[test]
fn registered_service_policies_from_json() {
    let rs: RegisteredService = serde_json::from_str(
        r#"{
            "id": 42,
            "name": "portal",
            "service_id": "https://portal\\.example\\.org/.*",
            "attribute_release_policy": {"allowed_attributes": ["mail", "memberOf"]},
            "consent_policy": {"excluded_attributes": ["memberOf"]},
            "surrogate_policy": {"required_attributes": {"memberOf": ["helpdesk"]}}
        }"#,
    )
    .unwrap();

    let principal = Principal::new(
        "casuser",
        Attributes::new()
            .with("mail", "casuser@example.org")
            .with("memberOf", "helpdesk")
            .with("phone", "555-0100"),
    );

    let released = rs.attribute_release_policy.release(principal.attributes());
    assert_eq!(released.names().collect::<Vec<_>>(), ["mail", "memberOf"]);

    let consentable = rs.consent_policy.consentable(&released);
    assert_eq!(consentable.names().collect::<Vec<_>>(), ["mail"]);
    assert!(rs.consent_policy.enabled);

    assert!(rs.surrogate_policy.permits(&principal));
    assert!(!rs.surrogate_policy.permits(&Principal::named("jdoe")));
}

#[test]
fn assertion_with_empty_chain_does_not_deserialize() {
    let json = r#"{
        "chained_authentications": [],
        "service": {"id": "https://app"},
        "from_new_login": true
    }"#;
    assert!(serde_json::from_str::<Assertion>(json).is_err());
}

#[test]
fn assertion_survives_serialization() {
    let assertion = Assertion::new(
        Authentication::builder(Principal::named("casuser"))
            .credential("casuser")
            .build(),
        Service::new("https://app"),
        true,
    )
    .with_proxy_hop(Authentication::builder(Principal::named("https://proxy/cb")).build());

    let json = serde_json::to_string(&assertion).unwrap();
    let back: Assertion = serde_json::from_str(&json).unwrap();
    assert_eq!(back, assertion);
    assert_eq!(back.proxy_hops().len(), 1);
}

#[test]
fn result_builder_merges_authentications() {
    let result = AuthenticationResultBuilder::new()
        .collect(
            Authentication::builder(Principal::named("casuser"))
                .attribute("authnMethod", vec!["password".to_owned()])
                .credential("casuser")
                .success("ldap")
                .build(),
        )
        .collect(
            Authentication::builder(Principal::named("casuser-mfa"))
                .attribute("authnMethod", vec!["otp".to_owned(), "password".to_owned()])
                .success("otp")
                .build(),
        )
        .build(Some(Service::new("https://app")))
        .unwrap();

    let authentication = result.authentication;
    assert_eq!(authentication.principal().id(), "casuser");
    assert_eq!(
        authentication.attributes().get("authnMethod").unwrap(),
        ["password", "otp"]
    );
    assert_eq!(authentication.successes(), ["ldap", "otp"]);
    assert_eq!(result.service, Some(Service::new("https://app")));

    assert!(AuthenticationResultBuilder::new().build(None).is_none());
}
