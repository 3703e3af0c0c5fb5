#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Repository-level behavior of consent decisions.

use std::sync::Arc;

use consent::{
    AttributeFingerprinter, CipherConfig, CipherMode, ConsentDecisionBuilder,
    InMemoryConsentRepository, PlainCipher, build_cipher,
};
use consent_sdk::{ConsentOptions, ConsentRepository};
use secrecy::SecretString;
use sso_security::{Attributes, Authentication, Principal, RegisteredService, Service};

fn builder() -> ConsentDecisionBuilder {
    ConsentDecisionBuilder::new(AttributeFingerprinter::new(Arc::new(PlainCipher)))
}

fn attrs() -> Attributes {
    Attributes::new()
        .with("givenName", "CAS")
        .with_values("memberOf", ["staff", "faculty"])
}

fn auth_of(principal: &str) -> Authentication {
    Authentication::builder(Principal::named(principal)).build()
}

#[tokio::test]
async fn stored_decision_round_trips_with_fresh_fingerprint() {
    let repo = InMemoryConsentRepository::new();
    let b = builder();
    let service = Service::new("https://app.example.org");
    let rs = RegisteredService::new(100, "app", "https://app.example.org");

    let decision = b.build(&service, &rs, "casuser", &attrs()).unwrap();
    assert!(repo.store_consent_decision(decision.clone()).await.unwrap());

    let found = repo
        .find_consent_decision(&service, &rs, &auth_of("casuser"))
        .await
        .unwrap()
        .unwrap();
    let fresh = b
        .fingerprinter()
        .fingerprint(&attrs(), ConsentOptions::AttributeName)
        .unwrap();
    assert_eq!(found.attributes_fingerprint(), fresh);
    assert_eq!(found.id(), decision.id());
}

#[tokio::test]
async fn signed_fingerprints_round_trip() {
    let cipher = build_cipher(&CipherConfig {
        mode: CipherMode::Signed,
        signing_key: Some(SecretString::from(
            "an-example-signing-key-of-at-least-32-bytes".to_owned(),
        )),
    })
    .unwrap();
    let b = ConsentDecisionBuilder::new(AttributeFingerprinter::new(cipher));
    let repo = InMemoryConsentRepository::new();
    let service = Service::new("https://app.example.org");
    let rs = RegisteredService::default();

    repo.store_consent_decision(b.build(&service, &rs, "casuser", &attrs()).unwrap())
        .await
        .unwrap();
    let found = repo
        .find_consent_decision(&service, &rs, &auth_of("casuser"))
        .await
        .unwrap()
        .unwrap();
    assert!(!b.attributes_changed(&found, &attrs()).unwrap());
}

#[tokio::test]
async fn size_tracks_distinct_principal_service_pairs() {
    let repo = InMemoryConsentRepository::new();
    let b = builder();
    let rs = RegisteredService::default();

    let pairs = [
        ("alice", "https://a"),
        ("alice", "https://b"),
        ("bob", "https://a"),
        ("carol", "https://c"),
    ];
    for (principal, service) in pairs {
        let d = b.build(&Service::new(service), &rs, principal, &attrs()).unwrap();
        repo.store_consent_decision(d).await.unwrap();
    }
    assert_eq!(repo.get_consent_decisions().await.unwrap().len(), pairs.len());

    let again = b
        .build(&Service::new("https://a"), &rs, "alice", &attrs().with("mail", "a@x"))
        .unwrap();
    repo.store_consent_decision(again).await.unwrap();
    assert_eq!(repo.get_consent_decisions().await.unwrap().len(), pairs.len());
}

#[tokio::test]
async fn delete_by_another_principal_is_refused() {
    let repo = InMemoryConsentRepository::new();
    let service = Service::new("https://app.example.org");
    let rs = RegisteredService::default();
    let decision = builder().build(&service, &rs, "casuser", &attrs()).unwrap();
    repo.store_consent_decision(decision.clone()).await.unwrap();

    assert!(!repo.delete_consent_decision(decision.id(), "otherUser").await.unwrap());
    assert!(
        repo.find_consent_decision(&service, &rs, &auth_of("casuser"))
            .await
            .unwrap()
            .is_some()
    );

    assert!(
        repo.delete_consent_decision(decision.id(), decision.principal_id())
            .await
            .unwrap()
    );
    assert!(
        repo.find_consent_decision(&service, &rs, &auth_of("casuser"))
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_stores_keep_one_decision_per_pair() {
    let repo = Arc::new(InMemoryConsentRepository::with_history());
    let b = builder();
    let rs = RegisteredService::default();

    let mut handles = Vec::new();
    for i in 0..64 {
        let repo = Arc::clone(&repo);
        let principal = format!("user-{}", i % 4);
        let decision = b
            .build(&Service::new("https://shared"), &rs, &principal, &attrs())
            .unwrap();
        handles.push(tokio::spawn(async move {
            repo.store_consent_decision(decision).await.unwrap()
        }));
    }
    for h in handles {
        assert!(h.await.unwrap());
    }

    assert_eq!(repo.get_consent_decisions().await.unwrap().len(), 4);
    for p in 0..4 {
        let principal = format!("user-{p}");
        assert_eq!(repo.find_consent_decisions(&principal).await.unwrap().len(), 1);
        assert_eq!(repo.consent_history(&principal).await.unwrap().len(), 15);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn racing_store_and_delete_leave_only_the_new_decision() {
    let b = builder();
    let rs = RegisteredService::default();
    let service = Service::new("https://shared");

    for _ in 0..200 {
        let repo = Arc::new(InMemoryConsentRepository::new());
        let old = b.build(&service, &rs, "casuser", &attrs()).unwrap();
        let new = b.build(&service, &rs, "casuser", &attrs()).unwrap();
        repo.store_consent_decision(old.clone()).await.unwrap();

        let store = {
            let repo = Arc::clone(&repo);
            let new = new.clone();
            tokio::spawn(async move { repo.store_consent_decision(new).await.unwrap() })
        };
        let delete = {
            let repo = Arc::clone(&repo);
            let id = old.id();
            tokio::spawn(async move { repo.delete_consent_decision(id, "casuser").await.unwrap() })
        };
        assert!(store.await.unwrap());
        delete.await.unwrap();

        assert_eq!(repo.find_consent_decisions("casuser").await.unwrap(), [new]);
    }
}
