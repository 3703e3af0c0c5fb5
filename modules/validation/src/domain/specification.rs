//! The validation specification capability and its composition.

use std::fmt::Debug;
use std::sync::Arc;

use sso_security::Assertion;

/// Request-scoped values a validation endpoint passes in.
///
/// The caller extracts these from its own request representation; no framework
/// request object reaches this crate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationRequest {
    /// The request's `renew` flag.
    pub renew: bool,
}

impl ValidationRequest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_renew(mut self, renew: bool) -> Self {
        self.renew = renew;
        self
    }
}

/// Decides whether an assertion can satisfy a validation request.
///
/// Implementations are pure: no side effects, no interior mutability, and an
/// unsatisfied specification is an expected outcome rather than an error.
pub trait ValidationSpecification: Debug + Send + Sync {
    fn is_satisfied_by(&self, assertion: &Assertion, request: &ValidationRequest) -> bool;
}

impl<T: ValidationSpecification + ?Sized> ValidationSpecification for Arc<T> {
    fn is_satisfied_by(&self, assertion: &Assertion, request: &ValidationRequest) -> bool {
        (**self).is_satisfied_by(assertion, request)
    }
}

/// Ordered list of specifications combined with logical AND.
///
/// Evaluation short-circuits on the first unsatisfied member. An empty chain
/// is satisfied by every assertion.
#[derive(Debug, Clone, Default)]
pub struct ValidationSpecificationChain {
    specifications: Vec<Arc<dyn ValidationSpecification>>,
}

impl ValidationSpecificationChain {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with<S>(mut self, specification: S) -> Self
    where
        S: ValidationSpecification + 'static,
    {
        self.specifications.push(Arc::new(specification));
        self
    }

    #[must_use]
    pub fn with_shared(mut self, specification: Arc<dyn ValidationSpecification>) -> Self {
        self.specifications.push(specification);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.specifications.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.specifications.is_empty()
    }
}

impl ValidationSpecification for ValidationSpecificationChain {
    fn is_satisfied_by(&self, assertion: &Assertion, request: &ValidationRequest) -> bool {
        self.specifications.iter().all(|spec| {
            let satisfied = spec.is_satisfied_by(assertion, request);
            if !satisfied {
                tracing::debug!(
                    specification = ?spec,
                    service = assertion.service().id(),
                    "validation specification not satisfied"
                );
            }
            satisfied
        })
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use sso_security::{Authentication, Principal, Service};
    use tracing_test::traced_test;

    use super::*;

    #[derive(Debug)]
    struct Fixed(bool);

    impl ValidationSpecification for Fixed {
        fn is_satisfied_by(&self, _: &Assertion, _: &ValidationRequest) -> bool {
            self.0
        }
    }

    #[derive(Debug, Default)]
    struct Counting(AtomicUsize);

    impl ValidationSpecification for Counting {
        fn is_satisfied_by(&self, _: &Assertion, _: &ValidationRequest) -> bool {
            self.0.fetch_add(1, Ordering::SeqCst);
            true
        }
    }

    fn assertion() -> Assertion {
        Assertion::new(
            Authentication::builder(Principal::named("casuser")).build(),
            Service::new("https://app.example.org"),
            true,
        )
    }

    #[test]
    fn empty_chain_is_satisfied() {
        let chain = ValidationSpecificationChain::new();
        assert!(chain.is_empty());
        assert!(chain.is_satisfied_by(&assertion(), &ValidationRequest::default()));
    }

    #[test]
    fn chain_requires_every_member() {
        let all_true = ValidationSpecificationChain::new()
            .with(Fixed(true))
            .with(Fixed(true));
        let one_false = ValidationSpecificationChain::new()
            .with(Fixed(true))
            .with(Fixed(false));

        assert!(all_true.is_satisfied_by(&assertion(), &ValidationRequest::default()));
        assert!(!one_false.is_satisfied_by(&assertion(), &ValidationRequest::default()));
    }

    #[test]
    fn chain_short_circuits_after_first_failure() {
        let counter = Arc::new(Counting::default());
        let chain = ValidationSpecificationChain::new()
            .with(Fixed(false))
            .with_shared(counter.clone());

        assert!(!chain.is_satisfied_by(&assertion(), &ValidationRequest::default()));
        assert_eq!(counter.0.load(Ordering::SeqCst), 0);
    }

    #[test]
    #[traced_test]
    fn unsatisfied_member_is_logged() {
        let chain = ValidationSpecificationChain::new().with(Fixed(false));
        let _ = chain.is_satisfied_by(&assertion(), &ValidationRequest::default());
        assert!(logs_contain("validation specification not satisfied"));
    }

    #[test]
    fn request_carries_renew_flag() {
        assert!(!ValidationRequest::new().renew);
        assert!(ValidationRequest::new().with_renew(true).renew);
    }
}
