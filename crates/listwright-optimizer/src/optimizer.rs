//! Core Optimizer implementation

use crate::error::OptimizerError;
use crate::persona::{Persona, AUDITOR_SYSTEM_PROMPT};
use crate::prompt::{AuditPrompt, RewritePrompt};
use crate::types::{AuditResult, ListingFields, ManualResult, RewriteResult, Targeting};
use listwright_domain::traits::LlmProvider;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tracing::{debug, info};

/// Default time allowed for one generation call (seconds)
pub const DEFAULT_GENERATION_TIMEOUT_SECS: u64 = 120;

/// Runs the two-pass audit → rewrite pipeline against an LLM provider
pub struct Optimizer<L>
where
    L: LlmProvider,
{
    llm_provider: Arc<L>,
    persona: Persona,
    generation_timeout: Duration,
}

impl<L> Optimizer<L>
where
    L: LlmProvider,
{
    /// Create a new Optimizer using `persona` for rewrites
    pub fn new(llm_provider: L, persona: Persona) -> Self {
        Self {
            llm_provider: Arc::new(llm_provider),
            persona,
            generation_timeout: Duration::from_secs(DEFAULT_GENERATION_TIMEOUT_SECS),
        }
    }

    /// Set the time allowed for each generation call
    pub fn with_generation_timeout(mut self, generation_timeout: Duration) -> Self {
        self.generation_timeout = generation_timeout;
        self
    }

    /// Persona used for rewrites
    pub fn persona(&self) -> Persona {
        self.persona
    }

    /// Model identifier of the underlying provider
    pub fn model(&self) -> &str {
        self.llm_provider.model()
    }

    /// Analyze a listing against the target keywords
    pub async fn audit(
        &self,
        listing: &ListingFields,
        targeting: &Targeting,
    ) -> Result<AuditResult, OptimizerError> {
        let prompt = AuditPrompt::new(listing, targeting).build();
        debug!("Audit prompt length: {} chars", prompt.len());

        let text = self.call_llm(AUDITOR_SYSTEM_PROMPT, &prompt).await?;
        Ok(AuditResult::new(text))
    }

    /// Produce optimized copy, using the audit as the improvement plan
    pub async fn rewrite(
        &self,
        listing: &ListingFields,
        targeting: &Targeting,
        audit: &AuditResult,
    ) -> Result<RewriteResult, OptimizerError> {
        let prompt = RewritePrompt::new(listing, targeting, audit).build();
        debug!("Rewrite prompt length: {} chars", prompt.len());

        let text = self.call_llm(self.persona.system_prompt(), &prompt).await?;
        Ok(RewriteResult::new(text))
    }

    /// Audit then rewrite one listing
    pub async fn optimize(
        &self,
        listing: &ListingFields,
        targeting: &Targeting,
    ) -> Result<ManualResult, OptimizerError> {
        let start = Instant::now();
        info!(
            "Optimizing listing (persona '{}', model '{}')",
            self.persona,
            self.model()
        );

        let audit = self.audit(listing, targeting).await?;
        let rewrite = self.rewrite(listing, targeting, &audit).await?;

        info!(
            "Optimization complete in {} ms",
            start.elapsed().as_millis()
        );

        Ok(ManualResult { audit, rewrite })
    }

    /// One generation call, bounded by the configured timeout
    async fn call_llm(&self, system: &str, user: &str) -> Result<String, OptimizerError> {
        let response = timeout(self.generation_timeout, self.llm_provider.generate(system, user))
            .await
            .map_err(|_| OptimizerError::Timeout(self.generation_timeout))??;

        debug!("LLM response length: {} chars", response.len());
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use listwright_domain::GenerationError;
    use listwright_llm::MockProvider;

    fn listing() -> ListingFields {
        ListingFields {
            title: "Kataifi Dough".to_string(),
            bullets: "- 500g bag".to_string(),
            description: "Shredded filo.".to_string(),
            reviews: "Crispy every time".to_string(),
        }
    }

    fn targeting() -> Targeting {
        Targeting {
            keywords: "kataifi dough".to_string(),
            category: "Baking Supplies".to_string(),
            audience: "Home bakers".to_string(),
        }
    }

    #[tokio::test]
    async fn test_audit_uses_auditor_system_prompt() {
        let llm = MockProvider::new("audit text");
        let optimizer = Optimizer::new(llm.clone(), Persona::Commander);

        let audit = optimizer.audit(&listing(), &targeting()).await.unwrap();
        assert_eq!(audit.as_str(), "audit text");

        let calls = llm.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].system, AUDITOR_SYSTEM_PROMPT);
        assert!(calls[0].user.contains("Crispy every time"));
    }

    #[tokio::test]
    async fn test_optimize_runs_audit_then_rewrite() {
        let mut llm = MockProvider::default();
        llm.add_response("You are auditing", "AUDIT: title too short");
        llm.add_response("AUDIT SUMMARY", "NEW COPY");
        let optimizer = Optimizer::new(llm.clone(), Persona::NeutralSeo);

        let result = optimizer.optimize(&listing(), &targeting()).await.unwrap();
        assert_eq!(result.audit.as_str(), "AUDIT: title too short");
        assert_eq!(result.rewrite.as_str(), "NEW COPY");

        let calls = llm.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].system, Persona::NeutralSeo.system_prompt());
        assert!(calls[1].user.contains("AUDIT: title too short"));
        assert!(calls[1].user.contains("CATEGORY: Baking Supplies"));
    }

    #[tokio::test]
    async fn test_generation_error_propagates_without_retry() {
        let mut llm = MockProvider::default();
        llm.add_error("You are auditing", GenerationError::RateLimitExceeded);
        let optimizer = Optimizer::new(llm.clone(), Persona::Commander);

        let err = optimizer.optimize(&listing(), &targeting()).await.unwrap_err();
        assert!(matches!(
            err,
            OptimizerError::Generation(GenerationError::RateLimitExceeded)
        ));
        // no rewrite after a failed audit, no second attempt
        assert_eq!(llm.call_count(), 1);
    }

    struct StalledProvider;

    #[async_trait]
    impl LlmProvider for StalledProvider {
        fn model(&self) -> &str {
            "stalled"
        }

        async fn generate(&self, _system: &str, _user: &str) -> Result<String, GenerationError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(String::new())
        }
    }

    #[tokio::test]
    async fn test_generation_timeout() {
        let optimizer = Optimizer::new(StalledProvider, Persona::Commander)
            .with_generation_timeout(Duration::from_millis(50));

        let err = optimizer.audit(&listing(), &targeting()).await.unwrap_err();
        assert!(matches!(err, OptimizerError::Timeout(d) if d == Duration::from_millis(50)));
    }

    #[test]
    fn test_model_and_persona_accessors() {
        let optimizer = Optimizer::new(MockProvider::default(), Persona::NeutralSeo);
        assert_eq!(optimizer.model(), "mock");
        assert_eq!(optimizer.persona(), Persona::NeutralSeo);
    }
}
