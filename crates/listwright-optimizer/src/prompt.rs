//! User payloads for the audit and rewrite calls

use crate::types::{AuditResult, ListingFields, Targeting};

/// Builds the user payload of the audit call
pub struct AuditPrompt<'a> {
    listing: &'a ListingFields,
    targeting: &'a Targeting,
}

impl<'a> AuditPrompt<'a> {
    /// Create a new audit prompt
    pub fn new(listing: &'a ListingFields, targeting: &'a Targeting) -> Self {
        Self { listing, targeting }
    }

    /// Build the complete audit payload
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str("You are auditing the following Amazon listing.\n\n");
        prompt.push_str(&format!("TARGET KEYWORDS: {}\n\n", self.targeting.keywords));

        push_section(&mut prompt, "TITLE", &self.listing.title);
        push_section(&mut prompt, "BULLETS", &self.listing.bullets);
        push_section(&mut prompt, "DESCRIPTION", &self.listing.description);
        push_section(&mut prompt, "REVIEWS", &self.listing.reviews);

        prompt.push_str(AUDIT_TASKS);
        prompt
    }
}

/// Builds the user payload of the rewrite call
pub struct RewritePrompt<'a> {
    listing: &'a ListingFields,
    targeting: &'a Targeting,
    audit: &'a AuditResult,
}

impl<'a> RewritePrompt<'a> {
    /// Create a new rewrite prompt
    pub fn new(listing: &'a ListingFields, targeting: &'a Targeting, audit: &'a AuditResult) -> Self {
        Self {
            listing,
            targeting,
            audit,
        }
    }

    /// Build the complete rewrite payload
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str("You have audited this Amazon listing. Here is your AUDIT SUMMARY:\n\n");
        prompt.push_str(self.audit.as_str());
        prompt.push_str("\n\n");

        prompt.push_str("Now rewrite the listing following the global SYSTEM RULES and this context:\n\n");
        prompt.push_str(&format!("CATEGORY: {}\n", self.targeting.category));
        prompt.push_str(&format!("TARGET AUDIENCE: {}\n", self.targeting.audience));
        prompt.push_str(&format!("TARGET KEYWORDS: {}\n\n", self.targeting.keywords));

        push_section(&mut prompt, "CURRENT TITLE", &self.listing.title);
        push_section(&mut prompt, "CURRENT BULLETS", &self.listing.bullets);
        push_section(&mut prompt, "CURRENT DESCRIPTION", &self.listing.description);
        push_section(&mut prompt, "CUSTOMER REVIEWS (may be truncated)", &self.listing.reviews);

        prompt.push_str(REWRITE_INSTRUCTIONS);
        prompt
    }
}

fn push_section(prompt: &mut String, heading: &str, body: &str) {
    prompt.push_str(heading);
    prompt.push_str(":\n");
    prompt.push_str(body.trim());
    prompt.push_str("\n\n");
}

const AUDIT_TASKS: &str = r#"Tasks:
1) Briefly summarize what this product is.
2) List strengths of the current listing (TITLE, BULLETS, DESCRIPTION).
3) List weaknesses and missing information:
   - Missing attributes/specs
   - Missing use cases
   - Missing compatibility notes
   - Missing objections / FAQs
4) Evaluate keyword coverage vs TARGET KEYWORDS.
5) Output a concise RECOMMENDATION PLAN: bullet list of what to improve.

Respond in a structured, clear format."#;

const REWRITE_INSTRUCTIONS: &str = r#"Use the AUDIT SUMMARY as your improvement plan.
The final content must include:
- Optimized title
- Bullet points
- Product description
- Backend search keywords
- FAQ
- Key product attributes

Now output the final optimized content in the exact format specified in the system prompt."#;
