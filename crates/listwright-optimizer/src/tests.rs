//! Integration tests for the Optimizer

#[cfg(test)]
mod tests {
    use crate::{
        export_batch, export_manual, AppConfig, BatchReport, FailureStage, ItemOutcome,
        ListingFields, Optimizer, Persona, Targeting, AUDIT_MARKER, EMPTY_BATCH_MESSAGE,
        REWRITE_MARKER,
    };
    use listwright_catalog::MockSource;
    use listwright_domain::{Asin, FetchError, GenerationError, ListingRecord};
    use listwright_llm::MockProvider;
    use tempfile::TempDir;

    fn asin(s: &str) -> Asin {
        s.parse().unwrap()
    }

    fn targeting() -> Targeting {
        Targeting {
            keywords: "kataifi dough".to_string(),
            category: "Baking Supplies".to_string(),
            audience: "Home bakers".to_string(),
        }
    }

    fn llm() -> MockProvider {
        let mut llm = MockProvider::default();
        llm.add_response("You are auditing", "AUDIT TEXT");
        llm.add_response("AUDIT SUMMARY", "REWRITE TEXT");
        llm
    }

    fn catalog() -> MockSource {
        let mut source = MockSource::new();
        source.add_listing(
            ListingRecord::new(asin("B0DJ33ZFJH"))
                .with_title("YÜCE Kataifi Filo Dough")
                .with_bullets(vec!["Authentic".to_string()]),
        );
        source.add_listing(ListingRecord::new(asin("B0CXYZ1234")).with_title("Phyllo Sheets"));
        source
    }

    #[tokio::test]
    async fn test_batch_keeps_order_and_isolates_failures() {
        let llm = llm();
        let source = catalog();
        let optimizer = Optimizer::new(llm.clone(), Persona::Commander);

        let input = "B0DJ33ZFJH\n\n   not-an-asin  \nhttps://www.amazon.com/dp/b0cxyz1234?th=1\nB000000000\n";
        let report = optimizer.run_batch(&source, input, &targeting()).await;

        assert_eq!(report.len(), 4);
        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed(), 2);

        let lines: Vec<&str> = report.items().iter().map(|i| i.line.as_str()).collect();
        assert_eq!(
            lines,
            vec![
                "B0DJ33ZFJH",
                "not-an-asin",
                "https://www.amazon.com/dp/b0cxyz1234?th=1",
                "B000000000"
            ]
        );

        assert!(matches!(
            &report.items()[1].outcome,
            ItemOutcome::Failed { stage: FailureStage::Resolve, .. }
        ));
        assert!(matches!(
            &report.items()[3].outcome,
            ItemOutcome::Failed { stage: FailureStage::Fetch { .. }, .. }
        ));

        // unresolvable line never reaches the source, missing product is fetched once
        assert_eq!(
            source.fetched(),
            vec![asin("B0DJ33ZFJH"), asin("B0CXYZ1234"), asin("B000000000")]
        );
        // two generation calls per successful line only
        assert_eq!(llm.call_count(), 4);
    }

    #[tokio::test]
    async fn test_rendered_batch_has_one_block_per_line() {
        let optimizer = Optimizer::new(llm(), Persona::Commander);
        let report = optimizer
            .run_batch(&catalog(), "B0DJ33ZFJH\nnot-an-asin\nB0CXYZ1234", &targeting())
            .await;

        let rendered = report.render();
        let blocks: Vec<&str> = rendered.split("\n\n## ").collect();
        assert_eq!(blocks.len(), 3);

        assert!(blocks[0].starts_with("## B0DJ33ZFJH  _(ASIN: B0DJ33ZFJH)_"));
        assert!(blocks[0].contains("YÜCE Kataifi Filo Dough"));
        assert!(blocks[0].contains("### 🔍 AI Audit\nAUDIT TEXT"));
        assert!(blocks[0].contains("### ✏️ Optimized Listing\nREWRITE TEXT"));

        assert!(blocks[1].starts_with("not-an-asin\n\n❌ "));
        assert!(blocks[1].contains("Could not extract ASIN from: not-an-asin"));
        assert!(!blocks[1].contains("AUDIT TEXT"));
        assert!(!blocks[1].contains("REWRITE TEXT"));

        assert!(blocks[2].starts_with("B0CXYZ1234  _(ASIN: B0CXYZ1234)_"));
    }

    #[tokio::test]
    async fn test_batch_fetch_error_names_source() {
        let mut source = MockSource::new();
        source.add_failure(
            asin("B0DJ33ZFJH"),
            FetchError::HttpStatus {
                status: 503,
                url: "https://www.amazon.com/dp/B0DJ33ZFJH".to_string(),
            },
        );
        let optimizer = Optimizer::new(llm(), Persona::Commander);

        let rendered = optimizer
            .run_batch(&source, "B0DJ33ZFJH", &targeting())
            .await
            .render();
        assert_eq!(
            rendered,
            "## B0DJ33ZFJH\n\n❌ Error fetching from Mock: `HTTP 503 when fetching https://www.amazon.com/dp/B0DJ33ZFJH`\n\n---"
        );
    }

    #[tokio::test]
    async fn test_batch_generation_error_becomes_block() {
        // first matching trigger wins, so the title trigger goes in first
        let mut failing = MockProvider::default();
        failing.add_error("Phyllo Sheets", GenerationError::RateLimitExceeded);
        failing.add_response("You are auditing", "AUDIT TEXT");
        failing.add_response("AUDIT SUMMARY", "REWRITE TEXT");

        let optimizer = Optimizer::new(failing.clone(), Persona::Commander);
        let report = optimizer
            .run_batch(&catalog(), "B0CXYZ1234\nB0DJ33ZFJH", &targeting())
            .await;

        assert_eq!(report.len(), 2);
        assert!(matches!(
            &report.items()[0].outcome,
            ItemOutcome::Failed { stage: FailureStage::Generate, .. }
        ));
        assert!(report.items()[1].is_success());
        assert!(report.render().contains("❌ Error generating copy: `Generation failed: "));
        // failed audit, then audit and rewrite for the second line
        assert_eq!(failing.call_count(), 3);
    }

    #[tokio::test]
    async fn test_batch_splits_on_any_line_ending() {
        let source = catalog();
        let optimizer = Optimizer::new(llm(), Persona::Commander);

        let report = optimizer
            .run_batch(&source, "B0DJ33ZFJH\rB0CXYZ1234\r\nnot-an-asin\r", &targeting())
            .await;

        let lines: Vec<&str> = report.items().iter().map(|i| i.line.as_str()).collect();
        assert_eq!(lines, vec!["B0DJ33ZFJH", "B0CXYZ1234", "not-an-asin"]);
        assert_eq!(report.succeeded(), 2);
        assert_eq!(source.fetch_count(), 2);
    }

    #[tokio::test]
    async fn test_blank_batch_input() {
        let llm = llm();
        let source = catalog();
        let optimizer = Optimizer::new(llm.clone(), Persona::Commander);

        let report = optimizer.run_batch(&source, "  \n\n\t\n", &targeting()).await;
        assert_eq!(report, BatchReport::default());
        assert_eq!(report.render(), EMPTY_BATCH_MESSAGE);
        assert_eq!(source.fetch_count(), 0);
        assert_eq!(llm.call_count(), 0);
    }

    #[tokio::test]
    async fn test_blank_listing_is_still_optimized() {
        let mut source = MockSource::new();
        source.add_listing(ListingRecord::new(asin("B0DJ33ZFJH")));
        let optimizer = Optimizer::new(llm(), Persona::Commander);

        let report = optimizer.run_batch(&source, "B0DJ33ZFJH", &targeting()).await;
        assert_eq!(report.succeeded(), 1);
        assert!(report.render().contains("_(no title found)_"));
    }

    #[tokio::test]
    async fn test_manual_run_then_export() {
        let dir = TempDir::new().unwrap();
        let optimizer = Optimizer::new(llm(), Persona::NeutralSeo);

        let listing = ListingFields {
            title: "Kataifi Dough".to_string(),
            bullets: "- 500g".to_string(),
            description: "Shredded filo".to_string(),
            reviews: String::new(),
        };
        let result = optimizer.optimize(&listing, &targeting()).await.unwrap();

        let path = export_manual(dir.path(), result.audit.as_str(), result.rewrite.as_str()).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();

        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
        assert!(content.starts_with(AUDIT_MARKER));
        assert!(content.contains("AUDIT TEXT"));
        assert!(content.contains(REWRITE_MARKER));
        assert!(content.contains("REWRITE TEXT"));
    }

    #[tokio::test]
    async fn test_batch_run_then_export() {
        let dir = TempDir::new().unwrap();
        let optimizer = Optimizer::new(llm(), Persona::Commander);
        let rendered = optimizer
            .run_batch(&catalog(), "B0DJ33ZFJH", &targeting())
            .await
            .render();

        let path = export_batch(dir.path(), &rendered).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), rendered);
    }

    #[test]
    fn test_export_without_run_writes_nothing() {
        let dir = TempDir::new().unwrap();
        assert!(export_manual(dir.path(), "", "").is_err());
        assert!(export_batch(dir.path(), "").is_err());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_optimizer_from_config() {
        let config = AppConfig::from_toml("[generation]\npersona = \"neutral-seo\"").unwrap();
        let llm = llm();
        let optimizer = config.build_optimizer(llm.clone());

        optimizer
            .optimize(&ListingFields::default(), &targeting())
            .await
            .unwrap();
        assert_eq!(llm.calls()[1].system, Persona::NeutralSeo.system_prompt());
    }
}
