//! Scenario and property tests for the extraction pipeline

#[cfg(test)]
mod tests {
    use crate::{
        sanitize, BondExtractor, ExtractionSource, ExtractorConfig, ExtractorError,
        RegexExtractor,
    };
    use bondscribe_domain::{BondField, BondRecord};
    use bondscribe_llm::MockProvider;
    use proptest::prelude::*;

    const MESSAGE: &str = "ISIN: INE0ABC12345 ECL FINANCE LIMITED 9.10% NCD 15MR27 qty 10L";

    fn extractor(llm: MockProvider) -> BondExtractor<MockProvider> {
        BondExtractor::new(llm, ExtractorConfig::default())
    }

    fn assert_nine_keys(records: &[BondRecord]) {
        assert!(!records.is_empty());
        for record in records {
            let json = serde_json::to_value(record).unwrap();
            let obj = json.as_object().unwrap();
            assert_eq!(obj.len(), 9);
            for field in BondField::ALL {
                assert!(obj.contains_key(field.key()));
            }
        }
    }

    #[test]
    fn test_full_llm_flow() {
        let llm = MockProvider::new(
            r#"```json
{
  "isinNo": "INE0ABC12345",
  "issuerName": "ECL FINANCE LIMITED",
  "coupon": 9.10,
  "rating": "AA",
  "tenor": 3,
  "quantam": 1000000,
  "ytm": 9.4,
  "business_sector": "NBFC",
  "maturityDate": "15/03/2027"
}
```"#,
        );
        let report = extractor(llm).extract_with_report(MESSAGE);

        assert_eq!(report.source, ExtractionSource::Llm);
        let record = &report.records[0];
        assert_eq!(record.issuer_name.as_deref(), Some("ECL FINANCE LIMITED"));
        assert_eq!(record.quantam, Some(1_000_000));
        assert_eq!(record.business_sector.as_deref(), Some("NBFC"));
        assert_eq!(record.maturity_date.as_deref(), Some("2027-03-15"));
    }

    #[test]
    fn test_fallback_equals_regex_on_provider_failure() {
        let extractor = extractor(MockProvider::failing());
        for text in [MESSAGE, "", "   ", "offering 8.25% yield", "12JU26", "\u{0}\u{7f}\u{fffd}"] {
            assert_eq!(
                extractor.extract_bond_data(text),
                RegexExtractor::new().extract(text),
                "input {:?}",
                text
            );
        }
    }

    #[test]
    fn test_no_json_falls_back() {
        let report = extractor(MockProvider::new("I could not find any bond.")).extract_with_report(MESSAGE);
        assert_eq!(report.fallback_reason(), Some(&ExtractorError::NoJsonFound));
        assert_eq!(report.records, RegexExtractor::new().extract(MESSAGE));
    }

    #[test]
    fn test_malformed_json_falls_back() {
        let report = extractor(MockProvider::new("{isinNo: INE0ABC12345,}")).extract_with_report(MESSAGE);
        assert!(matches!(
            report.fallback_reason(),
            Some(ExtractorError::MalformedJson(_))
        ));
        assert_eq!(report.records[0].coupon, Some(9.1));
    }

    #[test]
    fn test_partial_llm_json_keeps_all_keys() {
        let records = extractor(MockProvider::new(r#"{"coupon": "9.1%"}"#)).extract_bond_data(MESSAGE);
        assert_nine_keys(&records);
        assert_eq!(records[0].coupon, Some(9.1));
        assert_eq!(records[0].isin_no, None);
    }

    #[test]
    fn test_each_call_is_independent() {
        let mut llm = MockProvider::failing();
        llm.add_response("first", r#"{"tenor": 5}"#);
        let extractor = extractor(llm.clone());

        let first = extractor.extract_with_report("first message");
        let second = extractor.extract_with_report("SECOND 7.5% NCD");

        assert_eq!(first.records[0].tenor, Some(5));
        assert!(second.used_fallback());
        assert_eq!(second.records[0].tenor, None);
        assert_eq!(second.records[0].issuer_name.as_deref(), Some("SECOND"));
        assert_eq!(llm.call_count(), 2);
    }

    #[test]
    fn test_date_properties_through_fallback() {
        let extractor = extractor(MockProvider::failing());
        let date = |text: &str| extractor.extract_bond_data(text)[0].maturity_date.clone();
        assert_eq!(date("12JU26").as_deref(), Some("2026-06-12"));
        assert_eq!(date("05DE99").as_deref(), Some("2099-12-05"));
        assert_eq!(date("01XX30").as_deref(), Some("2030-01-01"));
    }

    fn text_field() -> impl Strategy<Value = Option<String>> {
        proptest::option::of(any::<String>())
    }

    fn decimal_field() -> impl Strategy<Value = Option<f64>> {
        proptest::option::of(any::<f64>().prop_filter("finite", |v| v.is_finite()))
    }

    fn date_field() -> impl Strategy<Value = Option<String>> {
        proptest::option::of((2000u32..2100, 1u32..=12, 1u32..=28))
            .prop_map(|d| d.map(|(y, m, day)| format!("{:04}-{:02}-{:02}", y, m, day)))
    }

    prop_compose! {
        fn bond_record()(
            isin_no in text_field(),
            issuer_name in text_field(),
            coupon in decimal_field(),
            rating in text_field(),
            tenor in proptest::option::of(0i64..100),
            quantam in proptest::option::of(any::<i64>()),
            ytm in decimal_field(),
            business_sector in text_field(),
            maturity_date in date_field(),
        ) -> BondRecord {
            BondRecord {
                isin_no,
                issuer_name,
                coupon,
                rating,
                tenor,
                quantam,
                ytm,
                business_sector,
                maturity_date,
            }
        }
    }

    proptest! {
        #[test]
        fn prop_extraction_is_total(text in any::<String>()) {
            let failing = extractor(MockProvider::failing());
            assert_nine_keys(&failing.extract_bond_data(&text));

            let noisy = extractor(MockProvider::new(text.clone()));
            assert_nine_keys(&noisy.extract_bond_data(&text));
        }

        #[test]
        fn prop_fallback_matches_regex(text in any::<String>()) {
            let extractor = extractor(MockProvider::failing());
            prop_assert_eq!(extractor.extract_bond_data(&text), RegexExtractor::new().extract(&text));
        }

        #[test]
        fn prop_sanitizer_round_trip(
            record in bond_record(),
            prefix in "[^{}]{0,30}",
            suffix in "[^{}]{0,30}",
        ) {
            let json = serde_json::to_string(&record).unwrap();
            let wrapped = format!("{}{}{}", prefix, json, suffix);
            prop_assert_eq!(sanitize(&wrapped).unwrap(), record);
        }
    }
}
