//! End-to-end tests for payload normalization and citation extraction

#[cfg(test)]
mod tests {
    use crate::{extract, normalize, CitationCatalog};
    use legalbot_domain::{Domain, Role};
    use serde_json::json;

    #[test]
    fn test_ipc_payload_to_messages() {
        let value = json!({
            "answer": "Knowledge Graph Trace: Intent → Section 299 → Section 300 → Section 302\n\
                       Answer:\n- Section 299 IPC [IPC-299.txt]\n- Section 302 IPC [IPC-302.txt]",
            "retrieved_docs": [
                {"filename": "IPC-299.txt", "text": "Culpable homicide", "score": 1.0},
                {"filename": "IPC-302.txt", "text": "Punishment for murder", "score": 0.4}
            ]
        });

        let messages = normalize(Domain::CodeSection, &value)
            .into_messages(Domain::CodeSection, CitationCatalog::shared());

        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, Role::Bot);
        assert_eq!(
            messages[0].citations,
            vec!["Section 299", "Section 300", "Section 302"]
        );
        assert_eq!(messages[0].documents.len(), 2);
    }

    #[test]
    fn test_precedent_multi_model_citations_per_message() {
        let value: serde_json::Value = serde_json::from_str(
            r#"{"answers": {
                "Llama-3.2-1B": "See AIR 1978 SC 597.",
                "Phi-2.7B": "See (2017) 10 SCC 1 and AIR 1978 SC 597."
            }}"#,
        )
        .unwrap();

        let messages = normalize(Domain::Precedent, &value)
            .into_messages(Domain::Precedent, CitationCatalog::shared());

        assert_eq!(messages.len(), 2);
        assert!(messages[0].content.starts_with("[Llama-3.2-1B]\n\n"));
        assert_eq!(messages[0].citations, vec!["AIR 1978 SC 597"]);
        assert_eq!(messages[1].citations, vec!["AIR 1978 SC 597", "(2017) 10 SCC 1"]);
    }

    #[test]
    fn test_extended_catalog_applies_to_drafts() {
        let catalog = CitationCatalog::from_toml(
            r#"
            [[rules]]
            domain = "ipc"
            pattern = 'CrPC\s+[0-9]+'
            "#,
        )
        .unwrap();

        let messages = normalize(Domain::CodeSection, &json!({"answer": "CrPC 154 and IPC 34"}))
            .into_messages(Domain::CodeSection, &catalog);
        assert_eq!(messages[0].citations, vec!["IPC 34", "CrPC 154"]);
    }

    #[test]
    fn test_free_function_matches_shared_catalog() {
        let text = "Section 1, IPC 2, Chapter IV";
        assert_eq!(
            extract(text, Domain::CodeSection),
            CitationCatalog::builtin().extract(text, Domain::CodeSection)
        );
    }
}

#[cfg(test)]
mod proptests {
    use crate::extract;
    use legalbot_domain::Domain;
    use proptest::prelude::*;

    proptest! {
        /// Property: a citation repeated anywhere in the text is returned once
        #[test]
        fn test_repeated_citation_is_returned_once(
            number in 1u32..1000,
            filler in "[a-h ]{0,20}",
            repeats in 2usize..5,
        ) {
            let citation = format!("Section {}", number);
            let text = vec![citation.clone(); repeats].join(&format!(" {} ", filler));
            let found = extract(&text, Domain::CodeSection);
            prop_assert_eq!(found, vec![citation]);
        }

        /// Property: output never contains duplicates and is only text substrings
        #[test]
        fn test_output_is_unique_substrings(
            numbers in proptest::collection::vec(1u32..50, 0..12),
        ) {
            let text: Vec<String> = numbers.iter().map(|n| format!("IPC {} and Section {}", n, n)).collect();
            let text = text.join("; ");
            let found = extract(&text, Domain::CodeSection);

            let mut sorted = found.clone();
            sorted.sort();
            sorted.dedup();
            prop_assert_eq!(sorted.len(), found.len());
            for token in &found {
                prop_assert!(text.contains(token.as_str()));
            }
        }

        /// Property: first-occurrence order within a rule is preserved
        #[test]
        fn test_first_occurrence_order(numbers in proptest::collection::vec(1u32..20, 1..15)) {
            let text: Vec<String> = numbers.iter().map(|n| format!("Section {}", n)).collect();
            let found = extract(&text.join(", "), Domain::CodeSection);

            let mut expected: Vec<String> = Vec::new();
            for token in text {
                if !expected.contains(&token) {
                    expected.push(token);
                }
            }
            prop_assert_eq!(found, expected);
        }
    }
}
