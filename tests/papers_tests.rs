use litreview::papers::{parse_search_response, Paper, SemanticScholarSource, PaperSource, NO_LINK, NO_SUMMARY};
use litreview::PaperSourceConfig;

#[test]
fn test_search_response_decodes_in_ranking_order() {
    let body = r#"{
        "total": 2,
        "offset": 0,
        "data": [
            {"paperId": "p1", "title": "The Age of Generative AI", "abstract": "An overview.", "url": "https://www.semanticscholar.org/paper/p1"},
            {"paperId": "p2", "title": "Generative AI: A Review", "abstract": null, "url": null}
        ]
    }"#;

    let papers = parse_search_response(body).unwrap();

    assert_eq!(
        papers,
        vec![
            Paper {
                title: "The Age of Generative AI".to_string(),
                summary: "An overview.".to_string(),
                link: "https://www.semanticscholar.org/paper/p1".to_string(),
            },
            Paper {
                title: "Generative AI: A Review".to_string(),
                summary: NO_SUMMARY.to_string(),
                link: NO_LINK.to_string(),
            },
        ]
    );
}

#[test]
fn test_missing_fields_and_empty_results() {
    let papers = parse_search_response(r#"{"data": [{"paperId": "p3", "title": "Untitled no more"}]}"#)
        .unwrap();
    assert_eq!(papers[0].summary, NO_SUMMARY);
    assert_eq!(papers[0].link, NO_LINK);

    // no "data" key at all when nothing matched
    assert!(parse_search_response(r#"{"total": 0, "offset": 0}"#)
        .unwrap()
        .is_empty());

    // hits without a title are not papers
    assert!(parse_search_response(r#"{"data": [{"paperId": "p4", "title": null}]}"#)
        .unwrap()
        .is_empty());
}

#[test]
fn test_malformed_body_is_an_error() {
    assert!(parse_search_response("<html>Too Many Requests</html>").is_err());
}

#[tokio::test]
#[ignore]
async fn test_live_semantic_scholar_search() {
    let config = PaperSourceConfig {
        api_key: std::env::var("SEMANTIC_SCHOLAR_API_KEY").ok(),
        ..PaperSourceConfig::default()
    };
    let source = SemanticScholarSource::new(&config);
    let papers = source
        .search("Attention Is All You Need", 1)
        .await
        .unwrap();
    assert_eq!(papers.len(), 1);
    println!("{:?}", papers[0]);
}
