//! Request-builder properties: query-string round trips, optional omission,
//! and the pagination ceiling. No HTTP involved.

use entrez_client::{
    EntrezError, FetchRequest, HistorySession, IdType, RetMode, RetType, SearchRequest, SortOrder,
    Strand, RETMAX_CEILING,
};
use rstest::rstest;

const SEARCH_OPTIONAL_KEYS: &[&str] = &[
    "WebEnv", "query_key", "retstart", "retmax", "sort", "datetype", "mindate", "maxdate",
    "rettype", "usehistory",
];

const FETCH_OPTIONAL_KEYS: &[&str] = &[
    "WebEnv",
    "query_key",
    "retstart",
    "retmax",
    "rettype",
    "retmode",
    "strand",
    "seq_start",
    "seq_stop",
    "idtype",
];

fn keys_of(query: &str) -> Vec<String> {
    query
        .split('&')
        .map(|pair| pair.split('=').next().unwrap().to_string())
        .collect()
}

#[test]
fn test_search_round_trip_contains_only_requested_keys() {
    let query = SearchRequest::new("pubmed", "cancer")
        .retmax(50)
        .build_query()
        .unwrap();

    assert!(query.contains("db=pubmed"));
    assert!(query.contains("term=cancer"));
    assert!(query.contains("retmax=50"));
    assert_eq!(keys_of(&query), vec!["db", "term", "retmax"]);
}

#[test]
fn test_minimal_search_omits_every_optional_key() {
    let query = SearchRequest::new("pubmed", "cancer").build_query().unwrap();
    for key in SEARCH_OPTIONAL_KEYS {
        assert!(
            !keys_of(&query).iter().any(|k| k == key),
            "unset optional '{key}' leaked into query: {query}"
        );
    }
    assert_eq!(keys_of(&query), vec!["db", "term"]);
}

#[test]
fn test_minimal_fetch_omits_every_optional_key() {
    let query = FetchRequest::new("pubmed")
        .ids(["31978945"])
        .build_query()
        .unwrap();
    for key in FETCH_OPTIONAL_KEYS {
        assert!(
            !keys_of(&query).iter().any(|k| k == key),
            "unset optional '{key}' leaked into query: {query}"
        );
    }
    assert_eq!(keys_of(&query), vec!["db", "id"]);
}

#[test]
fn test_each_search_optional_appears_when_set() {
    let session = HistorySession::new("MCID_abc", "2");
    let query = SearchRequest::new("pubmed", "cancer")
        .session(&session)
        .retstart(40)
        .retmax(20)
        .sort(SortOrder::Author)
        .datetype("pdat")
        .mindate("2008")
        .maxdate("2010")
        .rettype(RetType::Count)
        .use_history()
        .build_query()
        .unwrap();

    for key in SEARCH_OPTIONAL_KEYS {
        assert!(
            keys_of(&query).iter().any(|k| k == key),
            "set optional '{key}' missing from query: {query}"
        );
    }
    assert!(query.contains("sort=author"));
    assert!(query.contains("rettype=count"));
    assert!(query.contains("usehistory=y"));
}

#[test]
fn test_each_fetch_optional_appears_when_set() {
    let query = FetchRequest::new("nuccore")
        .ids(["NC_000913.3"])
        .retstart(0)
        .retmax(10)
        .rettype("fasta")
        .retmode(RetMode::Xml)
        .strand(Strand::Plus)
        .seq_start(1)
        .seq_stop(100)
        .idtype(IdType::Accession)
        .build_query()
        .unwrap();

    assert!(query.contains("retstart=0"));
    assert!(query.contains("retmax=10"));
    assert!(query.contains("rettype=fasta"));
    assert!(query.contains("retmode=xml"));
    assert!(query.contains("strand=1"));
    assert!(query.contains("seq_start=1"));
    assert!(query.contains("seq_stop=100"));
    assert!(query.contains("idtype=acc"));
}

#[rstest]
#[case(10_001)]
#[case(50_000)]
#[case(usize::MAX)]
fn test_retmax_above_ceiling_rejected(#[case] retmax: usize) {
    let err = SearchRequest::new("pubmed", "cancer")
        .retmax(retmax)
        .build_query()
        .unwrap_err();
    match err {
        EntrezError::InvalidParameter { parameter, value } => {
            assert_eq!(parameter, "retmax");
            assert_eq!(value, retmax.to_string());
        }
        other => panic!("expected InvalidParameter, got {other:?}"),
    }

    let err = FetchRequest::new("pubmed")
        .ids(["1"])
        .retmax(retmax)
        .build_query()
        .unwrap_err();
    assert!(err.to_string().contains("retmax"));
}

#[rstest]
#[case(0)]
#[case(500)]
#[case(RETMAX_CEILING)]
fn test_retmax_at_or_below_ceiling_accepted(#[case] retmax: usize) {
    assert!(SearchRequest::new("pubmed", "cancer")
        .retmax(retmax)
        .build_query()
        .is_ok());
}

#[rstest]
#[case::sort_outside_domain("alphabetical")]
#[case::sort_typo("pubdate+desc")]
fn test_sort_values_outside_domain_fail_parse(#[case] value: &str) {
    let err = value.parse::<SortOrder>().unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("sort"));
    assert!(msg.contains(value));
}

#[rstest]
#[case("xml")]
#[case("json")]
fn test_supported_formats_parse(#[case] value: &str) {
    assert!(value.parse::<RetMode>().is_ok());
}

#[test]
fn test_unsupported_format_names_the_value() {
    let err = "csv".parse::<RetMode>().unwrap_err();
    match err {
        EntrezError::UnsupportedFormat { value } => assert_eq!(value, "csv"),
        other => panic!("expected UnsupportedFormat, got {other:?}"),
    }
}
