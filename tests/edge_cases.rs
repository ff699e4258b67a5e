//! Edge case tests: degenerate corpora, extreme indices, bad input.

use std::io::Write;

use wlsh::{
    weighted_jaccard, EngineConfig, LshIndex, QueryRequest, RetrieveError, SimilarityEngine,
    SparseVector,
};

// =============================================================================
// Degenerate corpora
// =============================================================================

#[test]
fn corpus_without_tokens() {
    // single-character and punctuation-only texts produce no terms
    let mut engine = SimilarityEngine::new(EngineConfig::default());
    let stats = engine
        .build(vec!["a".to_string(), "!!".to_string(), "".to_string()])
        .expect("build");
    assert_eq!(stats.num_documents, 3);
    assert_eq!(stats.dimension, 0);

    let hits = engine.query("anything at all", 10).expect("query");
    let ids: Vec<u32> = hits.iter().map(|h| h.id).collect();
    assert_eq!(ids, vec![0, 1, 2]);
    assert!(hits.iter().all(|h| h.similarity == 0.0));
}

#[test]
fn single_document_corpus() {
    let mut engine = SimilarityEngine::new(EngineConfig::default());
    engine.build(vec!["lone document".to_string()]).expect("build");

    for query in ["lone document", "unrelated words", "document"] {
        let hits = engine.query(query, 5).expect("query");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 0);
    }
}

#[test]
fn empty_corpus_is_rejected() {
    let config = EngineConfig::default();
    let result = LshIndex::<()>::build(&config, 10, Vec::new());
    assert!(matches!(result, Err(RetrieveError::EmptyCorpus)));
}

// =============================================================================
// Extreme indices
// =============================================================================

#[test]
#[cfg(target_pointer_width = "64")]
fn largest_index_signs_and_ranks() {
    let dim = u32::MAX as usize + 1;
    let far = SparseVector::from_pairs([(u32::MAX, 1.0), (0, 0.5)]).expect("vector");
    let near = SparseVector::from_pairs([(1, 2.0)]).expect("vector");

    let config = EngineConfig::default();
    let index = LshIndex::build(&config, dim, vec![(far.clone(), "far"), (near, "near")])
        .expect("build");

    let hits = index.query_vector(&far, 2).expect("query");
    assert_eq!(*hits[0].document, "far");
    assert_eq!(hits[0].similarity, 1.0);
}

#[test]
fn vector_outside_dimension_is_rejected() {
    let config = EngineConfig::default();
    let v = SparseVector::from_pairs([(4, 1.0)]).expect("vector");
    let built = LshIndex::build(&config, 4, vec![(v.clone(), ())]);
    assert!(matches!(built, Err(RetrieveError::InvalidSparseVector(_))));

    let ok = SparseVector::from_pairs([(3, 1.0)]).expect("vector");
    let index = LshIndex::build(&config, 4, vec![(ok, ())]).expect("build");
    assert!(matches!(
        index.query_vector(&v, 1),
        Err(RetrieveError::InvalidSparseVector(_))
    ));
}

// =============================================================================
// Invalid input
// =============================================================================

#[test]
fn invalid_sparse_vectors() {
    assert!(SparseVector::new(vec![0, 1], vec![1.0]).is_err());
    assert!(SparseVector::new(vec![2, 1], vec![1.0, 1.0]).is_err());
    assert!(SparseVector::new(vec![1, 1], vec![1.0, 1.0]).is_err());
    assert!(SparseVector::new(vec![0], vec![-1.0]).is_err());
    assert!(SparseVector::new(vec![0], vec![f32::NAN]).is_err());
    assert!(SparseVector::new(vec![0], vec![f32::INFINITY]).is_err());
}

#[test]
fn empty_vectors_score_zero() {
    let empty = SparseVector::empty();
    let v = SparseVector::from_pairs([(0, 1.0)]).expect("vector");
    assert_eq!(weighted_jaccard(&empty, &empty), 0.0);
    assert_eq!(weighted_jaccard(&empty, &v), 0.0);
}

#[test]
fn topk_zero_is_rejected() {
    let mut engine = SimilarityEngine::new(EngineConfig::default());
    engine.build(vec!["some text here".to_string()]).expect("build");
    assert!(matches!(
        engine.query("some text", 0),
        Err(RetrieveError::InvalidParameter(_))
    ));
}

#[test]
fn blank_search_is_rejected() {
    let mut engine = SimilarityEngine::new(EngineConfig::default());
    engine.build(vec!["some text here".to_string()]).expect("build");
    for text in ["", " ", "\t\n"] {
        assert!(matches!(
            engine.search(&QueryRequest::new(text, 3)),
            Err(RetrieveError::EmptyQuery)
        ));
    }
}

#[test]
fn zero_corpus_limit_is_rejected() {
    assert!(matches!(
        EngineConfig::default().with_corpus_limit(Some(0)),
        Err(RetrieveError::InvalidConfiguration(_))
    ));
}

// =============================================================================
// Records files
// =============================================================================

#[test]
fn json_array_with_missing_fields_and_limit() {
    let mut file = tempfile::Builder::new()
        .suffix(".json")
        .tempfile()
        .expect("tempfile");
    write!(
        file,
        r#"[
            {{"description": "Knee pain", "transcription": null}},
            {{"keywords": "asthma, wheezing"}},
            {{}}
        ]"#
    )
    .expect("write");

    let all = wlsh::records::load(file.path(), None).expect("load");
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].transcription, "");
    assert_eq!(all[2].medical_specialty, "");

    let limited = wlsh::records::load(file.path(), Some(2)).expect("load");
    assert_eq!(limited.len(), 2);
    assert_eq!(limited[1].keywords, "asthma, wheezing");
}

#[test]
fn malformed_json_line_reports_line_number() {
    let mut file = tempfile::Builder::new()
        .suffix(".jsonl")
        .tempfile()
        .expect("tempfile");
    writeln!(file, r#"{{"description": "ok"}}"#).expect("write");
    writeln!(file, "{{not json").expect("write");

    match wlsh::records::load(file.path(), None) {
        Err(RetrieveError::Parse(msg)) => assert!(msg.contains("line 2"), "{msg}"),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn missing_records_file_is_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let result = wlsh::records::load(dir.path().join("absent.json"), None);
    assert!(matches!(result, Err(RetrieveError::Io(_))));
}

#[test]
fn csv_without_keywords_column_builds_and_queries() {
    let mut file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("tempfile");
    write!(
        file,
        "description,medical_specialty,sample_name,transcription\n\
         Chest pain,Cardiology,Angina,Pain radiating to the left arm.\n\
         ,Dentistry,Cleaning,\n"
    )
    .expect("write");

    let records = wlsh::records::load(file.path(), None).expect("load");
    assert!(records.iter().all(|r| r.keywords.is_empty()));

    let mut engine = SimilarityEngine::new(EngineConfig::default());
    engine.build(records).expect("build");
    let hits = engine.query("chest pain", 1).expect("query");
    assert_eq!(hits[0].document.medical_specialty, "Cardiology");
}
