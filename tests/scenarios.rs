use corpus_search::{Corpus, DocId, Document, Error, SearchEngine};

const LN2: f64 = std::f64::consts::LN_2;

fn two_documents() -> Corpus {
    let mut corpus = Corpus::new("animals");
    corpus.add_document(Document::new("first", "ann", "2024-01-01", "http://a/1", "cat dog cat"));
    corpus.add_document(Document::new("second", "bob", "2024-02-01", "http://a/2", "dog bird bird bird"));
    corpus
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn vocabulary_and_weights() {
    let engine = SearchEngine::new(&two_documents());

    let vocab = engine.vocabulary();
    assert_eq!(vocab.id("cat"), Some(0));
    assert_eq!(vocab.id("dog"), Some(1));
    assert_eq!(vocab.id("bird"), Some(2));

    assert_eq!(engine.tf_matrix().row(0).to_dense(), vec![2, 1, 0]);
    assert_eq!(engine.tf_matrix().row(1).to_dense(), vec![0, 1, 3]);

    let df: Vec<u64> = vocab.iter().map(|(_, s)| s.df).collect();
    assert_eq!(df, vec![1, 2, 1]);

    assert!(close(engine.idf("cat").unwrap(), LN2));
    assert!(close(engine.idf("bird").unwrap(), LN2));
    assert_eq!(engine.idf("dog"), Some(0.0));

    let row0 = engine.tfidf_matrix().row(0).to_dense();
    let row1 = engine.tfidf_matrix().row(1).to_dense();
    assert!(close(row0[0], 2.0 * LN2) && row0[1] == 0.0 && row0[2] == 0.0);
    assert!(row1[0] == 0.0 && row1[1] == 0.0 && close(row1[2], 3.0 * LN2));
}

#[test]
fn single_term_query_ranks_its_document_first() {
    let engine = SearchEngine::new(&two_documents());

    let query = engine.query_vector("cat");
    assert!(close(query.values()[0], LN2));
    assert_eq!(&query.values()[1..], &[0.0, 0.0]);

    let hits = engine.scores(&query);
    assert!(close(hits.list[0].score, 1.0));
    assert_eq!(hits.list[1].score, 0.0);

    let top = engine.rank("cat", 1);
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].doc_index, 0);
    assert_eq!(top[0].title, "first");
    assert_eq!(top[0].url, "http://a/1");
}

#[test]
fn keyword_search_stays_inside_each_document() {
    let mut corpus = two_documents();
    let hits = corpus.search("dog", 5).unwrap();
    assert_eq!(hits.len(), 2);

    assert_eq!(hits[0].doc_id, DocId(1));
    assert_eq!(hits[0].title, "first");
    assert_eq!(hits[0].snippet, "cat dog cat");

    assert_eq!(hits[1].doc_id, DocId(2));
    assert_eq!(hits[1].title, "second");
    assert_eq!(hits[1].snippet, "dog bird");
    assert!(hits.iter().all(|h| !h.snippet.contains('\n')));
}

#[test]
fn concordance_attributes_every_match() {
    let mut corpus = two_documents();
    let lines = corpus.concordance("b.rd", 5).unwrap();
    assert_eq!(lines.len(), 3);
    for line in &lines {
        assert_eq!(line.doc_id, DocId(2));
        assert_eq!(line.matched, "bird");
    }
    // a match may end where its document ends
    assert_eq!(corpus.concordance(r"bird\s*", 5).unwrap().len(), 3);
    let cats = corpus.concordance(r"cat\W?", 5).unwrap();
    assert_eq!(cats.len(), 2);
    assert!(cats.iter().all(|l| l.doc_id == DocId(1)));
    assert!(matches!(corpus.concordance("", 5), Err(Error::EmptyPattern)));
    assert!(matches!(corpus.concordance("(", 5), Err(Error::Pattern(_))));
}

#[test]
fn duplicate_title_keeps_the_first_document() {
    let mut corpus = two_documents();
    corpus.add_document(Document::new("first", "ann", "2024-03-01", "http://a/3", "a rewrite"));

    let ann = corpus.author("ann").unwrap();
    assert_eq!(ann.doc_count(), 1);
    assert_eq!(ann.production()["first"].text, "cat dog cat");
    // the store itself still holds all three
    assert_eq!(corpus.len(), 3);
}

#[test]
fn cache_follows_new_documents() {
    let mut corpus = two_documents();
    assert!(corpus.search("fish", 5).unwrap().is_empty());
    let id = corpus.add_document(Document::new("third", "cy", "2024-04-01", "", "one fish two fish"));
    assert_eq!(id, DocId(3));
    let hits = corpus.search("fish", 5).unwrap();
    assert_eq!(hits.len(), 2);
    assert!(hits.iter().all(|h| h.doc_id == id));
}

#[test]
fn save_and_load_rebuilds_the_same_engine() {
    let corpus = two_documents();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("corpus.tsv");
    corpus.save(&path).unwrap();

    let mut loaded = Corpus::new("reloaded");
    let report = loaded.load(&path).unwrap();
    assert_eq!(report.loaded, 2);
    assert_eq!(report.skipped, 0);

    let before = SearchEngine::new(&corpus);
    let after = SearchEngine::new(&loaded);
    assert_eq!(before.tf_matrix(), after.tf_matrix());
    assert_eq!(before.rank("bird", 2), after.rank("bird", 2));
}
