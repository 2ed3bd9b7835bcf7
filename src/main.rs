use std::{env, fs::File, io, process::ExitCode};

use corpus_search::{Corpus, Result, SearchConfig, SearchEngine};
use tracing::debug;
use tracing_subscriber::EnvFilter;

const CONFIG_ENV: &str = "CORPUS_SEARCH_CONFIG";

const USAGE: &str = "usage: corpus-search <corpus.tsv> <command> [args]

commands:
  info                 corpus summary
  search <keyword>     whole-word search with snippets
  concord <pattern> [out.tsv]
                       regex concordance, optionally exported as TSV
  rank <query...>      TF-IDF ranked documents
  stats [n]            most frequent terms
  recent [n]           newest documents
  titles [n]           documents by title
  author <name>        documents of one author";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() < 2 {
        eprintln!("{}", USAGE);
        return ExitCode::from(2);
    }

    match run(&args[0], &args[1], &args[2..]) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => {
            eprintln!("{}", USAGE);
            ExitCode::from(2)
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_config() -> Result<SearchConfig> {
    match env::var(CONFIG_ENV) {
        Ok(path) => {
            debug!(path = %path, "loading config");
            SearchConfig::load(path)
        }
        Err(_) => Ok(SearchConfig::default()),
    }
}

fn count_arg(rest: &[String], default: usize) -> usize {
    rest.first().and_then(|s| s.parse().ok()).unwrap_or(default)
}

/// `Ok(false)` means the command line was not understood.
fn run(path: &str, command: &str, rest: &[String]) -> Result<bool> {
    let config = load_config()?;
    let mut corpus = Corpus::with_config(path, &config)?;
    corpus.load(path)?;

    match command {
        "info" => {
            println!("{}", corpus);
        }
        "search" => {
            let Some(keyword) = rest.first() else { return Ok(false) };
            for hit in corpus.search(keyword, config.context)? {
                println!("[{}] {}: {}", hit.doc_id, hit.title, hit.snippet);
            }
        }
        "concord" => {
            let Some(pattern) = rest.first() else { return Ok(false) };
            let lines = corpus.concordance(pattern, config.context)?;
            match rest.get(1) {
                Some(out) => {
                    lines.write_tsv(io::BufWriter::new(File::create(out)?))?;
                    println!("{} lines written to {}", lines.len(), out);
                }
                None => print!("{}", lines),
            }
        }
        "rank" => {
            if rest.is_empty() {
                return Ok(false);
            }
            let engine = SearchEngine::new(&corpus);
            for (i, doc) in engine.rank(&rest.join(" "), config.top_k).iter().enumerate() {
                println!("{:>2}. {:.4}  {} ({}, {})", i + 1, doc.score, doc.title, doc.author, doc.date);
            }
        }
        "stats" => {
            let engine = SearchEngine::new(&corpus);
            println!(
                "{} documents, {} terms, {} nonzero tf entries",
                engine.doc_num(),
                engine.vocabulary().len(),
                engine.tf_matrix().nnz()
            );
            for (term, freq) in engine.most_frequent(count_arg(rest, 10)) {
                println!("{:>8}  {}", freq, term);
            }
        }
        "recent" => {
            for doc in corpus.sorted_by_date(count_arg(rest, config.top_k))? {
                println!("{}", doc);
            }
        }
        "titles" => {
            for doc in corpus.sorted_by_title(count_arg(rest, config.top_k)) {
                println!("{}", doc.title);
            }
        }
        "author" => {
            if rest.is_empty() {
                return Ok(false);
            }
            let name = rest.join(" ");
            match corpus.author(&name) {
                Some(author) => {
                    println!("{}", author);
                    println!("average length: {:.1} words", author.average_word_count());
                    for title in author.production().keys() {
                        println!("  {}", title);
                    }
                }
                None => println!("no author named {:?}", name),
            }
        }
        _ => return Ok(false),
    }
    Ok(true)
}
