//! Covering-Set Search
//!
//! Enumerates every set of six five-letter words that together use all 26
//! letters. Runs single-threaded and can be steered while it runs:
//! SIGHUP prints the current position and stops, SIGUSR1 prints
//! diagnostics, SIGUSR2 pauses and resumes. A stopped search can be
//! restarted from its last position with skip-to words.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use signal_hook::consts::{SIGHUP, SIGUSR1, SIGUSR2};
use signal_hook::iterator::Signals;

use pangrams::cache::NoMemo;
use pangrams::control::{Control, Hints};
use pangrams::corpus::Corpus;
use pangrams::letters::{LetterSet, ALPHABET, VOWELS};
use pangrams::problem::{Problem, PANGRAM_DEPTH, PANGRAM_WORD_LEN};
use pangrams::report::TextReport;
use pangrams::search::{Outcome, Search};
use pangrams::{check, SearchOps};

/// Finds sets of six five-letter words covering the alphabet.
#[derive(Parser)]
#[command(name = "pangrams")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search for covering sets and print them as they are found.
    ///
    /// SIGHUP prints the current position as `LAST: ...` and stops. SIGUSR1
    /// logs the stack and counters. SIGUSR2 logs the same and pauses until
    /// the next SIGUSR2. These diagnostics are logged at info level, so a
    /// RUST_LOG filter stricter than info hides them.
    Search(SearchArgs),
    /// Validate saved search output and expand anagram variants.
    Check(CheckArgs),
}

#[derive(Args)]
struct SearchArgs {
    /// Word list, one word per line.
    #[arg(short, long, default_value = "words.txt")]
    words: PathBuf,

    /// Run without the prune cache.
    #[arg(long)]
    no_cache: bool,

    /// Letters every word is expected to contain one of.
    #[arg(long, default_value_t = VOWELS)]
    vowels: LetterSet,

    /// Disable the zero-slack vowel rule.
    #[arg(long)]
    no_vowel_rule: bool,

    /// Print words with their anagram variants, e.g. [VIGOR|VIRGO].
    #[arg(long)]
    anagrams: bool,

    /// Word to skip ahead to at each level, in order; empty to leave a
    /// level alone.
    #[arg(value_name = "SKIP_TO", num_args = 0..=PANGRAM_DEPTH)]
    skip_to: Vec<String>,
}

#[derive(Args)]
struct CheckArgs {
    /// Word list, one word per line.
    #[arg(short, long, default_value = "words.txt")]
    words: PathBuf,

    /// Saved search output to validate.
    results: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Search(args) => run_search(args),
        Command::Check(args) => run_check(args),
    }
}

fn load_corpus(path: &Path) -> Result<Corpus> {
    let corpus = Corpus::load(path, PANGRAM_WORD_LEN)
        .with_context(|| format!("failed to load word list {}", path.display()))?;
    log::info!(
        "{} words with distinct letter sets ({} spellings)",
        corpus.len(),
        corpus.spellings()
    );
    Ok(corpus)
}

/// Runs the search with signal control until it finishes or is stopped.
fn run_search(args: SearchArgs) -> Result<()> {
    let corpus = load_corpus(&args.words)?;
    let vowels = (!args.no_vowel_rule).then_some(args.vowels);
    let problem = Problem::<PANGRAM_DEPTH>::new(ALPHABET, vowels);
    let hints = Hints::new(&args.skip_to, PANGRAM_WORD_LEN);

    let control = Arc::new(Control::new());
    listen_for_signals(Arc::clone(&control))?;

    let mut search: Box<dyn SearchOps + '_> = if args.no_cache {
        Box::new(Search::new(&problem, &corpus, NoMemo, &control).with_hints(hints))
    } else {
        // allocated up front so a shortage stops us before searching
        let cache = problem.cache()?;
        Box::new(Search::new(&problem, &corpus, cache, &control).with_hints(hints))
    };

    let mut report = TextReport::new(io::stdout().lock()).expand_variants(args.anagrams);
    match search.run(&mut report)? {
        Outcome::Exhausted => log::info!("search complete"),
        Outcome::Stopped => log::info!("search stopped"),
    }
    Ok(())
}

/// Turns SIGHUP, SIGUSR1 and SIGUSR2 into stop, status and pause requests.
fn listen_for_signals(control: Arc<Control>) -> Result<()> {
    let mut signals =
        Signals::new([SIGHUP, SIGUSR1, SIGUSR2]).context("failed to install signal handlers")?;
    thread::spawn(move || {
        for signal in signals.forever() {
            match signal {
                SIGHUP => control.request_stop(),
                SIGUSR1 => control.request_status(),
                SIGUSR2 => control.request_pause(),
                _ => {}
            }
        }
    });
    Ok(())
}

/// Validates saved results and prints them in canonical form.
fn run_check(args: CheckArgs) -> Result<()> {
    let corpus = load_corpus(&args.words)?;
    let file = File::open(&args.results)
        .with_context(|| format!("failed to open {}", args.results.display()))?;

    let checked = check::check(BufReader::new(file), &corpus, ALPHABET, PANGRAM_DEPTH)?;
    for line in &checked.lines {
        println!("{line}");
    }
    if checked.rejected > 0 {
        log::warn!("{} lines rejected", checked.rejected);
    }
    log::info!("Total covering sets counting anagrams: {}", checked.total);
    log::info!("words used: {} / {}", checked.words_used, corpus.len());
    Ok(())
}
