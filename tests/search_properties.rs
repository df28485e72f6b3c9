//! Cross-checks of the memoized search against exhaustive enumeration on
//! small random corpora.

use proptest::prelude::*;

use pangrams::cache::{Entry, Memo, NoMemo};
use pangrams::control::{Control, Hints};
use pangrams::corpus::Corpus;
use pangrams::letters::LetterSet;
use pangrams::problem::Problem;
use pangrams::report::Collect;
use pangrams::search::{Outcome, Search};

const ALPHABET: LetterSet = LetterSet::from_letters(b"ABCDEF");
const VOWELS: LetterSet = LetterSet::from_letters(b"AE");

const EIGHT: LetterSet = LetterSet::from_letters(b"ABCDEFGH");
const SPREAD_VOWELS: LetterSet = LetterSet::from_letters(b"ACE");

/// Every strictly increasing tuple of `slots` words from index `from` on
/// where each word adds a letter to the ones before it and together they
/// cover `mask`.
fn brute_force(corpus: &Corpus, mask: LetterSet, from: usize, slots: usize) -> Vec<Vec<usize>> {
    if slots == 0 {
        return if mask.is_empty() { vec![vec![]] } else { vec![] };
    }
    let mut found = Vec::new();
    for index in from..corpus.indices().end {
        let letters = corpus.word(index).letters;
        if !mask.intersects(letters) {
            continue;
        }
        for mut rest in brute_force(corpus, mask.without(letters), index + 1, slots - 1) {
            rest.insert(0, index);
            found.push(rest);
        }
    }
    found
}

fn texts(corpus: &Corpus, tuples: Vec<Vec<usize>>) -> Vec<Vec<String>> {
    tuples
        .into_iter()
        .map(|tuple| tuple.into_iter().map(|i| corpus.word(i).text.clone()).collect())
        .collect()
}

fn search<const DEPTH: usize, M: Memo>(
    problem: &Problem<DEPTH>,
    corpus: &Corpus,
    memo: M,
    hints: Hints<DEPTH>,
) -> (Collect, M) {
    let control = Control::new();
    let mut report = Collect::default();
    let mut search = Search::new(problem, corpus, memo, &control).with_hints(hints);
    assert_eq!(search.run(&mut report).unwrap(), Outcome::Exhausted);
    (report, search.into_memo())
}

fn corpus_strategy() -> impl Strategy<Value = Corpus> {
    prop::collection::vec("[A-F]{1,3}", 0..10)
        .prop_map(|words| Corpus::from_words(words).unwrap())
}

/// Two-letter words over A-H that all start with one of `SPREAD_VOWELS`, so
/// the vowel rule stays on. Four of them cover A-H only with zero slack.
fn vowel_corpus_strategy() -> impl Strategy<Value = Corpus> {
    prop::collection::vec("[ACE][A-H]", 0..16)
        .prop_map(|words| Corpus::from_words(words).unwrap())
}

fn check_against_brute_force<const DEPTH: usize>(corpus: &Corpus) -> Result<(), TestCaseError> {
    check_configuration::<DEPTH>(corpus, ALPHABET, VOWELS)
}

fn check_configuration<const DEPTH: usize>(
    corpus: &Corpus,
    alphabet: LetterSet,
    vowels: LetterSet,
) -> Result<(), TestCaseError> {
    let problem = Problem::<DEPTH>::new(alphabet, Some(vowels));
    let expected = texts(corpus, brute_force(corpus, alphabet, 1, DEPTH));

    let (cached, cache) = search(&problem, corpus, problem.cache().unwrap(), Hints::default());
    let (uncached, _) = search(&problem, corpus, NoMemo, Hints::default());

    prop_assert_eq!(&cached.coverings, &expected);
    prop_assert_eq!(&uncached.coverings, &expected);
    prop_assert_eq!(&cached.summaries, &uncached.summaries);

    // every recorded dead end really is one, for its index and beyond
    for level in 1..DEPTH {
        for bits in 0..(1u32 << alphabet.width()) {
            let mask = LetterSet::from_bits(bits);
            if let Entry::DeadEnd(index) = cache.lookup(level, mask) {
                let completions = brute_force(corpus, mask, index as usize + 1, DEPTH - level);
                prop_assert!(
                    completions.is_empty(),
                    "level {} mask {} dead from {} but completes with {:?}",
                    level,
                    mask,
                    index,
                    completions
                );
            }
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn test_depth_two_matches_brute_force(corpus in corpus_strategy()) {
        check_against_brute_force::<2>(&corpus)?;
    }

    #[test]
    fn test_depth_three_matches_brute_force(corpus in corpus_strategy()) {
        check_against_brute_force::<3>(&corpus)?;
    }

    #[test]
    fn test_vowel_rule_matches_brute_force(corpus in vowel_corpus_strategy()) {
        prop_assert!(corpus.all_intersect(SPREAD_VOWELS));
        check_configuration::<4>(&corpus, EIGHT, SPREAD_VOWELS)?;
    }

    #[test]
    fn test_runs_are_repeatable(corpus in corpus_strategy()) {
        let problem = Problem::<3>::new(ALPHABET, Some(VOWELS));
        let (first, _) = search(&problem, &corpus, problem.cache().unwrap(), Hints::default());
        let (second, _) = search(&problem, &corpus, problem.cache().unwrap(), Hints::default());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_first_level_skip_to_gives_tail(corpus in corpus_strategy(), pick in 0usize..10) {
        prop_assume!(!corpus.is_empty());
        let problem = Problem::<3>::new(ALPHABET, Some(VOWELS));
        let hint = corpus.word(1 + pick % corpus.len()).text.clone();

        let (full, _) = search(&problem, &corpus, problem.cache().unwrap(), Hints::default());
        let (resumed, _) = search(
            &problem,
            &corpus,
            problem.cache().unwrap(),
            Hints::new([hint.as_str()], hint.len()),
        );

        let tail: Vec<_> = full
            .coverings
            .iter()
            .filter(|tuple| tuple[0] >= hint)
            .cloned()
            .collect();
        prop_assert_eq!(resumed.coverings, tail);
        let summaries: Vec<_> = full
            .summaries
            .iter()
            .filter(|(word, _)| *word >= hint)
            .cloned()
            .collect();
        prop_assert_eq!(resumed.summaries, summaries);
    }

    #[test]
    fn test_lower_level_skip_to_keeps_cache_sound(
        corpus in corpus_strategy(),
        pick in 0usize..10,
    ) {
        prop_assume!(!corpus.is_empty());
        let problem = Problem::<3>::new(ALPHABET, None);
        let hint = corpus.word(1 + pick % corpus.len()).text.clone();
        let hints = || {
            let mut args = vec![String::new(); 3];
            args[1] = hint.clone();
            Hints::<3>::new(args, hint.len())
        };

        let (cached, _) = search(&problem, &corpus, problem.cache().unwrap(), hints());
        let (uncached, _) = search(&problem, &corpus, NoMemo, hints());
        prop_assert_eq!(cached, uncached);
    }
}

#[test]
fn test_covering_tuples_are_strictly_increasing() {
    let words = ["AB", "CD", "EF", "AC", "BD", "BE", "DF", "CF", "ABC", "DEF"];
    let corpus = Corpus::from_words(words).unwrap();
    let problem = Problem::<3>::new(ALPHABET, None);
    let (report, _) = search(&problem, &corpus, problem.cache().unwrap(), Hints::default());
    assert!(!report.coverings.is_empty());
    for tuple in &report.coverings {
        assert!(tuple.windows(2).all(|pair| pair[0] < pair[1]), "{tuple:?}");
    }
}

#[test]
fn test_cache_only_changes_work_done() {
    let words: Vec<String> = (0u8..6)
        .flat_map(|a| (a + 1..6).map(move |b| [b'A' + a, b'A' + b]))
        .map(|pair| String::from_utf8_lossy(&pair).into_owned())
        .collect();
    let corpus = Corpus::from_words(&words).unwrap();
    let problem = Problem::<3>::new(ALPHABET, None);

    let control = Control::new();
    let mut cached_report = Collect::default();
    let mut cached = Search::new(&problem, &corpus, problem.cache().unwrap(), &control);
    cached.run(&mut cached_report).unwrap();
    let mut plain_report = Collect::default();
    let mut plain = Search::new(&problem, &corpus, NoMemo, &control);
    plain.run(&mut plain_report).unwrap();

    // 15 pairs over six letters split into 15 perfect matchings
    assert_eq!(cached_report.coverings.len(), 15);
    assert_eq!(cached_report, plain_report);
    assert_eq!(plain.stats().hits, [0, 0, 0]);
    let total = |iterations: &[u64; 3]| iterations.iter().sum::<u64>();
    assert!(total(&cached.stats().iterations) <= total(&plain.stats().iterations));
}
