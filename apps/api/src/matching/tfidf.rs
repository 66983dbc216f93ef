//! TF-IDF vectorization and cosine similarity over small document sets.
//!
//! Weighting matches the usual text-mining defaults: lowercase tokens of two or
//! more word characters, English stop words removed, raw term counts, smooth
//! idf `ln((1 + n) / (1 + df)) + 1`, and L2-normalized rows.

use std::collections::{BTreeMap, HashSet};

use regex::Regex;

const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst",
    "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone", "anything", "anyway",
    "anywhere", "are", "around", "as", "at", "back", "be", "became", "because", "become",
    "becomes", "becoming", "been", "before", "beforehand", "behind", "being", "below", "beside",
    "besides", "between", "beyond", "bill", "both", "bottom", "but", "by", "call", "can", "cannot",
    "cant", "co", "computer", "con", "could", "couldnt", "cry", "de", "describe", "detail", "do",
    "done", "down", "due", "during", "each", "eg", "eight", "either", "eleven", "else",
    "elsewhere", "empty", "enough", "etc", "even", "ever", "every", "everyone", "everything",
    "everywhere", "except", "few", "fifteen", "fifty", "fill", "find", "fire", "first",
    "five", "for", "former", "formerly", "forty", "found", "four", "from", "front", "full",
    "further", "get", "give", "go", "had", "has", "hasnt", "have", "he", "hence", "her", "here",
    "hereafter", "hereby", "herein", "hereupon", "hers", "herself", "him", "himself", "his", "how",
    "however", "hundred", "i", "ie", "if", "in", "inc", "indeed", "interest", "into", "is", "it",
    "its", "itself", "keep", "last", "latter", "latterly", "least", "less", "ltd", "made", "many",
    "may", "me", "meanwhile", "might", "mill", "mine", "more", "moreover", "most", "mostly",
    "move", "much", "must", "my", "myself", "name", "namely", "neither", "never", "nevertheless",
    "next", "nine", "no", "nobody", "none", "noone", "nor", "not", "nothing", "now", "nowhere",
    "of", "off", "often", "on", "once", "one", "only", "onto", "or", "other", "others",
    "otherwise", "our", "ours", "ourselves", "out", "over", "own", "part", "per", "perhaps",
    "please", "put", "rather", "re", "same", "see", "seem", "seemed", "seeming", "seems",
    "serious", "several", "she", "should", "show", "side", "since", "sincere", "six", "sixty",
    "so", "some", "somehow", "someone", "something", "sometime", "sometimes", "somewhere", "still",
    "such", "system", "take", "ten", "than", "that", "the", "their", "them", "themselves", "then",
    "thence", "there", "thereafter", "thereby", "therefore", "therein", "thereupon", "these",
    "they", "thick", "thin", "third", "this", "those", "though", "three", "through",
    "throughout", "thru", "thus", "to", "together", "too", "top", "toward", "towards", "twelve",
    "twenty", "two", "un", "under", "until", "up", "upon", "us", "very", "via", "was", "we",
    "well", "were", "what", "whatever", "when", "whence", "whenever", "where", "whereafter",
    "whereas", "whereby", "wherein", "whereupon", "wherever", "whether", "which", "while",
    "whither", "who", "whoever", "whole", "whom", "whose", "why", "will", "with", "within",
    "without", "would", "yet", "you", "your", "yours", "yourself", "yourselves",
];

#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    token_pattern: Regex,
    stop_words: HashSet<&'static str>,
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TfidfVectorizer {
    pub fn new() -> Self {
        Self {
            token_pattern: Regex::new(r"\b\w\w+\b").expect("token pattern is a valid regex"),
            stop_words: ENGLISH_STOP_WORDS.iter().copied().collect(),
        }
    }

    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        self.token_pattern
            .find_iter(&lower)
            .map(|m| m.as_str())
            .filter(|t| !self.stop_words.contains(t))
            .map(String::from)
            .collect()
    }

    /// Fits the vocabulary on `docs` and returns one L2-normalized row per document.
    ///
    /// Rows share a column order (sorted vocabulary). An empty vocabulary gives
    /// empty rows.
    pub fn fit_transform(&self, docs: &[&str]) -> Vec<Vec<f64>> {
        let tokenized: Vec<Vec<String>> = docs.iter().map(|d| self.tokenize(d)).collect();

        let mut vocabulary: BTreeMap<&str, usize> = BTreeMap::new();
        for tokens in &tokenized {
            for t in tokens {
                vocabulary.entry(t.as_str()).or_insert(0);
            }
        }
        for (column, index) in vocabulary.values_mut().enumerate() {
            *index = column;
        }

        let n_docs = docs.len() as f64;
        let mut document_frequency = vec![0usize; vocabulary.len()];
        let mut counts = vec![vec![0.0_f64; vocabulary.len()]; docs.len()];
        for (row, tokens) in tokenized.iter().enumerate() {
            for t in tokens {
                counts[row][vocabulary[t.as_str()]] += 1.0;
            }
            for (column, count) in counts[row].iter().enumerate() {
                if *count > 0.0 {
                    document_frequency[column] += 1;
                }
            }
        }

        let idf: Vec<f64> = document_frequency
            .iter()
            .map(|&df| ((1.0 + n_docs) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        counts
            .into_iter()
            .map(|row| {
                let weighted: Vec<f64> = row.iter().zip(&idf).map(|(tf, w)| tf * w).collect();
                l2_normalize(weighted)
            })
            .collect()
    }
}

fn l2_normalize(mut v: Vec<f64>) -> Vec<f64> {
    let norm = v.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm > 0.0 {
        v.iter_mut().for_each(|x| *x /= norm);
    }
    v
}

/// Cosine similarity; 0.0 when either vector has no weight.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (dot / (norm_a * norm_b)).clamp(0.0, 1.0)
}

/// Fits a vectorizer jointly on the two texts and compares them.
pub fn text_similarity(vectorizer: &TfidfVectorizer, a: &str, b: &str) -> f64 {
    let rows = vectorizer.fit_transform(&[a, b]);
    cosine_similarity(&rows[0], &rows[1])
}
