// Match Scorer: TF-IDF cosine similarity per category, combined with fixed weights.

pub mod handlers;
pub mod scorer;
pub mod tfidf;
